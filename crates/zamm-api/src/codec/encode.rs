//! Encoders for primitive values and the record writer.
//!
//! Encoding mirrors decoding with one deliberate asymmetry: optional fields
//! without a value are omitted from the output object rather than written as
//! `null`.

use serde_json::{Map, Number, Value};

use super::Encode;
use super::errors::{EncodeError, EncodeFailure};

impl Encode for str {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::String(self.to_owned()))
    }
}

impl Encode for String {
    fn encode(&self) -> Result<Value, EncodeError> {
        self.as_str().encode()
    }
}

impl Encode for bool {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Bool(*self))
    }
}

impl Encode for i64 {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Number(Number::from(*self)))
    }
}

impl Encode for f64 {
    fn encode(&self) -> Result<Value, EncodeError> {
        Number::from_f64(*self)
            .map(Value::Number)
            .ok_or_else(|| EncodeError::new(EncodeFailure::NonFiniteFloat(*self)))
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self) -> Result<Value, EncodeError> {
        self.iter()
            .enumerate()
            .map(|(position, element)| {
                element
                    .encode()
                    .map_err(|error| error.within_index(position))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self) -> Result<Value, EncodeError> {
        self.as_slice().encode()
    }
}

/// Builds a JSON object one field at a time.
#[derive(Debug, Default)]
pub struct RecordWriter {
    fields: Map<String, Value>,
}

impl RecordWriter {
    /// Starts an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits a field that is always present.
    ///
    /// # Errors
    ///
    /// Propagates the field's encoding failure with its name prepended.
    pub fn required<T>(mut self, name: &'static str, value: &T) -> Result<Self, EncodeError>
    where
        T: Encode + ?Sized,
    {
        let encoded = value.encode().map_err(|error| error.within_field(name))?;
        self.fields.insert(name.to_owned(), encoded);
        Ok(self)
    }

    /// Emits a field only when it holds a value.
    ///
    /// # Errors
    ///
    /// Propagates the field's encoding failure with its name prepended.
    pub fn optional<T>(self, name: &'static str, value: Option<&T>) -> Result<Self, EncodeError>
    where
        T: Encode + ?Sized,
    {
        match value {
            Some(present) => self.required(name, present),
            None => Ok(self),
        }
    }

    /// Completes the record.
    pub fn finish(self) -> Value {
        Value::Object(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::codec::{FieldPath, PathSegment};

    #[test]
    fn omits_absent_optional_fields() {
        let record = RecordWriter::new()
            .required("name", "World")
            .and_then(|writer| writer.optional::<f64>("temperature", None))
            .expect("encode")
            .finish();
        assert_eq!(record, json!({ "name": "World" }));
    }

    #[test]
    fn emits_present_optional_fields() {
        let record = RecordWriter::new()
            .optional("temperature", Some(&0.5))
            .expect("encode")
            .finish();
        assert_eq!(record, json!({ "temperature": 0.5 }));
    }

    #[test]
    fn integers_stay_integers() {
        assert_eq!(42_i64.encode().expect("encode"), json!(42));
    }

    #[test]
    fn non_finite_floats_report_their_location() {
        let error = RecordWriter::new()
            .required("costs", &vec![1.0, f64::INFINITY])
            .expect_err("infinity has no JSON form");
        let expected = vec![PathSegment::Field("costs"), PathSegment::Index(1)];
        assert_eq!(error.path().segments(), expected.as_slice());
        assert!(matches!(
            error.failure(),
            EncodeFailure::NonFiniteFloat(value) if value.is_infinite()
        ));
        assert_ne!(error.path(), &FieldPath::default());
    }
}
