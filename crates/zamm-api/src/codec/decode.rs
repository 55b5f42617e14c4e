//! Primitive decoders and the record reader.
//!
//! Each decoder accepts exactly one JSON shape and never coerces between
//! kinds: strings are not numbers, booleans are not integers. Composite
//! decoders (`decode_list`, `decode_optional`, `decode_union`) take the
//! element decoder as an argument so every field of a schema names its
//! decoder explicitly.

use serde_json::{Map, Number, Value};

use super::errors::{DecodeError, Expected, JsonKind};

/// Function-pointer decoder, used where alternatives are listed in order.
pub type Decoder<T> = fn(&Value) -> Result<T, DecodeError>;

/// Accepts a JSON string.
///
/// # Errors
///
/// Returns a type mismatch for every other kind.
pub fn decode_string(raw: &Value) -> Result<String, DecodeError> {
    match raw {
        Value::String(text) => Ok(text.clone()),
        _ => Err(DecodeError::mismatch(JsonKind::String, raw)),
    }
}

/// Accepts a JSON boolean.
///
/// # Errors
///
/// Returns a type mismatch for every other kind, including `0`, `1`, and
/// `"true"`.
pub fn decode_bool(raw: &Value) -> Result<bool, DecodeError> {
    match raw {
        Value::Bool(flag) => Ok(*flag),
        _ => Err(DecodeError::mismatch(JsonKind::Boolean, raw)),
    }
}

/// Accepts a JSON number whose fractional part is zero.
///
/// `3` and `3.0` both decode to `3`. Values outside the `i64` range are
/// rejected.
///
/// # Errors
///
/// Returns a type mismatch for booleans, non-numbers, fractional numbers,
/// and out-of-range integers.
pub fn decode_int(raw: &Value) -> Result<i64, DecodeError> {
    match raw {
        Value::Number(number) => {
            integral(number).ok_or_else(|| DecodeError::mismatch(JsonKind::Integer, raw))
        }
        _ => Err(DecodeError::mismatch(JsonKind::Integer, raw)),
    }
}

/// Accepts any JSON number and widens it to `f64`.
///
/// # Errors
///
/// Returns a type mismatch for booleans and non-numbers.
pub fn decode_float(raw: &Value) -> Result<f64, DecodeError> {
    match raw {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| DecodeError::mismatch(JsonKind::Number, raw)),
        _ => Err(DecodeError::mismatch(JsonKind::Number, raw)),
    }
}

/// Accepts a JSON array and decodes every element in order.
///
/// # Errors
///
/// Returns a type mismatch when `raw` is not an array, or the first element
/// failure with its index prepended to the path.
pub fn decode_list<T, F>(decode: F, raw: &Value) -> Result<Vec<T>, DecodeError>
where
    F: Fn(&Value) -> Result<T, DecodeError>,
{
    let Value::Array(elements) = raw else {
        return Err(DecodeError::mismatch(JsonKind::Array, raw));
    };
    elements
        .iter()
        .enumerate()
        .map(|(position, element)| decode(element).map_err(|error| error.within_index(position)))
        .collect()
}

/// Tries `decode` first and falls back to accepting an explicit `null`.
///
/// # Errors
///
/// Returns the primary decoder's failure, widened to "or null", when `raw`
/// is neither accepted by `decode` nor `null`.
pub fn decode_optional<T, F>(decode: F, raw: &Value) -> Result<Option<T>, DecodeError>
where
    F: FnOnce(&Value) -> Result<T, DecodeError>,
{
    match decode(raw) {
        Ok(value) => Ok(Some(value)),
        Err(_) if raw.is_null() => Ok(None),
        Err(error) => Err(error.or_null()),
    }
}

/// Tries each decoder in declaration order and returns the first success.
///
/// Later alternatives are never consulted once one matches, so the order of
/// `decoders` is part of the schema.
///
/// # Errors
///
/// Returns an error listing every alternative when none of them accepts
/// `raw`.
pub fn decode_union<T>(decoders: &[Decoder<T>], raw: &Value) -> Result<T, DecodeError> {
    let mut alternatives = Vec::with_capacity(decoders.len());
    for decode in decoders {
        match decode(raw) {
            Ok(value) => return Ok(value),
            Err(error) => alternatives.push(error.into_expected()),
        }
    }
    Err(DecodeError::expecting(Expected::AnyOf(alternatives), raw))
}

/// Field-by-field reader over a JSON object.
///
/// Fields are decoded in the order the schema asks for them, so the first
/// failing field in declaration order is the one reported.
#[derive(Debug, Clone, Copy)]
pub struct RecordReader<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RecordReader<'a> {
    /// Opens a reader over `raw`.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch when `raw` is not an object.
    pub fn new(raw: &'a Value) -> Result<Self, DecodeError> {
        match raw {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(DecodeError::mismatch(JsonKind::Object, raw)),
        }
    }

    /// Decodes a field that must be present.
    ///
    /// # Errors
    ///
    /// Fails when the key is absent or its value is rejected by `decode`.
    pub fn required<T, F>(&self, name: &'static str, decode: F) -> Result<T, DecodeError>
    where
        F: FnOnce(&Value) -> Result<T, DecodeError>,
    {
        match self.fields.get(name) {
            Some(raw) => decode(raw).map_err(|error| error.within_field(name)),
            None => Err(missing_field(decode).within_field(name)),
        }
    }

    /// Decodes a field that may be absent or `null`; both yield `None`.
    ///
    /// # Errors
    ///
    /// Fails when the key holds a non-null value rejected by `decode`.
    pub fn optional<T, F>(&self, name: &'static str, decode: F) -> Result<Option<T>, DecodeError>
    where
        F: FnOnce(&Value) -> Result<T, DecodeError>,
    {
        match self.fields.get(name) {
            Some(raw) => decode_optional(decode, raw).map_err(|error| error.within_field(name)),
            None => Ok(None),
        }
    }
}

/// Describes an absent required key using the expectation of its decoder.
fn missing_field<T, F>(decode: F) -> DecodeError
where
    F: FnOnce(&Value) -> Result<T, DecodeError>,
{
    match decode(&Value::Null) {
        Err(error) => error.missing(),
        Ok(_) => DecodeError::mismatch(JsonKind::Null, &Value::Null).missing(),
    }
}

fn integral(number: &Number) -> Option<i64> {
    if let Some(value) = number.as_i64() {
        return Some(value);
    }
    let value = number.as_f64()?;
    // i64::MAX rounds up to 2^63 as f64, so the upper bound is exclusive.
    let in_range = value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64;
    in_range.then_some(value as i64)
}
