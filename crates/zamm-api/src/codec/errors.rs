//! Failure types raised while converting between raw JSON and typed values.
//!
//! Decoding stops at the first failure. Errors are created without location
//! information by the primitive decoders and gain path segments as they
//! propagate outwards through lists and records, so the reported path reads
//! from the outermost record down to the offending value.

use std::fmt;

use serde_json::Value;
use strum::Display;
use thiserror::Error;

/// Coarse JSON shape of a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum JsonKind {
    /// Explicit `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// A number without a fractional part.
    Integer,
    /// Any JSON number.
    Number,
    /// A JSON string.
    String,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
    /// The key was not present in its enclosing object.
    Missing,
}

impl JsonKind {
    /// Classifies a raw JSON value.
    pub fn of(raw: &Value) -> Self {
        match raw {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(number) if number.is_i64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

/// Shape a decoder was prepared to accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// A single JSON kind.
    Kind(JsonKind),
    /// The inner expectation, or an explicit `null`.
    Nullable(Box<Expected>),
    /// Any of the listed alternatives, in the order they were tried.
    AnyOf(Vec<Expected>),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => write!(f, "{kind}"),
            Self::Nullable(inner) => write!(f, "{inner} or null"),
            Self::AnyOf(alternatives) => {
                f.write_str("one of [")?;
                for (index, alternative) in alternatives.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{alternative}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// One step in a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Named field of a record.
    Field(&'static str),
    /// Position within a list.
    Index(usize),
}

/// Location of a value relative to the top-level document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// Path segments from the outermost record inwards.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns true when the path points at the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    fn prepend(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (index, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if index == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(position) => write!(f, "[{position}]")?,
            }
        }
        Ok(())
    }
}

/// A raw value did not match the shape its decoder requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: expected {expected}, found {found}")]
pub struct DecodeError {
    path: FieldPath,
    expected: Expected,
    found: JsonKind,
}

impl DecodeError {
    /// Creates a type mismatch for a value at the current position.
    pub fn mismatch(expected: JsonKind, raw: &Value) -> Self {
        Self {
            path: FieldPath::default(),
            expected: Expected::Kind(expected),
            found: JsonKind::of(raw),
        }
    }

    /// Creates an error with a composite expectation.
    pub fn expecting(expected: Expected, raw: &Value) -> Self {
        Self {
            path: FieldPath::default(),
            expected,
            found: JsonKind::of(raw),
        }
    }

    /// Location of the offending value.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Shape the decoder required.
    pub fn expected(&self) -> &Expected {
        &self.expected
    }

    /// Shape that was actually present.
    pub fn found(&self) -> JsonKind {
        self.found
    }

    #[must_use]
    pub(crate) fn within_field(mut self, name: &'static str) -> Self {
        self.path.prepend(PathSegment::Field(name));
        self
    }

    #[must_use]
    pub(crate) fn within_index(mut self, position: usize) -> Self {
        self.path.prepend(PathSegment::Index(position));
        self
    }

    #[must_use]
    pub(crate) fn missing(mut self) -> Self {
        self.found = JsonKind::Missing;
        self
    }

    #[must_use]
    pub(crate) fn or_null(mut self) -> Self {
        self.expected = Expected::Nullable(Box::new(self.expected));
        self
    }

    pub(crate) fn into_expected(self) -> Expected {
        self.expected
    }
}

/// Reason a typed value could not be represented as JSON.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeFailure {
    /// JSON has no representation for NaN or infinities.
    #[error("cannot encode non-finite float {0}")]
    NonFiniteFloat(f64),
}

/// A typed value could not be encoded against its declared schema.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{path}: {failure}")]
pub struct EncodeError {
    path: FieldPath,
    failure: EncodeFailure,
}

impl EncodeError {
    /// Creates an encoding failure for the value at the current position.
    pub fn new(failure: EncodeFailure) -> Self {
        Self {
            path: FieldPath::default(),
            failure,
        }
    }

    /// Location of the value that could not be encoded.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Underlying reason.
    pub fn failure(&self) -> &EncodeFailure {
        &self.failure
    }

    #[must_use]
    pub(crate) fn within_field(mut self, name: &'static str) -> Self {
        self.path.prepend(PathSegment::Field(name));
        self
    }

    #[must_use]
    pub(crate) fn within_index(mut self, position: usize) -> Self {
        self.path.prepend(PathSegment::Index(position));
        self
    }
}
