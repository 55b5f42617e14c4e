//! Typed value codec.
//!
//! Converts between loosely typed [`serde_json::Value`] trees and the
//! statically declared request and response records. Every record states,
//! field by field, which decoder applies and whether the field is required,
//! so no runtime type inspection is needed beyond matching on the JSON kind.
//!
//! The [`Decode`] and [`Encode`] capabilities are implemented per record;
//! [`Schema`] ties both directions to a schema name used in diagnostics.

mod decode;
mod encode;
mod errors;

use serde_json::Value;

pub use decode::{
    Decoder, RecordReader, decode_bool, decode_float, decode_int, decode_list, decode_optional,
    decode_string, decode_union,
};
pub use encode::RecordWriter;
pub use errors::{
    DecodeError, EncodeError, EncodeFailure, Expected, FieldPath, JsonKind, PathSegment,
};

/// Builds a typed value from raw JSON.
pub trait Decode: Sized {
    /// Decodes `raw`, failing on the first field that does not match.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] naming the offending field and the kind it
    /// was expected to hold.
    fn decode(raw: &Value) -> Result<Self, DecodeError>;
}

/// Renders a typed value as raw JSON.
pub trait Encode {
    /// Encodes the value, omitting optional fields that are absent.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] when a value has no JSON representation.
    fn encode(&self) -> Result<Value, EncodeError>;
}

/// A named record that can be decoded and encoded.
///
/// Encoding a decoded value and decoding the result yields the original
/// value; optional fields that were `null` on input come back absent.
pub trait Schema: Decode + Encode {
    /// Schema name reported in diagnostics.
    const NAME: &'static str;
}
