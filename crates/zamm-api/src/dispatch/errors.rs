//! Error taxonomy for command dispatch.
//!
//! Every variant reaches the process boundary unchanged; nothing here is
//! retried or recovered locally.

use std::error::Error as StdError;

use thiserror::Error;

use crate::codec::{DecodeError, EncodeError};

/// Boxed failure reported by a handler.
pub type HandlerError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors surfaced while dispatching a single command.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No method is registered under the requested name.
    #[error("unknown method '{method}' (available: {available})")]
    MethodNotFound { method: String, available: String },

    /// The argument string is not valid JSON.
    #[error("malformed JSON arguments: {message}")]
    MalformedInput {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// The arguments parsed but do not match the method's request schema.
    #[error("invalid arguments for '{method}' ({schema}): {source}")]
    InvalidArguments {
        method: &'static str,
        schema: &'static str,
        #[source]
        source: DecodeError,
    },

    /// The handler itself failed.
    #[error("method '{method}' failed: {source}")]
    HandlerFailure {
        method: &'static str,
        #[source]
        source: HandlerError,
    },

    /// The handler returned a value its response schema cannot encode.
    #[error("response from '{method}' does not fit {schema}: {source}")]
    EncodingInvariantViolation {
        method: &'static str,
        schema: &'static str,
        #[source]
        source: EncodeError,
    },
}

impl DispatchError {
    /// Returns the process exit status for this error.
    ///
    /// Caller mistakes return 2 (usage), handler failures return 1, and
    /// encoding violations return 70 (internal software error).
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::MethodNotFound { .. }
            | Self::MalformedInput { .. }
            | Self::InvalidArguments { .. } => 2,
            Self::HandlerFailure { .. } => 1,
            Self::EncodingInvariantViolation { .. } => 70,
        }
    }

    /// Creates an unknown method error.
    pub fn method_not_found<'a>(
        method: impl Into<String>,
        available: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::MethodNotFound {
            method: method.into(),
            available: available.into_iter().collect::<Vec<_>>().join(", "),
        }
    }

    /// Creates a malformed input error from a parser failure.
    pub fn malformed_input(source: serde_json::Error) -> Self {
        Self::MalformedInput {
            message: source.to_string(),
            source,
        }
    }

    /// Creates an invalid arguments error.
    pub fn invalid_arguments(
        method: &'static str,
        schema: &'static str,
        source: DecodeError,
    ) -> Self {
        Self::InvalidArguments {
            method,
            schema,
            source,
        }
    }

    /// Wraps a handler failure without altering it.
    pub fn handler_failure(method: &'static str, source: impl Into<HandlerError>) -> Self {
        Self::HandlerFailure {
            method,
            source: source.into(),
        }
    }

    /// Creates an encoding invariant violation.
    pub fn encoding_invariant_violation(
        method: &'static str,
        schema: &'static str,
        source: EncodeError,
    ) -> Self {
        Self::EncodingInvariantViolation {
            method,
            schema,
            source,
        }
    }
}
