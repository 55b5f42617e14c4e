use serde_json::Value;
use tracing::debug;

use super::errors::DispatchError;
use crate::registry::MethodRegistry;

/// Tracing target for dispatch operations.
pub const DISPATCH_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::dispatch");

/// Resolves, decodes, invokes, and encodes one command at a time.
///
/// The dispatcher holds no state of its own, so repeated calls are
/// independent.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'r> {
    registry: &'r MethodRegistry,
}

impl<'r> Dispatcher<'r> {
    /// Creates a dispatcher over `registry`.
    pub const fn new(registry: &'r MethodRegistry) -> Self {
        Self { registry }
    }

    /// Runs `method` with the JSON-encoded `arguments`.
    ///
    /// The method name is resolved before the arguments are looked at, so
    /// an unknown name is always reported as such even when the arguments
    /// are malformed.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MethodNotFound`] for unknown names,
    /// [`DispatchError::MalformedInput`] when `arguments` is not JSON, and
    /// the descriptor's decode, handler, or encode failure otherwise.
    pub fn dispatch(&self, method: &str, arguments: &str) -> Result<String, DispatchError> {
        let descriptor = self.registry.resolve(method)?;
        debug!(
            target: DISPATCH_TARGET,
            method = descriptor.name(),
            request_schema = descriptor.request_schema(),
            "resolved method"
        );

        let raw: Value = serde_json::from_str(arguments).map_err(DispatchError::malformed_input)?;
        let response = descriptor.invoke(&raw)?;
        debug!(
            target: DISPATCH_TARGET,
            method = descriptor.name(),
            response_schema = descriptor.response_schema(),
            "method completed"
        );

        Ok(response.to_string())
    }
}
