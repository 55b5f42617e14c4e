//! Binding of a request schema, a response schema, and a handler.
//!
//! [`ApiMethod`] is the typed form: its associated types fix the request and
//! response schemas, so a handler whose signature does not match cannot be
//! registered. [`MethodDescriptor`] erases those types behind a JSON-in,
//! JSON-out call so the registry can hold heterogeneous methods.

use std::error::Error;
use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;

use crate::codec::{Decode, Encode, Schema};
use crate::dispatch::DispatchError;

/// A method callable through the bridge.
pub trait ApiMethod: Send + Sync {
    /// Decoded arguments.
    type Request: Schema;
    /// Encoded result.
    type Response: Schema;
    /// Failure reported by the handler.
    type Error: Error + Send + Sync + 'static;

    /// Name used on the command line.
    fn name(&self) -> &'static str;

    /// Runs the handler.
    ///
    /// # Errors
    ///
    /// Returns whatever the handler reports; the dispatcher forwards it as a
    /// handler failure without interpretation.
    fn invoke(&self, request: Self::Request) -> Result<Self::Response, Self::Error>;
}

/// Adapts a plain function into an [`ApiMethod`].
pub struct FnMethod<Req, Resp, F> {
    name: &'static str,
    handler: F,
    schemas: PhantomData<fn(Req) -> Resp>,
}

impl<Req, Resp, F> FnMethod<Req, Resp, F> {
    /// Wraps `handler` under `name`.
    pub const fn new(name: &'static str, handler: F) -> Self {
        Self {
            name,
            handler,
            schemas: PhantomData,
        }
    }
}

impl<Req, Resp, E, F> ApiMethod for FnMethod<Req, Resp, F>
where
    Req: Schema,
    Resp: Schema,
    E: Error + Send + Sync + 'static,
    F: Fn(Req) -> Result<Resp, E> + Send + Sync,
{
    type Request = Req;
    type Response = Resp;
    type Error = E;

    fn name(&self) -> &'static str {
        self.name
    }

    fn invoke(&self, request: Req) -> Result<Resp, E> {
        (self.handler)(request)
    }
}

trait ErasedMethod: Send + Sync {
    fn call(&self, arguments: &Value) -> Result<Value, DispatchError>;
}

impl<M: ApiMethod> ErasedMethod for M {
    fn call(&self, arguments: &Value) -> Result<Value, DispatchError> {
        let name = self.name();
        let request = M::Request::decode(arguments)
            .map_err(|source| DispatchError::invalid_arguments(name, M::Request::NAME, source))?;
        let response = self
            .invoke(request)
            .map_err(|source| DispatchError::handler_failure(name, source))?;
        response.encode().map_err(|source| {
            DispatchError::encoding_invariant_violation(name, M::Response::NAME, source)
        })
    }
}

/// A registered method with its schema types erased.
pub struct MethodDescriptor {
    name: &'static str,
    request_schema: &'static str,
    response_schema: &'static str,
    method: Box<dyn ErasedMethod>,
}

impl MethodDescriptor {
    /// Erases a typed method.
    pub fn new<M: ApiMethod + 'static>(method: M) -> Self {
        Self {
            name: method.name(),
            request_schema: M::Request::NAME,
            response_schema: M::Response::NAME,
            method: Box::new(method),
        }
    }

    /// Describes a plain function as a method.
    pub fn from_fn<Req, Resp, E, F>(name: &'static str, handler: F) -> Self
    where
        Req: Schema + 'static,
        Resp: Schema + 'static,
        E: Error + Send + Sync + 'static,
        F: Fn(Req) -> Result<Resp, E> + Send + Sync + 'static,
    {
        Self::new(FnMethod::new(name, handler))
    }

    /// Name used on the command line.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the request schema.
    pub fn request_schema(&self) -> &'static str {
        self.request_schema
    }

    /// Name of the response schema.
    pub fn response_schema(&self) -> &'static str {
        self.response_schema
    }

    /// Decodes `arguments`, runs the handler, and encodes its response.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidArguments`] when decoding fails,
    /// [`DispatchError::HandlerFailure`] when the handler fails, and
    /// [`DispatchError::EncodingInvariantViolation`] when the response cannot
    /// be encoded.
    pub fn invoke(&self, arguments: &Value) -> Result<Value, DispatchError> {
        self.method.call(arguments)
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("request_schema", &self.request_schema)
            .field("response_schema", &self.response_schema)
            .finish_non_exhaustive()
    }
}
