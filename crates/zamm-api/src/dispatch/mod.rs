//! Single-command dispatch.
//!
//! A command is a method name plus a JSON argument string. The dispatcher
//! resolves the name against an immutable [`MethodRegistry`], parses the
//! arguments, lets the method's descriptor decode them, run its handler, and
//! encode the result, then renders the response as one line of JSON text.
//!
//! ```text
//! ("greet", "{\"name\":\"World\"}")
//!   -> {"greeting":"Hello, World! You have been greeted from Rust"}
//! ```
//!
//! Each call either returns one complete JSON document or one
//! [`DispatchError`]; there is no partial output.
//!
//! [`MethodRegistry`]: crate::registry::MethodRegistry

mod dispatcher;
mod errors;

pub use dispatcher::{DISPATCH_TARGET, Dispatcher};
pub use errors::{DispatchError, HandlerError};
