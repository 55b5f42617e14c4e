//! Typed method dispatch for the zamm command-line bridge.
//!
//! A caller names a method and passes its arguments as JSON text. The
//! [`Dispatcher`] looks the method up in a [`MethodRegistry`], decodes the
//! arguments into the method's request record, runs the handler, and encodes
//! the response back into a single line of JSON.
//!
//! ```no_run
//! use zamm_api::{Dispatcher, MethodRegistry};
//! use zamm_config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = MethodRegistry::standard(&Config::default())?;
//! let line = Dispatcher::new(&registry).dispatch("greet", r#"{"name":"World"}"#)?;
//! assert_eq!(line, r#"{"greeting":"Hello, World! You have been greeted from Rust"}"#);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod dispatch;
pub mod handlers;
pub mod method;
pub mod models;
pub mod registry;

pub use dispatch::{DispatchError, Dispatcher};
pub use method::{ApiMethod, MethodDescriptor};
pub use registry::{MethodRegistry, RegistryBuilder, RegistryError};
