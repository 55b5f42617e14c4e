//! The closed, immutable table of callable methods.
//!
//! The table is assembled once through [`RegistryBuilder`] and never changes
//! afterwards; lookups are exact and case-sensitive.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use thiserror::Error;
use zamm_config::Config;

use crate::dispatch::DispatchError;
use crate::handlers::{ChatError, ChatMethod, GreetMethod, OpenAiProvider};
use crate::method::{ApiMethod, MethodDescriptor};

/// Errors raised while assembling a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two descriptors share a name.
    #[error("method '{name}' is registered more than once")]
    DuplicateMethod { name: &'static str },
    /// A built-in provider could not be prepared.
    #[error("failed to prepare chat provider: {0}")]
    ProviderSetup(#[source] ChatError),
}

/// Immutable mapping from method name to descriptor.
#[derive(Debug)]
pub struct MethodRegistry {
    methods: BTreeMap<&'static str, MethodDescriptor>,
}

impl MethodRegistry {
    /// Starts an empty registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Builds the registry of built-in methods: `chat` and `greet`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ProviderSetup`] when the HTTP client for the
    /// chat provider cannot be created.
    pub fn standard(config: &Config) -> Result<Self, RegistryError> {
        let provider = OpenAiProvider::from_config(config).map_err(RegistryError::ProviderSetup)?;
        Ok(Self::builder()
            .method(ChatMethod::from_env(provider))?
            .method(GreetMethod)?
            .build())
    }

    /// Looks up a method by its exact name.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MethodNotFound`] when no method has that
    /// name.
    pub fn resolve(&self, name: &str) -> Result<&MethodDescriptor, DispatchError> {
        self.methods
            .get(name)
            .ok_or_else(|| DispatchError::method_not_found(name, self.names()))
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.methods.keys().copied()
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns true when no methods are registered.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// Collects descriptors before the registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    methods: BTreeMap<&'static str, MethodDescriptor>,
}

impl RegistryBuilder {
    /// Adds an erased descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateMethod`] when the name is taken.
    pub fn register(mut self, descriptor: MethodDescriptor) -> Result<Self, RegistryError> {
        match self.methods.entry(descriptor.name()) {
            Entry::Occupied(entry) => Err(RegistryError::DuplicateMethod { name: *entry.key() }),
            Entry::Vacant(entry) => {
                entry.insert(descriptor);
                Ok(self)
            }
        }
    }

    /// Adds a typed method.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateMethod`] when the name is taken.
    pub fn method<M: ApiMethod + 'static>(self, method: M) -> Result<Self, RegistryError> {
        self.register(MethodDescriptor::new(method))
    }

    /// Freezes the table.
    pub fn build(self) -> MethodRegistry {
        MethodRegistry {
            methods: self.methods,
        }
    }
}
