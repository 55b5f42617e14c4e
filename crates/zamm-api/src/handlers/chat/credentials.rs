//! API key selection for provider calls.
//!
//! Normally the key supplied in the request is used. When
//! [`DUMMY_API_KEYS_VAR`] is present in the environment the key is taken from
//! [`OPENAI_API_KEY_VAR`] instead, which lets recorded test sessions replay
//! without real credentials in their fixtures.

use std::env::{self, VarError};

use super::errors::ChatError;

/// Presence of this variable switches the key source to the environment.
pub const DUMMY_API_KEYS_VAR: &str = "ZAMM_DUMMY_API_KEYS";

/// Variable consulted for the OpenAI key when the override is active.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Where the chat handler takes its API key from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CredentialPolicy {
    /// Use the key carried by the request.
    #[default]
    FromRequest,
    /// Ignore the request and use this environment value, if it was set.
    Override(Option<String>),
}

impl CredentialPolicy {
    /// Reads the policy from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env_value(key, env::var(key)))
    }

    /// Reads the policy through `lookup`, which maps variable names to values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup(DUMMY_API_KEYS_VAR).is_some() {
            Self::Override(lookup(OPENAI_API_KEY_VAR))
        } else {
            Self::FromRequest
        }
    }

    /// Picks the key to send.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::MissingCredential`] when the override is active
    /// but [`OPENAI_API_KEY_VAR`] was not set.
    pub fn resolve<'a>(&'a self, supplied: &'a str) -> Result<&'a str, ChatError> {
        match self {
            Self::FromRequest => Ok(supplied),
            Self::Override(Some(key)) => Ok(key.as_str()),
            Self::Override(None) => Err(ChatError::MissingCredential {
                variable: OPENAI_API_KEY_VAR,
                override_flag: DUMMY_API_KEYS_VAR,
            }),
        }
    }
}

/// The override flag counts as present even when its value is not UTF-8.
/// A key that is not UTF-8 counts as unset.
fn env_value(key: &str, value: Result<String, VarError>) -> Option<String> {
    match value {
        Ok(value) => Some(value),
        Err(VarError::NotUnicode(_)) if key == DUMMY_API_KEYS_VAR => Some(String::new()),
        Err(_) => None,
    }
}
