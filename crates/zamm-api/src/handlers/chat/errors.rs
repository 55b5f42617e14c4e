use thiserror::Error;

/// Failures raised by the chat handler and its providers.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The request named a provider without an implementation.
    #[error("provider {provider} not yet supported")]
    UnsupportedProvider { provider: String },

    /// A prompt message used a role other than `Human`, `AI`, or `System`.
    #[error("unknown role {role}")]
    UnknownRole { role: String },

    /// Credential override was requested but its variable is unset.
    #[error("{variable} must be set when {override_flag} is present")]
    MissingCredential {
        variable: &'static str,
        override_flag: &'static str,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced an HTTP response.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The provider's reply could not be parsed.
    #[error("unreadable reply from {endpoint}: {source}")]
    Reply {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider returned no completion choices.
    #[error("provider returned no completion choices")]
    EmptyCompletion,
}

impl ChatError {
    /// Creates an unsupported provider error.
    pub fn unsupported_provider(provider: impl Into<String>) -> Self {
        Self::UnsupportedProvider {
            provider: provider.into(),
        }
    }

    /// Creates an unknown role error.
    pub fn unknown_role(role: impl Into<String>) -> Self {
        Self::UnknownRole { role: role.into() }
    }
}
