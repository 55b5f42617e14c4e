//! The `chat` method.
//!
//! The handler validates what the codec leaves open (provider name and
//! message roles), chooses the API key, and asks a [`ChatProvider`] for one
//! completion. Providers are opaque: they take a prompt and return text plus
//! token usage.

mod credentials;
mod errors;
mod openai;
mod pricing;

use tracing::debug;

pub use credentials::{CredentialPolicy, DUMMY_API_KEYS_VAR, OPENAI_API_KEY_VAR};
pub use errors::ChatError;
pub use openai::OpenAiProvider;
pub use pricing::completion_cost;

use crate::method::ApiMethod;
use crate::models::{ChatMessage, ChatRequest, ChatResponse, TokenMetadata};

/// Tracing target for chat operations.
pub const CHAT_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::chat");

/// Role the model replies under.
const REPLY_ROLE: &str = "AI";

/// Providers the handler knows how to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// OpenAI chat completions.
    OpenAi,
}

impl Provider {
    /// Parses a provider name as it appears in requests.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::UnsupportedProvider`] for any other name.
    pub fn parse(value: &str) -> Result<Self, ChatError> {
        match value {
            "OpenAI" => Ok(Self::OpenAi),
            _ => Err(ChatError::unsupported_provider(value)),
        }
    }
}

/// Speaker of a prompt message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The user.
    Human,
    /// The model.
    Ai,
    /// Instructions framing the conversation.
    System,
}

impl Role {
    /// Parses a role as it appears in requests.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::UnknownRole`] for anything but `Human`, `AI`, or
    /// `System`.
    pub fn parse(value: &str) -> Result<Self, ChatError> {
        match value {
            "Human" => Ok(Self::Human),
            "AI" => Ok(Self::Ai),
            "System" => Ok(Self::System),
            _ => Err(ChatError::unknown_role(value)),
        }
    }

    /// Role name in the OpenAI wire format.
    pub const fn openai_name(self) -> &'static str {
        match self {
            Self::Human => "user",
            Self::Ai => "assistant",
            Self::System => "system",
        }
    }
}

/// One validated prompt message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptMessage<'a> {
    /// Speaker.
    pub role: Role,
    /// Text.
    pub content: &'a str,
}

impl<'a> TryFrom<&'a ChatMessage> for PromptMessage<'a> {
    type Error = ChatError;

    fn try_from(message: &'a ChatMessage) -> Result<Self, ChatError> {
        Ok(Self {
            role: Role::parse(&message.role)?,
            content: &message.message,
        })
    }
}

/// Everything a provider needs for one completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest<'a> {
    /// Requested model.
    pub model: &'a str,
    /// Conversation, oldest first.
    pub messages: Vec<PromptMessage<'a>>,
    /// Sampling temperature, if the caller set one.
    pub temperature: Option<f64>,
}

/// Token counts reported by a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    /// Prompt tokens.
    pub prompt: i64,
    /// Completion tokens.
    pub completion: i64,
    /// Total tokens.
    pub total: i64,
}

/// A provider's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Reply text.
    pub text: String,
    /// Model that served the request, when reported.
    pub model: Option<String>,
    /// Token accounting.
    pub usage: TokenUsage,
}

/// Sends a prompt and returns the reply.
pub trait ChatProvider: Send + Sync {
    /// Requests one completion.
    ///
    /// # Errors
    ///
    /// Returns a [`ChatError`] when the provider cannot be reached or its
    /// reply is unusable. Retries, if any, are the provider's business.
    fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest<'_>,
    ) -> Result<Completion, ChatError>;
}

/// Sends a conversation to a language model.
pub struct ChatMethod<P> {
    openai: P,
    credentials: CredentialPolicy,
}

impl<P: ChatProvider> ChatMethod<P> {
    /// Creates the method with an explicit credential policy.
    pub const fn new(openai: P, credentials: CredentialPolicy) -> Self {
        Self {
            openai,
            credentials,
        }
    }

    /// Creates the method, reading the credential policy from the
    /// environment.
    pub fn from_env(openai: P) -> Self {
        Self::new(openai, CredentialPolicy::from_env())
    }

    fn provider(&self, provider: Provider) -> &dyn ChatProvider {
        match provider {
            Provider::OpenAi => &self.openai,
        }
    }
}

impl<P: ChatProvider> ApiMethod for ChatMethod<P> {
    type Request = ChatRequest;
    type Response = ChatResponse;
    type Error = ChatError;

    fn name(&self) -> &'static str {
        "chat"
    }

    fn invoke(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        let provider = Provider::parse(&request.provider)?;
        let api_key = self.credentials.resolve(&request.api_key)?;
        let messages = request
            .prompt
            .iter()
            .map(PromptMessage::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            target: CHAT_TARGET,
            provider = ?provider,
            llm = %request.llm,
            messages = messages.len(),
            temperature = ?request.temperature,
            "requesting completion"
        );
        let completion = self.provider(provider).complete(
            api_key,
            &CompletionRequest {
                model: &request.llm,
                messages,
                temperature: request.temperature,
            },
        )?;

        let served_by = completion.model.unwrap_or_else(|| request.llm.clone());
        let cost = completion_cost(&served_by, &completion.usage);
        Ok(ChatResponse {
            llm: Some(served_by),
            response: ChatMessage::new(completion.text, REPLY_ROLE),
            tokens: TokenMetadata {
                completion: completion.usage.completion,
                prompt: completion.usage.prompt,
                total: completion.usage.total,
                cost,
            },
        })
    }
}
