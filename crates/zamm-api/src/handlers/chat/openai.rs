//! OpenAI chat completions over blocking HTTP.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zamm_config::Config;

use super::errors::ChatError;
use super::{CHAT_TARGET, ChatProvider, Completion, CompletionRequest, TokenUsage};

/// Provider backed by the OpenAI `chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: Client,
    endpoint: String,
}

impl OpenAiProvider {
    /// Creates a provider talking to `base_url` (for example
    /// `https://api.openai.com/v1`).
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Client`] when the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ChatError::Client)?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    /// Creates a provider from the shared configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Client`] when the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, ChatError> {
        Self::new(config.openai_base_url(), config.request_timeout())
    }

    /// Full URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    model: Option<String>,
    #[serde(default)]
    choices: Vec<WireChoice>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireReply,
}

#[derive(Debug, Deserialize)]
struct WireReply {
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireUsage {
    prompt_tokens: i64,
    completion_tokens: i64,
    total_tokens: i64,
}

impl ChatProvider for OpenAiProvider {
    fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest<'_>,
    ) -> Result<Completion, ChatError> {
        let body = WireRequest {
            model: request.model,
            messages: request
                .messages
                .iter()
                .map(|message| WireMessage {
                    role: message.role.openai_name(),
                    content: message.content,
                })
                .collect(),
            temperature: request.temperature,
        };

        debug!(
            target: CHAT_TARGET,
            endpoint = %self.endpoint,
            model = request.model,
            "posting chat completion"
        );
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .map_err(|source| ChatError::Transport {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
                body: response
                    .text()
                    .unwrap_or_else(|error| format!("<unreadable body: {error}>")),
            });
        }

        let reply: WireResponse = response.json().map_err(|source| ChatError::Reply {
            endpoint: self.endpoint.clone(),
            source,
        })?;
        let choice = reply
            .choices
            .into_iter()
            .next()
            .ok_or(ChatError::EmptyCompletion)?;
        let usage = reply.usage.unwrap_or_default();

        Ok(Completion {
            text: choice.message.content.unwrap_or_default(),
            model: reply.model,
            usage: TokenUsage {
                prompt: usage.prompt_tokens,
                completion: usage.completion_tokens,
                total: usage.total_tokens,
            },
        })
    }
}
