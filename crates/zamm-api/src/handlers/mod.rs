//! Built-in handlers.
//!
//! Handlers own their semantics: the dispatcher hands them decoded requests
//! and forwards whatever they return or report.

mod chat;
mod greet;

pub use chat::{
    CHAT_TARGET, ChatError, ChatMethod, ChatProvider, Completion, CompletionRequest,
    CredentialPolicy, DUMMY_API_KEYS_VAR, OPENAI_API_KEY_VAR, OpenAiProvider, PromptMessage,
    Provider, Role, TokenUsage, completion_cost,
};
pub use greet::{GreetMethod, greeting_for};
