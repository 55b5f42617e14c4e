//! Request and response records for the built-in methods.
//!
//! Each record lists its fields in declaration order. Decoding visits them in
//! that order, so the first invalid field in the list is the one reported.
//! Semantic checks (for example which chat roles exist) are left to the
//! handlers; these records only validate shape.

use serde_json::Value;

use crate::codec::{
    Decode, DecodeError, Encode, EncodeError, RecordReader, RecordWriter, Schema, decode_float,
    decode_int, decode_list, decode_string,
};

/// Arguments for the `greet` method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetRequest {
    /// Name to greet. An empty name is valid.
    pub name: String,
}

impl Decode for GreetRequest {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let record = RecordReader::new(raw)?;
        Ok(Self {
            name: record.required("name", decode_string)?,
        })
    }
}

impl Encode for GreetRequest {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(RecordWriter::new().required("name", &self.name)?.finish())
    }
}

impl Schema for GreetRequest {
    const NAME: &'static str = "GreetRequest";
}

/// Result of the `greet` method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetResponse {
    /// Rendered greeting.
    pub greeting: String,
}

impl Decode for GreetResponse {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let record = RecordReader::new(raw)?;
        Ok(Self {
            greeting: record.required("greeting", decode_string)?,
        })
    }
}

impl Encode for GreetResponse {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(RecordWriter::new()
            .required("greeting", &self.greeting)?
            .finish())
    }
}

impl Schema for GreetResponse {
    const NAME: &'static str = "GreetResponse";
}

/// One turn of a conversation.
///
/// `role` is expected to be `Human`, `AI`, or `System`, but the codec keeps it
/// as free text; the chat handler rejects unknown roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Message body.
    pub message: String,
    /// Speaker of the message.
    pub role: String,
}

impl ChatMessage {
    /// Creates a message from its parts.
    pub fn new(message: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            role: role.into(),
        }
    }
}

impl Decode for ChatMessage {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let record = RecordReader::new(raw)?;
        Ok(Self {
            message: record.required("message", decode_string)?,
            role: record.required("role", decode_string)?,
        })
    }
}

impl Encode for ChatMessage {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(RecordWriter::new()
            .required("message", &self.message)?
            .required("role", &self.role)?
            .finish())
    }
}

impl Schema for ChatMessage {
    const NAME: &'static str = "ChatMessage";
}

/// Arguments for the `chat` method.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Provider name, for example `OpenAI`.
    pub provider: String,
    /// Model requested from the provider.
    pub llm: String,
    /// Credential supplied by the caller.
    pub api_key: String,
    /// Conversation sent to the model, oldest message first.
    pub prompt: Vec<ChatMessage>,
    /// Sampling temperature; the provider default applies when absent.
    pub temperature: Option<f64>,
}

impl Decode for ChatRequest {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let record = RecordReader::new(raw)?;
        Ok(Self {
            provider: record.required("provider", decode_string)?,
            llm: record.required("llm", decode_string)?,
            api_key: record.required("api_key", decode_string)?,
            prompt: record.required("prompt", |raw| decode_list(ChatMessage::decode, raw))?,
            temperature: record.optional("temperature", decode_float)?,
        })
    }
}

impl Encode for ChatRequest {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(RecordWriter::new()
            .required("provider", &self.provider)?
            .required("llm", &self.llm)?
            .required("api_key", &self.api_key)?
            .required("prompt", &self.prompt)?
            .optional("temperature", self.temperature.as_ref())?
            .finish())
    }
}

impl Schema for ChatRequest {
    const NAME: &'static str = "ChatRequest";
}

/// Token accounting for one completion.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenMetadata {
    /// Tokens produced by the model.
    pub completion: i64,
    /// Tokens consumed by the prompt.
    pub prompt: i64,
    /// Sum of prompt and completion tokens.
    pub total: i64,
    /// Estimated cost in US dollars.
    pub cost: f64,
}

impl Decode for TokenMetadata {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let record = RecordReader::new(raw)?;
        Ok(Self {
            completion: record.required("completion", decode_int)?,
            prompt: record.required("prompt", decode_int)?,
            total: record.required("total", decode_int)?,
            cost: record.required("cost", decode_float)?,
        })
    }
}

impl Encode for TokenMetadata {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(RecordWriter::new()
            .required("completion", &self.completion)?
            .required("prompt", &self.prompt)?
            .required("total", &self.total)?
            .required("cost", &self.cost)?
            .finish())
    }
}

impl Schema for TokenMetadata {
    const NAME: &'static str = "TokenMetadata";
}

/// Result of the `chat` method.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatResponse {
    /// Model that actually served the request, when the handler reports it.
    ///
    /// Older payloads do not carry this field, so it is optional in both
    /// directions.
    pub llm: Option<String>,
    /// The model's reply.
    pub response: ChatMessage,
    /// Token usage for the call.
    pub tokens: TokenMetadata,
}

impl Decode for ChatResponse {
    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let record = RecordReader::new(raw)?;
        Ok(Self {
            llm: record.optional("llm", decode_string)?,
            response: record.required("response", ChatMessage::decode)?,
            tokens: record.required("tokens", TokenMetadata::decode)?,
        })
    }
}

impl Encode for ChatResponse {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(RecordWriter::new()
            .optional("llm", self.llm.as_deref())?
            .required("response", &self.response)?
            .required("tokens", &self.tokens)?
            .finish())
    }
}

impl Schema for ChatResponse {
    const NAME: &'static str = "ChatResponse";
}

#[cfg(test)]
mod tests;
