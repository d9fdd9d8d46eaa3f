//! Groq chat-completion wire types.

use serde::{Deserialize, Serialize};

use crate::errors::SummarizerError;

/// Body of `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model id.
    pub model: String,
    /// Conversation, oldest first.
    pub messages: Vec<Message>,
    /// Sampling temperature (0.0-2.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ChatRequest {
    /// A request with no sampling overrides.
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
        }
    }

    /// Starts a builder.
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }

    /// Checks the request before it is sent.
    pub fn validate(&self) -> Result<(), SummarizerError> {
        if self.model.trim().is_empty() {
            return Err(SummarizerError::validation_param("Model is required", "model"));
        }
        if self.messages.is_empty() {
            return Err(SummarizerError::validation_param(
                "At least one message is required",
                "messages",
            ));
        }
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(SummarizerError::validation_param(
                    format!("Temperature must be between 0.0 and 2.0, got {}", t),
                    "temperature",
                ));
            }
        }
        Ok(())
    }
}

/// Builder for [`ChatRequest`]; `build` validates.
#[derive(Debug, Default)]
pub struct ChatRequestBuilder {
    model: Option<String>,
    messages: Vec<Message>,
    temperature: Option<f32>,
}

impl ChatRequestBuilder {
    /// Sets the model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Appends a message.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Appends a user message.
    pub fn user(self, content: impl Into<String>) -> Self {
        self.message(Message::user(content))
    }

    /// Sets the temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Validates and returns the request.
    pub fn build(self) -> Result<ChatRequest, SummarizerError> {
        let request = ChatRequest {
            model: self.model.unwrap_or_default(),
            messages: self.messages,
            temperature: self.temperature,
        };
        request.validate()?;
        Ok(request)
    }
}

/// One conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Author of the turn.
    pub role: Role,
    /// Text of the turn.
    pub content: String,
}

impl Message {
    /// A user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Author of a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Caller.
    User,
    /// Model.
    #[default]
    Assistant,
}

/// Reply of `POST /chat/completions`.
///
/// Every field is optional so that sparse replies from compatible
/// gateways still parse; only the first choice is ever read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    /// Completion id.
    #[serde(default)]
    pub id: Option<String>,
    /// Model that answered.
    #[serde(default)]
    pub model: Option<String>,
    /// Generated alternatives.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Token accounting.
    #[serde(default)]
    pub usage: Option<Usage>,
    /// Groq extension block.
    #[serde(default)]
    pub x_groq: Option<GroqMetadata>,
}

impl ChatResponse {
    fn first(&self) -> Option<&Choice> {
        self.choices.first()
    }

    /// Text of the first choice.
    pub fn content(&self) -> Option<&str> {
        self.first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }

    /// Why the first choice stopped.
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.first().and_then(|c| c.finish_reason)
    }
}

/// One generated alternative.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// Position among the choices.
    #[serde(default)]
    pub index: u32,
    /// The generated message.
    #[serde(default)]
    pub message: Option<AssistantMessage>,
    /// Why generation stopped.
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

/// Generated message inside a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    /// Usually `assistant`.
    #[serde(default)]
    pub role: Role,
    /// Generated text; `null` when the model produced none.
    #[serde(default)]
    pub content: Option<String>,
}

/// Why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural end.
    Stop,
    /// Token limit hit.
    Length,
    /// Filtered by the provider.
    ContentFilter,
    /// Anything else.
    #[serde(other)]
    Other,
}

/// Token accounting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt.
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Tokens generated.
    #[serde(default)]
    pub completion_tokens: u32,
    /// Sum of both.
    #[serde(default)]
    pub total_tokens: u32,
    /// Wall time in seconds, as reported by Groq.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<f64>,
}

/// The `x_groq` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroqMetadata {
    /// Groq request id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}
