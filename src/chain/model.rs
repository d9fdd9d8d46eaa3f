//! The model stage: prompt in, typed message out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

use crate::client::GroqClient;
use crate::config::ModelConfig;
use crate::errors::SummarizerResult;
use crate::types::chat::{ChatRequest, ChatResponse, FinishReason, Usage};

/// Generated message, narrowed from the provider response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiMessage {
    /// Generated text, if the provider returned any.
    #[serde(default)]
    pub content: Option<String>,

    /// Provider metadata.
    #[serde(default)]
    pub response_metadata: ResponseMetadata,
}

impl AiMessage {
    /// A message with only text content.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            response_metadata: ResponseMetadata::default(),
        }
    }
}

/// Metadata that accompanies a generated message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Model that produced the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Why generation stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    /// Token usage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// Provider request id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl From<ChatResponse> for AiMessage {
    fn from(response: ChatResponse) -> Self {
        let finish_reason = response.finish_reason();
        let request_id = response
            .x_groq
            .and_then(|meta| meta.id)
            .or(response.id);
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);

        Self {
            content,
            response_metadata: ResponseMetadata {
                model: response.model,
                finish_reason,
                usage: response.usage,
                request_id,
            },
        }
    }
}

/// A chat model that turns a rendered prompt into a message.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends one prompt and returns the generated message.
    async fn invoke(&self, prompt: &str) -> SummarizerResult<AiMessage>;
}

/// [`ChatModel`] backed by Groq chat completions.
pub struct GroqChatModel {
    client: Arc<GroqClient>,
    settings: ModelConfig,
}

impl GroqChatModel {
    /// Creates a model bound to a client and generation settings.
    pub fn new(client: Arc<GroqClient>, settings: ModelConfig) -> Self {
        Self { client, settings }
    }

    /// Generation settings.
    pub fn settings(&self) -> &ModelConfig {
        &self.settings
    }
}

#[async_trait]
impl ChatModel for GroqChatModel {
    #[instrument(skip(self, prompt), fields(model = %self.settings.model, prompt_chars = prompt.len()))]
    async fn invoke(&self, prompt: &str) -> SummarizerResult<AiMessage> {
        let request = ChatRequest::builder()
            .model(&self.settings.model)
            .user(prompt)
            .temperature(self.settings.temperature)
            .build()?;

        let response = self.client.chat().create(request).await?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion usage"
            );
        }

        Ok(AiMessage::from(response))
    }
}

impl std::fmt::Debug for GroqChatModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqChatModel")
            .field("settings", &self.settings)
            .finish()
    }
}
