//! The summarization pipeline.
//!
//! Three stages run in order for every input: the [`PromptTemplate`]
//! renders the prompt, a [`ChatModel`] generates a message, and
//! [`extract_text`] pulls the summary out of it.

mod model;
mod parser;
mod prompt;

pub use model::{AiMessage, ChatModel, GroqChatModel, ResponseMetadata};
pub use parser::extract_text;
pub use prompt::{PromptTemplate, SUMMARIZE_TEMPLATE};

use std::sync::Arc;
use tracing::instrument;

use crate::errors::{SummarizerError, SummarizerResult};
use crate::types::summarize::SummarizeInput;

/// Prompt → model → extractor.
#[derive(Clone)]
pub struct SummarizeChain {
    prompt: PromptTemplate,
    model: Arc<dyn ChatModel>,
}

impl SummarizeChain {
    /// Creates a chain with a custom prompt.
    ///
    /// The prompt must take exactly the `text` variable.
    pub fn new(prompt: PromptTemplate, model: Arc<dyn ChatModel>) -> SummarizerResult<Self> {
        if prompt.input_variables() != ["text"] {
            return Err(SummarizerError::configuration(format!(
                "Summarize prompt must take exactly the 'text' variable, found {:?}",
                prompt.input_variables()
            )));
        }
        Ok(Self { prompt, model })
    }

    /// Creates a chain with the fixed summarization prompt.
    pub fn summarize(model: Arc<dyn ChatModel>) -> Self {
        Self {
            prompt: PromptTemplate::summarize(),
            model,
        }
    }

    /// The prompt stage.
    pub fn prompt(&self) -> &PromptTemplate {
        &self.prompt
    }

    /// Runs the three stages for one input.
    #[instrument(skip_all, fields(text_chars = input.text.chars().count()))]
    pub async fn invoke(&self, input: &SummarizeInput) -> SummarizerResult<String> {
        let prompt = self.prompt.build(&input.variables())?;
        let message = self.model.invoke(&prompt).await?;
        let summary = extract_text(&message)?;

        tracing::debug!(summary_chars = summary.chars().count(), "Summary generated");
        Ok(summary)
    }

    /// Runs every input concurrently; results keep input order.
    ///
    /// The first failure fails the whole batch.
    #[instrument(skip_all, fields(batch_size = inputs.len()))]
    pub async fn batch(&self, inputs: &[SummarizeInput]) -> SummarizerResult<Vec<String>> {
        futures::future::try_join_all(inputs.iter().map(|input| self.invoke(input))).await
    }
}

impl std::fmt::Debug for SummarizeChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummarizeChain")
            .field("prompt", &self.prompt.template())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatModel for RecordingModel {
        async fn invoke(&self, prompt: &str) -> SummarizerResult<AiMessage> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            let text = prompt.rsplit("\n\n").next().unwrap_or_default();
            Ok(AiMessage::text(format!("summary of {}", text)))
        }
    }

    struct EmptyModel;

    #[async_trait]
    impl ChatModel for EmptyModel {
        async fn invoke(&self, _prompt: &str) -> SummarizerResult<AiMessage> {
            Ok(AiMessage::default())
        }
    }

    struct FailingModel {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChatModel for FailingModel {
        async fn invoke(&self, _prompt: &str) -> SummarizerResult<AiMessage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(SummarizerError::Network {
                message: "connection refused".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_invoke_runs_stages_in_order() {
        let model = Arc::new(RecordingModel::default());
        let chain = SummarizeChain::summarize(model.clone());

        let summary = chain.invoke(&SummarizeInput::new("hello")).await.unwrap();

        assert_eq!(summary, "summary of hello");
        assert_eq!(
            model.prompts.lock().unwrap().as_slice(),
            ["Summarize the following text clearly and concisely:\n\nhello"]
        );
    }

    #[tokio::test]
    async fn test_invoke_surfaces_extraction_error() {
        let chain = SummarizeChain::summarize(Arc::new(EmptyModel));

        let err = chain.invoke(&SummarizeInput::new("x")).await.unwrap_err();

        assert!(matches!(err, SummarizerError::Extraction { .. }));
    }

    #[tokio::test]
    async fn test_invoke_propagates_model_error() {
        let model = Arc::new(FailingModel {
            calls: AtomicUsize::new(0),
        });
        let chain = SummarizeChain::summarize(model.clone());

        let err = chain.invoke(&SummarizeInput::new("x")).await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_batch_keeps_input_order() {
        let chain = SummarizeChain::summarize(Arc::new(RecordingModel::default()));
        let inputs = vec![
            SummarizeInput::new("one"),
            SummarizeInput::new("two"),
            SummarizeInput::new("three"),
        ];

        let outputs = chain.batch(&inputs).await.unwrap();

        assert_eq!(
            outputs,
            vec!["summary of one", "summary of two", "summary of three"]
        );
    }

    #[tokio::test]
    async fn test_batch_of_nothing() {
        let chain = SummarizeChain::summarize(Arc::new(EmptyModel));
        assert!(chain.batch(&[]).await.unwrap().is_empty());
    }

    #[test]
    fn test_new_rejects_prompt_without_text_slot() {
        let prompt = PromptTemplate::from_template("Summarize {body}").unwrap();
        assert!(SummarizeChain::new(prompt, Arc::new(EmptyModel)).is_err());

        let prompt = PromptTemplate::from_template("TL;DR:\n{text}").unwrap();
        assert!(SummarizeChain::new(prompt, Arc::new(EmptyModel)).is_ok());
    }
}
