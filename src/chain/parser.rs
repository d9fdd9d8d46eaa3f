//! Output extraction.

use super::model::AiMessage;
use crate::errors::{SummarizerError, SummarizerResult};

/// Returns the generated text of `message`, discarding metadata.
pub fn extract_text(message: &AiMessage) -> SummarizerResult<String> {
    message
        .content
        .clone()
        .ok_or_else(|| SummarizerError::extraction("Model response contained no text content"))
}
