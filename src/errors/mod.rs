//! Error types for the summarizer.
//!
//! One taxonomy covers the whole request path: startup configuration,
//! request validation, transport failures reaching Groq, errors reported by
//! Groq itself, and responses whose shape cannot be narrowed.

use std::time::Duration;
use thiserror::Error;

/// Shorthand used across the crate.
pub type SummarizerResult<T> = Result<T, SummarizerError>;

/// Error type for every stage of the summarization pipeline.
#[derive(Debug, Error)]
pub enum SummarizerError {
    /// Startup settings are missing or malformed.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What is wrong and which setting it concerns.
        message: String,
    },

    /// The request body does not have the expected shape.
    #[error("Validation error: {message}")]
    Validation {
        /// Why the value was rejected.
        message: String,
        /// Path of the rejected field, e.g. `inputs[1].text`.
        param: Option<String>,
    },

    /// Could not reach the provider.
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
    },

    /// The provider call did not complete in time.
    #[error("Request timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// The provider rejected the API key.
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Error message from the provider.
        message: String,
        /// Last characters of the key that was used.
        api_key_hint: Option<String>,
    },

    /// The provider rate limited the request.
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        /// Error message from the provider.
        message: String,
        /// Provider's `retry-after`, if sent.
        retry_after: Option<Duration>,
    },

    /// The configured model is unknown or unavailable.
    #[error("Model error: {message}")]
    Model {
        /// Error message from the provider.
        message: String,
        /// The configured model id.
        model: String,
    },

    /// Any other error reported by the provider.
    #[error("Provider error (HTTP {status}): {message}")]
    Provider {
        /// HTTP status returned by the provider.
        status: u16,
        /// Error message, passed through unmasked.
        message: String,
        /// Provider request id, if sent.
        request_id: Option<String>,
    },

    /// The provider response did not contain generated text.
    #[error("Extraction error: {message}")]
    Extraction {
        /// Error message.
        message: String,
    },

    /// A provider body could not be encoded or decoded.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },
}

impl SummarizerError {
    /// Shorthand for [`SummarizerError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        SummarizerError::Configuration {
            message: message.into(),
        }
    }

    /// A validation error not tied to one field.
    pub fn validation(message: impl Into<String>) -> Self {
        SummarizerError::Validation {
            message: message.into(),
            param: None,
        }
    }

    /// Creates a validation error naming the offending field.
    pub fn validation_param(message: impl Into<String>, param: impl Into<String>) -> Self {
        SummarizerError::Validation {
            message: message.into(),
            param: Some(param.into()),
        }
    }

    /// Shorthand for [`SummarizerError::Extraction`].
    pub fn extraction(message: impl Into<String>) -> Self {
        SummarizerError::Extraction {
            message: message.into(),
        }
    }

    /// The model is unknown to the provider.
    pub fn model_not_found(model: impl Into<String>) -> Self {
        let model = model.into();
        SummarizerError::Model {
            message: format!("Model '{}' not found", model),
            model,
        }
    }

    /// Returns true if the provider could not be reached.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SummarizerError::Network { .. } | SummarizerError::Timeout { .. }
        )
    }

    /// Returns true if the provider answered with an error.
    pub fn is_provider(&self) -> bool {
        matches!(
            self,
            SummarizerError::Authentication { .. }
                | SummarizerError::RateLimit { .. }
                | SummarizerError::Model { .. }
                | SummarizerError::Provider { .. }
        )
    }

    /// Provider-suggested wait, for rate limits.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            SummarizerError::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Stable snake_case tag used in HTTP error bodies and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            SummarizerError::Configuration { .. } => "configuration_error",
            SummarizerError::Validation { .. } => "validation_error",
            SummarizerError::Network { .. } => "network_error",
            SummarizerError::Timeout { .. } => "timeout",
            SummarizerError::Authentication { .. } => "authentication_error",
            SummarizerError::RateLimit { .. } => "rate_limit_error",
            SummarizerError::Model { .. } => "model_error",
            SummarizerError::Provider { .. } => "provider_error",
            SummarizerError::Extraction { .. } => "extraction_error",
            SummarizerError::Serialization { .. } => "serialization_error",
        }
    }
}

/// Error envelope Groq sends with non-2xx replies.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Payload.
    pub error: ApiErrorDetail,
}

/// Body of the `error` object.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorDetail {
    /// Groq error class, e.g. `rate_limit_error`.
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    /// Human readable description.
    pub message: String,
    /// Request field at fault.
    pub param: Option<String>,
    /// Machine readable code, e.g. `invalid_api_key`.
    pub code: Option<String>,
}

impl From<reqwest::Error> for SummarizerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SummarizerError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() || err.is_request() {
            SummarizerError::Network {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            SummarizerError::Serialization {
                message: err.to_string(),
            }
        } else {
            SummarizerError::Provider {
                status: err.status().map(|s| s.as_u16()).unwrap_or(0),
                message: err.to_string(),
                request_id: None,
            }
        }
    }
}

impl From<serde_json::Error> for SummarizerError {
    fn from(err: serde_json::Error) -> Self {
        SummarizerError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for SummarizerError {
    fn from(err: url::ParseError) -> Self {
        SummarizerError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}
