//! Chat completions service.

use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::auth::AuthProvider;
use crate::errors::{ApiErrorResponse, SummarizerError};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::chat::{ChatRequest, ChatResponse};

/// Chat completions service.
pub struct ChatService {
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthProvider>,
}

impl ChatService {
    /// Creates a new chat service.
    pub fn new(transport: Arc<dyn HttpTransport>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { transport, auth }
    }

    /// Creates a chat completion.
    ///
    /// Makes exactly one request; failures are mapped and returned as-is.
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn create(&self, request: ChatRequest) -> Result<ChatResponse, SummarizerError> {
        request.validate()?;

        let http_request = self.build_request(&request)?;
        let response = self.transport.send(http_request).await?;

        self.parse_response(response, &request.model)
    }

    fn build_request(&self, request: &ChatRequest) -> Result<HttpRequest, SummarizerError> {
        let body = serde_json::to_vec(request).map_err(|e| SummarizerError::Serialization {
            message: format!("Failed to serialize request: {}", e),
        })?;

        let mut http_request = HttpRequest::post("chat/completions")
            .with_header("Content-Type", "application/json")
            .with_header("Accept", "application/json")
            .with_body(body);
        self.auth.authorize(&mut http_request.headers);

        Ok(http_request)
    }

    fn parse_response(
        &self,
        response: HttpResponse,
        model: &str,
    ) -> Result<ChatResponse, SummarizerError> {
        if !response.is_success() {
            return Err(self.parse_error_response(&response, model));
        }

        serde_json::from_slice(&response.body).map_err(|e| SummarizerError::Serialization {
            message: format!("Failed to parse response: {}", e),
        })
    }

    fn parse_error_response(&self, response: &HttpResponse, model: &str) -> SummarizerError {
        let request_id = response.header("x-request-id").map(str::to_string);
        let retry_after = response.header("retry-after").and_then(parse_retry_after);

        let error = match serde_json::from_slice::<ApiErrorResponse>(&response.body) {
            Ok(error_body) => self.map_error(response.status, error_body, request_id, retry_after, model),
            Err(_) => self.parse_error_status(response, request_id, retry_after, model),
        };

        tracing::warn!(
            status = response.status,
            kind = error.kind(),
            "Provider returned an error"
        );
        error
    }

    fn map_error(
        &self,
        status: u16,
        error: ApiErrorResponse,
        request_id: Option<String>,
        retry_after: Option<Duration>,
        model: &str,
    ) -> SummarizerError {
        let detail = error.error;
        let error_type = detail.error_type.as_deref().unwrap_or("");
        let code = detail.code.as_deref().unwrap_or("");

        match (status, error_type, code) {
            (401, _, _) | (_, _, "invalid_api_key") => SummarizerError::Authentication {
                message: detail.message,
                api_key_hint: self.auth.key_hint(),
            },
            (404, _, _) | (_, _, "model_not_found") => SummarizerError::Model {
                message: detail.message,
                model: model.to_string(),
            },
            (429, _, _) | (_, "rate_limit_error", _) => SummarizerError::RateLimit {
                message: detail.message,
                retry_after,
            },
            _ => SummarizerError::Provider {
                status,
                message: detail.message,
                request_id,
            },
        }
    }

    fn parse_error_status(
        &self,
        response: &HttpResponse,
        request_id: Option<String>,
        retry_after: Option<Duration>,
        model: &str,
    ) -> SummarizerError {
        match response.status {
            401 => SummarizerError::Authentication {
                message: "Invalid API key".to_string(),
                api_key_hint: self.auth.key_hint(),
            },
            404 => SummarizerError::model_not_found(model),
            429 => SummarizerError::RateLimit {
                message: "Rate limit exceeded".to_string(),
                retry_after,
            },
            status => {
                let body = response.text();
                SummarizerError::Provider {
                    status,
                    message: if body.trim().is_empty() {
                        format!("Unexpected status: {}", status)
                    } else {
                        body
                    },
                    request_id,
                }
            }
        }
    }
}

/// Seconds, possibly fractional, as sent by Groq.
fn parse_retry_after(value: &str) -> Option<Duration> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(Duration::from_secs_f64)
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService").finish()
    }
}
