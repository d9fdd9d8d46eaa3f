//! Mapping of pipeline errors onto HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::time::Duration;

use crate::errors::SummarizerError;
use crate::observability::redact;

/// Error body returned to callers.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Stable error tag, e.g. `validation_error`.
    pub error: &'static str,
    /// Human readable message.
    pub message: String,
    /// Offending request field, for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

/// An error ready to be rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
    retry_after: Option<Duration>,
}

impl ApiError {
    /// HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Body of the response.
    pub fn body(&self) -> &ErrorBody {
        &self.body
    }
}

fn status_for(err: &SummarizerError) -> StatusCode {
    match err {
        SummarizerError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SummarizerError::Network { .. }
        | SummarizerError::Timeout { .. }
        | SummarizerError::Authentication { .. }
        | SummarizerError::RateLimit { .. }
        | SummarizerError::Model { .. }
        | SummarizerError::Provider { .. } => StatusCode::BAD_GATEWAY,
        SummarizerError::Configuration { .. }
        | SummarizerError::Extraction { .. }
        | SummarizerError::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<SummarizerError> for ApiError {
    fn from(err: SummarizerError) -> Self {
        let status = status_for(&err);
        let kind = err.kind();
        let message = redact(&err.to_string());
        let retry_after = err.retry_after();

        if status.is_server_error() {
            tracing::error!(kind, status = status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::warn!(kind, status = status.as_u16(), error = %message, "Request rejected");
        }

        let param = match err {
            SummarizerError::Validation { param, .. } => param,
            _ => None,
        };

        Self {
            status,
            body: ErrorBody {
                error: kind,
                message,
                param,
            },
            retry_after,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let (status, error) = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large")
        } else {
            (StatusCode::UNPROCESSABLE_ENTITY, "validation_error")
        };
        let message = rejection.body_text();

        tracing::warn!(status = status.as_u16(), error = %message, "Request body rejected");

        Self {
            status,
            body: ErrorBody {
                error,
                message,
                param: Some("body".to_string()),
            },
            retry_after: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.body)).into_response();
        if let Some(retry_after) = self.retry_after {
            let secs = retry_after.as_secs_f64().ceil().max(1.0) as u64;
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (SummarizerError::validation_param("field required", "text"), 422),
            (
                SummarizerError::Network {
                    message: "refused".into(),
                },
                502,
            ),
            (
                SummarizerError::Timeout {
                    message: "slow".into(),
                },
                502,
            ),
            (
                SummarizerError::Provider {
                    status: 400,
                    message: "bad".into(),
                    request_id: None,
                },
                502,
            ),
            (
                SummarizerError::RateLimit {
                    message: "slow down".into(),
                    retry_after: None,
                },
                502,
            ),
            (SummarizerError::extraction("empty"), 500),
            (SummarizerError::configuration("bad"), 500),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status().as_u16(), expected);
        }
    }

    #[test]
    fn test_body_carries_kind_and_param() {
        let api = ApiError::from(SummarizerError::validation_param("field required", "text"));
        assert_eq!(api.body().error, "validation_error");
        assert_eq!(api.body().param.as_deref(), Some("text"));

        let api = ApiError::from(SummarizerError::extraction("no content"));
        assert_eq!(api.body().error, "extraction_error");
        assert_eq!(api.body().param, None);
    }

    #[test]
    fn test_provider_message_passes_through_with_keys_masked() {
        let api = ApiError::from(SummarizerError::Authentication {
            message: "Invalid API Key gsk_abcdef".into(),
            api_key_hint: None,
        });
        assert!(api.body().message.contains("Invalid API Key"));
        assert!(!api.body().message.contains("abcdef"));
    }

    #[test]
    fn test_retry_after_header() {
        let response = ApiError::from(SummarizerError::RateLimit {
            message: "slow down".into(),
            retry_after: Some(Duration::from_millis(2500)),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            "3"
        );
    }
}
