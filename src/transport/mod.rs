//! HTTP transport layer for outbound provider calls.

mod http;

pub use http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

use std::time::Duration;

/// Failure to get any HTTP reply out of the provider.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The host could not be reached.
    #[error("Connection error: {message}")]
    Connection {
        /// Underlying client error.
        message: String,
    },

    /// No reply within the configured deadline.
    #[error("Provider did not answer within {timeout:?}")]
    Timeout {
        /// The deadline that expired.
        timeout: Option<Duration>,
    },

    /// The reply could not be read.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Underlying client error.
        message: String,
    },
}

impl From<TransportError> for crate::errors::SummarizerError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout { .. } => Self::Timeout {
                message: err.to_string(),
            },
            TransportError::Connection { .. } | TransportError::InvalidResponse { .. } => {
                Self::Network {
                    message: err.to_string(),
                }
            }
        }
    }
}
