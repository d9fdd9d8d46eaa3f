//! reqwest-backed transport.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::collections::HashMap;
use std::time::Duration;
use tracing::instrument;

use super::TransportError;

/// A JSON POST to a path under the provider base URL.
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    /// Path relative to the base URL, e.g. `chat/completions`.
    pub path: String,
    /// Extra headers for this call only.
    pub headers: HashMap<String, String>,
    /// Serialized JSON body.
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Starts a request to `path`.
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Sets the serialized body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Status, lowercased headers and raw body of a provider reply.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, keys lowercased.
    pub headers: HashMap<String, String>,
    /// Raw body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// True for 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Looks up a header by lowercase name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Body as lossy UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends one request to the provider. Implementations never retry.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and returns whatever the provider answered.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// [`HttpTransport`] over a pooled reqwest client.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Creates a transport rooted at `base_url`.
    ///
    /// Without a `timeout` a call may wait indefinitely.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let mut builder = ClientBuilder::new().pool_max_idle_per_host(10);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| TransportError::Connection {
            message: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn classify(&self, err: &reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                timeout: self.timeout,
            }
        } else if err.is_connect() || err.is_request() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::InvalidResponse {
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(path = %request.path, bytes = request.body.len()))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.post(self.url_for(&request.path));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.classify(&e))?
            .to_vec();

        tracing::debug!(status, bytes = body.len(), "Provider response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_without_double_slash() {
        let transport = ReqwestTransport::new("https://api.groq.com/openai/v1/", None).unwrap();
        assert_eq!(
            transport.url_for("/chat/completions"),
            "https://api.groq.com/openai/v1/chat/completions"
        );
        assert_eq!(
            transport.url_for("chat/completions"),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_response_helpers() {
        let response = HttpResponse {
            status: 429,
            headers: HashMap::from([("retry-after".to_string(), "3".to_string())]),
            body: b"slow down".to_vec(),
        };
        assert!(!response.is_success());
        assert_eq!(response.header("retry-after"), Some("3"));
        assert_eq!(response.text(), "slow down");
    }

    #[test]
    fn test_request_builder() {
        let request = HttpRequest::post("chat/completions")
            .with_header("Content-Type", "application/json")
            .with_body(b"{}".to_vec());
        assert_eq!(request.path, "chat/completions");
        assert_eq!(request.body, b"{}".to_vec());
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }
}
