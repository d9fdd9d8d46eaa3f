//! Client for a running summarize endpoint.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use crate::errors::{SummarizerError, SummarizerResult};
use crate::types::summarize::{
    BatchRequest, BatchResponse, InvokeRequest, InvokeResponse, SummarizeInput,
};

/// Default endpoint of a locally running server.
pub const DEFAULT_REMOTE_URL: &str = "http://localhost:8000/summarize";

/// Calls the invoke and batch routes of a summarize server.
#[derive(Debug, Clone)]
pub struct RemoteSummarizer {
    http: Client,
    base_url: String,
}

impl RemoteSummarizer {
    /// Creates a client for the routes under `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> SummarizerResult<Self> {
        let parsed = url::Url::parse(base_url.as_ref())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SummarizerError::configuration(format!(
                "Unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            http: Client::new(),
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL of the remote routes.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Summarizes one text.
    #[instrument(skip(self, text), fields(base_url = %self.base_url))]
    pub async fn invoke(&self, text: impl Into<String>) -> SummarizerResult<String> {
        let body = InvokeRequest::new(SummarizeInput::new(text));
        let response: InvokeResponse = self.post("invoke", &body).await?;
        tracing::debug!(run_id = %response.metadata.run_id, "Remote invoke completed");
        Ok(response.output)
    }

    /// Summarizes several texts in one request; outputs keep input order.
    #[instrument(skip(self, texts), fields(base_url = %self.base_url))]
    pub async fn batch<I, S>(&self, texts: I) -> SummarizerResult<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let body = BatchRequest::new(texts.into_iter().map(SummarizeInput::new).collect());
        let response: BatchResponse = self.post("batch", &body).await?;
        Ok(response.output)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        route: &str,
        body: &B,
    ) -> SummarizerResult<T> {
        let url = format!("{}/{}", self.base_url, route);
        let response = self.http.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .unwrap_or(text);
            return Err(SummarizerError::Provider {
                status: status.as_u16(),
                message,
                request_id: None,
            });
        }

        Ok(response.json::<T>().await?)
    }
}
