//! Groq API client.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{AuthProvider, BearerAuth};
use crate::config::{GroqConfig, GroqConfigBuilder};
use crate::errors::{SummarizerError, SummarizerResult};
use crate::services::ChatService;
use crate::transport::{HttpTransport, ReqwestTransport};

/// Handle to the Groq chat-completions API.
///
/// Cheap to share behind an `Arc`; holds a pooled HTTP client.
///
/// ```rust,no_run
/// use groq_summarizer::{ChatRequest, GroqClient};
///
/// # async fn run() -> Result<(), groq_summarizer::SummarizerError> {
/// let client = GroqClient::from_env()?;
/// let request = ChatRequest::builder()
///     .model("llama-3.1-8b-instant")
///     .user("Summarize: Rust is a systems programming language.")
///     .build()?;
/// let response = client.chat().create(request).await?;
/// println!("{}", response.content().unwrap_or_default());
/// # Ok(())
/// # }
/// ```
pub struct GroqClient {
    config: GroqConfig,
    chat: ChatService,
}

impl GroqClient {
    /// Starts a builder.
    pub fn builder() -> GroqClientBuilder {
        GroqClientBuilder::new()
    }

    /// Builds a client from `GROQ_*` variables.
    pub fn from_env() -> SummarizerResult<Self> {
        GroqClientBuilder::from_config(GroqConfig::from_env()?).build()
    }

    /// Chat completions.
    pub fn chat(&self) -> &ChatService {
        &self.chat
    }

    /// Connection settings in use.
    pub fn config(&self) -> &GroqConfig {
        &self.config
    }
}

impl std::fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

enum ConfigSource {
    Builder(GroqConfigBuilder),
    Ready(GroqConfig),
}

/// Builder for [`GroqClient`].
///
/// Transport and credentials default to reqwest and the configured API
/// key; tests swap them for in-memory doubles.
pub struct GroqClientBuilder {
    source: ConfigSource,
    transport: Option<Arc<dyn HttpTransport>>,
    auth: Option<Arc<dyn AuthProvider>>,
}

impl GroqClientBuilder {
    /// Starts from an empty configuration.
    pub fn new() -> Self {
        Self {
            source: ConfigSource::Builder(GroqConfigBuilder::new()),
            transport: None,
            auth: None,
        }
    }

    /// Starts from a configuration that is already validated.
    pub fn from_config(config: GroqConfig) -> Self {
        Self {
            source: ConfigSource::Ready(config),
            ..Self::new()
        }
    }

    fn map_config(mut self, f: impl FnOnce(GroqConfigBuilder) -> GroqConfigBuilder) -> Self {
        self.source = match self.source {
            ConfigSource::Builder(builder) => ConfigSource::Builder(f(builder)),
            ready => ready,
        };
        self
    }

    /// Sets the API key. Ignored after [`from_config`](Self::from_config).
    pub fn api_key(self, api_key: impl Into<String>) -> Self {
        self.map_config(|b| b.api_key(api_key))
    }

    /// Sets the base URL. Ignored after [`from_config`](Self::from_config).
    pub fn base_url(self, base_url: impl Into<String>) -> Self {
        self.map_config(|b| b.base_url(base_url))
    }

    /// Sets the request timeout. Ignored after [`from_config`](Self::from_config).
    pub fn timeout(self, timeout: Duration) -> Self {
        self.map_config(|b| b.timeout(timeout))
    }

    /// Replaces the HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replaces the credential provider.
    pub fn auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Validates the configuration and assembles the client.
    pub fn build(self) -> SummarizerResult<GroqClient> {
        let config = match self.source {
            ConfigSource::Ready(config) => config,
            ConfigSource::Builder(builder) => builder.build()?,
        };

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let transport = ReqwestTransport::new(&config.base_url, config.timeout)
                    .map_err(|e| SummarizerError::configuration(e.to_string()))?;
                Arc::new(transport) as Arc<dyn HttpTransport>
            }
        };

        let auth = self
            .auth
            .unwrap_or_else(|| Arc::new(BearerAuth::new(config.api_key.clone())) as Arc<dyn AuthProvider>);
        auth.validate()?;

        tracing::debug!(
            base_url = %config.base_url,
            timeout = ?config.timeout,
            key_hint = %config.api_key_hint(),
            "Groq client ready"
        );

        Ok(GroqClient {
            chat: ChatService::new(transport, auth),
            config,
        })
    }
}

impl Default for GroqClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
