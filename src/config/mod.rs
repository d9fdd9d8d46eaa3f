//! Configuration for the summarizer.
//!
//! Three pieces are loaded once at startup and never change afterwards:
//! the Groq connection ([`GroqConfig`]), the generation settings
//! ([`ModelConfig`]), and the HTTP listener ([`ServerConfig`]).
//! [`AppConfig::from_env`] assembles all of them and fails fast when the
//! API key is missing.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::auth::key_suffix;
use crate::errors::{SummarizerError, SummarizerResult};

/// Default base URL for the Groq API.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model used for summaries.
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Default listener host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default listener port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default route base path.
pub const DEFAULT_ROUTE_PATH: &str = "/summarize";

/// Default maximum request body size (2 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Connection settings for the Groq API.
#[derive(Clone)]
pub struct GroqConfig {
    /// Bearer key; never logged.
    pub(crate) api_key: SecretString,
    /// API root, without a trailing slash.
    pub base_url: String,
    /// Request timeout. `None` leaves the HTTP client default in place.
    pub timeout: Option<Duration>,
}

impl GroqConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> GroqConfigBuilder {
        GroqConfigBuilder::new()
    }

    /// Reads `GROQ_API_KEY` (required), `GROQ_BASE_URL` and
    /// `GROQ_TIMEOUT` (whole seconds).
    pub fn from_env() -> SummarizerResult<Self> {
        let mut builder = GroqConfigBuilder::new().api_key_from_env("GROQ_API_KEY")?;

        if let Ok(base_url) = std::env::var("GROQ_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Some(secs) = parse_env::<u64>("GROQ_TIMEOUT")? {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Non-secret suffix of the API key for log lines.
    pub fn api_key_hint(&self) -> String {
        key_suffix(self.api_key.expose_secret())
    }
}

impl std::fmt::Debug for GroqConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for `GroqConfig`.
#[derive(Default)]
pub struct GroqConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl GroqConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Reads the API key from `var`; a missing variable is a startup error.
    pub fn api_key_from_env(self, var: &str) -> SummarizerResult<Self> {
        match std::env::var(var) {
            Ok(key) => Ok(self.api_key(key)),
            Err(_) => Err(SummarizerError::configuration(format!(
                "{} environment variable not set",
                var
            ))),
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> SummarizerResult<GroqConfig> {
        let api_key = self
            .api_key
            .ok_or_else(|| SummarizerError::configuration("API key is required"))?;

        if api_key.trim().is_empty() {
            return Err(SummarizerError::configuration("API key cannot be empty"));
        }

        if !api_key.starts_with("gsk_") {
            tracing::warn!("API key does not match expected Groq format (gsk_*)");
        }

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let parsed = url::Url::parse(&base_url)?;
        match parsed.scheme() {
            "https" => {}
            "http" => tracing::warn!(base_url = %base_url, "Base URL is not using HTTPS"),
            other => {
                return Err(SummarizerError::configuration(format!(
                    "Unsupported base URL scheme: {}",
                    other
                )))
            }
        }

        Ok(GroqConfig {
            api_key: SecretString::new(api_key),
            base_url,
            timeout: self.timeout,
        })
    }
}

/// Generation settings sent with every chat completion.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// Model identifier.
    pub model: String,
    /// Sampling temperature (0.0-2.0).
    pub temperature: f32,
}

impl ModelConfig {
    /// Creates and validates model settings.
    pub fn new(model: impl Into<String>, temperature: f32) -> SummarizerResult<Self> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(SummarizerError::configuration("Model cannot be empty"));
        }
        if !(0.0..=2.0).contains(&temperature) {
            return Err(SummarizerError::configuration(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                temperature
            )));
        }
        Ok(Self { model, temperature })
    }

    /// Reads `GROQ_MODEL` and `GROQ_TEMPERATURE`, falling back to defaults.
    pub fn from_env() -> SummarizerResult<Self> {
        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let temperature = parse_env::<f32>("GROQ_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE);
        Self::new(model, temperature)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Host to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Base path of the summarize routes.
    pub route_path: String,
    /// Maximum accepted request body in bytes.
    pub body_limit: usize,
}

impl ServerConfig {
    /// Reads `SUMMARIZER_HOST`, `SUMMARIZER_PORT` and `SUMMARIZER_PATH`.
    pub fn from_env() -> SummarizerResult<Self> {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("SUMMARIZER_HOST") {
            config.host = host;
        }
        if let Some(port) = parse_env::<u16>("SUMMARIZER_PORT")? {
            config.port = port;
        }
        if let Ok(path) = std::env::var("SUMMARIZER_PATH") {
            config = config.with_route_path(path)?;
        }
        Ok(config)
    }

    /// Sets the route base path, normalized to `/segment[/segment...]`.
    pub fn with_route_path(mut self, path: impl AsRef<str>) -> SummarizerResult<Self> {
        self.route_path = normalize_route_path(path.as_ref())?;
        Ok(self)
    }

    /// Returns `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            route_path: DEFAULT_ROUTE_PATH.to_string(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

/// Everything the server needs, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Groq connection settings.
    pub groq: GroqConfig,
    /// Generation settings.
    pub model: ModelConfig,
    /// Listener settings.
    pub server: ServerConfig,
}

impl AppConfig {
    /// Loads the full configuration from the environment.
    pub fn from_env() -> SummarizerResult<Self> {
        Ok(Self {
            groq: GroqConfig::from_env()?,
            model: ModelConfig::from_env()?,
            server: ServerConfig::from_env()?,
        })
    }
}

fn normalize_route_path(path: &str) -> SummarizerResult<String> {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err(SummarizerError::configuration(
            "Route path must contain at least one segment",
        ));
    }
    if trimmed.contains(|c: char| c.is_whitespace() || c == '{' || c == '}' || c == ':') {
        return Err(SummarizerError::configuration(format!(
            "Invalid route path: {}",
            path
        )));
    }
    Ok(format!("/{}", trimmed))
}

fn parse_env<T: std::str::FromStr>(name: &str) -> SummarizerResult<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            SummarizerError::configuration(format!("Invalid value for {}: {}", name, raw))
        }),
        Err(_) => Ok(None),
    }
}
