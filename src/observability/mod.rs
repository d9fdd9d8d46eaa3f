//! Logging setup and secret redaction.

use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

use crate::errors::SummarizerError;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable, compact lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = SummarizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" | "compact" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(SummarizerError::configuration(format!(
                "Unknown log format: {}",
                other
            ))),
        }
    }
}

impl LogFormat {
    /// Reads `LOG_FORMAT`, defaulting to pretty output.
    pub fn from_env() -> Result<Self, SummarizerError> {
        match std::env::var("LOG_FORMAT") {
            Ok(raw) => raw.parse(),
            Err(_) => Ok(Self::default()),
        }
    }
}

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(true)
            .init(),
    }
}

fn redaction_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (r"gsk_[A-Za-z0-9]+", "gsk_***"),
            (r"Bearer [A-Za-z0-9._-]+", "Bearer ***"),
            (r"(?i)api[_-]?key[=:]\s*[^\s,}]+", "api_key=***"),
        ]
        .into_iter()
        .filter_map(|(pattern, replacement)| {
            Regex::new(pattern).ok().map(|re| (re, replacement))
        })
        .collect()
    })
}

/// Masks API keys and bearer tokens in text bound for logs.
pub fn redact(text: &str) -> String {
    redaction_patterns()
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}
