//! Credentials for outbound Groq requests.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

use crate::errors::SummarizerError;

/// Adds credentials to provider requests.
pub trait AuthProvider: Send + Sync {
    /// Inserts the credential headers.
    fn authorize(&self, headers: &mut HashMap<String, String>);

    /// Checks the credential before the first request.
    fn validate(&self) -> Result<(), SummarizerError>;

    /// Non-secret suffix of the credential, for error reports.
    fn key_hint(&self) -> Option<String> {
        None
    }
}

/// `Authorization: Bearer <GROQ_API_KEY>`.
pub struct BearerAuth {
    api_key: SecretString,
}

impl BearerAuth {
    /// Wraps an API key.
    pub fn new(api_key: SecretString) -> Self {
        Self { api_key }
    }

    fn suffix(&self) -> String {
        key_suffix(self.api_key.expose_secret())
    }
}

/// `...` plus the last four characters, or `****` for keys too short to
/// reveal anything.
pub(crate) fn key_suffix(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("...{}", tail)
    } else {
        "****".to_string()
    }
}

impl AuthProvider for BearerAuth {
    fn authorize(&self, headers: &mut HashMap<String, String>) {
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key.expose_secret()),
        );
    }

    fn validate(&self) -> Result<(), SummarizerError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(SummarizerError::Authentication {
                message: "GROQ_API_KEY is empty".to_string(),
                api_key_hint: None,
            });
        }
        Ok(())
    }

    fn key_hint(&self) -> Option<String> {
        Some(self.suffix())
    }
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BearerAuth({})", self.suffix())
    }
}
