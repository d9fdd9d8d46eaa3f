//! In-memory stand-ins for the Groq transport and credentials.
//!
//! [`MockTransport`] answers from a script of canned replies and records
//! every request it sees, so client and service code can be exercised
//! without a network.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::auth::AuthProvider;
use crate::errors::SummarizerError;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// One scripted step: a reply or a transport failure.
#[derive(Debug, Clone)]
enum Step {
    Reply(HttpResponse),
    Unreachable,
}

#[derive(Default)]
struct Script {
    steps: VecDeque<Step>,
    fallback: Option<Step>,
    seen: Vec<HttpRequest>,
}

/// Scripted [`HttpTransport`].
///
/// Queued steps are consumed in order; once the queue is empty the
/// fallback step (if any) answers every request.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<Script>,
}

/// Builders for canned provider replies.
pub struct MockResponse;

impl MockResponse {
    /// 200 with a JSON body.
    pub fn json<T: serde::Serialize>(value: &T) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: HashMap::from([(
                "content-type".to_string(),
                "application/json".to_string(),
            )]),
            body: serde_json::to_vec(value).unwrap_or_default(),
        }
    }

    /// Groq-style `{"error": {...}}` body with the given status.
    pub fn error(status: u16, message: &str) -> HttpResponse {
        let mut response = Self::json(&serde_json::json!({
            "error": { "message": message, "type": "invalid_request_error" }
        }));
        response.status = status;
        response
    }

    /// Plain-text body with the given status.
    pub fn text(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::from([("content-type".to_string(), "text/plain".to_string())]),
            body: body.as_bytes().to_vec(),
        }
    }
}

impl MockTransport {
    /// An empty script; unanswered requests get a 500.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply.
    pub fn queue(&self, response: HttpResponse) {
        self.with_script(|s| s.steps.push_back(Step::Reply(response)));
    }

    /// Queues a 200 JSON reply.
    pub fn queue_json<T: serde::Serialize>(&self, value: &T) {
        self.queue(MockResponse::json(value));
    }

    /// Queues a Groq-style error reply.
    pub fn queue_error(&self, status: u16, message: &str) {
        self.queue(MockResponse::error(status, message));
    }

    /// Answers every request once the queue is drained.
    pub fn set_default(&self, response: HttpResponse) {
        self.with_script(|s| s.fallback = Some(Step::Reply(response)));
    }

    /// Fails every request as if the host were unreachable.
    pub fn fail_with_connection_error(&self) {
        self.with_script(|s| {
            s.steps.clear();
            s.fallback = Some(Step::Unreachable);
        });
    }

    /// Every request seen so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.with_script(|s| s.seen.clone())
    }

    /// Most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.with_script(|s| s.seen.last().cloned())
    }

    /// Number of requests seen.
    pub fn request_count(&self) -> usize {
        self.with_script(|s| s.seen.len())
    }

    fn with_script<R>(&self, f: impl FnOnce(&mut Script) -> R) -> R {
        let mut script = self
            .script
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut script)
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let step = self.with_script(|s| {
            s.seen.push(request);
            s.steps.pop_front().or_else(|| s.fallback.clone())
        });

        match step {
            Some(Step::Reply(response)) => Ok(response),
            Some(Step::Unreachable) => Err(TransportError::Connection {
                message: "connection refused".to_string(),
            }),
            None => Ok(MockResponse::error(500, "No mock response configured")),
        }
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .finish()
    }
}

/// Bearer credential with a fixed test key.
#[derive(Debug)]
pub struct MockAuth {
    api_key: String,
}

impl MockAuth {
    /// Uses `api_key` verbatim.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl Default for MockAuth {
    fn default() -> Self {
        Self::new("gsk_mock_test_key")
    }
}

impl AuthProvider for MockAuth {
    fn authorize(&self, headers: &mut HashMap<String, String>) {
        headers.insert("Authorization".to_string(), format!("Bearer {}", self.api_key));
    }

    fn validate(&self) -> Result<(), SummarizerError> {
        Ok(())
    }

    fn key_hint(&self) -> Option<String> {
        Some("...mock".to_string())
    }
}

/// Canned Groq payloads.
pub mod fixtures {
    use serde_json::{json, Value};

    /// A chat completion body whose first choice carries `content`.
    pub fn chat_response_json(content: &str) -> Value {
        json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "created": 1_699_999_999,
            "model": "llama-3.1-8b-instant",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 5,
                "total_tokens": 15,
                "total_time": 0.003
            },
            "x_groq": { "id": "req_mock" }
        })
    }
}
