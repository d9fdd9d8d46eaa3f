//! Shared helpers for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

use groq_summarizer::chain::SUMMARIZE_TEMPLATE;
use groq_summarizer::errors::SummarizerResult;
use groq_summarizer::{server, AiMessage, ChatModel, ServerConfig, SummarizeChain, SummarizerError};

/// Recovers the user text from a rendered summarize prompt.
pub fn text_of(prompt: &str) -> &str {
    let prefix = SUMMARIZE_TEMPLATE.trim_end_matches("{text}");
    prompt.strip_prefix(prefix).unwrap_or(prompt)
}

/// Answers `"SUMMARY: "` followed by the first ten characters of the text.
#[derive(Default)]
pub struct EchoModel {
    calls: AtomicUsize,
}

impl EchoModel {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for EchoModel {
    async fn invoke(&self, prompt: &str) -> SummarizerResult<AiMessage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let head: String = text_of(prompt).chars().take(10).collect();
        Ok(AiMessage::text(format!("SUMMARY: {}", head)))
    }
}

/// Fails every call with the given error.
pub struct FailingModel(pub fn() -> SummarizerError);

#[async_trait]
impl ChatModel for FailingModel {
    async fn invoke(&self, _prompt: &str) -> SummarizerResult<AiMessage> {
        Err((self.0)())
    }
}

/// Router over `model` with default server settings.
pub fn app(model: Arc<dyn ChatModel>) -> Router {
    app_with(model, &ServerConfig::default())
}

pub fn app_with(model: Arc<dyn ChatModel>, config: &ServerConfig) -> Router {
    server::router(Arc::new(SummarizeChain::summarize(model)), config)
}

/// Sends one request through the router and returns status and JSON body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
