//! Pipeline tests against a fake Groq API.

mod common;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{app, post_json, send};
use groq_summarizer::{
    GroqChatModel, GroqClient, ModelConfig, SummarizeChain, SummarizeInput, SummarizerError,
};

const API_KEY: &str = "gsk_integration_test_key";

fn completion(content: Value) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "llama-3.1-8b-instant",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 42, "completion_tokens": 12, "total_tokens": 54 },
        "x_groq": { "id": "req_01abc" }
    })
}

fn model_at(base_url: String) -> Arc<GroqChatModel> {
    let client = GroqClient::builder()
        .api_key(API_KEY)
        .base_url(base_url)
        .timeout(Duration::from_millis(500))
        .build()
        .expect("Failed to build client");
    Arc::new(GroqChatModel::new(Arc::new(client), ModelConfig::default()))
}

fn model_for(server: &MockServer) -> Arc<GroqChatModel> {
    model_at(server.uri())
}

/// An address nothing listens on: bind an ephemeral port, then release it.
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read address");
    drop(listener);
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_chain_sends_fixed_prompt_and_settings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", format!("Bearer {}", API_KEY).as_str()))
        .and(body_partial_json(json!({
            "model": "llama-3.1-8b-instant",
            "temperature": 0.3,
            "messages": [{
                "role": "user",
                "content": "Summarize the following text clearly and concisely:\n\nRust guarantees memory safety."
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!("Rust is memory safe."))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let chain = SummarizeChain::summarize(model_for(&mock_server));
    let summary = chain
        .invoke(&SummarizeInput::new("Rust guarantees memory safety."))
        .await
        .unwrap();

    assert_eq!(summary, "Rust is memory safe.");
}

#[tokio::test]
async fn test_endpoint_returns_generated_text_exactly() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion(json!("  Padded summary.\n"))),
        )
        .mount(&mock_server)
        .await;

    let (status, body) = send(
        app(model_for(&mock_server)),
        post_json("/summarize", &json!({"text": "Some long paragraph."})),
    )
    .await;

    assert_eq!(status.as_u16(), 200);
    assert_eq!(body, json!({"output": "  Padded summary.\n"}));
}

#[tokio::test]
async fn test_invalid_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Invalid API Key",
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }
        })))
        .mount(&mock_server)
        .await;

    let chain = SummarizeChain::summarize(model_for(&mock_server));
    let err = chain
        .invoke(&SummarizeInput::new("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, SummarizerError::Authentication { .. }));

    let (status, body) = send(
        app(model_for(&mock_server)),
        post_json("/summarize", &json!({"text": "hello"})),
    )
    .await;
    assert_eq!(status.as_u16(), 502);
    assert_eq!(body["error"], "authentication_error");
    assert!(!body["message"].as_str().unwrap().contains(API_KEY));
}

#[tokio::test]
async fn test_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "2")
                .set_body_json(json!({
                    "error": {
                        "message": "Rate limit reached for model",
                        "type": "rate_limit_error"
                    }
                })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = tower::ServiceExt::oneshot(
        app(model_for(&mock_server)),
        post_json("/summarize", &json!({"text": "hello"})),
    )
    .await
    .unwrap();

    assert_eq!(response.status().as_u16(), 502);
    assert_eq!(response.headers().get("retry-after").unwrap(), "2");
}

#[tokio::test]
async fn test_provider_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let chain = SummarizeChain::summarize(model_for(&mock_server));
    let err = chain
        .invoke(&SummarizeInput::new("hello"))
        .await
        .unwrap_err();

    match err {
        SummarizerError::Provider { status, message, .. } => {
            assert_eq!(status, 500);
            assert!(message.contains("upstream exploded"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_null_content_is_extraction_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(Value::Null)))
        .mount(&mock_server)
        .await;

    let (status, body) = send(
        app(model_for(&mock_server)),
        post_json("/summarize", &json!({"text": "hello"})),
    )
    .await;

    assert_eq!(status.as_u16(), 500);
    assert_eq!(body["error"], "extraction_error");
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion(json!("late")))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let (status, body) = send(
        app(model_for(&mock_server)),
        post_json("/summarize", &json!({"text": "hello"})),
    )
    .await;

    assert_eq!(status.as_u16(), 502);
    assert_eq!(body["error"], "timeout");
}

#[tokio::test]
async fn test_unreachable_provider() {
    let model = model_at(closed_port_url());

    let err = SummarizeChain::summarize(model.clone())
        .invoke(&SummarizeInput::new("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, SummarizerError::Network { .. }), "got {:?}", err);

    let (status, body) = send(app(model), post_json("/summarize", &json!({"text": "hello"}))).await;

    assert_eq!(status.as_u16(), 502);
    assert_eq!(body["error"], "network_error");
}
