//! Remote client tests against a fake summarizer.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use groq_summarizer::{RemoteSummarizer, SummarizerError};

#[tokio::test]
async fn test_invoke_posts_input_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/summarize/invoke"))
        .and(body_json(json!({"input": {"text": "A long paragraph."}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": "Short.",
            "metadata": {"run_id": "6f1c2f8e-7c1a-4c39-9f0e-2b7f4a1d9e10"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let remote = RemoteSummarizer::new(format!("{}/summarize", mock_server.uri())).unwrap();
    let summary = remote.invoke("A long paragraph.").await.unwrap();

    assert_eq!(summary, "Short.");
}

#[tokio::test]
async fn test_batch_returns_outputs_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/summarize/batch"))
        .and(body_json(json!({"inputs": [{"text": "one"}, {"text": "two"}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": ["1", "2"],
            "metadata": {"run_ids": [
                "6f1c2f8e-7c1a-4c39-9f0e-2b7f4a1d9e10",
                "0b5c1e8a-3d2f-4a6b-8c9d-1e2f3a4b5c6d"
            ]}
        })))
        .mount(&mock_server)
        .await;

    let remote = RemoteSummarizer::new(format!("{}/summarize/", mock_server.uri())).unwrap();
    let summaries = remote.batch(["one", "two"]).await.unwrap();

    assert_eq!(summaries, vec!["1".to_string(), "2".to_string()]);
}

#[tokio::test]
async fn test_error_body_message_is_surfaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/summarize/invoke"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({
            "error": "network_error",
            "message": "Network error: connection refused"
        })))
        .mount(&mock_server)
        .await;

    let remote = RemoteSummarizer::new(format!("{}/summarize", mock_server.uri())).unwrap();
    let err = remote.invoke("hello").await.unwrap_err();

    match err {
        SummarizerError::Provider { status, message, .. } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Network error: connection refused");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_rejects_non_http_url() {
    assert!(RemoteSummarizer::new("ftp://localhost/summarize").is_err());
    assert!(RemoteSummarizer::new("not a url").is_err());
}

#[test]
fn test_trailing_slash_is_trimmed() {
    let remote = RemoteSummarizer::new("http://localhost:8000/summarize/").unwrap();
    assert_eq!(remote.base_url(), "http://localhost:8000/summarize");
}
