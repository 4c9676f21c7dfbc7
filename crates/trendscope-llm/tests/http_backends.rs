//! Remote and local backends against an in-process HTTP responder.

use std::sync::Arc;

use trendscope_llm::{LlmBackend, LlmError, LlmGateway, LocalBackend, RemoteBackend, NO_RESPONSE_NARRATIVE};
use trendscope_market::test_support::http::CannedServer;
use trendscope_models::config::{LlmBackendConfig, LlmMode};

#[tokio::test]
async fn remote_backend_posts_chat_completion() {
    let server = CannedServer::start(
        200,
        r#"{"id": "chatcmpl-1", "object": "chat.completion", "choices": [
            {"index": 0, "message": {"role": "assistant", "content": "**Trend**: upward\n**Explanation**: Strong earnings."}, "finish_reason": "stop"}
        ]}"#,
    )
    .await;
    let backend = RemoteBackend::new(
        Some(format!("{}/v1", server.base_url).as_str()),
        "gpt-3.5-turbo",
        Some("sk-test".to_string()),
        500,
    );

    let text = backend.complete("analyze this").await.unwrap();
    assert!(text.starts_with("**Trend**: upward"));

    let captured = server.captured();
    assert_eq!(captured.request_line, "POST /v1/chat/completions HTTP/1.1");
    let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(body["model"], "gpt-3.5-turbo");
    assert_eq!(body["max_tokens"], 500);
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "analyze this");
}

#[tokio::test]
async fn remote_zero_choices_yields_no_response_sentinel() {
    let server = CannedServer::start(200, r#"{"id": "chatcmpl-2", "choices": []}"#).await;
    let gateway = LlmGateway::from_config(&LlmBackendConfig {
        mode: LlmMode::Remote,
        model: "gpt-3.5-turbo".to_string(),
        endpoint: Some(server.base_url.clone()),
        credential: Some("sk-test".to_string()),
        max_tokens: 500,
    });

    assert_eq!(gateway.complete("prompt").await, NO_RESPONSE_NARRATIVE);
}

#[tokio::test]
async fn remote_error_status_is_typed() {
    let server = CannedServer::start(
        401,
        r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#,
    )
    .await;
    let backend = RemoteBackend::new(Some(server.base_url.as_str()), "gpt-3.5-turbo", Some("bad".to_string()), 500);

    match backend.complete("prompt").await {
        Err(LlmError::Status { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn local_backend_posts_non_streaming_chat() {
    let server = CannedServer::start(
        200,
        r#"{"model": "gemma3:1b", "created_at": "2024-01-02T00:00:00Z",
            "message": {"role": "assistant", "content": "**Trend**: neutral"}, "done": true}"#,
    )
    .await;
    let backend = LocalBackend::new(Some(format!("{}/", server.base_url).as_str()), "gemma3:1b");

    let text = backend.complete("analyze this").await.unwrap();
    assert_eq!(text, "**Trend**: neutral");

    let captured = server.captured();
    assert_eq!(captured.request_line, "POST /api/chat HTTP/1.1");
    let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(body["model"], "gemma3:1b");
    assert_eq!(body["stream"], false);
    assert_eq!(body["messages"][0]["content"], "analyze this");
}

#[tokio::test]
async fn unreachable_local_endpoint_degrades_to_text() {
    let gateway = LlmGateway::from_config(&LlmBackendConfig {
        mode: LlmMode::Local,
        model: "gemma3:1b".to_string(),
        endpoint: Some("http://127.0.0.1:1".to_string()),
        credential: None,
        max_tokens: 500,
    });

    let narrative = gateway.complete("prompt").await;
    assert!(narrative.starts_with("Failed to connect to local LLM. Error: "));
    assert!(matches!(
        gateway.try_complete("prompt").await,
        Err(LlmError::Transport(_))
    ));
}

#[tokio::test]
async fn unreachable_remote_endpoint_degrades_to_text() {
    let backend: Arc<dyn LlmBackend> = Arc::new(RemoteBackend::new(
        Some("http://127.0.0.1:1/v1"),
        "gpt-3.5-turbo",
        Some("sk-test".to_string()),
        500,
    ));
    let gateway = LlmGateway::new(backend, LlmMode::Remote);

    let narrative = gateway.complete("prompt").await;
    assert!(narrative.starts_with("Error from LLM: HTTP transport error"));
}

/// Talks to a real Ollama server on the default port.
///
/// ```bash
/// cargo test -p trendscope-llm --test http_backends -- --ignored
/// ```
#[tokio::test]
#[ignore]
async fn live_local_model_answers() {
    let backend = LocalBackend::new(None, "gemma3:1b");
    let text = backend
        .complete("Reply with the single word: ok")
        .await
        .expect("local model unavailable");
    assert!(!text.trim().is_empty());
}
