use std::time::Duration;

use smartrelay_provider::{LlmMessage, LlmProvider, LlmRequest, OpenAiProvider};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_completion(text: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{
            "message": {"content": text},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5}
    })
}

fn request() -> LlmRequest {
    LlmRequest {
        model: "openai/gpt-3.5-turbo".into(),
        system: Some("be helpful".into()),
        messages: vec![LlmMessage::user("hi")],
        temperature: Some(0.7),
        max_tokens: None,
    }
}

#[tokio::test]
async fn chat_sends_bearer_token_and_parses_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(serde_json::json!({
            "model": "openai/gpt-3.5-turbo",
            "messages": [
                {"role": "system", "content": "be helpful"},
                {"role": "user", "content": "hi"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_completion("Hello there!")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new("test-key", server.uri());
    let resp = provider.chat(request()).await.unwrap();

    assert_eq!(resp.text, "Hello there!");
    assert_eq!(resp.input_tokens, Some(10));
    assert_eq!(resp.output_tokens, Some(5));
}

#[tokio::test]
async fn chat_non_200_is_error_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "error": {"type": "overloaded", "message": "try later"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new("test-key", server.uri());
    let err = provider.chat(request()).await.unwrap_err();

    let text = err.to_string();
    assert!(text.contains("503"));
    assert!(text.contains("try later"));
}

#[tokio::test]
async fn chat_times_out_with_bounded_wait() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(mock_completion("too late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let provider =
        OpenAiProvider::new("test-key", server.uri()).with_timeout(Duration::from_millis(200));
    let err = provider.chat(request()).await.unwrap_err();

    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn chat_malformed_body_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new("test-key", server.uri());
    assert!(provider.chat(request()).await.is_err());
}
