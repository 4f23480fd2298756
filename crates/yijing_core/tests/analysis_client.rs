use httpmock::prelude::*;
use serde_json::json;
use yijing_core::config::AnalysisConfig;
use yijing_core::{AnalysisClient, AnalysisError, ChatCompletionClient};

fn config_for(server: &MockServer) -> AnalysisConfig {
    AnalysisConfig {
        base_url: server.url("/v1"),
        model: "test-model".to_string(),
        api_key_env: "YIJING_TEST_UNSET_KEY".to_string(),
        timeout_secs: 5,
    }
}

#[test]
fn successful_completion_returns_first_choice() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer secret")
            .json_body(json!({
                "model": "test-model",
                "messages": [{"role": "user", "content": "问题"}]
            }));
        then.status(200).json_body(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "解析"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }));
    });

    let client = ChatCompletionClient::with_api_key(&config_for(&server), "secret").unwrap();
    let text = client.complete("问题").unwrap();

    assert_eq!(text, "解析");
    mock.assert();
}

#[test]
fn non_success_status_is_reported_with_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(429).body("rate limited");
    });

    let client = ChatCompletionClient::with_api_key(&config_for(&server), "secret").unwrap();
    let err = client.complete("问题").unwrap_err();

    match err {
        AnalysisError::Status { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_choices_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(json!({ "choices": [] }));
    });

    let client = ChatCompletionClient::with_api_key(&config_for(&server), "secret").unwrap();
    let err = client.complete("问题").unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyResponse));
}

#[test]
fn malformed_body_is_a_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).body("not json");
    });

    let client = ChatCompletionClient::with_api_key(&config_for(&server), "secret").unwrap();
    let err = client.complete("问题").unwrap_err();
    assert!(matches!(err, AnalysisError::Decode(_)));
}

#[test]
fn missing_api_key_variable_is_rejected() {
    let server = MockServer::start();
    let err = ChatCompletionClient::from_config(&config_for(&server))
        .err()
        .unwrap();
    match err {
        AnalysisError::MissingApiKey(name) => assert_eq!(name, "YIJING_TEST_UNSET_KEY"),
        other => panic!("unexpected error: {other}"),
    }
}
