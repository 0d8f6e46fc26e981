//! Wire-level tests for the Anthropic provider.

use crate::integration::mock_server::{text_body, MockServerFixture, MESSAGES_PATH, TEST_KEY};
use choicegen::{AnthropicProvider, CompletionProvider, CompletionQuery, Error, ServiceConfig};
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn test_request_shape_and_headers() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", MESSAGES_PATH)
        .match_header("x-api-key", TEST_KEY)
        .match_header("anthropic-version", "2023-06-01")
        .match_body(Matcher::Json(json!({
            "model": "claude-3-5-haiku-20241022",
            "max_tokens": 2000,
            "messages": [{"role": "user", "content": "프롬프트"}],
        })))
        .with_status(200)
        .with_body(text_body("응답").to_string())
        .expect(1)
        .create_async()
        .await;

    let config = ServiceConfig::default()
        .with_api_key(TEST_KEY)
        .with_base_url(&fixture.base_url);
    let provider = AnthropicProvider::from_config(&config).unwrap();

    let query = CompletionQuery::new("프롬프트", "claude-3-5-haiku-20241022", 2000);
    let reply = provider.complete(&query).await.unwrap();

    assert!(reply.is_success());
    assert_eq!(reply.first_text(), Some("응답"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_is_returned_not_raised() {
    let mut fixture = MockServerFixture::new().await;
    let details = json!({"type": "error", "error": {"type": "authentication_error", "message": "invalid x-api-key"}});
    let _mock = fixture.mock_json("프롬프트", 401, &details).await;

    let provider = AnthropicProvider::from_config(&fixture.config(Default::default())).unwrap();
    let reply = provider
        .complete(&CompletionQuery::new("프롬프트", "m", 10))
        .await
        .unwrap();

    assert_eq!(reply.status, 401);
    assert_eq!(reply.body, details);
}

#[tokio::test]
async fn test_non_json_body_is_unhandled() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_raw(502, "<html>Bad Gateway</html>").await;

    let provider = AnthropicProvider::from_config(&fixture.config(Default::default())).unwrap();
    let err = provider
        .complete(&CompletionQuery::new("x", "m", 10))
        .await
        .unwrap_err();

    match err {
        Error::Unhandled { message, .. } => assert!(message.contains("502")),
        other => panic!("expected Unhandled, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_provider_is_unhandled() {
    let config = ServiceConfig::default()
        .with_api_key(TEST_KEY)
        .with_base_url("http://127.0.0.1:1");
    let provider = AnthropicProvider::from_config(&config).unwrap();

    let err = provider
        .complete(&CompletionQuery::new("x", "m", 10))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unhandled { .. }));
}
