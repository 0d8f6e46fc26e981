//! End-to-end tests through the axum router.

use crate::integration::mock_server::{MockServerFixture, MESSAGES_PATH};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use choicegen::prompt::CATCH_ALL_OPTION;
use choicegen::{server, Flow, Orchestrator, ServiceConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const CLARIFY_FRAGMENT: &str = "판단 기준";
const GENERATE_FRAGMENT: &str = "직접 입력";
const SINGLE_STEP_FRAGMENT: &str = "문장 형태 금지";

fn app(orchestrator: Orchestrator) -> Router {
    server::router(Arc::new(orchestrator))
}

async fn send(app: Router, method: Method, body: Option<Value>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(server::ENDPOINT_PATH)
        .header("content-type", "application/json")
        .body(match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, bytes.to_vec())
}

fn json_of(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

fn assert_cors(headers: &axum::http::HeaderMap) {
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

#[tokio::test]
async fn test_preflight_is_empty_success() {
    let fixture = MockServerFixture::new().await;
    let (status, headers, body) = send(app(fixture.orchestrator(Flow::TwoPhase)), Method::OPTIONS, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_cors(&headers);
}

#[tokio::test]
async fn test_get_is_method_not_allowed() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", MESSAGES_PATH)
        .expect(0)
        .create_async()
        .await;

    let (status, headers, body) = send(
        app(fixture.orchestrator(Flow::TwoPhase)),
        Method::GET,
        Some(json!({"input": "x"})),
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json_of(&body), json!({"error": "Method not allowed"}));
    assert_cors(&headers);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_credential_is_500() {
    let fixture = MockServerFixture::new().await;
    let config = ServiceConfig::default().with_base_url(&fixture.base_url);
    let orchestrator = Orchestrator::from_config(config).unwrap();

    let (status, headers, body) = send(app(orchestrator), Method::POST, Some(json!({"input": "x"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_of(&body), json!({"error": "API 키가 설정되지 않았습니다."}));
    assert_cors(&headers);
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let fixture = MockServerFixture::new().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri(server::ENDPOINT_PATH)
        .body(Body::from("input=hello"))
        .unwrap();
    let response = app(fixture.orchestrator(Flow::TwoPhase))
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_single_step_end_to_end() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_text(SINGLE_STEP_FRAGMENT, "**질문:** 학년은?\n**설명:** 없음\n**옵션:**\n- 초등\n- 중등")
        .await;

    let (status, _, body) = send(
        app(fixture.orchestrator(Flow::SingleStep)),
        Method::POST,
        Some(json!({"input": "학년"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_of(&body),
        json!({"result": "**질문:** 학년은?\n**설명:** 없음\n**옵션:**\n- 초등\n- 중등"})
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_clarify_then_generate() {
    let mut fixture = MockServerFixture::new().await;
    let clarify = fixture.mock_text(CLARIFY_FRAGMENT, "OK").await;

    let (status, _, body) = send(
        app(fixture.orchestrator(Flow::TwoPhase)),
        Method::POST,
        Some(json!({"input": "초등 고학년 독서 장르 선호", "mode": "clarify"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!({"status": "ready"}));
    clarify.assert_async().await;

    let generated = format!("**질문:** 선호 장르는?\n**설명:** 없음\n**옵션:**\n- 동화\n- {}", CATCH_ALL_OPTION);
    let generate = fixture.mock_text(GENERATE_FRAGMENT, &generated).await;

    let (status, _, body) = send(
        app(fixture.orchestrator(Flow::TwoPhase)),
        Method::POST,
        Some(json!({"input": "초등 고학년 독서 장르 선호"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!({"status": "complete", "result": generated}));
    generate.assert_async().await;
}

#[tokio::test]
async fn test_unparseable_judgment_makes_two_calls() {
    let mut fixture = MockServerFixture::new().await;
    let clarify = fixture.mock_text(CLARIFY_FRAGMENT, "판단하기 어렵습니다").await;
    let generate = fixture.mock_text(GENERATE_FRAGMENT, "**질문:** ?").await;

    let (status, _, body) = send(
        app(fixture.orchestrator(Flow::TwoPhase)),
        Method::POST,
        Some(json!({"input": "음식", "mode": "clarify"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!({"status": "complete", "result": "**질문:** ?"}));
    clarify.assert_async().await;
    generate.assert_async().await;
}

#[tokio::test]
async fn test_upstream_error_passthrough() {
    let mut fixture = MockServerFixture::new().await;
    let details = json!({"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}});
    let _mock = fixture.mock_json(GENERATE_FRAGMENT, 529, &details).await;

    let (status, headers, body) = send(
        app(fixture.orchestrator(Flow::TwoPhase)),
        Method::POST,
        Some(json!({"input": "x"})),
    )
    .await;

    assert_eq!(status.as_u16(), 529);
    assert_eq!(json_of(&body), json!({"error": "Anthropic API 오류", "details": details}));
    assert_cors(&headers);
}

#[tokio::test]
async fn test_missing_content_is_500_with_details() {
    let mut fixture = MockServerFixture::new().await;
    let raw = json!({"id": "msg_x", "type": "message", "content": []});
    let _mock = fixture.mock_json(GENERATE_FRAGMENT, 200, &raw).await;

    let (status, _, body) = send(
        app(fixture.orchestrator(Flow::TwoPhase)),
        Method::POST,
        Some(json!({"input": "x"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_of(&body), json!({"error": "예상치 못한 응답 형식", "details": raw}));
}
