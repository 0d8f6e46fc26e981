//! Mock provider server setup for integration tests

use choicegen::{Flow, Orchestrator, ServiceConfig};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};

pub const TEST_KEY: &str = "sk-ant-test";
pub const MESSAGES_PATH: &str = "/v1/messages";

/// Test fixture that owns a mock Anthropic server.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    pub fn config(&self, flow: Flow) -> ServiceConfig {
        ServiceConfig::default()
            .with_api_key(TEST_KEY)
            .with_base_url(&self.base_url)
            .with_flow(flow)
    }

    pub fn orchestrator(&self, flow: Flow) -> Orchestrator {
        Orchestrator::from_config(self.config(flow)).expect("orchestrator")
    }

    /// Successful Messages API reply with one text block, matched on a prompt fragment.
    /// Fragments are used as regexes, so keep them free of metacharacters.
    pub async fn mock_text(&mut self, prompt_fragment: &str, text: &str) -> Mock {
        self.mock_json(prompt_fragment, 200, &text_body(text)).await
    }

    pub async fn mock_json(&mut self, prompt_fragment: &str, status: usize, body: &Value) -> Mock {
        self.server
            .mock("POST", MESSAGES_PATH)
            .match_header("x-api-key", TEST_KEY)
            .match_header("anthropic-version", "2023-06-01")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Regex(prompt_fragment.to_string()))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    pub async fn mock_raw(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", MESSAGES_PATH)
            .with_status(status)
            .with_body(body)
            .create_async()
            .await
    }
}

pub fn text_body(text: &str) -> Value {
    json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 10, "output_tokens": 5}
    })
}
