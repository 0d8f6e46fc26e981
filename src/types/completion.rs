//! Outbound completion query and the provider's reply.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message role on the provider's wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: text.into(),
        }
    }
}

/// One prompt for one provider call. Built per call, never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionQuery {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

impl CompletionQuery {
    pub fn new(prompt: impl Into<String>, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            messages: vec![Message::user(prompt)],
        }
    }

    /// The prompt text carried by the single user message.
    pub fn prompt(&self) -> &str {
        self.messages
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }
}

/// Raw provider reply: HTTP status plus the parsed JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionReply {
    pub status: u16,
    pub body: Value,
}

impl CompletionReply {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `content[0].text`, if it is a non-empty string.
    pub fn first_text(&self) -> Option<&str> {
        self.body
            .pointer("/content/0/text")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}
