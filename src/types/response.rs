//! Outcome variants and the clarification judgment.

use crate::types::request::trim_text;
use serde_json::{json, Value};

pub const READY_TOKEN: &str = "OK";
pub const CLARIFY_PREFIX: &str = "CLARIFY:";

/// The provider's judgment on whether the input is specific enough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClarifyDecision {
    Ready,
    NeedsClarification(String),
    /// Neither `OK` nor a `CLARIFY:` line; the caller falls through to generation.
    Unparseable,
}

impl ClarifyDecision {
    pub fn parse(reply: &str) -> Self {
        let reply = trim_text(reply);
        if reply == READY_TOKEN {
            return ClarifyDecision::Ready;
        }
        match reply.strip_prefix(CLARIFY_PREFIX) {
            Some(question) => {
                ClarifyDecision::NeedsClarification(trim_text(question).to_string())
            }
            None => ClarifyDecision::Unparseable,
        }
    }
}

/// Successful result of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Single-step flow: `{ "result": ... }`.
    Result(String),
    /// Clarify step judged the input specific enough.
    Ready,
    /// Clarify step produced a question for the user.
    Clarify { question: String },
    /// Two-phase generation step.
    Complete { result: String },
}

impl Outcome {
    pub fn to_body(&self) -> Value {
        match self {
            Outcome::Result(result) => json!({ "result": result }),
            Outcome::Ready => json!({ "status": "ready" }),
            Outcome::Clarify { question } => json!({ "status": "clarify", "question": question }),
            Outcome::Complete { result } => json!({ "status": "complete", "result": result }),
        }
    }
}
