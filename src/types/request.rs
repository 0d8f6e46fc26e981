//! Inbound submission body.

use crate::{Error, Result};
use serde_json::Value;

/// Trim whitespace and byte-order marks from both ends.
pub(crate) fn trim_text(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// What the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Generate,
    Clarify,
}

impl Mode {
    /// Only the literal `"clarify"` selects the clarification step.
    pub fn from_field(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("clarify") => Mode::Clarify,
            _ => Mode::Generate,
        }
    }
}

/// Validated submission: `input` is guaranteed non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    input: String,
    pub mode: Mode,
}

impl SubmitRequest {
    pub fn new(input: impl Into<String>, mode: Mode) -> Result<Self> {
        let input = input.into();
        if trim_text(&input).is_empty() {
            return Err(Error::InvalidInput);
        }
        Ok(Self { input, mode })
    }

    /// Parse a raw body. Anything that is not a JSON object carrying a string
    /// `input` counts as missing input.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body).map_err(|_| Error::InvalidInput)?;
        let input = value
            .get("input")
            .and_then(Value::as_str)
            .ok_or(Error::InvalidInput)?;
        Self::new(input, Mode::from_field(value.get("mode")))
    }

    /// The input exactly as submitted (untrimmed).
    pub fn input(&self) -> &str {
        &self.input
    }
}
