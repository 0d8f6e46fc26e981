//! Anthropic Messages API provider.
//!
//! Request: `POST {base_url}/v1/messages` with `{model, max_tokens, messages}`.
//! Headers: `content-type`, `anthropic-version`, `x-api-key`.
//! Reply text lives at `content[0].text`.

use async_trait::async_trait;
use std::fmt;
use tracing::info;

use super::CompletionProvider;
use crate::config::ServiceConfig;
use crate::transport::HttpTransport;
use crate::types::{CompletionQuery, CompletionReply};
use crate::{Error, Result};

pub const MESSAGES_PATH: &str = "/v1/messages";

pub struct AnthropicProvider {
    transport: HttpTransport,
    api_key: String,
    api_version: String,
}

// Keep the key out of any debug output.
impl fmt::Debug for AnthropicProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicProvider")
            .field("base_url", &self.transport.base_url().as_str())
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl AnthropicProvider {
    pub fn new(
        transport: HttpTransport,
        api_key: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            api_version: api_version.into(),
        }
    }

    /// Build from config. Fails with `MisconfiguredService` when no credential is set.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let api_key = config.credential().ok_or(Error::MisconfiguredService)?;
        let transport = HttpTransport::new(&config.base_url, config.http_timeout())?;
        Ok(Self::new(transport, api_key, config.api_version.clone()))
    }

    fn headers(&self) -> [(&'static str, &str); 2] {
        [
            ("anthropic-version", self.api_version.as_str()),
            ("x-api-key", self.api_key.as_str()),
        ]
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    fn provider_id(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, query: &CompletionQuery) -> Result<CompletionReply> {
        let body = serde_json::to_value(query)?;
        info!(
            model = %query.model,
            max_tokens = query.max_tokens,
            "calling Anthropic API"
        );
        let (status, json) = self
            .transport
            .post_json(MESSAGES_PATH, &self.headers(), &body)
            .await?;
        info!(status, "Anthropic API response status");
        Ok(CompletionReply::new(status, json))
    }
}
