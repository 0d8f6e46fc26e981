use crate::Result;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// JSON-over-HTTP transport to the provider.
///
/// No retries. Without an explicit timeout the reqwest default (none) applies.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| TransportError::Other(format!("invalid base url '{}': {}", base_url, e)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()
            .map_err(TransportError::Http)?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| TransportError::Other(format!("invalid path '{}': {}", path, e)))?;
        Ok(url)
    }

    /// POST `body` as JSON and return the status with the decoded JSON reply.
    ///
    /// Non-2xx statuses are returned, not raised; a body that is not JSON is a
    /// [`TransportError::Decode`].
    pub async fn post_json(
        &self,
        path: &str,
        headers: &[(&'static str, &str)],
        body: &Value,
    ) -> Result<(u16, Value)> {
        let url = self.endpoint(path)?;

        let mut header_map = HeaderMap::new();
        header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in headers {
            let value = HeaderValue::from_str(value).map_err(|_| {
                TransportError::Other(format!("invalid value for header '{}'", name))
            })?;
            header_map.insert(HeaderName::from_static(*name), value);
        }

        let response = self
            .client
            .post(url)
            .headers(header_map)
            .json(body)
            .send()
            .await
            .map_err(TransportError::Http)?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(TransportError::Http)?;
        debug!(status, len = bytes.len(), "provider reply received");

        let json = serde_json::from_slice(&bytes).map_err(|source| TransportError::Decode {
            status,
            source,
        })?;

        Ok((status, json))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("reply with HTTP {status} is not valid JSON: {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("Transport error: {0}")]
    Other(String),
}
