//! Service configuration.
//!
//! Values come from an optional YAML file (`CHOICEGEN_CONFIG`) and are then
//! overridden by environment variables. The provider credential is only ever
//! taken from the environment.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "CHOICEGEN_CONFIG";
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_CLARIFY_MAX_TOKENS: u32 = 300;
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Which variant of the endpoint is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    /// One generation call, `{ "result": ... }` on success.
    SingleStep,
    /// Optional clarification round-trip before generation, `status`-tagged replies.
    #[default]
    TwoPhase,
}

impl FromStr for Flow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "single_step" | "single" => Ok(Flow::SingleStep),
            "two_phase" | "two" => Ok(Flow::TwoPhase),
            other => Err(Error::Configuration(format!("unknown flow '{}'", other))),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    #[serde(skip)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub api_version: String,
    pub model: String,
    pub max_tokens: u32,
    pub clarify_max_tokens: u32,
    pub flow: Flow,
    pub bind: String,
    /// Outbound request timeout. Unset means the HTTP client default (none).
    pub http_timeout_secs: Option<u64>,
    /// Include the failure trace as `stack` in 500 bodies for unhandled errors.
    pub expose_trace: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            clarify_max_tokens: DEFAULT_CLARIFY_MAX_TOKENS,
            flow: Flow::default(),
            bind: DEFAULT_BIND.to_string(),
            http_timeout_secs: None,
            expose_trace: false,
        }
    }
}

// Never print the credential.
impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("clarify_max_tokens", &self.clarify_max_tokens)
            .field("flow", &self.flow)
            .field("bind", &self.bind)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("expose_trace", &self.expose_trace)
            .finish()
    }
}

impl ServiceConfig {
    /// Load from `CHOICEGEN_CONFIG` (if set) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_yaml_file(path.trim())?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(raw)
            .map_err(|e| Error::Configuration(format!("invalid config: {}", e)))?;
        url::Url::parse(&config.base_url).map_err(|e| {
            Error::Configuration(format!("invalid base_url '{}': {}", config.base_url, e))
        })?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup. Unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup("CHOICEGEN_BASE_URL").filter(|u| url::Url::parse(u).is_ok()) {
            self.base_url = url;
        }
        if let Some(model) = lookup("CHOICEGEN_MODEL").filter(|m| !m.trim().is_empty()) {
            self.model = model;
        }
        if let Some(n) = lookup("CHOICEGEN_MAX_TOKENS").and_then(|s| s.parse::<u32>().ok()) {
            self.max_tokens = n.max(1);
        }
        if let Some(n) = lookup("CHOICEGEN_CLARIFY_MAX_TOKENS").and_then(|s| s.parse::<u32>().ok())
        {
            self.clarify_max_tokens = n.max(1);
        }
        if let Some(flow) = lookup("CHOICEGEN_FLOW").and_then(|s| s.parse::<Flow>().ok()) {
            self.flow = flow;
        }
        if let Some(bind) = lookup("CHOICEGEN_BIND").filter(|b| !b.trim().is_empty()) {
            self.bind = bind;
        }
        if let Some(secs) =
            lookup("CHOICEGEN_HTTP_TIMEOUT_SECS").and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_secs = Some(secs.max(1));
        }
        if let Some(v) = lookup("CHOICEGEN_EXPOSE_TRACE") {
            self.expose_trace = matches!(v.trim(), "1" | "true" | "yes");
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_flow(mut self, flow: Flow) -> Self {
        self.flow = flow;
        self
    }

    /// The configured credential, treating an empty value as absent.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_secs.map(Duration::from_secs)
    }
}
