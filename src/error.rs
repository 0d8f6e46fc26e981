use serde_json::{json, Value};
use thiserror::Error;

pub const INPUT_REQUIRED_MESSAGE: &str = "입력 내용이 필요합니다.";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";
pub const NOT_CONFIGURED_MESSAGE: &str = "API 키가 설정되지 않았습니다.";
pub const UPSTREAM_REJECTED_MESSAGE: &str = "Anthropic API 오류";
pub const UNEXPECTED_SHAPE_MESSAGE: &str = "예상치 못한 응답 형식";

/// Unified error type for a single request's lifecycle.
///
/// Every variant is terminal for the request; nothing here is retried.
/// Each maps onto an HTTP status via [`Error::status_code`] and a JSON body
/// via [`Error::to_body`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("input is required")]
    InvalidInput,

    #[error("method {method} is not allowed")]
    MethodNotAllowed { method: String },

    #[error("provider credential is not configured")]
    MisconfiguredService,

    #[error("provider rejected the request: HTTP {status}")]
    UpstreamRejected { status: u16, details: Value },

    #[error("provider reply has no usable text block")]
    UpstreamContractViolation { details: Value },

    #[error("{message}")]
    Unhandled { message: String, trace: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Wrap any failure as an `Unhandled` error, keeping the source chain as the trace.
    pub fn unhandled<E>(err: E) -> Self
    where
        E: std::error::Error,
    {
        Error::Unhandled {
            message: err.to_string(),
            trace: format!("{:?}", err),
        }
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidInput => 400,
            Error::MethodNotAllowed { .. } => 405,
            // Anything outside the HTTP range cannot be relayed as-is.
            Error::UpstreamRejected { status, .. } if (100..=599).contains(status) => *status,
            Error::UpstreamRejected { .. } => 502,
            Error::MisconfiguredService
            | Error::UpstreamContractViolation { .. }
            | Error::Unhandled { .. }
            | Error::Configuration(_) => 500,
        }
    }

    /// Client-visible JSON body. `expose_trace` controls whether `stack` is included
    /// for unhandled failures.
    pub fn to_body(&self, expose_trace: bool) -> Value {
        match self {
            Error::InvalidInput => json!({ "error": INPUT_REQUIRED_MESSAGE }),
            Error::MethodNotAllowed { .. } => json!({ "error": METHOD_NOT_ALLOWED_MESSAGE }),
            Error::MisconfiguredService => json!({ "error": NOT_CONFIGURED_MESSAGE }),
            Error::UpstreamRejected { details, .. } => json!({
                "error": UPSTREAM_REJECTED_MESSAGE,
                "details": details,
            }),
            Error::UpstreamContractViolation { details } => json!({
                "error": UNEXPECTED_SHAPE_MESSAGE,
                "details": details,
            }),
            Error::Unhandled { message, trace } => {
                let mut body = json!({ "error": message });
                if expose_trace {
                    body["stack"] = Value::String(trace.clone());
                }
                body
            }
            Error::Configuration(message) => json!({ "error": message }),
        }
    }
}

impl From<crate::transport::TransportError> for Error {
    fn from(err: crate::transport::TransportError) -> Self {
        Error::unhandled(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::unhandled(err)
    }
}
