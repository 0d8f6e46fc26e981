//! # choicegen
//!
//! A single HTTP endpoint that turns free-text input into multiple-choice
//! questions by relaying it, wrapped in a fixed prompt, to an LLM completion API.
//!
//! ## Flows
//!
//! - **Single step**: one generation call, `{ "result": ... }`.
//! - **Two phase**: `mode: "clarify"` first asks the model whether the input is
//!   specific enough (`{ "status": "ready" }` or `{ "status": "clarify", "question": ... }`);
//!   a plain submission generates (`{ "status": "complete", "result": ... }`).
//!
//! Nothing is persisted and there is no shared mutable state between requests.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use choicegen::{server, Orchestrator, ServiceConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServiceConfig::load()?;
//!     let orchestrator = Arc::new(Orchestrator::from_config(config)?);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, server::router(orchestrator)).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Service configuration (YAML file + environment) |
//! | [`orchestrator`] | Validation, prompt selection, provider calls, reply shaping |
//! | [`prompt`] | Prompt templates |
//! | [`drivers`] | Completion provider trait and the Anthropic implementation |
//! | [`transport`] | JSON-over-HTTP client |
//! | [`types`] | Request-scoped value types |
//! | [`server`] | `axum` router |

pub mod config;
pub mod drivers;
pub mod error;
pub mod orchestrator;
pub mod prompt;
pub mod server;
pub mod transport;
pub mod types;

pub use config::{Flow, ServiceConfig};
pub use drivers::{AnthropicProvider, CompletionProvider};
pub use error::Error;
pub use orchestrator::{HttpReply, InboundRequest, Orchestrator};
pub use types::{ClarifyDecision, CompletionQuery, CompletionReply, Mode, Outcome, SubmitRequest};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
