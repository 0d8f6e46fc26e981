//! Provider abstraction.
//!
//! The orchestrator talks to the completion service only through
//! [`CompletionProvider`], so tests can script replies without a network.

pub mod anthropic;

use async_trait::async_trait;

use crate::types::{CompletionQuery, CompletionReply};
use crate::Result;

pub use anthropic::AnthropicProvider;

/// One outbound completion call.
///
/// Implementations return the reply whatever its status; only failures to
/// obtain a reply at all (network, undecodable body) are errors.
#[async_trait]
pub trait CompletionProvider: Send + Sync + std::fmt::Debug {
    /// Short identifier for logs.
    fn provider_id(&self) -> &str;

    async fn complete(&self, query: &CompletionQuery) -> Result<CompletionReply>;
}
