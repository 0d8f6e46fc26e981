//! Request orchestration: validate, build prompts, call the provider, shape the reply.
//!
//! Check order is fixed: pre-flight, method, input, credential. Nothing reaches
//! the provider until all four pass. At most two provider calls happen per
//! request, always sequentially.

use axum::http::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::{Flow, ServiceConfig, API_KEY_ENV};
use crate::drivers::{AnthropicProvider, CompletionProvider};
use crate::prompt;
use crate::types::{ClarifyDecision, CompletionQuery, Mode, Outcome, SubmitRequest};
use crate::{Error, Result};

/// Inbound request as seen by the orchestrator.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    pub body: Vec<u8>,
}

impl InboundRequest {
    pub fn new(method: Method, body: impl Into<Vec<u8>>) -> Self {
        Self {
            method,
            body: body.into(),
        }
    }

    pub fn post_json(body: &Value) -> Self {
        Self::new(Method::POST, body.to_string())
    }
}

/// Status plus optional JSON body. `None` means an empty body.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Option<Value>,
}

impl HttpReply {
    fn ok(outcome: &Outcome) -> Self {
        Self {
            status: 200,
            body: Some(outcome.to_body()),
        }
    }

    fn empty() -> Self {
        Self {
            status: 200,
            body: None,
        }
    }

    fn from_error(err: &Error, expose_trace: bool) -> Self {
        Self {
            status: err.status_code(),
            body: Some(err.to_body(expose_trace)),
        }
    }
}

#[derive(Debug)]
pub struct Orchestrator {
    config: ServiceConfig,
    provider: Option<Arc<dyn CompletionProvider>>,
}

impl Orchestrator {
    /// Build with the Anthropic provider. A missing credential is not fatal here;
    /// it is reported per request.
    pub fn from_config(config: ServiceConfig) -> Result<Self> {
        let provider: Option<Arc<dyn CompletionProvider>> = if config.credential().is_some() {
            Some(Arc::new(AnthropicProvider::from_config(&config)?))
        } else {
            warn!("{} is not set; requests will be rejected", API_KEY_ENV);
            None
        };
        Ok(Self { config, provider })
    }

    /// Build with an explicit provider.
    pub fn with_provider(config: ServiceConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            config,
            provider: Some(provider),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Handle one inbound request end to end. Never fails: every error becomes a reply.
    pub async fn handle(&self, request: InboundRequest) -> HttpReply {
        let span = info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %request.method,
        );
        async move {
            if request.method == Method::OPTIONS {
                return HttpReply::empty();
            }
            match self.process(&request).await {
                Ok(outcome) => HttpReply::ok(&outcome),
                Err(err) => {
                    if let Error::Unhandled { message, .. } = &err {
                        error!(error = %message, "exception while handling request");
                    }
                    HttpReply::from_error(&err, self.config.expose_trace)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn process(&self, request: &InboundRequest) -> Result<Outcome> {
        if request.method != Method::POST {
            return Err(Error::MethodNotAllowed {
                method: request.method.to_string(),
            });
        }
        let submit = SubmitRequest::from_body(&request.body)?;
        self.submit(&submit).await
    }

    /// Run a validated submission through the configured flow.
    pub async fn submit(&self, request: &SubmitRequest) -> Result<Outcome> {
        let provider = self.provider()?;
        let input = request.input();

        match (self.config.flow, request.mode) {
            (Flow::SingleStep, _) => {
                let text = self
                    .complete(
                        provider,
                        prompt::single_step_prompt(input),
                        self.config.max_tokens,
                    )
                    .await?;
                Ok(Outcome::Result(text))
            }
            (Flow::TwoPhase, Mode::Clarify) => {
                let judgment = self
                    .complete(
                        provider,
                        prompt::clarify_prompt(input),
                        self.config.clarify_max_tokens,
                    )
                    .await?;
                match ClarifyDecision::parse(&judgment) {
                    ClarifyDecision::Ready => Ok(Outcome::Ready),
                    ClarifyDecision::NeedsClarification(question) => {
                        Ok(Outcome::Clarify { question })
                    }
                    ClarifyDecision::Unparseable => {
                        warn!(reply = %judgment, "unparseable clarification reply, generating directly");
                        self.generate(provider, input).await
                    }
                }
            }
            (Flow::TwoPhase, Mode::Generate) => self.generate(provider, input).await,
        }
    }

    fn provider(&self) -> Result<&dyn CompletionProvider> {
        if self.config.credential().is_none() {
            error!("{} is not set", API_KEY_ENV);
            return Err(Error::MisconfiguredService);
        }
        match &self.provider {
            Some(provider) => Ok(provider.as_ref()),
            None => {
                error!("no completion provider configured");
                Err(Error::MisconfiguredService)
            }
        }
    }

    async fn generate(&self, provider: &dyn CompletionProvider, input: &str) -> Result<Outcome> {
        let result = self
            .complete(
                provider,
                prompt::generation_prompt(input),
                self.config.max_tokens,
            )
            .await?;
        Ok(Outcome::Complete { result })
    }

    /// One provider round-trip, returning the first text block verbatim.
    async fn complete(
        &self,
        provider: &dyn CompletionProvider,
        prompt: String,
        max_tokens: u32,
    ) -> Result<String> {
        let query = CompletionQuery::new(prompt, self.config.model.as_str(), max_tokens);
        let reply = provider.complete(&query).await?;

        if !reply.is_success() {
            error!(
                provider = provider.provider_id(),
                status = reply.status,
                details = %reply.body,
                "provider rejected request"
            );
            return Err(Error::UpstreamRejected {
                status: reply.status,
                details: reply.body,
            });
        }

        if let Some(text) = reply.first_text() {
            info!(provider = provider.provider_id(), "provider reply received");
            return Ok(text.to_string());
        }

        error!(details = %reply.body, "unexpected response structure");
        Err(Error::UpstreamContractViolation {
            details: reply.body,
        })
    }
}
