//! choicegen HTTP server
//!
//! ```bash
//! ANTHROPIC_API_KEY=... cargo run --bin choicegen-server
//!
//! curl -X POST http://localhost:3000/api/generate \
//!   -H "Content-Type: application/json" \
//!   -d '{"input": "아이가 좋아하는 책 종류", "mode": "clarify"}'
//! ```
//!
//! Configuration: `CHOICEGEN_CONFIG` (YAML file) plus `CHOICEGEN_*` overrides.
//! Log level: `RUST_LOG` (default `info`).

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use choicegen::{server, Orchestrator, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServiceConfig::load().context("failed to load configuration")?;
    tracing::info!(?config, "configuration loaded");

    let bind = config.bind.clone();
    let orchestrator = Arc::new(Orchestrator::from_config(config)?);
    let app = server::router(orchestrator);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind to {}", bind))?;
    tracing::info!("choicegen listening on http://{}{}", bind, server::ENDPOINT_PATH);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
