//! HTTP surface: one endpoint, permissive CORS headers on every response.

use axum::{
    body::Bytes,
    extract::State,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::orchestrator::{HttpReply, InboundRequest, Orchestrator};

pub const ENDPOINT_PATH: &str = "/api/generate";

/// Build the router. Method filtering is the orchestrator's job, so the route
/// accepts every method.
pub fn router(orchestrator: Arc<Orchestrator>) -> Router {
    Router::new()
        .route(ENDPOINT_PATH, any(generate))
        .with_state(orchestrator)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
}

async fn generate(
    State(orchestrator): State<Arc<Orchestrator>>,
    method: Method,
    body: Bytes,
) -> Response {
    let reply = orchestrator
        .handle(InboundRequest::new(method, body.to_vec()))
        .await;
    into_response(reply)
}

fn into_response(reply: HttpReply) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match reply.body {
        Some(body) => (status, Json(body)).into_response(),
        None => status.into_response(),
    }
}
