//! Axum HTTP handlers for the web server
//!
//! Provides the Model Context Protocol endpoint, its discovery probe, health
//! checks and the authorization-discovery probes hosts send before connecting.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::tools::ToolDescriptor;
use crate::errors::AppError;
use crate::mcp::rpc::app_error_to_json_rpc;
use crate::mcp::server::handle_json_rpc_value;
use crate::AppState;

pub const MCP_ENDPOINT: &str = "/mcp";

/// No authorization server is configured, so every probe answers 204.
pub const WELL_KNOWN_PROBES: [&str; 7] = [
    "/.well-known/oauth-protected-resource",
    "/.well-known/oauth-authorization-server",
    "/.well-known/openid-configuration",
    "/.well-known/oauth-protected-resource/mcp",
    "/.well-known/oauth-authorization-server/mcp",
    "/.well-known/openid-configuration/mcp",
    "/mcp/.well-known/openid-configuration",
];

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct ServerIdentity {
    pub name: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    pub server: ServerIdentity,
    pub mcp_endpoint: &'static str,
    pub tools: Vec<ToolDescriptor>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

pub async fn discovery(State(state): State<AppState>) -> Response {
    let body = DiscoveryResponse {
        server: ServerIdentity {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        },
        mcp_endpoint: MCP_ENDPOINT,
        tools: state.tools.describe_tools().to_vec(),
    };

    ([(header::CACHE_CONTROL, "no-store")], Json(body)).into_response()
}

pub async fn well_known_probe() -> impl IntoResponse {
    (StatusCode::NO_CONTENT, [(header::CACHE_CONTROL, "no-store")])
}

/// `get` would otherwise answer HEAD on `/mcp` as well.
pub async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET,POST")])
}

pub async fn mcp_endpoint(State(state): State<AppState>, body: Bytes) -> Response {
    // an empty body carries no id, so it is handled like any other notification
    let payload = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Map::new())
    } else {
        match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(_) => return envelope(app_error_to_json_rpc(None, AppError::ParseError)),
        }
    };

    match handle_json_rpc_value(&state, payload) {
        Some(response) => envelope(response),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

fn envelope(body: Value) -> Response {
    (
        StatusCode::OK,
        [(header::CACHE_CONTROL, "no-store")],
        Json(body),
    )
        .into_response()
}
