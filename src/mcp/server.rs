//! The Model Context Protocol dispatcher
//!
//! Classifies each decoded payload, routes requests by method name and turns
//! the outcome into exactly one complete envelope. Notifications produce
//! nothing. Every request is handled on its own; the only shared state is the
//! read-only tool registry.

use rust_mcp_sdk::schema::{
    Implementation, InitializeResult, ServerCapabilities, ServerCapabilitiesTools,
};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::domain::tools::{handle_tools_call, ToolRegistry};
use crate::errors::AppError;
use crate::mcp::message::{classify, Classified, Request};
use crate::mcp::rpc::{app_error_to_json_rpc, is_json_rpc_error, json_rpc_result};
use crate::AppState;

pub const PROTOCOL_VERSION: &str = "2025-06-18";

/// Returns `None` when the payload is a notification.
pub fn handle_json_rpc_value(state: &AppState, payload: Value) -> Option<Value> {
    let request = match classify(payload) {
        Ok(Classified::Request(request)) => request,
        Ok(Classified::Notification { method }) => {
            debug!(method = %method, "notification acknowledged without response");
            return None;
        }
        Err((id, err)) => return Some(app_error_to_json_rpc(id, err)),
    };

    Some(handle_json_rpc_request(state, request))
}

pub fn handle_json_rpc_request(state: &AppState, request: Request) -> Value {
    let Request { id, method, params } = request;
    let tool = params
        .as_ref()
        .filter(|_| method == "tools/call")
        .and_then(|params| params.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let response = match route(&state.tools, &method, params) {
        Ok(result) => json_rpc_result(id, result),
        Err(err) => app_error_to_json_rpc(Some(id), err),
    };

    info!(
        method = %method,
        tool = tool.as_deref().unwrap_or("-"),
        outcome = if is_json_rpc_error(&response) { "failure" } else { "success" },
        "mcp action audited"
    );

    response
}

fn route(tools: &ToolRegistry, method: &str, params: Option<Value>) -> Result<Value, AppError> {
    match method {
        "initialize" => initialize_result(),
        "tools/list" => Ok(json!({ "tools": tools.describe_tools() })),
        "tools/call" => handle_tools_call(tools, params),
        _ => Err(AppError::method_not_found(method)),
    }
}

fn initialize_result() -> Result<Value, AppError> {
    let initialize_result = InitializeResult {
        server_info: Implementation {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            title: None,
            description: None,
            icons: vec![],
            website_url: None,
        },
        capabilities: ServerCapabilities {
            tools: Some(ServerCapabilitiesTools {
                list_changed: Some(false),
            }),
            ..Default::default()
        },
        protocol_version: PROTOCOL_VERSION.to_string(),
        instructions: None,
        meta: None,
    };

    serde_json::to_value(initialize_result)
        .map_err(|err| AppError::internal(format!("failed to serialize initialize result: {err}")))
}
