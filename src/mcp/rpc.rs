//! JSON-RPC envelope construction
//!
//! Maps `AppError` onto error envelopes and wraps method results. Identifiers
//! the SDK can represent go through its envelope types; anything else is
//! echoed back verbatim.

use rust_mcp_sdk::schema::{
    JsonrpcErrorResponse, JsonrpcResultResponse, RequestId, Result as McpResult, RpcError,
};
use serde_json::{json, Value};

use crate::errors::AppError;

pub const JSONRPC_VERSION: &str = "2.0";

pub fn is_json_rpc_error(value: &Value) -> bool {
    value.get("error").is_some()
}

pub fn app_error_to_json_rpc(id: Option<Value>, err: AppError) -> Value {
    let code = err.json_rpc_code();
    match err {
        AppError::ParseError => json_rpc_error(id, code, "Parse error"),
        AppError::InvalidRequest => json_rpc_error(id, code, "Invalid Request"),
        AppError::MethodNotFound { method } => json_rpc_error_with_data(
            id,
            code,
            &format!("Unknown method: {method}"),
            Some(json!({
                "code": "method_not_found",
                "message": "unknown method name",
                "details": { "method": method },
            })),
        ),
        AppError::ToolNotFound { name } => json_rpc_error_with_data(
            id,
            code,
            &format!("Unknown tool: {name}"),
            Some(json!({
                "code": "tool_not_found",
                "message": "unknown tool name",
                "details": { "name": name },
            })),
        ),
        AppError::BadRequest { code: reason, message } => json_rpc_error_with_data(
            id,
            code,
            "Invalid params",
            Some(json!({
                "code": reason,
                "message": message,
                "details": {},
            })),
        ),
        AppError::Internal { message } => {
            tracing::error!(error = %message, "request failed with internal error");
            json_rpc_error(id, code, "Internal error")
        }
    }
}

pub fn json_rpc_error(id: Option<Value>, code: i32, message: &str) -> Value {
    json_rpc_error_with_data(id, code, message, None)
}

pub fn json_rpc_error_with_data(
    id: Option<Value>,
    code: i32,
    message: &str,
    data: Option<Value>,
) -> Value {
    let error = RpcError {
        code: i64::from(code),
        data,
        message: message.to_string(),
    };

    match id.as_ref().and_then(value_to_request_id) {
        Some(request_id) => {
            let response = JsonrpcErrorResponse::new(error, Some(request_id));
            serde_json::to_value(response).expect("jsonrpc error response serialization")
        }
        None => json!({
            "jsonrpc": JSONRPC_VERSION,
            "id": id.unwrap_or(Value::Null),
            "error": error,
        }),
    }
}

pub fn json_rpc_result(id: Value, result: Value) -> Value {
    if let Some(request_id) = value_to_request_id(&id) {
        let extra = result.as_object().cloned();
        let response = JsonrpcResultResponse::new(request_id, McpResult { meta: None, extra });
        return serde_json::to_value(response).expect("jsonrpc result response serialization");
    }

    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "result": result
    })
}

pub fn value_to_request_id(value: &Value) -> Option<RequestId> {
    if let Some(string_id) = value.as_str() {
        return Some(RequestId::String(string_id.to_string()));
    }

    value.as_i64().map(RequestId::Integer)
}
