//! Inbound JSON-RPC envelope parsing
//!
//! The only structural decision made here is notification vs. request: an
//! absent or `null` identifier means the caller expects no response at all.

use serde::Deserialize;
use serde_json::Value;

use crate::{errors::AppError, mcp::rpc::JSONRPC_VERSION};

#[derive(Debug, Deserialize)]
struct Envelope {
    /// Absent is tolerated; any other value must be `"2.0"`.
    #[serde(default)]
    jsonrpc: Option<String>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    params: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// String or number, never `null`.
    pub id: Value,
    pub method: String,
    pub params: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Notification { method: String },
    Request(Request),
}

/// Classifies a decoded payload. Errors carry the identifier to echo, if any.
pub fn classify(payload: Value) -> Result<Classified, (Option<Value>, AppError)> {
    let id = match payload.get("id") {
        None | Some(Value::Null) => None,
        Some(id @ (Value::String(_) | Value::Number(_))) => Some(id.clone()),
        Some(_) => return Err((None, AppError::InvalidRequest)),
    };

    let Some(id) = id else {
        let method = payload
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Ok(Classified::Notification { method });
    };

    let envelope: Envelope = serde_json::from_value(payload)
        .map_err(|_| (Some(id.clone()), AppError::InvalidRequest))?;
    if envelope
        .jsonrpc
        .as_deref()
        .is_some_and(|version| version != JSONRPC_VERSION)
    {
        return Err((Some(id), AppError::InvalidRequest));
    }

    Ok(Classified::Request(Request {
        id,
        method: envelope.method.unwrap_or_default(),
        params: envelope.params.filter(|params| !params.is_null()),
    }))
}
