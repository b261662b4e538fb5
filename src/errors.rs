use thiserror::Error;

/// Request-scoped protocol failures. None of these stop the server; each is
/// reported inside the JSON-RPC exchange that caused it.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("parse error")]
    ParseError,
    #[error("invalid request")]
    InvalidRequest,
    #[error("unknown method: {method}")]
    MethodNotFound { method: String },
    #[error("unknown tool: {name}")]
    ToolNotFound { name: String },
    #[error("bad request: {message}")]
    BadRequest {
        code: &'static str,
        message: String,
    },
    #[error("internal error")]
    Internal { message: String },
}

impl AppError {
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::MethodNotFound {
            method: method.into(),
        }
    }

    pub fn tool_not_found(name: impl Into<String>) -> Self {
        Self::ToolNotFound { name: name.into() }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// JSON-RPC error code. Callers branch on these, so they must not change.
    pub fn json_rpc_code(&self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound { .. } | Self::ToolNotFound { .. } => -32601,
            Self::BadRequest { .. } => -32602,
            Self::Internal { .. } => -32603,
        }
    }
}
