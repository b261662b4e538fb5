use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::http::handlers::MCP_ENDPOINT;

static NOTIFICATIONS_ACKNOWLEDGED: AtomicU64 = AtomicU64::new(0);

/// Number of MCP notifications answered with 204 since startup.
pub fn notifications_acknowledged() -> u64 {
    NOTIFICATIONS_ACKNOWLEDGED.load(Ordering::Relaxed)
}

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started_at = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started_at.elapsed().as_millis();

    info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        duration_ms = elapsed_ms,
        "request summary"
    );

    if method == Method::POST && path == MCP_ENDPOINT && status == StatusCode::NO_CONTENT {
        let total = NOTIFICATIONS_ACKNOWLEDGED.fetch_add(1, Ordering::Relaxed) + 1;
        info!(total, "mcp notification acknowledged");
    }

    if status == StatusCode::METHOD_NOT_ALLOWED {
        warn!(method = %method, path = %path, "method not allowed");
    }

    response
}
