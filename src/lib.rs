use std::sync::Arc;

use axum::{
    http::Method,
    middleware,
    routing::get,
    Router,
};
use tower_http::cors::{AllowHeaders, Any, CorsLayer};

pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod mcp;

use domain::tools::{RegistryConfig, ToolRegistry};

#[derive(Clone)]
pub struct AppState {
    pub tools: Arc<ToolRegistry>,
}

impl AppState {
    pub fn new(registry: &RegistryConfig) -> Self {
        Self {
            tools: Arc::new(ToolRegistry::new(registry)),
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS, Method::HEAD])
        .allow_headers(AllowHeaders::mirror_request());

    let mut router = Router::new()
        .route("/", get(http::handlers::health))
        .route("/health", get(http::handlers::health))
        .route(
            http::handlers::MCP_ENDPOINT,
            get(http::handlers::discovery)
                .post(http::handlers::mcp_endpoint)
                .head(http::handlers::method_not_allowed),
        );

    for probe in http::handlers::WELL_KNOWN_PROBES {
        router = router.route(probe, get(http::handlers::well_known_probe));
    }

    router
        .layer(cors)
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
