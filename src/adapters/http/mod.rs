//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the entry endpoints and the liveness check behind
//! the shared tracing, timeout and CORS layers.

pub mod entry;
mod health;

pub use entry::{entry_router, EntryAppState};
pub use health::{health_router, HealthResponse};

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Builds the full application router with middleware applied.
pub fn app_router(state: EntryAppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(entry_router())
        .merge(health_router())
        .with_state(state)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}

/// Without configured origins every origin is allowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(allowed))
    }
}
