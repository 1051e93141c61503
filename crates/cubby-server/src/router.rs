use std::time::Duration;

use axum::middleware::from_fn;
use axum::routing::{get, put};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::middleware::require_json_content;
use crate::server::AppState;

/// HTTP paths served by the depot.
pub mod paths {
    pub const OBJECT: &str = "/v1/objects/:key";
    pub const LIVENESS: &str = "/v1/probes/liveness";
    pub const READINESS: &str = "/v1/probes/readiness";
    pub const METRICS: &str = "/metrics";
}

/// Build the axum router with all depot endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            paths::OBJECT,
            put(handler::save_object).get(handler::get_object),
        )
        .route(paths::LIVENESS, get(handler::liveness))
        .route(paths::READINESS, get(handler::readiness))
        .route(paths::METRICS, get(handler::metrics))
        .layer(from_fn(require_json_content))
        .layer(TimeoutLayer::new(Duration::from_secs(1)))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
