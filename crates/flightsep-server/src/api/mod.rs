//! API routes for the analysis server.

pub mod analyze;
pub mod request_id;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze", post(analyze::analyze_flights))
        .route("/v1/analyze", post(analyze::analyze_flights))
        .route("/v1/waypoints", post(analyze::waypoints))
        .route("/v1/config", get(analyze::current_config))
        .layer(middleware::from_fn(request_id::ensure_request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests;
