//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::websocket::alert_stream_handler;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        // Alert stream for delivery bridges
        .route("/alerts", get(alert_stream_handler))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(handlers::events::ingest_event))
        .route(
            "/guilds/{guild_id}/watch",
            get(handlers::guilds::get_presence),
        )
        .route("/alerts/recent", get(handlers::alerts::recent_alerts))
}
