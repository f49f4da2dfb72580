//! Health Check Handlers
//!
//! Provides health check endpoints for Kubernetes-style liveness and readiness probes.
//!
//! # Endpoints
//! - `GET /health` - Basic health check
//! - `GET /health/live` - Liveness probe (is the server running?)
//! - `GET /health/ready` - Readiness probe (is the watcher configured to do anything?)

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::time::Instant;

use crate::domain::WatchRegistry;
use crate::startup::AppState;

/// Server start time for uptime calculation
static SERVER_START: Lazy<Instant> = Lazy::new(Instant::now);
static SERVER_START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Initialize the server start time (call during startup)
pub fn init_server_start() {
    Lazy::force(&SERVER_START);
    Lazy::force(&SERVER_START_TIME);
}

/// Basic health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Detailed health check response
#[derive(Debug, Serialize)]
pub struct DetailedHealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub checks: HealthChecks,
}

/// Individual component checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub watch_registry: RegistryHealth,
    pub roster: RosterHealth,
    pub alert_stream: AlertStreamHealth,
}

#[derive(Debug, Serialize)]
pub struct RegistryHealth {
    pub status: HealthStatus,
    pub watched_handles: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RosterHealth {
    pub status: HealthStatus,
    pub guilds: usize,
}

#[derive(Debug, Serialize)]
pub struct AlertStreamHealth {
    pub status: HealthStatus,
    pub subscribers: usize,
}

/// Overall health status
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Simple liveness response
#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Liveness probe - checks if the server is running
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "alive" })
}

/// Readiness probe
///
/// Reports `degraded` when the watch list is empty: the service runs but
/// can never alert anyone.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let registry = check_registry(&state.registry);

    let checks = HealthChecks {
        roster: RosterHealth {
            status: HealthStatus::Healthy,
            guilds: state.roster.guild_count(),
        },
        alert_stream: AlertStreamHealth {
            status: HealthStatus::Healthy,
            subscribers: state.dispatcher.subscriber_count(),
        },
        watch_registry: registry,
    };

    let overall_status = determine_overall_status(&checks);

    let response = DetailedHealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: SERVER_START.elapsed().as_secs(),
        started_at: SERVER_START_TIME.to_rfc3339(),
        checks,
    };

    let status_code = match overall_status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

fn check_registry(registry: &WatchRegistry) -> RegistryHealth {
    if registry.is_empty() {
        RegistryHealth {
            status: HealthStatus::Degraded,
            watched_handles: 0,
            message: Some("No watched handles configured; alerts are disabled".into()),
        }
    } else {
        RegistryHealth {
            status: HealthStatus::Healthy,
            watched_handles: registry.len(),
            message: None,
        }
    }
}

/// Worst status across all checks
fn determine_overall_status(checks: &HealthChecks) -> HealthStatus {
    let statuses = [
        checks.watch_registry.status,
        checks.roster.status,
        checks.alert_stream.status,
    ];

    if statuses.contains(&HealthStatus::Unhealthy) {
        HealthStatus::Unhealthy
    } else if statuses.contains(&HealthStatus::Degraded) {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    }
}
