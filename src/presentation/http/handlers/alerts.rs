//! Alert History Handler

use axum::{extract::State, Json};

use crate::application::dto::RecentAlertsResponse;
use crate::startup::AppState;

/// Recently dispatched alerts, newest first
pub async fn recent_alerts(State(state): State<AppState>) -> Json<RecentAlertsResponse> {
    Json(RecentAlertsResponse {
        alerts: state.dispatcher.recent(),
    })
}
