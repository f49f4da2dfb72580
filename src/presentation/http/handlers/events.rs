//! Gateway Event Ingest Handler

use axum::{extract::State, Json};

use crate::application::dto::{EventAck, GatewayEvent};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Ingest one gateway event
pub async fn ingest_event(
    State(state): State<AppState>,
    Json(event): Json<GatewayEvent>,
) -> Result<Json<EventAck>, AppError> {
    let ack = state.ingest.ingest(event).await?;
    Ok(Json(ack))
}
