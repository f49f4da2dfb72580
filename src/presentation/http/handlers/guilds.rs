//! Guild Presence Handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::application::dto::PresenceResponse;
use crate::domain::Snowflake;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Watched members present in a guild, and who of them is in voice
pub async fn get_presence(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
) -> Result<Json<PresenceResponse>, AppError> {
    let guild_id: Snowflake = guild_id
        .parse::<i64>()
        .map(Snowflake::new)
        .map_err(|_| AppError::BadRequest("Invalid guild ID".into()))?;

    if !state.roster.contains_guild(guild_id) {
        return Err(AppError::NotFound(format!("Unknown guild {}", guild_id)));
    }

    let snapshot = state.watch.presence(guild_id).await?;
    Ok(Json(PresenceResponse::from_snapshot(guild_id, snapshot)))
}
