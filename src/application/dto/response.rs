//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::application::services::WatchOutcome;
use crate::domain::{PresenceSnapshot, Snowflake, WatchKey};
use crate::infrastructure::dispatch::VoiceAlert;

/// Acknowledgement of one ingested gateway event
#[derive(Debug, Serialize)]
pub struct EventAck {
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<WatchOutcome>,
}

/// Watched member present in a guild
#[derive(Debug, Serialize)]
pub struct WatchedMemberResponse {
    pub watch_key: WatchKey,
    pub user_id: Snowflake,
    pub in_voice: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Snowflake>,
}

/// Presence overview of one guild
#[derive(Debug, Serialize)]
pub struct PresenceResponse {
    pub guild_id: Snowflake,
    pub watched: Vec<WatchedMemberResponse>,
    /// Watch keys currently occupying any voice channel
    pub in_voice: Vec<WatchKey>,
}

impl PresenceResponse {
    pub fn from_snapshot(guild_id: Snowflake, snapshot: PresenceSnapshot) -> Self {
        let (watched, occupied, _) = snapshot.into_parts();
        Self {
            guild_id,
            watched: watched
                .into_iter()
                .map(|(watch_key, member)| WatchedMemberResponse {
                    watch_key,
                    user_id: member.user_id,
                    in_voice: member.in_voice(),
                    channel_id: member.voice.channel(),
                })
                .collect(),
            in_voice: occupied.into_iter().collect(),
        }
    }
}

/// Recently dispatched alerts, newest first
#[derive(Debug, Serialize)]
pub struct RecentAlertsResponse {
    pub alerts: Vec<VoiceAlert>,
}
