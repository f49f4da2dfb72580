//! Gateway Ingest Service
//!
//! Applies gateway events to the roster cache, and feeds voice updates
//! through the watch pipeline once the roster reflects them.

use std::sync::Arc;

use crate::application::dto::events::GatewayEvent;
use crate::application::dto::response::EventAck;
use crate::infrastructure::roster::GuildRosterCache;
use crate::shared::error::AppError;

use super::voice_watch_service::VoiceWatchService;

/// Routes gateway events to the roster cache and the watch service
#[derive(Clone)]
pub struct GatewayIngestService {
    roster: Arc<GuildRosterCache>,
    watch: Arc<dyn VoiceWatchService>,
}

impl GatewayIngestService {
    pub fn new(roster: Arc<GuildRosterCache>, watch: Arc<dyn VoiceWatchService>) -> Self {
        Self { roster, watch }
    }

    /// Apply one event
    pub async fn ingest(&self, event: GatewayEvent) -> Result<EventAck, AppError> {
        let name = event.event_name();
        let guild_id = event.guild_id();
        tracing::debug!(event = name, guild_id = %guild_id, "Gateway event received");

        let outcome = match event {
            GatewayEvent::GuildCreate(guild) => {
                self.roster.replace_guild(guild_id, guild.into_roster());
                None
            }
            GatewayEvent::GuildMemberAdd(member) | GatewayEvent::GuildMemberUpdate(member) => {
                self.roster.upsert_profile(member.into_member());
                None
            }
            GatewayEvent::GuildMemberRemove(removed) => {
                self.roster.remove_member(guild_id, removed.user.id);
                None
            }
            GatewayEvent::VoiceStateUpdate(update) => {
                let profile = update.member.map(|object| object.into_member(guild_id));
                let transition = self.roster.apply_voice_state(
                    guild_id,
                    update.user_id,
                    profile,
                    update.channel_id,
                );
                Some(self.watch.handle_transition(transition).await?)
            }
        };

        Ok(EventAck {
            event: name,
            outcome,
        })
    }
}
