//! Gateway Event DTOs
//!
//! Discord-compatible dispatch payloads accepted by the ingest endpoint.
//! Each event arrives as `{"t": "<EVENT_NAME>", "d": {...}}`.

use serde::Deserialize;

use crate::domain::{Member, Snowflake, VoiceState};

/// Gateway events this service consumes
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "t", content = "d")]
pub enum GatewayEvent {
    #[serde(rename = "GUILD_CREATE")]
    GuildCreate(GuildCreateEvent),
    #[serde(rename = "GUILD_MEMBER_ADD")]
    GuildMemberAdd(GuildMemberEvent),
    #[serde(rename = "GUILD_MEMBER_UPDATE")]
    GuildMemberUpdate(GuildMemberEvent),
    #[serde(rename = "GUILD_MEMBER_REMOVE")]
    GuildMemberRemove(GuildMemberRemoveEvent),
    #[serde(rename = "VOICE_STATE_UPDATE")]
    VoiceStateUpdate(VoiceStateUpdateEvent),
}

impl GatewayEvent {
    /// Get the event name
    pub fn event_name(&self) -> &'static str {
        match self {
            GatewayEvent::GuildCreate(_) => "GUILD_CREATE",
            GatewayEvent::GuildMemberAdd(_) => "GUILD_MEMBER_ADD",
            GatewayEvent::GuildMemberUpdate(_) => "GUILD_MEMBER_UPDATE",
            GatewayEvent::GuildMemberRemove(_) => "GUILD_MEMBER_REMOVE",
            GatewayEvent::VoiceStateUpdate(_) => "VOICE_STATE_UPDATE",
        }
    }

    /// Get the guild ID this event belongs to
    pub fn guild_id(&self) -> Snowflake {
        match self {
            GatewayEvent::GuildCreate(e) => e.id,
            GatewayEvent::GuildMemberAdd(e) => e.guild_id,
            GatewayEvent::GuildMemberUpdate(e) => e.guild_id,
            GatewayEvent::GuildMemberRemove(e) => e.guild_id,
            GatewayEvent::VoiceStateUpdate(e) => e.guild_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserObject {
    pub id: Snowflake,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

/// Member object as embedded in guild and voice payloads
#[derive(Debug, Clone, Deserialize)]
pub struct MemberObject {
    pub user: UserObject,
    #[serde(default, alias = "nickname")]
    pub nick: Option<String>,
}

impl MemberObject {
    pub fn into_member(self, guild_id: Snowflake) -> Member {
        Member {
            guild_id,
            user_id: self.user.id,
            username: self.user.username,
            global_name: self.user.global_name,
            nickname: self.nick,
            bot: self.user.bot,
            voice: VoiceState::Disconnected,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoiceStateObject {
    pub user_id: Snowflake,
    #[serde(default)]
    pub channel_id: Option<Snowflake>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildCreateEvent {
    pub id: Snowflake,
    #[serde(default)]
    pub members: Vec<MemberObject>,
    #[serde(default)]
    pub voice_states: Vec<VoiceStateObject>,
}

impl GuildCreateEvent {
    /// Full roster of the guild, with voice states applied
    pub fn into_roster(self) -> Vec<Member> {
        let guild_id = self.id;
        let voice_states = self.voice_states;
        self.members
            .into_iter()
            .map(|object| {
                let mut member = object.into_member(guild_id);
                member.voice = voice_states
                    .iter()
                    .find(|state| state.user_id == member.user_id)
                    .map(|state| VoiceState::from_channel(state.channel_id))
                    .unwrap_or_default();
                member
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildMemberEvent {
    pub guild_id: Snowflake,
    pub user: UserObject,
    #[serde(default, alias = "nickname")]
    pub nick: Option<String>,
}

impl GuildMemberEvent {
    pub fn into_member(self) -> Member {
        MemberObject {
            user: self.user,
            nick: self.nick,
        }
        .into_member(self.guild_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildMemberRemoveEvent {
    pub guild_id: Snowflake,
    pub user: UserObject,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoiceStateUpdateEvent {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    #[serde(default)]
    pub channel_id: Option<Snowflake>,
    #[serde(default)]
    pub member: Option<MemberObject>,
}
