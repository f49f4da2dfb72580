//! In-memory Guild Roster Cache
//!
//! Keeps the latest known members and voice states of every guild, fed from
//! gateway events. Voice updates carry only the new state, so the cache is
//! also where the previous state of a transition comes from.
//!
//! Members of a guild are kept ordered by user id, which makes roster order
//! (and therefore the keep-first collision tie-break) deterministic.

use std::collections::BTreeMap;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{Member, RosterSource, Snowflake, VoiceState, VoiceTransition};
use crate::shared::error::AppError;

type Roster = BTreeMap<Snowflake, Member>;

/// Per-guild roster cache
#[derive(Default)]
pub struct GuildRosterCache {
    guilds: DashMap<Snowflake, Roster>,
}

impl GuildRosterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole roster of a guild (guild create / full sync).
    pub fn replace_guild(&self, guild_id: Snowflake, members: Vec<Member>) {
        let roster: Roster = members
            .into_iter()
            .filter(|member| member.guild_id == guild_id)
            .map(|member| (member.user_id, member))
            .collect();

        tracing::debug!(guild_id = %guild_id, members = roster.len(), "Roster replaced");
        self.guilds.insert(guild_id, roster);
    }

    /// Insert or update a member's profile, keeping any known voice state.
    pub fn upsert_profile(&self, mut member: Member) {
        let mut roster = self.guilds.entry(member.guild_id).or_default();
        if let Some(existing) = roster.get(&member.user_id) {
            member.voice = existing.voice;
        }
        roster.insert(member.user_id, member);
    }

    /// Remove a member from a guild.
    pub fn remove_member(&self, guild_id: Snowflake, user_id: Snowflake) -> Option<Member> {
        self.guilds
            .get_mut(&guild_id)
            .and_then(|mut roster| roster.remove(&user_id))
    }

    /// Record a member's new voice channel and return the resulting transition.
    ///
    /// `profile` refreshes the member's names when the event carries them;
    /// otherwise the cached profile is used, or a bare member if none is known.
    pub fn apply_voice_state(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        profile: Option<Member>,
        channel_id: Option<Snowflake>,
    ) -> VoiceTransition {
        let after = VoiceState::from_channel(channel_id);
        let mut roster = self.guilds.entry(guild_id).or_default();

        let before = roster
            .get(&user_id)
            .map(|member| member.voice)
            .unwrap_or_default();

        let mut member = match profile {
            Some(profile) => profile,
            None => roster
                .get(&user_id)
                .cloned()
                .unwrap_or_else(|| Member::new(guild_id, user_id)),
        };
        member.guild_id = guild_id;
        member.user_id = user_id;
        member.voice = after;

        roster.insert(user_id, member.clone());
        VoiceTransition::new(member, before, after)
    }

    /// Current roster of a guild, if the guild is known.
    pub fn roster(&self, guild_id: Snowflake) -> Option<Vec<Member>> {
        self.guilds
            .get(&guild_id)
            .map(|roster| roster.values().cloned().collect())
    }

    pub fn contains_guild(&self, guild_id: Snowflake) -> bool {
        self.guilds.contains_key(&guild_id)
    }

    pub fn guild_count(&self) -> usize {
        self.guilds.len()
    }
}

#[async_trait]
impl RosterSource for GuildRosterCache {
    async fn members(&self, guild_id: Snowflake) -> Result<Vec<Member>, AppError> {
        Ok(self.roster(guild_id).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUILD: Snowflake = Snowflake(1);

    fn channel(id: i64) -> VoiceState {
        VoiceState::Connected {
            channel_id: Snowflake(id),
        }
    }

    #[test]
    fn test_voice_state_yields_transition() {
        let cache = GuildRosterCache::new();
        cache.upsert_profile(Member::new(GUILD, Snowflake(10)).with_username("leon3to"));

        let joined = cache.apply_voice_state(GUILD, Snowflake(10), None, Some(Snowflake(100)));
        assert_eq!(joined.before, VoiceState::Disconnected);
        assert_eq!(joined.after, channel(100));
        assert_eq!(joined.member.username.as_deref(), Some("leon3to"));

        let moved = cache.apply_voice_state(GUILD, Snowflake(10), None, Some(Snowflake(200)));
        assert_eq!(moved.before, channel(100));
        assert_eq!(moved.after, channel(200));

        let left = cache.apply_voice_state(GUILD, Snowflake(10), None, None);
        assert_eq!(left.before, channel(200));
        assert_eq!(left.after, VoiceState::Disconnected);
    }

    #[test]
    fn test_unknown_member_is_created() {
        let cache = GuildRosterCache::new();
        let t = cache.apply_voice_state(GUILD, Snowflake(10), None, Some(Snowflake(100)));
        assert_eq!(t.before, VoiceState::Disconnected);
        assert_eq!(cache.roster(GUILD).unwrap().len(), 1);
    }

    #[test]
    fn test_profile_update_keeps_voice() {
        let cache = GuildRosterCache::new();
        cache.apply_voice_state(GUILD, Snowflake(10), None, Some(Snowflake(100)));
        cache.upsert_profile(Member::new(GUILD, Snowflake(10)).with_nickname("Leo"));

        let roster = cache.roster(GUILD).unwrap();
        assert_eq!(roster[0].voice, channel(100));
        assert_eq!(roster[0].nickname.as_deref(), Some("Leo"));
    }

    #[test]
    fn test_replace_and_remove() {
        let cache = GuildRosterCache::new();
        cache.replace_guild(
            GUILD,
            vec![
                Member::new(GUILD, Snowflake(20)),
                Member::new(GUILD, Snowflake(10)),
                Member::new(Snowflake(2), Snowflake(30)),
            ],
        );

        let ids: Vec<_> = cache
            .roster(GUILD)
            .unwrap()
            .iter()
            .map(|m| m.user_id)
            .collect();
        assert_eq!(ids, vec![Snowflake(10), Snowflake(20)]);

        assert!(cache.remove_member(GUILD, Snowflake(10)).is_some());
        assert!(cache.remove_member(GUILD, Snowflake(10)).is_none());
        assert_eq!(cache.roster(GUILD).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_guild_has_empty_roster() {
        let cache = GuildRosterCache::new();
        assert!(cache.members(Snowflake(99)).await.unwrap().is_empty());
        assert!(!cache.contains_guild(Snowflake(99)));
    }
}
