//! Voice connection state, transitions, and the alert dispatch port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::member::Member;
use crate::domain::value_objects::Snowflake;
use crate::shared::error::AppError;

/// Voice connection of a single member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum VoiceState {
    #[default]
    Disconnected,
    Connected { channel_id: Snowflake },
}

impl VoiceState {
    /// Build from an optional channel id, as carried by gateway payloads.
    pub fn from_channel(channel_id: Option<Snowflake>) -> Self {
        match channel_id {
            Some(channel_id) => VoiceState::Connected { channel_id },
            None => VoiceState::Disconnected,
        }
    }

    /// Channel currently occupied, if any.
    pub fn channel(&self) -> Option<Snowflake> {
        match self {
            VoiceState::Connected { channel_id } => Some(*channel_id),
            VoiceState::Disconnected => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, VoiceState::Connected { .. })
    }
}

/// One observed change of a member's voice connection.
///
/// `member` reflects the member after the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceTransition {
    pub member: Member,
    pub before: VoiceState,
    pub after: VoiceState,
}

impl VoiceTransition {
    pub fn new(member: Member, before: VoiceState, after: VoiceState) -> Self {
        Self {
            member,
            before,
            after,
        }
    }
}

/// A join that passed every gate, together with its resolved recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifyingJoin {
    /// Member who joined voice
    pub member: Member,

    /// Voice channel that was joined
    pub channel_id: Snowflake,

    /// Watched members to alert, already de-duplicated
    pub recipients: Vec<Member>,
}

impl QualifyingJoin {
    pub fn guild_id(&self) -> Snowflake {
        self.member.guild_id
    }

    /// User ids of the recipients, in recipient order.
    pub fn recipient_ids(&self) -> Vec<Snowflake> {
        self.recipients
            .iter()
            .map(|member| member.user_id)
            .collect()
    }
}

/// Delivery port for qualifying joins.
///
/// Invoked at most once per qualifying transition. Formatting, delivery,
/// timeouts and retries belong to the implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertDispatcher: Send + Sync {
    async fn on_qualifying_join(&self, join: &QualifyingJoin) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_state_from_channel() {
        assert_eq!(VoiceState::from_channel(None), VoiceState::Disconnected);
        assert_eq!(
            VoiceState::from_channel(Some(Snowflake(7))).channel(),
            Some(Snowflake(7))
        );
    }

    #[test]
    fn test_voice_state_serialization() {
        let json = serde_json::to_value(VoiceState::Connected {
            channel_id: Snowflake(7),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"state": "connected", "channel_id": "7"})
        );

        let json = serde_json::to_value(VoiceState::Disconnected).unwrap();
        assert_eq!(json, serde_json::json!({"state": "disconnected"}));
    }
}
