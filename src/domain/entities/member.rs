//! Guild Member entity and roster port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::voice::VoiceState;
use crate::domain::value_objects::Snowflake;
use crate::shared::error::AppError;

/// A member of a guild as seen at evaluation time.
///
/// Every name field is optional: the platform may omit the global display
/// name or the guild nickname, and bridge payloads occasionally omit the
/// username as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Guild this membership belongs to
    pub guild_id: Snowflake,

    /// User ID
    pub user_id: Snowflake,

    /// Base account username
    #[serde(default)]
    pub username: Option<String>,

    /// Global display name (account-wide)
    #[serde(default)]
    pub global_name: Option<String>,

    /// Guild-specific nickname
    #[serde(default)]
    pub nickname: Option<String>,

    /// Whether the account is an automated agent
    #[serde(default)]
    pub bot: bool,

    /// Current voice connection
    #[serde(default)]
    pub voice: VoiceState,
}

impl Member {
    /// Create a member with no name fields and no voice connection.
    pub fn new(guild_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            guild_id,
            user_id,
            username: None,
            global_name: None,
            nickname: None,
            bot: false,
            voice: VoiceState::Disconnected,
        }
    }

    /// Builder-style setter for the base username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Builder-style setter for the global display name.
    pub fn with_global_name(mut self, global_name: impl Into<String>) -> Self {
        self.global_name = Some(global_name.into());
        self
    }

    /// Builder-style setter for the guild nickname.
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// Builder-style setter for the voice state.
    pub fn with_voice(mut self, voice: VoiceState) -> Self {
        self.voice = voice;
        self
    }

    /// Mark the member as an automated agent.
    pub fn as_bot(mut self) -> Self {
        self.bot = true;
        self
    }

    /// Mention string for this member.
    pub fn mention(&self) -> String {
        self.user_id.user_mention()
    }

    /// Best human-readable label, for logs.
    pub fn label(&self) -> &str {
        NameField::PRIORITY
            .iter()
            .find_map(|field| field.extract(self))
            .unwrap_or("<unnamed>")
    }

    /// Whether this member currently occupies any voice channel.
    pub fn in_voice(&self) -> bool {
        self.voice.is_connected()
    }
}

/// Raw name fields a member can be matched by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameField {
    GlobalName,
    Nickname,
    Username,
}

impl NameField {
    /// Order in which fields are tried when matching a member.
    pub const PRIORITY: [NameField; 3] = [
        NameField::GlobalName,
        NameField::Nickname,
        NameField::Username,
    ];

    /// Read this field from a member.
    ///
    /// Empty and whitespace-only values count as absent.
    pub fn extract(self, member: &Member) -> Option<&str> {
        let raw = match self {
            NameField::GlobalName => member.global_name.as_deref(),
            NameField::Nickname => member.nickname.as_deref(),
            NameField::Username => member.username.as_deref(),
        };
        raw.filter(|value| !value.trim().is_empty())
    }
}

/// Read access to the current roster of a guild.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Snapshot of all members currently known in a guild.
    ///
    /// Unknown guilds yield an empty roster.
    async fn members(&self, guild_id: Snowflake) -> Result<Vec<Member>, AppError>;
}
