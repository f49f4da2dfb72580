//! Discord-style Snowflake ID implementation.
//!
//! Snowflake IDs are 64-bit integers with embedded timestamp information.
//! Guild, channel and user identifiers all share this representation.
//!
//! ## Structure
//!
//! ```text
//! 64                         22          17          12          0
//! +---------------------------+-----------+-----------+-----------+
//! |         timestamp         |  worker   |  process  |  sequence |
//! |          (42 bits)        |  (5 bits) |  (5 bits) |  (12 bits)|
//! +---------------------------+-----------+-----------+-----------+
//! ```
//!
//! Gateway payloads carry ids as JSON strings, while older clients send plain
//! numbers, so deserialization accepts both. Serialization always emits a string.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discord epoch: 2015-01-01T00:00:00Z in milliseconds
pub const DISCORD_EPOCH: u64 = 1420070400000;

/// A Discord-style Snowflake ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "SnowflakeRepr", into = "String")]
pub struct Snowflake(pub i64);

/// Wire representations accepted for a snowflake.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnowflakeRepr {
    Int(i64),
    Str(String),
}

impl TryFrom<SnowflakeRepr> for Snowflake {
    type Error = std::num::ParseIntError;

    fn try_from(repr: SnowflakeRepr) -> Result<Self, Self::Error> {
        match repr {
            SnowflakeRepr::Int(value) => Ok(Self(value)),
            SnowflakeRepr::Str(value) => value.trim().parse().map(Self),
        }
    }
}

impl Snowflake {
    /// Create a new Snowflake from raw value.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Extract the timestamp from this Snowflake.
    pub fn timestamp(&self) -> u64 {
        ((self.0 as u64) >> 22) + DISCORD_EPOCH
    }

    /// Get the timestamp as a DateTime.
    pub fn created_at(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp() as i64)
            .single()
            .unwrap_or_else(Utc::now)
    }

    /// Get the raw i64 value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Render as a user mention (`<@id>`).
    pub fn user_mention(&self) -> String {
        format!("<@{}>", self.0)
    }

    /// Render as a channel mention (`<#id>`).
    pub fn channel_mention(&self) -> String {
        format!("<#{}>", self.0)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Snowflake> for i64 {
    fn from(snowflake: Snowflake) -> Self {
        snowflake.0
    }
}

impl From<Snowflake> for String {
    fn from(snowflake: Snowflake) -> Self {
        snowflake.0.to_string()
    }
}
