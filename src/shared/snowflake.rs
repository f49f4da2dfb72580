//! Snowflake ID Generator
//!
//! Twitter-style unique ID generation for alerts emitted by this service.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::domain::value_objects::{Snowflake, DISCORD_EPOCH};

/// Snowflake ID generator
pub struct SnowflakeGenerator {
    machine_id: u64,
    node_id: u64,
    sequence: AtomicU64,
    last_timestamp: AtomicU64,
}

impl SnowflakeGenerator {
    /// Create a new snowflake generator
    pub fn new(machine_id: u64, node_id: u64) -> Self {
        Self {
            machine_id: machine_id & 0x1F,  // 5 bits
            node_id: node_id & 0x1F,         // 5 bits
            sequence: AtomicU64::new(0),
            last_timestamp: AtomicU64::new(0),
        }
    }

    /// Generate a new snowflake ID
    pub fn generate(&self) -> Snowflake {
        let timestamp = Self::current_timestamp();
        let last = self.last_timestamp.swap(timestamp, Ordering::SeqCst);

        let sequence = if timestamp == last {
            (self.sequence.fetch_add(1, Ordering::SeqCst) + 1) & 0xFFF
        } else {
            self.sequence.store(0, Ordering::SeqCst);
            0
        };

        let id = (timestamp.saturating_sub(DISCORD_EPOCH) << 22)
            | (self.machine_id << 17)
            | (self.node_id << 12)
            | sequence;

        Snowflake(id as i64)
    }

    /// Current timestamp in milliseconds
    fn current_timestamp() -> u64 {
        Utc::now().timestamp_millis().max(0) as u64
    }
}
