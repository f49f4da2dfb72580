//! Presence snapshot over a guild roster.
//!
//! Matching rule: a member's name fields are tried in [`NameField::PRIORITY`]
//! order, and the first one whose normalized form is watched decides the
//! member's watch key.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::identity::{normalize, WatchKey};
use super::watch_registry::WatchRegistry;
use crate::domain::entities::{Member, NameField};
use crate::domain::value_objects::Snowflake;

/// The field that matched a member, and the key it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchMatch {
    pub key: WatchKey,
    pub field: NameField,
}

/// Resolve a member's watch key, if any of its name fields is watched.
pub fn identify(member: &Member, registry: &WatchRegistry) -> Option<WatchMatch> {
    NameField::PRIORITY.iter().find_map(|&field| {
        let key = normalize(field.extract(member)?);
        registry
            .contains(&key)
            .then_some(WatchMatch { key, field })
    })
}

/// Tie-break when two roster members produce the same watch key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Keep the first member encountered in roster order
    #[default]
    KeepFirst,
    /// Let later members overwrite earlier ones
    LastWriteWins,
}

/// Two members resolved to the same watch key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCollision {
    pub key: WatchKey,
    pub kept: Snowflake,
    pub discarded: Snowflake,
}

/// Watched members present in a roster, and watched keys occupying voice.
#[derive(Debug, Clone, Default)]
pub struct PresenceSnapshot {
    watched_members: BTreeMap<WatchKey, Member>,
    occupied_keys: BTreeSet<WatchKey>,
    collisions: Vec<KeyCollision>,
}

impl PresenceSnapshot {
    /// Compute the snapshot for one roster.
    ///
    /// Occupancy is keyed, so a key counts as occupied when any member
    /// resolving to it is in voice, including a member dropped by the
    /// collision policy.
    pub fn capture(roster: &[Member], registry: &WatchRegistry, policy: CollisionPolicy) -> Self {
        let mut snapshot = Self::default();
        if registry.is_empty() {
            return snapshot;
        }

        for member in roster {
            let Some(WatchMatch { key, .. }) = identify(member, registry) else {
                continue;
            };

            if member.in_voice() {
                snapshot.occupied_keys.insert(key.clone());
            }

            match snapshot.watched_members.get(&key) {
                Some(existing) if existing.user_id == member.user_id => {}
                Some(existing) => {
                    let (kept, discarded) = match policy {
                        CollisionPolicy::KeepFirst => (existing.user_id, member.user_id),
                        CollisionPolicy::LastWriteWins => (member.user_id, existing.user_id),
                    };
                    snapshot.collisions.push(KeyCollision {
                        key: key.clone(),
                        kept,
                        discarded,
                    });
                    if policy == CollisionPolicy::LastWriteWins {
                        snapshot.watched_members.insert(key, member.clone());
                    }
                }
                None => {
                    snapshot.watched_members.insert(key, member.clone());
                }
            }
        }

        snapshot
    }

    pub fn watched_members(&self) -> &BTreeMap<WatchKey, Member> {
        &self.watched_members
    }

    pub fn occupied_keys(&self) -> &BTreeSet<WatchKey> {
        &self.occupied_keys
    }

    pub fn collisions(&self) -> &[KeyCollision] {
        &self.collisions
    }

    pub fn into_parts(self) -> (BTreeMap<WatchKey, Member>, BTreeSet<WatchKey>, Vec<KeyCollision>) {
        (self.watched_members, self.occupied_keys, self.collisions)
    }
}
