//! Notification target resolution.

use std::sync::Arc;

use super::presence::{identify, CollisionPolicy, KeyCollision, PresenceSnapshot};
use super::watch_registry::WatchRegistry;
use crate::domain::entities::Member;

/// Recipients for one join, plus the collisions seen while resolving them.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Recipients sorted by watch key
    pub recipients: Vec<Member>,
    pub collisions: Vec<KeyCollision>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }
}

/// Computes who should hear about a watched member joining voice:
/// every watched member present in the guild, minus those already in voice.
#[derive(Debug, Clone)]
pub struct TargetResolver {
    registry: Arc<WatchRegistry>,
    policy: CollisionPolicy,
}

impl TargetResolver {
    pub fn new(registry: Arc<WatchRegistry>, policy: CollisionPolicy) -> Self {
        Self { registry, policy }
    }

    pub fn registry(&self) -> &WatchRegistry {
        &self.registry
    }

    pub fn snapshot(&self, roster: &[Member]) -> PresenceSnapshot {
        PresenceSnapshot::capture(roster, &self.registry, self.policy)
    }

    /// Resolve recipients for `trigger` over a roster captured after the join.
    ///
    /// An unwatched trigger resolves to nobody. The trigger's own key is always
    /// excluded, even when the roster predates its transition.
    pub fn resolve(&self, roster: &[Member], trigger: &Member) -> Resolution {
        let Some(trigger_match) = identify(trigger, &self.registry) else {
            return Resolution::default();
        };

        let (watched, mut occupied, collisions) = self.snapshot(roster).into_parts();
        occupied.insert(trigger_match.key);

        let recipients = watched
            .into_iter()
            .filter(|(key, _)| !occupied.contains(key))
            .map(|(_, member)| member)
            .collect();

        Resolution {
            recipients,
            collisions,
        }
    }
}
