//! Watch registry.

use std::collections::HashSet;

use super::identity::{normalize, WatchKey};

/// Immutable set of watched identity keys.
///
/// Built once at startup from the configured handles and shared read-only
/// afterwards. An empty registry is valid and simply never matches.
#[derive(Debug, Clone, Default)]
pub struct WatchRegistry {
    keys: HashSet<WatchKey>,
}

impl WatchRegistry {
    /// Build from raw handles. Duplicates after normalization collapse, and
    /// handles that normalize to an empty key are skipped.
    pub fn from_handles<I, S>(handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keys = HashSet::new();
        for handle in handles {
            let key = normalize(handle.as_ref());
            if key.is_empty() {
                tracing::warn!(handle = handle.as_ref(), "Ignoring blank watched handle");
                continue;
            }
            keys.insert(key);
        }
        Self { keys }
    }

    pub fn contains(&self, key: &WatchKey) -> bool {
        self.keys.contains(key)
    }

    pub fn keys(&self) -> &HashSet<WatchKey> {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in sorted order, for stable display.
    pub fn sorted_keys(&self) -> Vec<&WatchKey> {
        let mut keys: Vec<_> = self.keys.iter().collect();
        keys.sort();
        keys
    }
}
