//! # Domain Services
//!
//! The watch-matching engine. Everything here is synchronous and pure over
//! data supplied by the caller; no I/O happens in this module.
//!
//! ## Services
//!
//! - **identity**: Identity normalization into watch keys
//! - **watch_registry**: Immutable set of watched keys
//! - **presence**: Presence snapshot of a roster (who is present, who is in voice)
//! - **transition**: Decides which voice transitions are joins
//! - **target_resolver**: Computes the recipients for a join

mod identity;
mod presence;
mod target_resolver;
mod transition;
mod watch_registry;

pub use identity::{normalize, WatchKey};
pub use presence::{identify, CollisionPolicy, KeyCollision, PresenceSnapshot, WatchMatch};
pub use target_resolver::{Resolution, TargetResolver};
pub use transition::{IgnoreReason, TransitionDetector, TransitionRule, TransitionVerdict};
pub use watch_registry::WatchRegistry;
