//! # Domain Entities
//!
//! Core domain entities for voice presence watching.
//!
//! ## Entities
//!
//! - **Member**: A guild member with its raw name fields and voice connection
//! - **VoiceState**: Disconnected, or connected to one voice channel
//! - **VoiceTransition**: One observed change of a member's voice connection
//! - **QualifyingJoin**: A join that should be alerted, with its recipients
//!
//! ## Ports
//!
//! - **RosterSource**: Read access to a guild's current roster
//! - **AlertDispatcher**: Delivery of qualifying joins
//!
//! Ports are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod member;
mod voice;

pub use member::{Member, NameField, RosterSource};
pub use voice::{AlertDispatcher, QualifyingJoin, VoiceState, VoiceTransition};

#[cfg(test)]
pub use member::MockRosterSource;
#[cfg(test)]
pub use voice::MockAlertDispatcher;
