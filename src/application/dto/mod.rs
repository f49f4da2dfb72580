//! Data Transfer Objects
//!
//! DTOs for gateway event ingest and API responses.

pub mod events;
pub mod response;

pub use events::GatewayEvent;
pub use response::{EventAck, PresenceResponse, RecentAlertsResponse};
