//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **VoiceWatchService**: Voice transition pipeline (gate, resolve, dispatch)
//! - **GatewayIngestService**: Applies gateway events to the roster cache

pub mod gateway_ingest;
pub mod voice_watch_service;

pub use gateway_ingest::GatewayIngestService;
pub use voice_watch_service::{VoiceWatchService, VoiceWatchServiceImpl, WatchError, WatchOutcome};
