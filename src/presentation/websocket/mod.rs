//! WebSocket Alert Stream
//!
//! Pushes dispatched alerts to connected delivery bridges.

pub mod alert_stream;

pub use alert_stream::{alert_stream_handler, AlertFrame};
