//! Presentation Layer
//!
//! HTTP routes and the WebSocket alert stream.

pub mod http;
pub mod middleware;
pub mod websocket;
