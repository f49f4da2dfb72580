//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod alerts;
pub mod events;
pub mod guilds;
pub mod health;
