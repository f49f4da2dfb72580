//! Infrastructure Layer
//!
//! Contains implementations of the domain ports and external concerns:
//! - In-memory guild roster cache (roster source)
//! - Broadcast alert dispatcher
//! - Prometheus metrics

pub mod dispatch;
pub mod metrics;
pub mod roster;
