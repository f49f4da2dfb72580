//! # Voice Watch Library
//!
//! This crate provides a voice-join notification relay:
//! - Gateway event ingest over HTTP (guild rosters and voice state updates)
//! - A watch list of handles whose voice joins are relayed
//! - Alerts pinging every other watched member who is not in voice
//! - A WebSocket stream delivering alerts to the chat side
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Identity normalization, presence, and transition rules
//! - **Application Layer**: The watch pipeline and gateway ingest
//! - **Infrastructure Layer**: Roster cache, alert dispatch, and metrics
//! - **Presentation Layer**: HTTP handlers and the alert stream
//!
//! ## Module Structure
//!
//! ```text
//! voice_watch/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, and watch rules
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Roster cache, dispatcher, metrics
//! +-- presentation/   HTTP routes and WebSocket handlers
//! +-- shared/         Common utilities (errors, snowflake IDs)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP and WebSocket handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
