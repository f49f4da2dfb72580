//! # Configuration Module
//!
//! This module handles application configuration loading and management.
//! Configuration can be loaded from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy)
//! - `ALERT_CHANNEL_ID` and `WATCHED_HANDLES` shortcuts
//!
//! ## Usage
//!
//! ```rust,ignore
//! use voice_watch::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Alerts go to channel {}", settings.alert.channel_id);
//! ```

mod settings;

pub use settings::*;
