//! # Domain Layer
//!
//! The domain layer contains the watch-matching engine.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Members, voice states, and the roster/dispatch ports
//! - **value_objects**: Immutable value types (Snowflake)
//! - **services**: Normalization, registry, presence, transitions, resolution
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Core rules are total functions over in-memory data
//! - Port traits define roster access and alert delivery contracts

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use services::*;
pub use value_objects::*;
