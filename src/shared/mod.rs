//! Shared Module
//!
//! This module contains types used across the authentication lifecycle:
//! the error taxonomy, the client event bus, and application configuration.
//!
//! # Overview
//!
//! Everything here is collaborator-agnostic. Errors and events are designed
//! for serialization and for crossing thread boundaries; configuration is
//! builder-validated.

/// Client event system
pub mod event;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::{AuthError, StoreError};
pub use event::{ClientEvent, ClientEventBroadcast, EventType};
