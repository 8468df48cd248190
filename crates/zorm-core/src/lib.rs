//! # zorm-core
//!
//! Core error types, settings, and logging setup for zorm. This crate has no
//! zorm dependencies and is the foundation the compiler crate builds on.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy and result alias
//! - [`settings`] - Dialect and logging settings, global settings slot
//! - [`settings_loader`] - TOML loading with environment overrides
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{ErrorCategory, ZormError, ZormResult};
pub use settings::{DatabaseSettings, Settings, SETTINGS};
