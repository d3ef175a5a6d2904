//! # formgen-core
//!
//! Core types, settings, logging, and error types for formgen.
//! This crate has no formgen dependencies and provides the foundation for the others.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`utils`] - Utility types (`MultiValueDict`, text helpers)
//! - [`settings`] - Settings and global configuration
//! - [`settings_loader`] - Loading settings from TOML/JSON and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{FormgenError, FormgenResult, ValidationError};
pub use settings::{Settings, SETTINGS};
