//! Settings for form generation.
//!
//! This module provides the [`Settings`] struct, which holds the knobs that
//! control converter resolution, list editing, and logging, and
//! [`LazySettings`], a globally-accessible, lazily-initialized settings instance.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// The complete set of formgen settings.
///
/// # Examples
///
/// ```
/// use formgen_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.use_ancestor_search);
/// assert_eq!(settings.list_update_url, "./ajax/update/");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled.
    pub debug: bool,

    // ── Converters ───────────────────────────────────────────────────

    /// Whether converter lookup walks a column type's ancestors or only
    /// inspects the exact type.
    pub use_ancestor_search: bool,
    /// Whether two converters claiming the same type identifier abort the
    /// registry build. When off, the later table entry wins.
    pub reject_duplicate_converters: bool,

    // ── List editing ─────────────────────────────────────────────────

    /// Endpoint that receives single-cell updates from the list view.
    pub list_update_url: String,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            use_ancestor_search: true,
            reject_duplicate_converters: true,
            list_update_url: "./ajax/update/".to_string(),
            log_level: "info".to_string(),
            extra: HashMap::new(),
        }
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup to set the
/// settings, then use [`get`](LazySettings::get) to access them.
pub struct LazySettings {
    inner: OnceLock<Settings>,
    fallback: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
            fallback: OnceLock::new(),
        }
    }

    /// Configures the global settings.
    ///
    /// Returns the rejected settings if they were already configured.
    pub fn configure(&self, settings: Settings) -> Result<(), Settings> {
        self.inner.set(settings)
    }

    /// Returns the configured settings, or the defaults if nothing was
    /// configured yet.
    pub fn get(&self) -> &Settings {
        self.inner
            .get()
            .unwrap_or_else(|| self.fallback.get_or_init(Settings::default))
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();
