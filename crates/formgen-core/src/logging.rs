//! Logging integration.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating spans around
//! form-class construction.

use crate::settings::Settings;

/// Target used for deprecation warnings, so they can be filtered separately.
pub const DEPRECATION_TARGET: &str = "formgen::deprecation";

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level is read from `settings.log_level`. In debug mode a pretty,
/// human-readable format is used; otherwise a structured JSON format is used.
/// Installing a second subscriber is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for building one form class.
///
/// # Examples
///
/// ```
/// use formgen_core::logging::form_span;
///
/// let span = form_span("PostForm");
/// let _guard = span.enter();
/// tracing::debug!("converting columns");
/// ```
pub fn form_span(form_name: &str) -> tracing::Span {
    tracing::debug_span!("form", name = form_name)
}
