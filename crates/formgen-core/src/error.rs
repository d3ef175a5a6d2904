//! Core error types for formgen.
//!
//! [`FormgenError`] covers the failure categories of form generation:
//! configuration mistakes detected while a form class is derived, unimplemented
//! extension points, validation failures of submitted data, and settings
//! loading problems. Absence (no converter, no inline info, no label) is never
//! an error; those lookups return `Option`.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Represents a validation error with optional field-level errors.
///
/// Validation errors can be either simple (a single message) or compound
/// (containing per-field error lists).
///
/// # Examples
///
/// ```
/// use formgen_core::error::ValidationError;
///
/// // Simple validation error
/// let err = ValidationError::new("This field is required.", "required");
///
/// // Field-level validation errors
/// let mut field_errors = std::collections::HashMap::new();
/// field_errors.insert(
///     "email".to_string(),
///     vec![ValidationError::new("Invalid email address.", "invalid")],
/// );
/// let err = ValidationError::with_field_errors(field_errors);
/// ```
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The primary error message.
    pub message: String,
    /// A short code identifying the type of validation failure (e.g. "required", "invalid").
    pub code: String,
    /// Additional parameters providing context for the error message.
    pub params: HashMap<String, String>,
    /// Per-field validation errors, keyed by field name.
    pub field_errors: HashMap<String, Vec<Self>>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            params: HashMap::new(),
            field_errors: HashMap::new(),
        }
    }

    /// Creates a `ValidationError` containing per-field errors.
    pub fn with_field_errors(field_errors: HashMap<String, Vec<Self>>) -> Self {
        Self {
            message: String::new(),
            code: String::new(),
            params: HashMap::new(),
            field_errors,
        }
    }

    /// Builds a compound error from plain per-field message lists, as produced
    /// by the form validation pipeline.
    pub fn from_messages(errors: &HashMap<String, Vec<String>>) -> Self {
        let field_errors = errors
            .iter()
            .map(|(field, messages)| {
                let list = messages
                    .iter()
                    .map(|m| Self::new(m.clone(), "invalid"))
                    .collect();
                (field.clone(), list)
            })
            .collect();
        Self::with_field_errors(field_errors)
    }

    /// Adds a parameter to this validation error.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            write!(f, "{}", self.message)?;
        } else if !self.field_errors.is_empty() {
            let mut fields: Vec<_> = self.field_errors.iter().collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));
            let mut first = true;
            for (field, errors) in fields {
                for error in errors {
                    if !first {
                        write!(f, "; ")?;
                    }
                    write!(f, "{field}: {error}")?;
                    first = false;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for formgen.
#[derive(Error, Debug)]
pub enum FormgenError {
    // ── Configuration ────────────────────────────────────────────────

    /// A form or converter was configured in a way that can never work.
    ///
    /// Raised eagerly while form classes are derived, never deferred to the
    /// time a form is rendered or bound.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// A settings value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Extension points ─────────────────────────────────────────────

    /// An abstract extension point was invoked without an override.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    // ── Validation ───────────────────────────────────────────────────

    /// One or more fields failed validation.
    #[error("Validation error: {0}")]
    ValidationError(ValidationError),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormgenError {
    /// Returns `true` for errors caused by static configuration rather than
    /// by submitted data.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ImproperlyConfigured(_) | Self::ConfigurationError(_) | Self::NotImplemented(_)
        )
    }
}

impl From<ValidationError> for FormgenError {
    fn from(err: ValidationError) -> Self {
        Self::ValidationError(err)
    }
}

/// A convenience type alias for `Result<T, FormgenError>`.
pub type FormgenResult<T> = Result<T, FormgenError>;
