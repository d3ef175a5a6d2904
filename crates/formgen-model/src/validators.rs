//! Value validators.
//!
//! Validators run after a form field has coerced its raw input into a
//! [`Value`]. They are attached to form fields either directly or through
//! per-field arguments supplied by an admin configuration.

use std::fmt;

use formgen_core::ValidationError;
use regex::Regex;

use crate::value::Value;

/// A trait for validating cleaned values.
///
/// # Examples
///
/// ```
/// use formgen_model::validators::{Validator, MaxLengthValidator};
/// use formgen_model::value::Value;
///
/// let v = MaxLengthValidator::new(5);
/// assert!(v.validate(&Value::String("hi".into())).is_ok());
/// assert!(v.validate(&Value::String("toolong".into())).is_err());
/// ```
pub trait Validator: Send + Sync + fmt::Debug {
    /// Validates the given value, returning an error if invalid.
    fn validate(&self, value: &Value) -> Result<(), ValidationError>;

    /// Returns a human-readable name for this validator.
    fn name(&self) -> &str;
}

/// Validates that a string value does not exceed a maximum length.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    /// The maximum allowed length in characters.
    pub max_length: usize,
}

impl MaxLengthValidator {
    /// Creates a new `MaxLengthValidator` with the given maximum length.
    pub const fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if let Value::String(s) = value {
            let len = s.chars().count();
            if len > self.max_length {
                return Err(ValidationError::new(
                    format!(
                        "Ensure this value has at most {} characters (it has {len}).",
                        self.max_length
                    ),
                    "max_length",
                ));
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MaxLengthValidator"
    }
}

/// Validates that a string value meets a minimum length requirement.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    /// The minimum required length in characters.
    pub min_length: usize,
}

impl MinLengthValidator {
    /// Creates a new `MinLengthValidator` with the given minimum length.
    pub const fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if let Value::String(s) = value {
            let len = s.chars().count();
            if len < self.min_length {
                return Err(ValidationError::new(
                    format!(
                        "Ensure this value has at least {} characters (it has {len}).",
                        self.min_length
                    ),
                    "min_length",
                ));
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MinLengthValidator"
    }
}

/// Validates that a numeric value lies inside an inclusive range.
#[derive(Debug, Clone)]
pub struct RangeValidator {
    /// The minimum allowed value.
    pub min: Option<f64>,
    /// The maximum allowed value.
    pub max: Option<f64>,
}

impl RangeValidator {
    /// Creates a new `RangeValidator`. Either bound may be omitted.
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }
}

impl Validator for RangeValidator {
    #[allow(clippy::cast_precision_loss)]
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let numeric = match value {
            Value::Int(i) => *i as f64,
            Value::Float(f) => *f,
            _ => return Ok(()),
        };
        if let Some(min) = self.min {
            if numeric < min {
                return Err(ValidationError::new(
                    format!("Ensure this value is greater than or equal to {min}."),
                    "min_value",
                ));
            }
        }
        if let Some(max) = self.max {
            if numeric > max {
                return Err(ValidationError::new(
                    format!("Ensure this value is less than or equal to {max}."),
                    "max_value",
                ));
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "RangeValidator"
    }
}

/// Validates that a string value matches a regular expression.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    regex: Regex,
    message: String,
}

impl RegexValidator {
    /// Compiles `pattern` into a validator.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            message: message.into(),
        })
    }
}

impl Validator for RegexValidator {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match value {
            Value::String(s) if !self.regex.is_match(s) => {
                Err(ValidationError::new(self.message.clone(), "invalid")
                    .with_param("pattern", self.regex.as_str()))
            }
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "RegexValidator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_length() {
        let v = MaxLengthValidator::new(3);
        assert!(v.validate(&Value::String("abc".into())).is_ok());
        let err = v.validate(&Value::String("abcd".into())).unwrap_err();
        assert_eq!(err.code, "max_length");
    }

    #[test]
    fn test_max_length_counts_chars() {
        let v = MaxLengthValidator::new(2);
        assert!(v.validate(&Value::String("éé".into())).is_ok());
    }

    #[test]
    fn test_max_length_non_string() {
        let v = MaxLengthValidator::new(3);
        assert!(v.validate(&Value::Int(12345)).is_ok());
    }

    #[test]
    fn test_min_length() {
        let v = MinLengthValidator::new(5);
        assert!(v.validate(&Value::String("hi".into())).is_err());
        assert!(v.validate(&Value::String("hello".into())).is_ok());
    }

    #[test]
    fn test_range() {
        let v = RangeValidator::new(Some(0.0), Some(100.0));
        assert!(v.validate(&Value::Int(50)).is_ok());
        assert_eq!(v.validate(&Value::Int(-1)).unwrap_err().code, "min_value");
        assert_eq!(v.validate(&Value::Float(100.5)).unwrap_err().code, "max_value");
        assert!(v.validate(&Value::from("not a number")).is_ok());
    }

    #[test]
    fn test_regex() {
        let v = RegexValidator::new(r"^[a-z]+$", "Lowercase letters only.").unwrap();
        assert!(v.validate(&Value::from("abc")).is_ok());
        let err = v.validate(&Value::from("ABC")).unwrap_err();
        assert_eq!(err.message, "Lowercase letters only.");
        assert_eq!(err.params["pattern"], "^[a-z]+$");
    }

    #[test]
    fn test_regex_invalid_pattern() {
        assert!(RegexValidator::new("(", "x").is_err());
    }

    #[test]
    fn test_validator_names() {
        assert_eq!(MaxLengthValidator::new(5).name(), "MaxLengthValidator");
        assert_eq!(MinLengthValidator::new(5).name(), "MinLengthValidator");
        assert_eq!(RangeValidator::new(None, None).name(), "RangeValidator");
    }
}
