//! Form field definitions and type-level validation.
//!
//! Each [`FormFieldDef`] describes a single form field, including its type,
//! validators, widget, and metadata. The [`FormFieldType`] enum defines
//! the type-specific parsing and coercion logic through the [`clean_field_value`]
//! function.
//!
//! Field definitions are cheap to clone: widgets and validators are shared
//! behind `Arc`, so deriving a form class from another copies the schema
//! without duplicating widget state.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use formgen_core::utils::text::prettify_name;
use formgen_model::validators::Validator;
use formgen_model::value::Value;
use regex::Regex;

use crate::form::FormClass;
use crate::widgets::{
    CheckboxInput, DateInput, DateTimeInput, EmailInput, InlineFieldListWidget, NumberInput,
    Select, SelectMultiple, TextInput, Textarea, TimeInput, UrlInput, Widget,
};

/// Defines the type of a form field, including type-specific parameters.
///
/// Each variant carries the parameters needed for parsing and validating
/// raw string input from form submissions. The [`clean_field_value`] function
/// dispatches on this enum to perform type coercion and built-in validation.
#[derive(Debug, Clone)]
pub enum FormFieldType {
    /// A character (string) field.
    Char {
        /// Minimum length (characters).
        min_length: Option<usize>,
        /// Maximum length (characters).
        max_length: Option<usize>,
        /// Whether to strip leading/trailing whitespace.
        strip: bool,
    },
    /// A multi-line text field.
    Text {
        /// Maximum length (characters).
        max_length: Option<usize>,
    },
    /// An integer field.
    Integer {
        /// Minimum allowed value.
        min_value: Option<i64>,
        /// Maximum allowed value.
        max_value: Option<i64>,
    },
    /// A floating-point field.
    Float {
        /// Minimum allowed value.
        min_value: Option<f64>,
        /// Maximum allowed value.
        max_value: Option<f64>,
    },
    /// A fixed-precision decimal field.
    Decimal {
        /// Maximum total number of digits.
        max_digits: u32,
        /// Number of digits after the decimal point.
        decimal_places: u32,
    },
    /// A boolean field (true/false).
    Boolean,
    /// A date field (YYYY-MM-DD).
    Date,
    /// A date-time field (YYYY-MM-DDTHH:MM:SS).
    DateTime,
    /// A time field (HH:MM:SS).
    Time,
    /// A duration field (`HH:MM:SS`, `MM:SS`, or seconds).
    Duration,
    /// An email address field.
    Email,
    /// A URL field.
    Url,
    /// A UUID field.
    Uuid,
    /// An IP address field.
    IpAddress,
    /// A single-choice field.
    Choice {
        /// Available choices as `(value, display_label)` pairs.
        choices: Vec<(String, String)>,
    },
    /// A multiple-choice field.
    MultipleChoice {
        /// Available choices as `(value, display_label)` pairs.
        choices: Vec<(String, String)>,
    },
    /// A JSON field.
    Json,
    /// Repeated rows of a related model, each row an instance of `form`.
    ///
    /// Rows are submitted as `<name>-<index>-<subfield>` and bound as nested
    /// forms; see [`BoundForm::inline_forms`](crate::form::BoundForm::inline_forms).
    InlineList {
        /// The form class every row is an instance of.
        form: Box<FormClass>,
        /// Number of empty rows offered on a blank form.
        min_entries: usize,
    },
}

/// Complete definition of a form field.
///
/// A `FormFieldDef` captures everything needed to render, parse, and validate
/// a single form field.
#[derive(Debug, Clone)]
pub struct FormFieldDef {
    /// The field name (HTML name attribute).
    pub name: String,
    /// The field type, controlling parsing and coercion.
    pub field_type: FormFieldType,
    /// Whether this field is required.
    pub required: bool,
    /// Default/initial value.
    pub initial: Option<Value>,
    /// Help text displayed alongside the field.
    pub help_text: String,
    /// Human-readable label.
    pub label: String,
    /// The widget used for rendering.
    pub widget: Arc<dyn Widget>,
    /// Additional validators applied after type coercion.
    pub validators: Vec<Arc<dyn Validator>>,
    /// Custom error messages keyed by error code.
    pub error_messages: HashMap<String, String>,
    /// Whether the field is disabled (rendered but not editable).
    pub disabled: bool,
    /// Extra HTML attributes passed to the widget on every render.
    pub render_attrs: HashMap<String, String>,
}

impl FormFieldDef {
    /// Creates a new `FormFieldDef` with sensible defaults.
    ///
    /// The field is required by default, uses the default widget for its type,
    /// and has no validators beyond the type-level validation.
    pub fn new(name: impl Into<String>, field_type: FormFieldType) -> Self {
        let name = name.into();
        let widget = default_widget_for_field_type(&field_type);
        let label = prettify_name(&name);
        Self {
            name,
            field_type,
            required: true,
            initial: None,
            help_text: String::new(),
            label,
            widget,
            validators: Vec::new(),
            error_messages: HashMap::new(),
            disabled: false,
            render_attrs: HashMap::new(),
        }
    }

    /// Sets whether this field is required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn initial(mut self, value: Value) -> Self {
        self.initial = Some(value);
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the widget.
    #[must_use]
    pub fn widget(mut self, widget: Arc<dyn Widget>) -> Self {
        self.widget = widget;
        self
    }

    /// Adds a validator.
    #[must_use]
    pub fn validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Sets a custom error message for a given code.
    #[must_use]
    pub fn error_message(mut self, code: impl Into<String>, msg: impl Into<String>) -> Self {
        self.error_messages.insert(code.into(), msg.into());
        self
    }

    /// Sets whether this field is disabled.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Adds an HTML attribute passed to the widget on every render.
    #[must_use]
    pub fn render_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.render_attrs.insert(key.into(), value.into());
        self
    }

    /// Returns `true` for inline row lists, which bind as nested forms.
    pub const fn is_inline_list(&self) -> bool {
        matches!(self.field_type, FormFieldType::InlineList { .. })
    }
}

/// Returns the default widget for a given form field type.
pub fn default_widget_for_field_type(field_type: &FormFieldType) -> Arc<dyn Widget> {
    match field_type {
        FormFieldType::Char { .. }
        | FormFieldType::Duration
        | FormFieldType::Uuid
        | FormFieldType::IpAddress => Arc::new(TextInput),
        FormFieldType::Integer { .. } => Arc::new(NumberInput::default()),
        FormFieldType::Float { .. } | FormFieldType::Decimal { .. } => Arc::new(NumberInput {
            step: Some("any".to_string()),
        }),
        FormFieldType::Boolean => Arc::new(CheckboxInput),
        FormFieldType::Date => Arc::new(DateInput),
        FormFieldType::DateTime => Arc::new(DateTimeInput),
        FormFieldType::Time => Arc::new(TimeInput),
        FormFieldType::Email => Arc::new(EmailInput),
        FormFieldType::Url => Arc::new(UrlInput),
        FormFieldType::Choice { .. } => Arc::new(Select::default()),
        FormFieldType::MultipleChoice { .. } => Arc::new(SelectMultiple),
        FormFieldType::Text { .. } | FormFieldType::Json => Arc::new(Textarea),
        FormFieldType::InlineList { .. } => Arc::new(InlineFieldListWidget),
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("valid regex")
    })
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("valid regex"))
}

fn range_errors<T: PartialOrd + std::fmt::Display>(
    n: &T,
    min: Option<&T>,
    max: Option<&T>,
    errors: &mut Vec<String>,
) {
    if let Some(min) = min {
        if n < min {
            errors.push(format!(
                "Ensure this value is greater than or equal to {min}."
            ));
        }
    }
    if let Some(max) = max {
        if n > max {
            errors.push(format!("Ensure this value is less than or equal to {max}."));
        }
    }
}

/// Cleans (validates and coerces) a raw form input string into a typed `Value`.
///
/// This performs type-level validation:
/// 1. Required check (if `required` and value is empty/None)
/// 2. Type coercion (string -> i64, date, etc.)
/// 3. Type-specific constraint validation (min/max, choices)
/// 4. Custom validators
///
/// Returns the cleaned `Value` or a list of error messages. Inline row lists
/// are not cleaned here; their rows are validated as nested forms.
#[allow(clippy::too_many_lines)]
pub fn clean_field_value(field: &FormFieldDef, raw: Option<&str>) -> Result<Value, Vec<String>> {
    let raw_str = raw.unwrap_or("");
    let is_empty = raw_str.is_empty();

    if field.is_inline_list() {
        return Ok(Value::Null);
    }

    if field.required && is_empty {
        let msg = field
            .error_messages
            .get("required")
            .cloned()
            .unwrap_or_else(|| "This field is required.".to_string());
        return Err(vec![msg]);
    }

    // An unchecked box submits nothing; `initial` is for unbound rendering only.
    if is_empty {
        return Ok(match field.field_type {
            FormFieldType::Boolean => Value::Bool(false),
            _ => Value::Null,
        });
    }

    let mut errors = Vec::new();

    let value = match &field.field_type {
        FormFieldType::Char {
            min_length,
            max_length,
            strip,
        } => {
            let s = if *strip { raw_str.trim() } else { raw_str };
            let len = s.chars().count();
            if let Some(min) = min_length {
                if len < *min {
                    errors.push(format!(
                        "Ensure this value has at least {min} characters (it has {len})."
                    ));
                }
            }
            if let Some(max) = max_length {
                if len > *max {
                    errors.push(format!(
                        "Ensure this value has at most {max} characters (it has {len})."
                    ));
                }
            }
            Value::String(s.to_string())
        }

        FormFieldType::Text { max_length } => {
            let len = raw_str.chars().count();
            if let Some(max) = max_length {
                if len > *max {
                    errors.push(format!(
                        "Ensure this value has at most {max} characters (it has {len})."
                    ));
                }
            }
            Value::String(raw_str.to_string())
        }

        FormFieldType::Integer {
            min_value,
            max_value,
        } => match raw_str.trim().parse::<i64>() {
            Ok(n) => {
                range_errors(&n, min_value.as_ref(), max_value.as_ref(), &mut errors);
                Value::Int(n)
            }
            Err(_) => {
                errors.push(
                    field
                        .error_messages
                        .get("invalid")
                        .cloned()
                        .unwrap_or_else(|| "Enter a whole number.".to_string()),
                );
                Value::Null
            }
        },

        FormFieldType::Float {
            min_value,
            max_value,
        } => match raw_str.trim().parse::<f64>() {
            Ok(n) => {
                range_errors(&n, min_value.as_ref(), max_value.as_ref(), &mut errors);
                Value::Float(n)
            }
            Err(_) => {
                errors.push("Enter a number.".to_string());
                Value::Null
            }
        },

        FormFieldType::Decimal {
            max_digits,
            decimal_places,
        } => match raw_str.trim().parse::<f64>() {
            Ok(n) => {
                let digits = raw_str.trim().trim_start_matches('-');
                let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
                let total_digits = int_part.len() + frac_part.len();
                if total_digits > *max_digits as usize {
                    errors.push(format!(
                        "Ensure that there are no more than {max_digits} digits in total."
                    ));
                }
                if frac_part.len() > *decimal_places as usize {
                    errors.push(format!(
                        "Ensure that there are no more than {decimal_places} decimal places."
                    ));
                }
                Value::Float(n)
            }
            Err(_) => {
                errors.push("Enter a number.".to_string());
                Value::Null
            }
        },

        FormFieldType::Boolean => Value::Bool(matches!(
            raw_str.to_lowercase().as_str(),
            "true" | "1" | "yes" | "on" | "y"
        )),

        FormFieldType::Date => match chrono::NaiveDate::parse_from_str(raw_str, "%Y-%m-%d") {
            Ok(d) => Value::Date(d),
            Err(_) => {
                errors.push("Enter a valid date (YYYY-MM-DD).".to_string());
                Value::Null
            }
        },

        FormFieldType::DateTime => {
            let result = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
                .iter()
                .find_map(|fmt| chrono::NaiveDateTime::parse_from_str(raw_str, fmt).ok());
            if let Some(dt) = result {
                Value::DateTime(dt)
            } else {
                errors.push("Enter a valid date/time.".to_string());
                Value::Null
            }
        }

        FormFieldType::Time => {
            let result = chrono::NaiveTime::parse_from_str(raw_str, "%H:%M:%S")
                .or_else(|_| chrono::NaiveTime::parse_from_str(raw_str, "%H:%M"));
            if let Ok(t) = result {
                Value::Time(t)
            } else {
                errors.push("Enter a valid time (HH:MM or HH:MM:SS).".to_string());
                Value::Null
            }
        }

        FormFieldType::Duration => {
            if let Some(dur) = parse_duration(raw_str) {
                Value::Duration(dur)
            } else {
                errors.push("Enter a valid duration.".to_string());
                Value::Null
            }
        }

        FormFieldType::Email => {
            if !email_regex().is_match(raw_str) {
                errors.push("Enter a valid email address.".to_string());
            }
            Value::String(raw_str.to_string())
        }

        FormFieldType::Url => {
            if !url_regex().is_match(raw_str) {
                errors.push("Enter a valid URL.".to_string());
            }
            Value::String(raw_str.to_string())
        }

        FormFieldType::Uuid => match uuid::Uuid::parse_str(raw_str) {
            Ok(u) => Value::Uuid(u),
            Err(_) => {
                errors.push("Enter a valid UUID.".to_string());
                Value::Null
            }
        },

        FormFieldType::IpAddress => {
            if raw_str.parse::<std::net::IpAddr>().is_err() {
                errors.push("Enter a valid IP address.".to_string());
            }
            Value::String(raw_str.to_string())
        }

        FormFieldType::Choice { choices } => {
            if !choices.iter().any(|(v, _)| v == raw_str) {
                errors.push(format!(
                    "Select a valid choice. {raw_str} is not one of the available choices."
                ));
            }
            Value::String(raw_str.to_string())
        }

        FormFieldType::MultipleChoice { choices } => {
            let mut selected = Vec::new();
            for s in raw_str.split(',').map(str::trim) {
                if choices.iter().any(|(v, _)| v == s) {
                    selected.push(Value::String(s.to_string()));
                } else {
                    errors.push(format!(
                        "Select a valid choice. {s} is not one of the available choices."
                    ));
                }
            }
            Value::List(selected)
        }

        FormFieldType::Json => match serde_json::from_str::<serde_json::Value>(raw_str) {
            Ok(j) => Value::Json(j),
            Err(_) => {
                errors.push("Enter valid JSON.".to_string());
                Value::Null
            }
        },

        FormFieldType::InlineList { .. } => Value::Null,
    };

    // Custom validators only see values that passed type-level checks.
    if errors.is_empty() {
        for validator in &field.validators {
            if let Err(e) = validator.validate(&value) {
                errors.push(e.to_string());
            }
        }
    }

    if errors.is_empty() {
        Ok(value)
    } else {
        Err(errors)
    }
}

/// Parses a simple duration string into a `chrono::Duration`.
///
/// Supports formats: `HH:MM:SS`, `MM:SS`, or a plain number of seconds.
fn parse_duration(s: &str) -> Option<chrono::Duration> {
    let parts = s
        .split(':')
        .map(|p| p.trim().parse::<i64>().ok())
        .collect::<Option<Vec<i64>>>()?;
    let secs = match parts.as_slice() {
        [secs] => *secs,
        [mins, secs] => mins * 60 + secs,
        [hours, mins, secs] => hours * 3600 + mins * 60 + secs,
        _ => return None,
    };
    Some(chrono::Duration::seconds(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::WidgetType;
    use formgen_model::validators::MaxLengthValidator;

    fn char_field(min: Option<usize>, max: Option<usize>, strip: bool) -> FormFieldDef {
        FormFieldDef::new(
            "name",
            FormFieldType::Char {
                min_length: min,
                max_length: max,
                strip,
            },
        )
    }

    fn choices() -> Vec<(String, String)> {
        vec![
            ("draft".to_string(), "Draft".to_string()),
            ("live".to_string(), "Live".to_string()),
        ]
    }

    #[test]
    fn test_char_field_clean() {
        let field = char_field(Some(2), Some(50), true);
        let result = clean_field_value(&field, Some("  Alice  "));
        assert_eq!(result.unwrap(), Value::String("Alice".to_string()));
    }

    #[test]
    fn test_char_field_too_short() {
        let field = char_field(Some(5), None, false);
        let result = clean_field_value(&field, Some("Hi"));
        assert!(result.unwrap_err()[0].contains("at least 5"));
    }

    #[test]
    fn test_char_field_too_long() {
        let field = char_field(None, Some(3), false);
        let result = clean_field_value(&field, Some("Hello"));
        assert!(result.unwrap_err()[0].contains("at most 3"));
    }

    #[test]
    fn test_integer_field() {
        let field = FormFieldDef::new(
            "age",
            FormFieldType::Integer {
                min_value: Some(0),
                max_value: Some(150),
            },
        );
        assert_eq!(clean_field_value(&field, Some("42")).unwrap(), Value::Int(42));
        assert_eq!(
            clean_field_value(&field, Some("abc")).unwrap_err(),
            vec!["Enter a whole number.".to_string()]
        );
        assert!(clean_field_value(&field, Some("-1")).unwrap_err()[0].contains("greater than"));
        assert!(clean_field_value(&field, Some("200")).unwrap_err()[0].contains("less than"));
    }

    #[test]
    fn test_float_field() {
        let field = FormFieldDef::new(
            "score",
            FormFieldType::Float {
                min_value: None,
                max_value: None,
            },
        );
        assert_eq!(clean_field_value(&field, Some("2.5")).unwrap(), Value::Float(2.5));
        assert!(clean_field_value(&field, Some("x")).is_err());
    }

    #[test]
    fn test_decimal_field() {
        let field = FormFieldDef::new(
            "price",
            FormFieldType::Decimal {
                max_digits: 5,
                decimal_places: 2,
            },
        );
        assert_eq!(clean_field_value(&field, Some("123.45")).unwrap(), Value::Float(123.45));
        assert!(clean_field_value(&field, Some("1234.56")).unwrap_err()[0].contains("digits"));
        assert!(clean_field_value(&field, Some("1.234")).unwrap_err()[0].contains("decimal places"));
    }

    #[test]
    fn test_boolean_field() {
        let field = FormFieldDef::new("active", FormFieldType::Boolean).required(false);
        assert_eq!(clean_field_value(&field, Some("on")).unwrap(), Value::Bool(true));
        assert_eq!(clean_field_value(&field, Some("false")).unwrap(), Value::Bool(false));
        assert_eq!(clean_field_value(&field, None).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_empty_boolean_is_false_despite_initial() {
        let field = FormFieldDef::new("active", FormFieldType::Boolean)
            .required(false)
            .initial(Value::Bool(true));
        assert_eq!(clean_field_value(&field, Some("")).unwrap(), Value::Bool(false));
        assert_eq!(clean_field_value(&field, None).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_date_and_time_fields() {
        let date = FormFieldDef::new("d", FormFieldType::Date);
        assert!(matches!(clean_field_value(&date, Some("2024-01-15")).unwrap(), Value::Date(_)));
        assert!(clean_field_value(&date, Some("15/01/2024")).is_err());

        let dt = FormFieldDef::new("dt", FormFieldType::DateTime);
        assert!(matches!(
            clean_field_value(&dt, Some("2024-01-15 10:30:00")).unwrap(),
            Value::DateTime(_)
        ));
        assert!(matches!(
            clean_field_value(&dt, Some("2024-01-15T10:30")).unwrap(),
            Value::DateTime(_)
        ));

        let t = FormFieldDef::new("t", FormFieldType::Time);
        assert!(matches!(clean_field_value(&t, Some("10:30")).unwrap(), Value::Time(_)));
    }

    #[test]
    fn test_duration_field() {
        let field = FormFieldDef::new("d", FormFieldType::Duration);
        assert_eq!(
            clean_field_value(&field, Some("1:02:03")).unwrap(),
            Value::Duration(chrono::Duration::seconds(3723))
        );
        assert_eq!(
            clean_field_value(&field, Some("90")).unwrap(),
            Value::Duration(chrono::Duration::seconds(90))
        );
        assert!(clean_field_value(&field, Some("1:2:3:4")).is_err());
    }

    #[test]
    fn test_string_format_fields() {
        let email = FormFieldDef::new("e", FormFieldType::Email);
        assert!(clean_field_value(&email, Some("user@example.com")).is_ok());
        assert!(clean_field_value(&email, Some("not-an-email")).is_err());

        let url = FormFieldDef::new("u", FormFieldType::Url);
        assert!(clean_field_value(&url, Some("https://example.com/a")).is_ok());
        assert!(clean_field_value(&url, Some("example")).is_err());

        let ip = FormFieldDef::new("ip", FormFieldType::IpAddress);
        assert!(clean_field_value(&ip, Some("::1")).is_ok());
        assert!(clean_field_value(&ip, Some("999.1.1.1")).is_err());

        let id = FormFieldDef::new("id", FormFieldType::Uuid);
        assert!(clean_field_value(&id, Some("550e8400-e29b-41d4-a716-446655440000")).is_ok());
        assert!(clean_field_value(&id, Some("xyz")).is_err());
    }

    #[test]
    fn test_choice_fields() {
        let single = FormFieldDef::new("status", FormFieldType::Choice { choices: choices() });
        assert_eq!(clean_field_value(&single, Some("live")).unwrap(), Value::from("live"));
        assert!(clean_field_value(&single, Some("gone")).unwrap_err()[0]
            .contains("not one of the available choices"));

        let multi = FormFieldDef::new("tags", FormFieldType::MultipleChoice { choices: choices() });
        assert_eq!(
            clean_field_value(&multi, Some("draft, live")).unwrap(),
            Value::List(vec![Value::from("draft"), Value::from("live")])
        );
    }

    #[test]
    fn test_json_field() {
        let field = FormFieldDef::new("data", FormFieldType::Json);
        assert_eq!(
            clean_field_value(&field, Some(r#"{"a": 1}"#)).unwrap(),
            Value::Json(serde_json::json!({"a": 1}))
        );
        assert!(clean_field_value(&field, Some("{")).is_err());
    }

    #[test]
    fn test_required_and_optional() {
        let required = char_field(None, None, true);
        assert_eq!(
            clean_field_value(&required, None).unwrap_err(),
            vec!["This field is required.".to_string()]
        );
        assert!(clean_field_value(&required, Some("")).is_err());

        let optional = char_field(None, None, true)
            .required(false)
            .initial(Value::from("fallback"));
        assert_eq!(clean_field_value(&optional, None).unwrap(), Value::Null);
        assert_eq!(clean_field_value(&optional, Some("")).unwrap(), Value::Null);
    }

    #[test]
    fn test_custom_error_message() {
        let field = char_field(None, None, true).error_message("required", "Name is mandatory.");
        assert_eq!(
            clean_field_value(&field, None).unwrap_err(),
            vec!["Name is mandatory.".to_string()]
        );
    }

    #[test]
    fn test_validators_run_after_coercion() {
        let field = char_field(None, None, true).validator(Arc::new(MaxLengthValidator::new(3)));
        assert!(clean_field_value(&field, Some("abc")).is_ok());
        assert!(clean_field_value(&field, Some("abcd")).unwrap_err()[0].contains("at most 3"));
    }

    #[test]
    fn test_field_builder_chain() {
        let field = char_field(None, None, true)
            .label("Full name")
            .help_text("As printed")
            .disabled(true)
            .render_attr("placeholder", "Jane");
        assert_eq!(field.label, "Full name");
        assert_eq!(field.help_text, "As printed");
        assert!(field.disabled);
        assert_eq!(field.render_attrs["placeholder"], "Jane");
    }

    #[test]
    fn test_default_label_is_prettified() {
        let field = FormFieldDef::new("first_name", FormFieldType::Boolean);
        assert_eq!(field.label, "First Name");
    }

    #[test]
    fn test_default_widget_for_field_type() {
        let cases = [
            (FormFieldType::Boolean, WidgetType::CheckboxInput),
            (FormFieldType::Date, WidgetType::DateInput),
            (FormFieldType::Json, WidgetType::Textarea),
            (FormFieldType::Text { max_length: None }, WidgetType::Textarea),
            (FormFieldType::Email, WidgetType::EmailInput),
            (FormFieldType::Choice { choices: choices() }, WidgetType::Select),
            (
                FormFieldType::Integer {
                    min_value: None,
                    max_value: None,
                },
                WidgetType::NumberInput,
            ),
        ];
        for (field_type, expected) in cases {
            assert_eq!(default_widget_for_field_type(&field_type).widget_type(), expected);
        }
    }

    #[test]
    fn test_inline_list_is_not_cleaned_directly() {
        let field = FormFieldDef::new(
            "comments",
            FormFieldType::InlineList {
                form: Box::new(FormClass::new("CommentForm")),
                min_entries: 0,
            },
        );
        assert!(field.is_inline_list());
        assert_eq!(clean_field_value(&field, None).unwrap(), Value::Null);
        assert_eq!(field.widget.widget_type(), WidgetType::InlineFieldList);
    }
}
