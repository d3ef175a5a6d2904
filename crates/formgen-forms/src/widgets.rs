//! Widget system for rendering form fields as HTML.
//!
//! Widgets are the bridge between form fields and their HTML representation.
//! Each widget knows how to render a field, extract the field's raw value
//! from submitted [`FormData`], and compute the `id` its `<label>` targets.
//!
//! Besides the ordinary inputs this module provides [`XEditableWidget`], the
//! widget every field of a list form is rendered with: it emits an anchor the
//! x-editable client turns into an in-place editor that posts a single
//! `(field, value)` pair plus the row's primary key.

use std::collections::HashMap;
use std::fmt;

use formgen_core::utils::text::escape_html;
use formgen_core::utils::FormData;
use formgen_core::{FormgenError, FormgenResult};

use crate::fields::{FormFieldDef, FormFieldType};

/// Enumerates the widget kinds.
///
/// Each variant corresponds to a distinct HTML form element or client-side
/// editor. Widgets defined outside this crate report [`WidgetType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetType {
    /// `<input type="text">`.
    TextInput,
    /// `<input type="number">`.
    NumberInput,
    /// `<input type="email">`.
    EmailInput,
    /// `<input type="url">`.
    UrlInput,
    /// `<input type="hidden">`.
    HiddenInput,
    /// `<textarea>`.
    Textarea,
    /// `<input type="checkbox">`.
    CheckboxInput,
    /// `<select>`.
    Select,
    /// `<select multiple>`.
    SelectMultiple,
    /// `<input type="date">`.
    DateInput,
    /// `<input type="datetime-local">`.
    DateTimeInput,
    /// `<input type="time">`.
    TimeInput,
    /// In-place list-view editor.
    XEditable,
    /// Repeated sub-form rows of an inline model.
    InlineFieldList,
    /// A widget defined outside this crate.
    Custom(&'static str),
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextInput => "TextInput",
            Self::NumberInput => "NumberInput",
            Self::EmailInput => "EmailInput",
            Self::UrlInput => "UrlInput",
            Self::HiddenInput => "HiddenInput",
            Self::Textarea => "Textarea",
            Self::CheckboxInput => "CheckboxInput",
            Self::Select => "Select",
            Self::SelectMultiple => "SelectMultiple",
            Self::DateInput => "DateInput",
            Self::DateTimeInput => "DateTimeInput",
            Self::TimeInput => "TimeInput",
            Self::XEditable => "XEditable",
            Self::InlineFieldList => "InlineFieldList",
            Self::Custom(name) => name,
        };
        write!(f, "{name}")
    }
}

/// A trait for HTML form widgets.
///
/// Widgets are shared between form classes (a list form hands the same
/// widget to every column), so implementations must be `Send + Sync`.
pub trait Widget: Send + Sync + fmt::Debug {
    /// Returns the widget type enum variant.
    fn widget_type(&self) -> WidgetType;

    /// Renders `field` under the HTML name `name`.
    ///
    /// `value` is the current raw value, `attrs` are extra HTML attributes.
    /// Widgets that cannot render the field fail with
    /// [`FormgenError::ImproperlyConfigured`].
    fn render(
        &self,
        field: &FormFieldDef,
        name: &str,
        value: Option<&str>,
        attrs: &HashMap<String, String>,
    ) -> FormgenResult<String>;

    /// Extracts the raw value for `name` from submitted data.
    fn value_from_data(&self, data: &FormData, name: &str) -> Option<String> {
        data.value(name).map(String::from)
    }

    /// Returns the HTML `id` attribute value for a label targeting this widget.
    fn id_for_label(&self, id: &str) -> String {
        id.to_string()
    }
}

/// Formats an HTML attributes map into a string like ` key="value" key2="value2"`.
fn render_attrs(attrs: &HashMap<String, String>) -> String {
    if attrs.is_empty() {
        return String::new();
    }
    let mut parts: Vec<String> = attrs
        .iter()
        .map(|(k, v)| format!(r#" {k}="{}""#, escape_html(v)))
        .collect();
    parts.sort(); // deterministic output for testing
    parts.join("")
}

fn render_input(
    input_type: &str,
    name: &str,
    value: Option<&str>,
    attrs: &HashMap<String, String>,
) -> String {
    let val = escape_html(value.unwrap_or(""));
    format!(
        r#"<input type="{input_type}" name="{name}" value="{val}"{} />"#,
        render_attrs(attrs)
    )
}

fn field_choices(field: &FormFieldDef) -> &[(String, String)] {
    match &field.field_type {
        FormFieldType::Choice { choices } | FormFieldType::MultipleChoice { choices } => choices,
        _ => &[],
    }
}

// ---------------------------------------------------------------------------
// Built-in widgets
// ---------------------------------------------------------------------------

/// A basic `<input type="text">` widget.
#[derive(Debug, Clone, Default)]
pub struct TextInput;

impl Widget for TextInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::TextInput
    }

    fn render(
        &self,
        _field: &FormFieldDef,
        name: &str,
        value: Option<&str>,
        attrs: &HashMap<String, String>,
    ) -> FormgenResult<String> {
        Ok(render_input("text", name, value, attrs))
    }
}

/// A `<input type="number">` widget.
#[derive(Debug, Clone, Default)]
pub struct NumberInput {
    /// The `step` attribute; `None` leaves the browser default.
    pub step: Option<String>,
}

impl Widget for NumberInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::NumberInput
    }

    fn render(
        &self,
        _field: &FormFieldDef,
        name: &str,
        value: Option<&str>,
        attrs: &HashMap<String, String>,
    ) -> FormgenResult<String> {
        let mut attrs = attrs.clone();
        if let Some(step) = &self.step {
            attrs.entry("step".to_string()).or_insert_with(|| step.clone());
        }
        Ok(render_input("number", name, value, &attrs))
    }
}

/// A `<input type="email">` widget.
#[derive(Debug, Clone, Default)]
pub struct EmailInput;

impl Widget for EmailInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::EmailInput
    }

    fn render(
        &self,
        _field: &FormFieldDef,
        name: &str,
        value: Option<&str>,
        attrs: &HashMap<String, String>,
    ) -> FormgenResult<String> {
        Ok(render_input("email", name, value, attrs))
    }
}

/// A `<input type="url">` widget.
#[derive(Debug, Clone, Default)]
pub struct UrlInput;

impl Widget for UrlInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::UrlInput
    }

    fn render(
        &self,
        _field: &FormFieldDef,
        name: &str,
        value: Option<&str>,
        attrs: &HashMap<String, String>,
    ) -> FormgenResult<String> {
        Ok(render_input("url", name, value, attrs))
    }
}

/// A `<input type="hidden">` widget.
#[derive(Debug, Clone, Default)]
pub struct HiddenInput;

impl Widget for HiddenInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::HiddenInput
    }

    fn render(
        &self,
        _field: &FormFieldDef,
        name: &str,
        value: Option<&str>,
        attrs: &HashMap<String, String>,
    ) -> FormgenResult<String> {
        Ok(render_input("hidden", name, value, attrs))
    }

    fn id_for_label(&self, _id: &str) -> String {
        String::new()
    }
}

/// A `<textarea>` widget.
#[derive(Debug, Clone, Default)]
pub struct Textarea;

impl Widget for Textarea {
    fn widget_type(&self) -> WidgetType {
        WidgetType::Textarea
    }

    fn render(
        &self,
        _field: &FormFieldDef,
        name: &str,
        value: Option<&str>,
        attrs: &HashMap<String, String>,
    ) -> FormgenResult<String> {
        let val = escape_html(value.unwrap_or(""));
        Ok(format!(
            r#"<textarea name="{name}"{}>{val}</textarea>"#,
            render_attrs(attrs)
        ))
    }
}

/// A `<input type="checkbox">` widget.
///
/// The submitted value is typically "on" or absent.
#[derive(Debug, Clone, Default)]
pub struct CheckboxInput;

impl Widget for CheckboxInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::CheckboxInput
    }

    fn render(
        &self,
        _field: &FormFieldDef,
        name: &str,
        value: Option<&str>,
        attrs: &HashMap<String, String>,
    ) -> FormgenResult<String> {
        let checked = value.is_some_and(|v| matches!(v, "true" | "on" | "1"));
        let checked_attr = if checked { " checked" } else { "" };
        Ok(format!(
            r#"<input type="checkbox" name="{name}"{checked_attr}{} />"#,
            render_attrs(attrs)
        ))
    }
}

/// A `<select>` widget listing the field's choices.
#[derive(Debug, Clone, Default)]
pub struct Select {
    /// Render a leading empty option (for optional fields).
    pub allow_blank: bool,
}

impl Widget for Select {
    fn widget_type(&self) -> WidgetType {
        WidgetType::Select
    }

    fn render(
        &self,
        field: &FormFieldDef,
        name: &str,
        value: Option<&str>,
        attrs: &HashMap<String, String>,
    ) -> FormgenResult<String> {
        let mut options = String::new();
        if self.allow_blank {
            options.push_str(r#"<option value=""></option>"#);
        }
        for (val, label) in field_choices(field) {
            let selected = if value == Some(val.as_str()) {
                " selected"
            } else {
                ""
            };
            options.push_str(&format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                escape_html(val),
                escape_html(label)
            ));
        }
        Ok(format!(
            r#"<select name="{name}"{}>{options}</select>"#,
            render_attrs(attrs)
        ))
    }
}

/// A `<select multiple>` widget. Values travel comma-joined.
#[derive(Debug, Clone, Default)]
pub struct SelectMultiple;

impl Widget for SelectMultiple {
    fn widget_type(&self) -> WidgetType {
        WidgetType::SelectMultiple
    }

    fn render(
        &self,
        field: &FormFieldDef,
        name: &str,
        value: Option<&str>,
        attrs: &HashMap<String, String>,
    ) -> FormgenResult<String> {
        let selected_values: Vec<&str> = value
            .map(|v| v.split(',').map(str::trim).collect())
            .unwrap_or_default();
        let mut options = String::new();
        for (val, label) in field_choices(field) {
            let selected = if selected_values.contains(&val.as_str()) {
                " selected"
            } else {
                ""
            };
            options.push_str(&format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                escape_html(val),
                escape_html(label)
            ));
        }
        Ok(format!(
            r#"<select name="{name}" multiple{}>{options}</select>"#,
            render_attrs(attrs)
        ))
    }

    fn value_from_data(&self, data: &FormData, name: &str) -> Option<String> {
        data.get_list(&name.to_string()).map(|v| v.join(","))
    }
}

/// A `<input type="date">` widget.
#[derive(Debug, Clone, Default)]
pub struct DateInput;

impl Widget for DateInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::DateInput
    }

    fn render(
        &self,
        _field: &FormFieldDef,
        name: &str,
        value: Option<&str>,
        attrs: &HashMap<String, String>,
    ) -> FormgenResult<String> {
        Ok(render_input("date", name, value, attrs))
    }
}

/// A `<input type="datetime-local">` widget.
#[derive(Debug, Clone, Default)]
pub struct DateTimeInput;

impl Widget for DateTimeInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::DateTimeInput
    }

    fn render(
        &self,
        _field: &FormFieldDef,
        name: &str,
        value: Option<&str>,
        attrs: &HashMap<String, String>,
    ) -> FormgenResult<String> {
        Ok(render_input("datetime-local", name, value, attrs))
    }
}

/// A `<input type="time">` widget.
#[derive(Debug, Clone, Default)]
pub struct TimeInput;

impl Widget for TimeInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::TimeInput
    }

    fn render(
        &self,
        _field: &FormFieldDef,
        name: &str,
        value: Option<&str>,
        attrs: &HashMap<String, String>,
    ) -> FormgenResult<String> {
        Ok(render_input("time", name, value, attrs))
    }
}

/// Container for the repeated rows of an inline model.
///
/// Renders an empty-row template the client clones when a row is added;
/// the rows themselves are rendered by the bound inline forms.
#[derive(Debug, Clone, Default)]
pub struct InlineFieldListWidget;

impl Widget for InlineFieldListWidget {
    fn widget_type(&self) -> WidgetType {
        WidgetType::InlineFieldList
    }

    fn render(
        &self,
        field: &FormFieldDef,
        name: &str,
        _value: Option<&str>,
        attrs: &HashMap<String, String>,
    ) -> FormgenResult<String> {
        let FormFieldType::InlineList { form, .. } = &field.field_type else {
            return Err(FormgenError::ImproperlyConfigured(format!(
                "InlineFieldListWidget cannot render non-inline field '{}'",
                field.name
            )));
        };
        let mut template = String::new();
        for sub in &form.fields {
            let sub_name = format!("{name}-__prefix__-{}", sub.name);
            template.push_str(&sub.widget.render(sub, &sub_name, None, &HashMap::new())?);
        }
        Ok(format!(
            r#"<div class="inline-field-list" data-name="{name}"{}><template>{template}</template></div>"#,
            render_attrs(attrs)
        ))
    }
}

// ---------------------------------------------------------------------------
// List editing
// ---------------------------------------------------------------------------

/// Renders a field as an x-editable anchor for in-place list editing.
///
/// The row's primary key must be supplied through the `pk` attribute; the
/// field's current display value may be supplied through `display_value`.
/// Field types x-editable has no editor for fail with
/// [`FormgenError::ImproperlyConfigured`].
#[derive(Debug, Clone)]
pub struct XEditableWidget {
    /// Endpoint the editor posts `(list_form_pk, field)` pairs to.
    pub url: String,
}

impl Default for XEditableWidget {
    fn default() -> Self {
        Self {
            url: formgen_core::SETTINGS.get().list_update_url.clone(),
        }
    }
}

impl XEditableWidget {
    /// Creates a widget posting to `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Adds the `data-type` (and editor-specific) attributes for `field`.
    fn editor_attrs(
        field: &FormFieldDef,
        attrs: &mut HashMap<String, String>,
    ) -> FormgenResult<()> {
        let mut set = |k: &str, v: &str| {
            attrs.insert(k.to_string(), v.to_string());
        };
        match &field.field_type {
            FormFieldType::Char { .. }
            | FormFieldType::Email
            | FormFieldType::Url
            | FormFieldType::Uuid
            | FormFieldType::IpAddress => set("data-type", "text"),
            FormFieldType::Text { .. } => {
                set("data-type", "textarea");
                set("data-rows", "5");
            }
            FormFieldType::Boolean => {
                set("data-type", "select");
                set("data-source", r#"{"": "False", "1": "True"}"#);
                set("data-role", "x-editable-boolean");
            }
            FormFieldType::Choice { choices } => {
                set("data-type", "select");
                set("data-source", &choices_json(choices, !field.required));
            }
            FormFieldType::MultipleChoice { choices } => {
                set("data-type", "checklist");
                set("data-source", &choices_json(choices, false));
            }
            FormFieldType::Date => {
                set("data-type", "combodate");
                set("data-format", "YYYY-MM-DD");
                set("data-template", "YYYY-MM-DD");
            }
            FormFieldType::DateTime => {
                set("data-type", "combodate");
                set("data-format", "YYYY-MM-DD HH:mm:ss");
                set("data-template", "YYYY-MM-DD  HH:mm:ss");
            }
            FormFieldType::Time => {
                set("data-type", "combodate");
                set("data-format", "HH:mm:ss");
                set("data-template", "HH:mm:ss");
            }
            FormFieldType::Integer { .. } => set("data-type", "number"),
            FormFieldType::Float { .. } | FormFieldType::Decimal { .. } => {
                set("data-type", "number");
                set("data-step", "any");
            }
            FormFieldType::Duration | FormFieldType::Json | FormFieldType::InlineList { .. } => {
                return Err(FormgenError::ImproperlyConfigured(format!(
                    "Unsupported field type for list editing: '{}'",
                    field.name
                )));
            }
        }
        Ok(())
    }
}

fn choices_json(choices: &[(String, String)], allow_blank: bool) -> String {
    let mut source: Vec<serde_json::Value> = Vec::with_capacity(choices.len() + 1);
    if allow_blank {
        source.push(serde_json::json!({"value": "", "text": ""}));
    }
    source.extend(
        choices
            .iter()
            .map(|(v, t)| serde_json::json!({"value": v, "text": t})),
    );
    serde_json::Value::Array(source).to_string()
}

impl Widget for XEditableWidget {
    fn widget_type(&self) -> WidgetType {
        WidgetType::XEditable
    }

    fn render(
        &self,
        field: &FormFieldDef,
        name: &str,
        value: Option<&str>,
        attrs: &HashMap<String, String>,
    ) -> FormgenResult<String> {
        let mut attrs = attrs.clone();
        let pk = attrs
            .remove("pk")
            .filter(|pk| !pk.is_empty())
            .ok_or_else(|| {
                FormgenError::ImproperlyConfigured(format!(
                    "XEditableWidget requires a 'pk' attribute to render '{name}'"
                ))
            })?;
        let display = attrs
            .remove("display_value")
            .unwrap_or_else(|| value.unwrap_or("").to_string());
        let csrf = attrs.remove("csrf").unwrap_or_default();

        attrs.insert("data-pk".to_string(), pk);
        attrs.insert("data-csrf".to_string(), csrf);
        attrs
            .entry("data-value".to_string())
            .or_insert_with(|| display.clone());
        attrs
            .entry("data-role".to_string())
            .or_insert_with(|| "x-editable".to_string());
        attrs
            .entry("data-url".to_string())
            .or_insert_with(|| self.url.clone());
        attrs
            .entry("id".to_string())
            .or_insert_with(|| name.to_string());
        attrs
            .entry("name".to_string())
            .or_insert_with(|| name.to_string());
        attrs
            .entry("href".to_string())
            .or_insert_with(|| "#".to_string());
        Self::editor_attrs(field, &mut attrs)?;

        Ok(format!(
            "<a{}>{}</a>",
            render_attrs(&attrs),
            escape_html(&display)
        ))
    }
}
