//! Editable list forms.
//!
//! A list form is derived from a model's form class so that each cell of a
//! list view can be edited in place. Every source field is copied with its
//! widget replaced by a list-editing widget, and one reserved hidden field,
//! [`LIST_FORM_PK`], carries the row's primary key. A submission updates a
//! single cell: the primary key plus exactly one field value.

use std::collections::HashMap;
use std::sync::Arc;

use formgen_core::utils::FormData;
use formgen_core::{FormgenError, FormgenResult, ValidationError};
use formgen_forms::fields::{clean_field_value, FormFieldDef, FormFieldType};
use formgen_forms::form::FormClass;
use formgen_forms::widgets::{HiddenInput, Widget, XEditableWidget};
use formgen_model::value::Value;

/// Name of the reserved primary-key field.
pub const LIST_FORM_PK: &str = "list_form_pk";

/// A validated single-cell update.
#[derive(Debug, Clone, PartialEq)]
pub struct CellUpdate {
    /// Primary key of the edited row, as submitted.
    pub pk: String,
    /// Name of the edited field.
    pub field: String,
    /// The cleaned value.
    pub value: Value,
}

/// Splits a `"<field>-<pk>"` cell name at the first `-`.
///
/// Returns `None` when either side is empty or there is no separator.
///
/// ```
/// use formgen_admin::list_form::parse_cell_name;
///
/// assert_eq!(parse_cell_name("title-12"), Some(("title", "12")));
/// assert_eq!(parse_cell_name("title-3f2a-9b"), Some(("title", "3f2a-9b")));
/// assert_eq!(parse_cell_name("title"), None);
/// ```
pub fn parse_cell_name(name: &str) -> Option<(&str, &str)> {
    let (field, pk) = name.split_once('-')?;
    if field.is_empty() || pk.is_empty() {
        return None;
    }
    Some((field, pk))
}

/// Derives an editable list form from `source`.
///
/// The derived class starts from `base`'s fields, gains the hidden
/// [`LIST_FORM_PK`] field, then every field of `source` with its widget
/// replaced by `widget` (an [`XEditableWidget`] posting to the configured
/// update URL when `None`). `source` itself is left untouched.
///
/// # Errors
///
/// Returns [`FormgenError::ImproperlyConfigured`] if `source` already
/// declares a field named [`LIST_FORM_PK`].
pub fn create_editable_list_form(
    base: &FormClass,
    source: &FormClass,
    widget: Option<Arc<dyn Widget>>,
) -> FormgenResult<ListForm> {
    if source.contains(LIST_FORM_PK) {
        return Err(FormgenError::ImproperlyConfigured(format!(
            "Form already has a {LIST_FORM_PK} column."
        )));
    }
    let widget: Arc<dyn Widget> =
        widget.unwrap_or_else(|| Arc::new(XEditableWidget::default()) as Arc<dyn Widget>);

    let mut class = FormClass::derive(format!("{}List", source.name), base);
    class.set_field(pk_field());
    for field in &source.fields {
        class.set_field(field.clone().widget(Arc::clone(&widget)));
    }

    tracing::debug!(
        source = %source.name,
        widget = %widget.widget_type(),
        fields = class.len(),
        "created editable list form"
    );
    Ok(ListForm { class })
}

fn pk_field() -> FormFieldDef {
    FormFieldDef::new(
        LIST_FORM_PK,
        FormFieldType::Char {
            min_length: None,
            max_length: None,
            strip: true,
        },
    )
    .required(true)
    .widget(Arc::new(HiddenInput))
}

/// A form class prepared for single-cell list editing.
#[derive(Debug, Clone)]
pub struct ListForm {
    class: FormClass,
}

impl ListForm {
    /// The derived form class.
    pub const fn class(&self) -> &FormClass {
        &self.class
    }

    /// Consumes the list form, returning its class.
    pub fn into_class(self) -> FormClass {
        self.class
    }

    /// Names of the editable fields, without the primary-key field.
    pub fn editable_fields(&self) -> Vec<&str> {
        self.class
            .field_names()
            .into_iter()
            .filter(|name| *name != LIST_FORM_PK)
            .collect()
    }

    /// Binds a single-cell submission.
    ///
    /// The submission must carry a non-empty [`LIST_FORM_PK`] and exactly one
    /// editable field, named either directly or as `"<field>-<pk>"` for the
    /// submitted primary key. Unrelated keys are ignored. The value is cleaned
    /// with the field's own validation.
    ///
    /// # Errors
    ///
    /// Returns [`FormgenError::ValidationError`] if the primary key is
    /// missing, if zero or several fields were submitted, or if the value
    /// fails validation.
    pub fn bind(&self, data: &FormData) -> FormgenResult<CellUpdate> {
        let pk = match self.class.field(LIST_FORM_PK) {
            Some(field) => clean_field_value(field, data.value(LIST_FORM_PK))
                .map_err(|errors| field_error(LIST_FORM_PK, errors))?,
            None => Value::Null,
        };
        let pk = match pk.as_str() {
            Some(pk) if !pk.is_empty() => pk.to_string(),
            _ => {
                return Err(field_error(
                    LIST_FORM_PK,
                    vec!["This field is required.".to_string()],
                ))
            }
        };

        let mut submitted: Vec<(&FormFieldDef, &str)> = Vec::new();
        for key in data.keys() {
            let name = if key != LIST_FORM_PK && self.class.contains(key) {
                key.as_str()
            } else {
                match parse_cell_name(key) {
                    Some((name, cell_pk)) if cell_pk == pk => name,
                    _ => continue,
                }
            };
            let Some(field) = self.class.field(name).filter(|f| f.name != LIST_FORM_PK) else {
                continue;
            };
            if submitted.iter().any(|(f, _)| f.name == field.name) {
                continue;
            }
            submitted.push((field, data.value(key).unwrap_or("")));
        }

        let (field, raw) = match submitted.as_slice() {
            [single] => *single,
            [] => {
                return Err(FormgenError::ValidationError(ValidationError::new(
                    "No editable field was submitted.",
                    "no_field",
                )))
            }
            _ => {
                let mut names: Vec<&str> = submitted.iter().map(|(f, _)| f.name.as_str()).collect();
                names.sort_unstable();
                return Err(FormgenError::ValidationError(
                    ValidationError::new(
                        "Only one field can be updated per submission.",
                        "multiple_fields",
                    )
                    .with_param("fields", names.join(", ")),
                ));
            }
        };

        let value = clean_field_value(field, Some(raw))
            .map_err(|errors| field_error(&field.name, errors))?;
        tracing::trace!(pk = %pk, field = %field.name, "bound list cell update");
        Ok(CellUpdate {
            pk,
            field: field.name.clone(),
            value,
        })
    }

    /// Renders one cell of the list view.
    ///
    /// # Errors
    ///
    /// Returns [`FormgenError::ImproperlyConfigured`] for an unknown field,
    /// or whatever the field's widget reports.
    pub fn render_cell(&self, field_name: &str, pk: &str, value: Option<&Value>) -> FormgenResult<String> {
        let field = self
            .class
            .field(field_name)
            .filter(|f| f.name != LIST_FORM_PK)
            .ok_or_else(|| {
                FormgenError::ImproperlyConfigured(format!(
                    "List form '{}' has no editable field '{field_name}'",
                    self.class.name
                ))
            })?;
        let mut attrs = field.render_attrs.clone();
        attrs.insert("pk".to_string(), pk.to_string());
        let name = format!("{field_name}-{pk}");
        let value = value.map(Value::to_form_string);
        field.widget.render(field, &name, value.as_deref(), &attrs)
    }
}

fn field_error(name: &str, errors: Vec<String>) -> FormgenError {
    let mut map = HashMap::new();
    map.insert(name.to_string(), errors);
    FormgenError::ValidationError(ValidationError::from_messages(&map))
}
