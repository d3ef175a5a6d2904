//! Bound fields: form fields paired with their current data and errors.
//!
//! A [`BoundField`] borrows a field definition from its form class and
//! carries the raw value and error messages of one form instance. Rendering
//! delegates to the field's widget.

use std::collections::HashMap;

use formgen_core::utils::text::escape_html;
use formgen_core::FormgenResult;

use crate::fields::FormFieldDef;

/// A form field bound to data and validation state.
#[derive(Debug)]
pub struct BoundField<'a> {
    /// The field's HTML name attribute (prefix applied).
    pub name: String,
    /// The field definition.
    pub field: &'a FormFieldDef,
    /// The raw value to display.
    pub data: Option<String>,
    /// Validation error messages for this field.
    pub errors: Vec<String>,
}

impl<'a> BoundField<'a> {
    /// Creates a new `BoundField` from a field definition and current state.
    pub fn new(
        field: &'a FormFieldDef,
        data: Option<String>,
        errors: Vec<String>,
        prefix: Option<&str>,
    ) -> Self {
        let name = match prefix {
            Some(p) => format!("{p}-{}", field.name),
            None => field.name.clone(),
        };
        Self {
            name,
            field,
            data,
            errors,
        }
    }

    /// Renders the widget HTML for this bound field.
    ///
    /// `extra_attrs` override the field's own render attributes.
    pub fn render(&self, extra_attrs: &HashMap<String, String>) -> FormgenResult<String> {
        let mut attrs = self.field.render_attrs.clone();
        attrs.extend(extra_attrs.iter().map(|(k, v)| (k.clone(), v.clone())));
        attrs.entry("id".to_string()).or_insert_with(|| self.auto_id());
        if self.field.disabled {
            attrs.insert("disabled".to_string(), "disabled".to_string());
        }
        self.field
            .widget
            .render(self.field, &self.name, self.data.as_deref(), &attrs)
    }

    /// Renders a `<label>` element for this field.
    pub fn label_tag(&self) -> String {
        let label = escape_html(&self.field.label);
        let label_id = self.field.widget.id_for_label(&self.auto_id());
        if label_id.is_empty() {
            format!("<label>{label}</label>")
        } else {
            format!(r#"<label for="{label_id}">{label}</label>"#)
        }
    }

    /// Returns the auto-generated HTML `id` for this field.
    pub fn auto_id(&self) -> String {
        format!("id_{}", self.name)
    }

    /// Returns `true` if this field has any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Renders the error list as an HTML `<ul>` element.
    pub fn errors_as_ul(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        let items: String = self
            .errors
            .iter()
            .map(|e| format!("<li>{}</li>", escape_html(e)))
            .collect();
        format!(r#"<ul class="errorlist">{items}</ul>"#)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::fields::FormFieldType;
    use crate::widgets::{HiddenInput, Textarea};

    fn make_char_field(name: &str) -> FormFieldDef {
        FormFieldDef::new(
            name,
            FormFieldType::Char {
                min_length: None,
                max_length: None,
                strip: false,
            },
        )
    }

    #[test]
    fn test_bound_field_with_prefix() {
        let field = make_char_field("username");
        let bf = BoundField::new(&field, None, vec![], Some("form0"));
        assert_eq!(bf.name, "form0-username");
        assert_eq!(bf.auto_id(), "id_form0-username");
    }

    #[test]
    fn test_bound_field_render() {
        let field = make_char_field("username");
        let bf = BoundField::new(&field, Some("alice".into()), vec![], None);
        let html = bf.render(&HashMap::new()).unwrap();
        assert!(html.contains(r#"name="username""#));
        assert!(html.contains(r#"value="alice""#));
        assert!(html.contains(r#"id="id_username""#));
    }

    #[test]
    fn test_render_attrs_merge() {
        let field = make_char_field("title").render_attr("class", "wide");
        let bf = BoundField::new(&field, None, vec![], None);
        let mut extra = HashMap::new();
        extra.insert("class".to_string(), "narrow".to_string());
        let html = bf.render(&extra).unwrap();
        assert!(html.contains(r#"class="narrow""#));
    }

    #[test]
    fn test_bound_field_label_tag() {
        let field = make_char_field("first_name");
        let bf = BoundField::new(&field, None, vec![], None);
        assert_eq!(
            bf.label_tag(),
            r#"<label for="id_first_name">First Name</label>"#
        );
    }

    #[test]
    fn test_hidden_label_has_no_target() {
        let field = make_char_field("token").widget(Arc::new(HiddenInput));
        let bf = BoundField::new(&field, None, vec![], None);
        assert_eq!(bf.label_tag(), "<label>Token</label>");
    }

    #[test]
    fn test_bound_field_errors_as_ul() {
        let field = make_char_field("email");
        let bf = BoundField::new(
            &field,
            None,
            vec![
                "This field is required.".to_string(),
                "Enter a valid email.".to_string(),
            ],
            None,
        );
        assert!(bf.has_errors());
        assert_eq!(
            bf.errors_as_ul(),
            r#"<ul class="errorlist"><li>This field is required.</li><li>Enter a valid email.</li></ul>"#
        );
        let clean = BoundField::new(&field, None, vec![], None);
        assert_eq!(clean.errors_as_ul(), "");
    }

    #[test]
    fn test_bound_field_disabled() {
        let field = make_char_field("locked").disabled(true);
        let bf = BoundField::new(&field, Some("value".into()), vec![], None);
        let html = bf.render(&HashMap::new()).unwrap();
        assert!(html.contains(r#"disabled="disabled""#));
    }

    #[test]
    fn test_bound_field_custom_widget() {
        let field = make_char_field("bio").widget(Arc::new(Textarea));
        let bf = BoundField::new(&field, Some("Hello".into()), vec![], None);
        let html = bf.render(&HashMap::new()).unwrap();
        assert!(html.starts_with("<textarea"));
        assert!(html.contains(">Hello</textarea>"));
    }
}
