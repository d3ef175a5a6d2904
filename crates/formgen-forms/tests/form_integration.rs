//! Integration tests for the form pipeline.
//!
//! These tests exercise form classes end to end through the public API:
//! 1. Binding and validation
//! 2. Deriving classes and swapping widgets
//! 3. Rendering with layout rules and the list-editing widget

use std::collections::HashMap;
use std::sync::Arc;

use formgen_core::utils::FormData;
use formgen_core::FormgenError;
use formgen_forms::fields::{FormFieldDef, FormFieldType};
use formgen_forms::form::{Form, FormClass};
use formgen_forms::rules::{Rule, RuleSet};
use formgen_forms::validation::full_clean;
use formgen_forms::widgets::{Widget, WidgetType, XEditableWidget};
use formgen_model::model::ModelInstance;
use formgen_model::value::Value;

// ============================================================================
// Shared helpers
// ============================================================================

/// A contact form with username, email, and optional age.
fn make_contact_class() -> FormClass {
    FormClass::new("ContactForm")
        .with_field(FormFieldDef::new(
            "username",
            FormFieldType::Char {
                min_length: Some(3),
                max_length: Some(20),
                strip: true,
            },
        ))
        .with_field(FormFieldDef::new("email", FormFieldType::Email))
        .with_field(
            FormFieldDef::new(
                "age",
                FormFieldType::Integer {
                    min_value: Some(0),
                    max_value: Some(150),
                },
            )
            .required(false),
        )
}

fn contact_data(username: &str, email: &str, age: &str) -> FormData {
    FormData::from_pairs([("username", username), ("email", email), ("age", age)])
}

// ============================================================================
// Binding and validation
// ============================================================================

#[test]
fn test_form_binds_from_post_data() {
    let mut form = make_contact_class().instantiate();
    form.bind(&contact_data("  alice  ", "alice@example.com", "31"));
    assert!(form.is_bound());
    assert!(form.is_valid());
    assert_eq!(form.cleaned_data()["username"], Value::from("alice"));
    assert_eq!(form.cleaned_data()["age"], Value::Int(31));
}

#[test]
fn test_errors_contain_field_specific_messages() {
    let mut form = make_contact_class().instantiate();
    form.bind(&contact_data("al", "nope", "200"));
    assert!(!form.is_valid());
    assert!(form.errors()["username"][0].contains("at least 3"));
    assert_eq!(form.errors()["email"], vec!["Enter a valid email address."]);
    assert!(form.errors()["age"][0].contains("less than or equal to 150"));
}

#[test]
fn test_optional_field_null_when_empty() {
    let mut form = make_contact_class().instantiate();
    form.bind(&contact_data("alice", "alice@example.com", ""));
    assert!(form.is_valid());
    assert_eq!(form.cleaned_data()["age"], Value::Null);
}

#[test]
fn test_unchecked_checkbox_cleans_to_false() {
    let class = make_contact_class().with_field(
        FormFieldDef::new("subscribed", FormFieldType::Boolean)
            .required(false)
            .initial(Value::Bool(true)),
    );
    let mut form = class.instantiate();
    form.bind(&contact_data("alice", "alice@example.com", ""));
    assert!(form.is_valid());
    assert_eq!(form.cleaned_data()["subscribed"], Value::Bool(false));
}

#[test]
fn test_full_clean_reports_validation_error() {
    let mut form = make_contact_class().instantiate();
    form.bind(&FormData::new());
    let err = full_clean(&mut form).unwrap_err();
    assert!(matches!(err, FormgenError::ValidationError(_)));
    assert!(!err.is_configuration());
}

#[test]
fn test_populate_obj_roundtrip() {
    let mut user = ModelInstance::new("User");
    user.set("username", "bob");
    user.set("email", "bob@example.com");

    let unbound = make_contact_class().instantiate().with_obj(&user);
    let html = unbound.render().unwrap();
    assert!(html.contains(r#"value="bob@example.com""#));

    let mut form = make_contact_class().instantiate();
    form.bind(&contact_data("robert", "bob@example.com", "40"));
    assert!(form.is_valid());
    form.populate_obj(&mut user);
    assert_eq!(user.get("username"), Some(&Value::from("robert")));
    assert_eq!(user.get("age"), Some(&Value::Int(40)));
}

// ============================================================================
// Deriving classes
// ============================================================================

#[test]
fn test_derived_class_swaps_widgets_without_touching_source() {
    let source = make_contact_class();
    let widget: Arc<dyn Widget> = Arc::new(XEditableWidget::new("/update/"));

    let mut derived = FormClass::derive("ContactListForm", &FormClass::new("Base"));
    for field in &source.fields {
        derived.set_field(field.clone().widget(Arc::clone(&widget)));
    }

    assert_eq!(derived.field_names(), source.field_names());
    assert!(derived
        .fields
        .iter()
        .all(|f| f.widget.widget_type() == WidgetType::XEditable));
    assert_eq!(
        source.field("username").unwrap().widget.widget_type(),
        WidgetType::TextInput
    );
}

#[test]
fn test_xeditable_editor_follows_field_type() {
    let class = FormClass::new("Row")
        .with_field(FormFieldDef::new("bio", FormFieldType::Text { max_length: None }))
        .with_field(FormFieldDef::new("published", FormFieldType::Boolean));
    let widget = XEditableWidget::new("/update/");

    let mut attrs = HashMap::new();
    attrs.insert("pk".to_string(), "3".to_string());

    let bio = class.field("bio").unwrap().clone().widget(Arc::new(widget.clone()));
    let html = bio.widget.render(&bio, "bio", Some("Hi"), &attrs).unwrap();
    assert!(html.contains(r#"data-type="textarea""#));
    assert!(html.contains(r#"data-pk="3""#));

    let published = class.field("published").unwrap();
    let html = widget.render(published, "published", Some("1"), &attrs).unwrap();
    assert!(html.contains(r#"data-role="x-editable-boolean""#));
}

// ============================================================================
// Layout rules
// ============================================================================

#[test]
fn test_rule_set_renders_subset_in_order() {
    let set = RuleSet::new(
        "Contact",
        vec![
            "email".into(),
            Rule::Text {
                text: "We never share <this>.".to_string(),
            },
            "username".into(),
        ],
    );
    let form = make_contact_class().instantiate();
    let html = set.render(&form).unwrap();
    let email_at = html.find(r#"name="email""#).unwrap();
    let user_at = html.find(r#"name="username""#).unwrap();
    assert!(email_at < user_at);
    assert!(html.contains("&lt;this&gt;"));
    assert!(!html.contains(r#"name="age""#));
}
