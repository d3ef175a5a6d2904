//! # formgen-forms
//!
//! Form classes, fields, widgets, layout rules, and the validation pipeline.
//!
//! ## Modules
//!
//! - [`fields`] - Field definitions and type-level cleaning
//! - [`widgets`] - The [`Widget`](widgets::Widget) trait, built-in widgets, and the list-editing widget
//! - [`form`] - Form classes (schemas) and bound forms
//! - [`bound_field`] - Fields paired with data and errors for rendering
//! - [`validation`] - The field/form validation pipeline
//! - [`rules`] - Declarative layout rules

pub mod bound_field;
pub mod fields;
pub mod form;
pub mod rules;
pub mod validation;
pub mod widgets;

pub use bound_field::BoundField;
pub use fields::{FormFieldDef, FormFieldType};
pub use form::{BoundForm, Form, FormClass};
pub use rules::{Rule, RuleSet};
pub use widgets::{Widget, WidgetType, XEditableWidget};
