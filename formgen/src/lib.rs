//! # formgen
//!
//! Model-driven form generation for admin interfaces.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient access.
//! You can depend on `formgen` to get everything, or depend on individual
//! crates for finer-grained control.
//!
//! ```
//! use formgen::prelude::*;
//! use formgen::model::types;
//!
//! let post = std::sync::Arc::new(ModelMeta::new("Post", vec![
//!     ModelField::new("id", &types::INTEGER).primary_key(),
//!     ModelField::new("title", &types::STRING),
//! ]));
//! let converter = AdminModelConverter::from_settings(&Settings::default()).unwrap();
//! let form = ModelAdmin::new(post).scaffold_form(&converter).unwrap();
//! assert_eq!(form.field_names(), ["title"]);
//! ```

/// Settings, logging, error types, and shared utilities.
pub use formgen_core as core;

/// Column types, model metadata, values, and validators.
pub use formgen_model as model;

/// Form classes, fields, widgets, and layout rules.
#[cfg(feature = "forms")]
pub use formgen_forms as forms;

/// Converters, editable list forms, and inline model forms.
#[cfg(feature = "admin")]
pub use formgen_admin as admin;

/// Third-party crates re-exported for convenience.
pub use {serde, serde_json, tracing, tracing_subscriber};

/// The most commonly used types.
pub mod prelude {
    pub use formgen_core::{FormgenError, FormgenResult, Settings, ValidationError, SETTINGS};
    pub use formgen_model::{ColumnType, ModelField, ModelInstance, ModelMeta, Value};

    #[cfg(feature = "forms")]
    pub use formgen_forms::{Form, FormClass, FormFieldDef, FormFieldType, Rule, RuleSet};

    #[cfg(feature = "admin")]
    pub use formgen_admin::{
        create_editable_list_form, AdminModelConverter, InlineModel, InlineOptions, ModelAdmin,
        ModelConverter, LIST_FORM_PK,
    };
}
