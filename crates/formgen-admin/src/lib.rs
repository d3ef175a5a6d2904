//! # formgen-admin
//!
//! Admin-side form generation: converting model metadata into form classes,
//! deriving editable list forms, and attaching inline child forms.
//!
//! ## Modules
//!
//! - [`converter`] - Converter tables, the registry, and type resolution
//! - [`model_converter`] - Model-to-form conversion and the built-in converters
//! - [`list_form`] - Editable list forms and single-cell updates
//! - [`inline`] - Inline model configuration and conversion
//! - [`model_admin`] - Per-view form configuration and scaffolding

pub mod converter;
pub mod inline;
pub mod list_form;
pub mod model_admin;
pub mod model_converter;

pub use converter::{ConverterRegistry, Converts, FieldPlaceholder};
pub use inline::{
    InlineBaseFormAdmin, InlineConverterBase, InlineFormAdmin, InlineModel, InlineModelConverter,
    InlineOptions, ModelChangeHook,
};
pub use list_form::{create_editable_list_form, CellUpdate, ListForm, LIST_FORM_PK};
pub use model_admin::ModelAdmin;
pub use model_converter::{
    AdminModelConverter, FieldArgs, FormOptions, ModelConverter, ModelConverterBase,
};
