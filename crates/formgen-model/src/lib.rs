//! # formgen-model
//!
//! The model abstraction formgen builds forms from: a static column-type
//! hierarchy, model and field metadata, values, and value validators.

pub mod model;
pub mod types;
pub mod validators;
pub mod value;

pub use model::{ModelField, ModelInstance, ModelMeta, Relation, RelationKind};
pub use types::ColumnType;
pub use value::Value;
