//! Model metadata consumed by the form generator.
//!
//! [`ModelMeta`] describes a model as an ordered list of [`ModelField`]s.
//! Each field carries its [`ColumnType`] (used for converter lookup) plus the
//! metadata a converter needs to parameterize the form field it builds:
//! nullability, length, defaults, choices, and relation targets.
//! [`ModelInstance`] is the record a submitted form is applied to.

use std::collections::HashMap;

use crate::types::{self, ColumnType};
use crate::value::Value;

/// Direction of a relationship attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// This model holds a reference to one target row.
    ManyToOne,
    /// Many target rows reference this model.
    OneToMany,
    /// Rows are linked through an association table.
    ManyToMany,
}

/// A relationship from one model to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// The related model's name.
    pub target: String,
    /// The direction of the relationship.
    pub kind: RelationKind,
    /// The attribute on the target model that points back here, if any.
    pub remote_field: Option<String>,
}

/// A single model attribute.
#[derive(Debug, Clone)]
pub struct ModelField {
    /// The attribute name.
    pub name: String,
    /// The attribute's column type.
    pub column_type: &'static ColumnType,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether the column is (part of) the primary key.
    pub primary_key: bool,
    /// Maximum length for string columns.
    pub max_length: Option<usize>,
    /// Default value applied when none is supplied.
    pub default: Option<Value>,
    /// Allowed values as `(value, display)` pairs for enumerated columns.
    pub choices: Vec<(String, String)>,
    /// Relationship information for relation attributes.
    pub relation: Option<Relation>,
    /// Documentation shown next to the form field.
    pub help_text: String,
    /// An explicit display label.
    pub label: Option<String>,
}

impl ModelField {
    /// Creates a non-nullable, non-key field of the given column type.
    pub fn new(name: impl Into<String>, column_type: &'static ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
            primary_key: false,
            max_length: None,
            default: None,
            choices: Vec::new(),
            relation: None,
            help_text: String::new(),
            label: None,
        }
    }

    /// Creates a relationship attribute pointing at `target`.
    pub fn relation(name: impl Into<String>, target: impl Into<String>, kind: RelationKind) -> Self {
        let mut field = Self::new(name, &types::RELATIONSHIP);
        field.nullable = true;
        field.relation = Some(Relation {
            target: target.into(),
            kind,
            remote_field: None,
        });
        field
    }

    /// Marks this field as the primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Marks this field as nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the enumerated choices.
    #[must_use]
    pub fn choices<I, V, D>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = (V, D)>,
        V: Into<String>,
        D: Into<String>,
    {
        self.choices = choices
            .into_iter()
            .map(|(v, d)| (v.into(), d.into()))
            .collect();
        self
    }

    /// Sets the attribute on the related model that points back here.
    #[must_use]
    pub fn remote_field(mut self, name: impl Into<String>) -> Self {
        if let Some(relation) = self.relation.as_mut() {
            relation.remote_field = Some(name.into());
        }
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    /// Sets an explicit display label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns `true` if this attribute is a relationship.
    pub const fn is_relation(&self) -> bool {
        self.relation.is_some()
    }
}

/// Metadata describing one model.
#[derive(Debug, Clone)]
pub struct ModelMeta {
    /// The model name, e.g. `"Post"`.
    pub name: String,
    /// Attributes in declaration order.
    pub fields: Vec<ModelField>,
}

impl ModelMeta {
    /// Creates model metadata from its attributes.
    pub fn new(name: impl Into<String>, fields: Vec<ModelField>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Looks up an attribute by name.
    pub fn field(&self, name: &str) -> Option<&ModelField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the first primary-key attribute.
    pub fn primary_key(&self) -> Option<&ModelField> {
        self.fields.iter().find(|f| f.primary_key)
    }

    /// Returns the relationship attributes.
    pub fn relations(&self) -> impl Iterator<Item = &ModelField> {
        self.fields.iter().filter(|f| f.is_relation())
    }
}

/// A model record: attribute values keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelInstance {
    /// The model name.
    pub model: String,
    values: HashMap<String, Value>,
}

impl ModelInstance {
    /// Creates an empty record for `model`.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            values: HashMap::new(),
        }
    }

    /// Returns an attribute value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Sets an attribute value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Returns the primary-key value according to `meta`.
    pub fn pk(&self, meta: &ModelMeta) -> Option<&Value> {
        meta.primary_key().and_then(|f| self.values.get(&f.name))
    }

    /// Copies every entry of `data` that names an attribute of `meta`.
    pub fn populate(&mut self, meta: &ModelMeta, data: &HashMap<String, Value>) {
        for field in &meta.fields {
            if let Some(value) = data.get(&field.name) {
                self.values.insert(field.name.clone(), value.clone());
            }
        }
    }
}
