//! Converter registry and resolver.
//!
//! A converter builds a form field for one model attribute. Converters are
//! declared in static tables of [`Converts`] entries, each claiming one or
//! more type identifiers. A [`ConverterRegistry`] maps identifiers to
//! entries; [`ConverterRegistry::resolve`] finds the converter for a column
//! type by walking its ancestor chain twice, first by qualified name
//! (`"<module>.<name>"`), then by bare name.
//!
//! ```
//! use formgen_admin::converter::{ConverterRegistry, Converts};
//! use formgen_forms::fields::{FormFieldDef, FormFieldType};
//! use formgen_model::types;
//!
//! fn conv_flag(field: &formgen_model::ModelField) -> formgen_core::FormgenResult<FormFieldDef> {
//!     Ok(FormFieldDef::new(field.name.clone(), FormFieldType::Boolean))
//! }
//!
//! static TABLE: &[Converts] = &[Converts::new("conv_flag", &["Boolean"], conv_flag)];
//!
//! let registry = ConverterRegistry::builder().table(TABLE).build().unwrap();
//! let found = registry.resolve(&types::BOOLEAN, true).unwrap();
//! assert_eq!(found.name, "conv_flag");
//! assert!(registry.resolve(&types::STRING, true).is_none());
//! ```

use std::collections::HashMap;
use std::fmt;

use formgen_core::{FormgenError, FormgenResult};
use formgen_forms::fields::FormFieldDef;
use formgen_model::model::ModelField;
use formgen_model::types::ColumnType;

/// Builds a form field for a model attribute.
pub type ConverterFn = fn(&ModelField) -> FormgenResult<FormFieldDef>;

/// A converter together with the type identifiers it claims.
#[derive(Clone, Copy)]
pub struct Converts {
    /// Name used in logs and diagnostics.
    pub name: &'static str,
    /// Qualified (`"module.Type"`) or bare (`"Type"`) identifiers.
    pub identifiers: &'static [&'static str],
    /// The conversion function.
    pub function: ConverterFn,
}

impl Converts {
    /// Declares a converter entry.
    pub const fn new(
        name: &'static str,
        identifiers: &'static [&'static str],
        function: ConverterFn,
    ) -> Self {
        Self {
            name,
            identifiers,
            function,
        }
    }

    /// Runs the converter on `field`.
    pub fn convert(&self, field: &ModelField) -> FormgenResult<FormFieldDef> {
        (self.function)(field)
    }
}

impl fmt::Debug for Converts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converts")
            .field("name", &self.name)
            .field("identifiers", &self.identifiers)
            .finish_non_exhaustive()
    }
}

/// Pairs a model attribute with the form field it will become.
///
/// Form generation first lays out placeholders in final field order, then
/// converts each one, so fields supplied directly by the caller keep their
/// declared position among converted ones.
#[derive(Debug, Clone)]
pub struct FieldPlaceholder {
    /// The model attribute to convert.
    pub field: ModelField,
}

impl FieldPlaceholder {
    /// Wraps a model attribute.
    pub const fn new(field: ModelField) -> Self {
        Self { field }
    }
}

/// An immutable mapping from type identifier to converter.
#[derive(Debug, Clone, Default)]
pub struct ConverterRegistry {
    converters: HashMap<String, Converts>,
}

impl ConverterRegistry {
    /// Starts building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Looks up the converter registered for an exact identifier.
    pub fn get(&self, identifier: &str) -> Option<&Converts> {
        self.converters.get(identifier)
    }

    /// Returns `true` if `identifier` has a converter.
    pub fn contains(&self, identifier: &str) -> bool {
        self.converters.contains_key(identifier)
    }

    /// Returns the registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.converters.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the number of registered identifiers.
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Finds the converter for `column_type`.
    ///
    /// Candidates are the exact type alone, or its whole ancestor chain when
    /// `use_ancestor_search` is set. Every candidate is tried by qualified
    /// name before any candidate is tried by bare name. A miss is `None`.
    pub fn resolve(
        &self,
        column_type: &'static ColumnType,
        use_ancestor_search: bool,
    ) -> Option<&Converts> {
        let candidates = if use_ancestor_search {
            column_type.mro()
        } else {
            vec![column_type]
        };

        let found = candidates
            .iter()
            .find_map(|t| self.converters.get(&t.qualified_name()))
            .or_else(|| candidates.iter().find_map(|t| self.converters.get(t.name)));

        if found.is_none() {
            tracing::debug!(
                column_type = %column_type,
                use_ancestor_search,
                "no converter registered"
            );
        }
        found
    }
}

/// Assembles a [`ConverterRegistry`] from a seed mapping and static tables.
#[derive(Debug)]
pub struct RegistryBuilder {
    seed: HashMap<String, Converts>,
    tables: Vec<&'static [Converts]>,
    reject_duplicates: bool,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self {
            seed: HashMap::new(),
            tables: Vec::new(),
            reject_duplicates: true,
        }
    }
}

impl RegistryBuilder {
    /// Starts from a caller-supplied mapping. Table entries override it.
    #[must_use]
    pub fn seed(mut self, seed: HashMap<String, Converts>) -> Self {
        self.seed = seed;
        self
    }

    /// Adds a static converter table.
    #[must_use]
    pub fn table(mut self, table: &'static [Converts]) -> Self {
        self.tables.push(table);
        self
    }

    /// Chooses whether two table entries claiming one identifier abort the
    /// build (the default) or the later entry wins.
    #[must_use]
    pub const fn reject_duplicates(mut self, reject: bool) -> Self {
        self.reject_duplicates = reject;
        self
    }

    /// Builds the registry.
    pub fn build(self) -> FormgenResult<ConverterRegistry> {
        let mut converters = self.seed;
        let mut claimed: HashMap<&'static str, &'static str> = HashMap::new();

        for entry in self.tables.iter().flat_map(|t| t.iter()) {
            for &identifier in entry.identifiers {
                if let Some(previous) = claimed.insert(identifier, entry.name) {
                    if previous == entry.name {
                        continue;
                    }
                    if self.reject_duplicates {
                        return Err(FormgenError::ImproperlyConfigured(format!(
                            "Type '{identifier}' is claimed by both '{previous}' and '{}'",
                            entry.name
                        )));
                    }
                    tracing::warn!(
                        identifier,
                        previous,
                        converter = entry.name,
                        "duplicate converter claim, later entry wins"
                    );
                } else if let Some(seeded) = converters.get(identifier) {
                    tracing::warn!(
                        identifier,
                        seeded = seeded.name,
                        converter = entry.name,
                        "table converter overrides seeded converter"
                    );
                }
                converters.insert(identifier.to_string(), *entry);
            }
        }

        tracing::debug!(identifiers = converters.len(), "built converter registry");
        Ok(ConverterRegistry { converters })
    }
}
