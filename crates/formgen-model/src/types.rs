//! Column types and their static hierarchy.
//!
//! A [`ColumnType`] is a `'static` declaration naming the module that
//! defines the type, the type's bare name, and its direct bases. Converter
//! lookup walks [`ColumnType::mro`], the C3 linearization of those bases,
//! so subclasses of a known type resolve to the base's converter without a
//! registration of their own.
//!
//! User code declares its own column types the same way the built-ins below
//! are declared:
//!
//! ```
//! use formgen_model::types::{self, ColumnType};
//!
//! static SLUG: ColumnType = ColumnType::new("blog.types", "Slug", &[&types::STRING]);
//!
//! let names: Vec<&str> = SLUG.mro().iter().map(|t| t.name).collect();
//! assert_eq!(names, ["Slug", "String", "TypeEngine"]);
//! ```

use std::fmt;

use formgen_core::{FormgenError, FormgenResult};

/// Hierarchies deeper than this are treated as cyclic.
const MAX_DEPTH: usize = 64;

/// A statically declared column type.
pub struct ColumnType {
    /// The module that defines the type, e.g. `"formgen.types"`.
    pub module: &'static str,
    /// The bare type name, e.g. `"String"`.
    pub name: &'static str,
    /// Direct bases, most significant first.
    pub bases: &'static [&'static ColumnType],
}

impl ColumnType {
    /// Declares a column type.
    pub const fn new(
        module: &'static str,
        name: &'static str,
        bases: &'static [&'static Self],
    ) -> Self {
        Self {
            module,
            name,
            bases,
        }
    }

    /// Returns `"<module>.<name>"`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.module, self.name)
    }

    /// Computes the ancestor chain, most specific first, starting with `self`.
    ///
    /// Fails when the declared bases admit no consistent ordering or the
    /// hierarchy is cyclic.
    pub fn try_mro(&'static self) -> FormgenResult<Vec<&'static Self>> {
        linearize(self, 0)
    }

    /// Like [`try_mro`](Self::try_mro), but an inconsistent hierarchy
    /// degrades to the exact type alone.
    pub fn mro(&'static self) -> Vec<&'static Self> {
        match self.try_mro() {
            Ok(chain) => chain,
            Err(err) => {
                tracing::warn!(column_type = %self, error = %err, "falling back to exact type");
                vec![self]
            }
        }
    }

    /// Returns `true` if `other` appears in this type's ancestor chain.
    pub fn is_subtype_of(&'static self, other: &Self) -> bool {
        self.mro().iter().any(|t| *t == other)
    }
}

impl PartialEq for ColumnType {
    fn eq(&self, other: &Self) -> bool {
        self.module == other.module && self.name == other.name
    }
}

impl Eq for ColumnType {}

impl fmt::Debug for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnType")
            .field("module", &self.module)
            .field("name", &self.name)
            .field(
                "bases",
                &self.bases.iter().map(|b| b.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}

fn linearize(ty: &'static ColumnType, depth: usize) -> FormgenResult<Vec<&'static ColumnType>> {
    if depth > MAX_DEPTH {
        return Err(FormgenError::ImproperlyConfigured(format!(
            "Column type hierarchy of {ty} is cyclic or too deep"
        )));
    }

    let mut seqs: Vec<Vec<&'static ColumnType>> = Vec::with_capacity(ty.bases.len() + 1);
    for base in ty.bases {
        seqs.push(linearize(base, depth + 1)?);
    }
    seqs.push(ty.bases.to_vec());

    let mut result = vec![ty];
    loop {
        seqs.retain(|s| !s.is_empty());
        if seqs.is_empty() {
            return Ok(result);
        }

        let head = seqs
            .iter()
            .map(|s| s[0])
            .find(|candidate| !seqs.iter().any(|s| s[1..].contains(candidate)));
        let Some(head) = head else {
            return Err(FormgenError::ImproperlyConfigured(format!(
                "Cannot create a consistent ancestor order for {ty}"
            )));
        };

        result.push(head);
        for seq in &mut seqs {
            if seq[0] == head {
                seq.remove(0);
            }
        }
    }
}

// ── Built-in types ─────────────────────────────────────────────────────

/// Module of the built-in types.
pub const BUILTIN_MODULE: &str = "formgen.types";

/// Module of the validated string specializations.
pub const EXTRA_MODULE: &str = "formgen.types.extra";

/// Root of every built-in hierarchy.
pub static TYPE_ENGINE: ColumnType = ColumnType::new(BUILTIN_MODULE, "TypeEngine", &[]);

/// Bounded-length string.
pub static STRING: ColumnType = ColumnType::new(BUILTIN_MODULE, "String", &[&TYPE_ENGINE]);
/// Unbounded text.
pub static TEXT: ColumnType = ColumnType::new(BUILTIN_MODULE, "Text", &[&STRING]);
/// Unicode string.
pub static UNICODE: ColumnType = ColumnType::new(BUILTIN_MODULE, "Unicode", &[&STRING]);
/// Unicode text.
pub static UNICODE_TEXT: ColumnType = ColumnType::new(BUILTIN_MODULE, "UnicodeText", &[&TEXT]);
/// String restricted to a set of choices.
pub static ENUM: ColumnType = ColumnType::new(BUILTIN_MODULE, "Enum", &[&STRING]);

/// Integer.
pub static INTEGER: ColumnType = ColumnType::new(BUILTIN_MODULE, "Integer", &[&TYPE_ENGINE]);
/// Small integer.
pub static SMALL_INTEGER: ColumnType =
    ColumnType::new(BUILTIN_MODULE, "SmallInteger", &[&INTEGER]);
/// Big integer.
pub static BIG_INTEGER: ColumnType = ColumnType::new(BUILTIN_MODULE, "BigInteger", &[&INTEGER]);

/// Fixed-precision number.
pub static NUMERIC: ColumnType = ColumnType::new(BUILTIN_MODULE, "Numeric", &[&TYPE_ENGINE]);
/// Floating-point number.
pub static FLOAT: ColumnType = ColumnType::new(BUILTIN_MODULE, "Float", &[&NUMERIC]);

/// Boolean.
pub static BOOLEAN: ColumnType = ColumnType::new(BUILTIN_MODULE, "Boolean", &[&TYPE_ENGINE]);

/// Calendar date.
pub static DATE: ColumnType = ColumnType::new(BUILTIN_MODULE, "Date", &[&TYPE_ENGINE]);
/// Date and time.
pub static DATE_TIME: ColumnType = ColumnType::new(BUILTIN_MODULE, "DateTime", &[&TYPE_ENGINE]);
/// Time of day.
pub static TIME: ColumnType = ColumnType::new(BUILTIN_MODULE, "Time", &[&TYPE_ENGINE]);
/// Time interval.
pub static INTERVAL: ColumnType = ColumnType::new(BUILTIN_MODULE, "Interval", &[&TYPE_ENGINE]);

/// UUID.
pub static UUID: ColumnType = ColumnType::new(BUILTIN_MODULE, "Uuid", &[&TYPE_ENGINE]);
/// JSON document.
pub static JSON: ColumnType = ColumnType::new(BUILTIN_MODULE, "Json", &[&TYPE_ENGINE]);
/// Binary blob. No built-in converter handles it.
pub static LARGE_BINARY: ColumnType =
    ColumnType::new(BUILTIN_MODULE, "LargeBinary", &[&TYPE_ENGINE]);

/// Pseudo-type carried by relationship attributes.
pub static RELATIONSHIP: ColumnType =
    ColumnType::new(BUILTIN_MODULE, "Relationship", &[&TYPE_ENGINE]);

/// Email address stored as a string.
pub static EMAIL: ColumnType = ColumnType::new(EXTRA_MODULE, "Email", &[&STRING]);
/// URL stored as a string.
pub static URL: ColumnType = ColumnType::new(EXTRA_MODULE, "Url", &[&STRING]);
/// IP address stored as a string.
pub static IP_ADDRESS: ColumnType = ColumnType::new(EXTRA_MODULE, "IpAddress", &[&STRING]);

#[cfg(test)]
mod tests {
    use super::*;

    fn names(chain: &[&'static ColumnType]) -> Vec<&'static str> {
        chain.iter().map(|t| t.name).collect()
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(STRING.qualified_name(), "formgen.types.String");
        assert_eq!(EMAIL.qualified_name(), "formgen.types.extra.Email");
        assert_eq!(EMAIL.to_string(), "formgen.types.extra.Email");
    }

    #[test]
    fn test_single_inheritance_chain() {
        assert_eq!(
            names(&UNICODE_TEXT.mro()),
            ["UnicodeText", "Text", "String", "TypeEngine"]
        );
    }

    #[test]
    fn test_root_chain() {
        assert_eq!(names(&TYPE_ENGINE.mro()), ["TypeEngine"]);
    }

    static MIXIN: ColumnType = ColumnType::new("test.types", "Mixin", &[&TYPE_ENGINE]);
    static TAGGED_TEXT: ColumnType =
        ColumnType::new("test.types", "TaggedText", &[&TEXT, &MIXIN]);

    #[test]
    fn test_diamond_is_c3_ordered() {
        assert_eq!(
            names(&TAGGED_TEXT.mro()),
            ["TaggedText", "Text", "String", "Mixin", "TypeEngine"]
        );
    }

    static ORDER_A: ColumnType = ColumnType::new("test.types", "A", &[&STRING, &TEXT]);

    #[test]
    fn test_inconsistent_hierarchy() {
        // Text derives from String, so String cannot precede it.
        let err = ORDER_A.try_mro().unwrap_err();
        assert!(matches!(err, FormgenError::ImproperlyConfigured(_)));
        assert_eq!(names(&ORDER_A.mro()), ["A"]);
    }

    static LOOP_A: ColumnType = ColumnType::new("test.types", "LoopA", &[&LOOP_B]);
    static LOOP_B: ColumnType = ColumnType::new("test.types", "LoopB", &[&LOOP_A]);

    #[test]
    fn test_cycle_detected() {
        assert!(LOOP_A.try_mro().is_err());
    }

    #[test]
    fn test_is_subtype_of() {
        assert!(EMAIL.is_subtype_of(&STRING));
        assert!(EMAIL.is_subtype_of(&EMAIL));
        assert!(!EMAIL.is_subtype_of(&INTEGER));
    }

    #[test]
    fn test_equality_by_module_and_name() {
        static OTHER_STRING: ColumnType = ColumnType::new("other.types", "String", &[]);
        assert_ne!(STRING, OTHER_STRING);
        assert_eq!(STRING, STRING);
    }
}
