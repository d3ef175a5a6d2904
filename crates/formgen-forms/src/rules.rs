//! Declarative form layout rules.
//!
//! A [`RuleSet`] orders and groups the fields of a rendered form. Rules are
//! plain data, so they can be written in code or loaded from a settings file:
//!
//! ```
//! use formgen_forms::rules::{Rule, RuleSet};
//!
//! let rules: Vec<Rule> = serde_json::from_str(r#"[
//!     {"type": "header", "text": "Post"},
//!     {"type": "field", "name": "title"},
//!     {"type": "field_set", "header": "Meta", "rules": [
//!         {"type": "field", "name": "status"}
//!     ]}
//! ]"#).unwrap();
//!
//! let set = RuleSet::new("Post", rules);
//! assert_eq!(set.visible_fields(), ["title", "status"]);
//! ```

use std::collections::HashMap;

use formgen_core::utils::text::escape_html;
use formgen_core::FormgenResult;
use serde::{Deserialize, Serialize};

use crate::form::{BoundForm, FormClass};

/// One layout rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    /// Renders the named field. Missing fields render nothing.
    Field {
        /// The field name.
        name: String,
    },
    /// A section header.
    Header {
        /// The header text.
        text: String,
    },
    /// A paragraph of static text.
    Text {
        /// The text, HTML-escaped on render.
        text: String,
    },
    /// A group of rules wrapped in a `<fieldset>`.
    FieldSet {
        /// Optional legend.
        #[serde(default)]
        header: Option<String>,
        /// Nested rules.
        rules: Vec<Rule>,
    },
    /// Nested rules rendered side by side.
    Row {
        /// Nested rules.
        rules: Vec<Rule>,
    },
}

impl From<&str> for Rule {
    fn from(name: &str) -> Self {
        Self::Field {
            name: name.to_string(),
        }
    }
}

impl Rule {
    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Field { name } => out.push(name),
            Self::FieldSet { rules, .. } | Self::Row { rules } => {
                for rule in rules {
                    rule.collect_fields(out);
                }
            }
            Self::Header { .. } | Self::Text { .. } => {}
        }
    }

    fn render(&self, form: &BoundForm, out: &mut String) -> FormgenResult<()> {
        match self {
            Self::Field { name } => {
                if let Some(bf) = form.bound_field(name) {
                    out.push_str(&format!(
                        r#"<div class="form-row">{}{}{}</div>"#,
                        bf.label_tag(),
                        bf.render(&HashMap::new())?,
                        bf.errors_as_ul()
                    ));
                }
            }
            Self::Header { text } => out.push_str(&format!("<h3>{}</h3>", escape_html(text))),
            Self::Text { text } => out.push_str(&format!("<p>{}</p>", escape_html(text))),
            Self::FieldSet { header, rules } => {
                out.push_str("<fieldset>");
                if let Some(header) = header {
                    out.push_str(&format!("<legend>{}</legend>", escape_html(header)));
                }
                for rule in rules {
                    rule.render(form, out)?;
                }
                out.push_str("</fieldset>");
            }
            Self::Row { rules } => {
                out.push_str(r#"<div class="row">"#);
                for rule in rules {
                    rule.render(form, out)?;
                }
                out.push_str("</div>");
            }
        }
        Ok(())
    }
}

/// A compiled list of rules, bound to the object that declared them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    owner: String,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compiles `rules` for `owner` (a view or descriptor name used in logs).
    pub fn new(owner: impl Into<String>, rules: Vec<Rule>) -> Self {
        let owner = owner.into();
        tracing::debug!(owner = %owner, rules = rules.len(), "compiled rule set");
        Self { owner, rules }
    }

    /// Returns the name of the declaring object.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the top-level rules.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns every field named by the rules, in render order.
    pub fn visible_fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for rule in &self.rules {
            rule.collect_fields(&mut out);
        }
        out
    }

    /// Returns the named fields `class` does not declare.
    pub fn missing_fields<'a>(&'a self, class: &FormClass) -> Vec<&'a str> {
        self.visible_fields()
            .into_iter()
            .filter(|name| !class.contains(name))
            .collect()
    }

    /// Renders `form` following the rules.
    pub fn render(&self, form: &BoundForm) -> FormgenResult<String> {
        let mut out = String::new();
        for rule in &self.rules {
            rule.render(form, &mut out)?;
        }
        Ok(out)
    }
}
