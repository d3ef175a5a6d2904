//! Form classes and bound forms.
//!
//! A [`FormClass`] is a form schema: an ordered list of field definitions
//! with a name. Form classes are built at configuration time (by hand or by
//! a model converter) and derived from one another by copying fields, so a
//! derived class never mutates its base.
//!
//! A [`BoundForm`] is one instance of a form class, optionally bound to
//! submitted [`FormData`]. It runs the validation pipeline and exposes
//! cleaned values, errors, and rendering helpers. The [`Form`] trait is the
//! interface both built-in and user-defined forms implement.

use std::collections::{BTreeSet, HashMap};

use formgen_core::logging::form_span;
use formgen_core::utils::FormData;
use formgen_core::FormgenResult;
use formgen_model::model::ModelInstance;
use formgen_model::value::Value;

use crate::bound_field::BoundField;
use crate::fields::{FormFieldDef, FormFieldType};
use crate::validation;

/// An ordered, named form schema.
///
/// # Examples
///
/// ```
/// use formgen_forms::fields::{FormFieldDef, FormFieldType};
/// use formgen_forms::form::FormClass;
///
/// let base = FormClass::new("BaseForm")
///     .with_field(FormFieldDef::new("title", FormFieldType::Char {
///         min_length: None, max_length: Some(120), strip: true,
///     }));
/// let derived = FormClass::derive("PostForm", &base)
///     .with_field(FormFieldDef::new("published", FormFieldType::Boolean));
///
/// assert_eq!(derived.field_names(), ["title", "published"]);
/// assert_eq!(base.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormClass {
    /// The class name, used in logs and error messages.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FormFieldDef>,
}

impl FormClass {
    /// Creates an empty form class.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Creates a class named `name` that starts with every field of `base`.
    pub fn derive(name: impl Into<String>, base: &Self) -> Self {
        Self {
            name: name.into(),
            fields: base.fields.clone(),
        }
    }

    /// Adds a field, replacing an existing field of the same name in place.
    #[must_use]
    pub fn with_field(mut self, field: FormFieldDef) -> Self {
        self.set_field(field);
        self
    }

    /// Adds a field, replacing an existing field of the same name in place.
    pub fn set_field(&mut self, field: FormFieldDef) {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == field.name) {
            *existing = field;
        } else {
            self.fields.push(field);
        }
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FormFieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a field by name for modification.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormFieldDef> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Returns `true` if the class declares a field called `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Removes a field, returning it.
    pub fn remove_field(&mut self, name: &str) -> Option<FormFieldDef> {
        let pos = self.fields.iter().position(|f| f.name == name)?;
        Some(self.fields.remove(pos))
    }

    /// Returns the field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the class has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Creates an unbound instance of this class.
    pub fn instantiate(&self) -> BoundForm {
        BoundForm::new(self)
    }
}

/// The core form trait. All form types implement this.
pub trait Form: Send + Sync {
    /// Returns the form's field definitions.
    fn fields(&self) -> &[FormFieldDef];

    /// Returns the initial (default) values for fields.
    fn initial(&self) -> &HashMap<String, Value>;

    /// Returns the form prefix (for namespacing multiple forms on one page).
    fn prefix(&self) -> Option<&str>;

    /// Binds raw form data to this form.
    fn bind(&mut self, data: &FormData);

    /// Returns `true` if this form has been bound to data.
    fn is_bound(&self) -> bool;

    /// Validates the form. Returns `true` if valid.
    ///
    /// After calling this, `errors()` and `cleaned_data()` are populated.
    fn is_valid(&mut self) -> bool;

    /// Returns per-field validation errors.
    ///
    /// Keys are field names, values are lists of error messages.
    fn errors(&self) -> &HashMap<String, Vec<String>>;

    /// Returns the cleaned (validated and coerced) data.
    fn cleaned_data(&self) -> &HashMap<String, Value>;

    /// Cross-field validation hook. The default implementation does nothing.
    fn clean(&self) -> Result<(), HashMap<String, Vec<String>>> {
        Ok(())
    }
}

/// An instance of a [`FormClass`].
#[derive(Debug, Clone)]
pub struct BoundForm {
    class: FormClass,
    initial_data: HashMap<String, Value>,
    prefix: Option<String>,
    bound: bool,
    raw_data: HashMap<String, Option<String>>,
    errors: HashMap<String, Vec<String>>,
    cleaned_data: HashMap<String, Value>,
    inline: HashMap<String, Vec<BoundForm>>,
}

impl BoundForm {
    /// Creates an unbound form of the given class.
    pub fn new(class: &FormClass) -> Self {
        Self {
            class: class.clone(),
            initial_data: HashMap::new(),
            prefix: None,
            bound: false,
            raw_data: HashMap::new(),
            errors: HashMap::new(),
            cleaned_data: HashMap::new(),
            inline: HashMap::new(),
        }
    }

    /// Sets initial (default) values for fields.
    #[must_use]
    pub fn with_initial(mut self, initial: HashMap<String, Value>) -> Self {
        self.initial_data = initial;
        self
    }

    /// Takes initial values from a model record's attributes.
    #[must_use]
    pub fn with_obj(mut self, obj: &ModelInstance) -> Self {
        for field in &self.class.fields {
            if let Some(value) = obj.get(&field.name) {
                self.initial_data.insert(field.name.clone(), value.clone());
            }
        }
        self
    }

    /// Sets the form prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Returns the class this form is an instance of.
    pub const fn class(&self) -> &FormClass {
        &self.class
    }

    /// Returns the name a field is submitted under.
    pub fn html_name(&self, field_name: &str) -> String {
        match &self.prefix {
            Some(p) => format!("{p}-{field_name}"),
            None => field_name.to_string(),
        }
    }

    /// Returns the bound rows of an inline list field.
    pub fn inline_forms(&self, field_name: &str) -> &[Self] {
        self.inline.get(field_name).map_or(&[], Vec::as_slice)
    }

    /// Returns bound fields for rendering.
    pub fn bound_fields(&self) -> Vec<BoundField<'_>> {
        self.class
            .fields
            .iter()
            .map(|field| {
                let data = if self.bound {
                    self.raw_data.get(&field.name).cloned().flatten()
                } else {
                    self.initial_data
                        .get(&field.name)
                        .or(field.initial.as_ref())
                        .map(Value::to_form_string)
                };
                let errors = self.errors.get(&field.name).cloned().unwrap_or_default();
                BoundField::new(field, data, errors, self.prefix.as_deref())
            })
            .collect()
    }

    /// Looks up one bound field by name.
    pub fn bound_field(&self, name: &str) -> Option<BoundField<'_>> {
        self.bound_fields().into_iter().find(|bf| bf.field.name == name)
    }

    /// Returns the non-field (form-level) errors.
    pub fn non_field_errors(&self) -> &[String] {
        self.errors.get("__all__").map_or(&[], Vec::as_slice)
    }

    /// Renders every field as a labelled row.
    pub fn render(&self) -> FormgenResult<String> {
        let mut html = String::new();
        for bf in self.bound_fields() {
            html.push_str(&format!(
                r#"<div class="form-row">{}{}{}</div>"#,
                bf.label_tag(),
                bf.render(&HashMap::new())?,
                bf.errors_as_ul()
            ));
        }
        Ok(html)
    }

    /// Writes cleaned values onto `obj`.
    ///
    /// Inline list fields are skipped; their rows are applied by the caller
    /// through [`inline_forms`](Self::inline_forms).
    pub fn populate_obj(&self, obj: &mut ModelInstance) {
        for field in &self.class.fields {
            if field.is_inline_list() {
                continue;
            }
            if let Some(value) = self.cleaned_data.get(&field.name) {
                obj.set(field.name.clone(), value.clone());
            }
        }
    }

    fn bind_inline(&mut self, field: &FormFieldDef, data: &FormData) {
        let FormFieldType::InlineList { form, .. } = &field.field_type else {
            return;
        };
        let list_prefix = format!("{}-", self.html_name(&field.name));
        let indices: BTreeSet<usize> = data
            .keys()
            .filter_map(|key| key.strip_prefix(&list_prefix))
            .filter_map(|rest| rest.split_once('-'))
            .filter_map(|(index, _)| index.parse().ok())
            .collect();
        let rows = indices
            .into_iter()
            .map(|i| {
                let mut row = Self::new(form).with_prefix(format!("{list_prefix}{i}"));
                row.bind(data);
                row
            })
            .collect();
        self.inline.insert(field.name.clone(), rows);
    }
}

impl Form for BoundForm {
    fn fields(&self) -> &[FormFieldDef] {
        &self.class.fields
    }

    fn initial(&self) -> &HashMap<String, Value> {
        &self.initial_data
    }

    fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    fn bind(&mut self, data: &FormData) {
        self.bound = true;
        self.raw_data.clear();
        self.errors.clear();
        self.cleaned_data.clear();
        self.inline.clear();

        let fields = self.class.fields.clone();
        for field in &fields {
            if field.is_inline_list() {
                self.bind_inline(field, data);
                continue;
            }
            let html_name = self.html_name(&field.name);
            let value = field.widget.value_from_data(data, &html_name);
            self.raw_data.insert(field.name.clone(), value);
        }
    }

    fn is_bound(&self) -> bool {
        self.bound
    }

    fn is_valid(&mut self) -> bool {
        if !self.bound {
            return false;
        }
        let span = form_span(&self.class.name);
        let _guard = span.enter();

        self.errors.clear();
        self.cleaned_data.clear();

        validation::clean_fields(
            &self.class.fields,
            &self.raw_data,
            &mut self.cleaned_data,
            &mut self.errors,
        );

        for (name, rows) in &mut self.inline {
            for (i, row) in rows.iter_mut().enumerate() {
                if row.is_valid() {
                    continue;
                }
                for (sub, msgs) in row.errors() {
                    self.errors
                        .entry(format!("{name}-{i}-{sub}"))
                        .or_default()
                        .extend(msgs.iter().cloned());
                }
            }
        }

        if let Err(form_errors) = self.clean() {
            for (key, msgs) in form_errors {
                self.errors.entry(key).or_default().extend(msgs);
            }
        }

        tracing::debug!(errors = self.errors.len(), "form validated");
        self.errors.is_empty()
    }

    fn errors(&self) -> &HashMap<String, Vec<String>> {
        &self.errors
    }

    fn cleaned_data(&self) -> &HashMap<String, Value> {
        &self.cleaned_data
    }
}
