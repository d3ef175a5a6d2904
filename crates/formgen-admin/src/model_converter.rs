//! Model-to-form conversion.
//!
//! [`ModelConverter`] is the extension point: it owns a converter registry
//! and turns a model's metadata into a [`FormClass`]. The base
//! implementation, [`ModelConverterBase`], only resolves converters; asking
//! it for a form fails with [`FormgenError::NotImplemented`].
//! [`AdminModelConverter`] is the concrete converter with a built-in table
//! covering the standard column types.

use std::collections::HashMap;
use std::sync::Arc;

use formgen_core::logging::form_span;
use formgen_core::settings::Settings;
use formgen_core::utils::text::prettify_name;
use formgen_core::{FormgenError, FormgenResult, SETTINGS};
use formgen_forms::fields::{FormFieldDef, FormFieldType};
use formgen_forms::form::FormClass;
use formgen_forms::widgets::{Select, Widget};
use formgen_model::model::{ModelField, ModelMeta};
use formgen_model::validators::Validator;
use formgen_model::value::Value;

use crate::converter::{ConverterRegistry, Converts, FieldPlaceholder};

/// Per-field overrides applied on top of what a converter produces.
#[derive(Debug, Clone, Default)]
pub struct FieldArgs {
    /// Replaces the label.
    pub label: Option<String>,
    /// Replaces the help text.
    pub description: Option<String>,
    /// Appended to the converter's validators.
    pub validators: Vec<Arc<dyn Validator>>,
    /// Replaces the widget.
    pub widget: Option<Arc<dyn Widget>>,
    /// Replaces the required flag.
    pub required: Option<bool>,
    /// Replaces the initial value.
    pub default: Option<Value>,
    /// Extra HTML attributes.
    pub render_kw: HashMap<String, String>,
}

impl FieldArgs {
    /// Creates empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a validator.
    #[must_use]
    pub fn validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Sets the widget.
    #[must_use]
    pub fn widget(mut self, widget: Arc<dyn Widget>) -> Self {
        self.widget = Some(widget);
        self
    }

    /// Sets the required flag.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Adds an HTML attribute.
    #[must_use]
    pub fn render_kw(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.render_kw.insert(key.into(), value.into());
        self
    }

    /// Applies the overrides to `field`.
    pub fn apply(&self, mut field: FormFieldDef) -> FormFieldDef {
        if let Some(label) = &self.label {
            field.label.clone_from(label);
        }
        if let Some(description) = &self.description {
            field.help_text.clone_from(description);
        }
        field.validators.extend(self.validators.iter().cloned());
        if let Some(widget) = &self.widget {
            field.widget = Arc::clone(widget);
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(default) = &self.default {
            field.initial = Some(default.clone());
        }
        field
            .render_attrs
            .extend(self.render_kw.iter().map(|(k, v)| (k.clone(), v.clone())));
        field
    }
}

/// Options for generating one form class from a model.
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
    /// Name of the generated class; defaults to `"<Model>Form"`.
    pub name: Option<String>,
    /// Class whose fields the generated class starts from.
    pub base_class: Option<FormClass>,
    /// Only these names, in this order.
    pub only: Option<Vec<String>>,
    /// Names to leave out.
    pub exclude: Vec<String>,
    /// Per-field overrides.
    pub field_args: HashMap<String, FieldArgs>,
    /// Fields added as-is after the converted ones.
    pub extra_fields: Vec<FormFieldDef>,
    /// Labels by field name, used when no override supplies one.
    pub column_labels: HashMap<String, String>,
    /// Help texts by field name.
    pub column_descriptions: HashMap<String, String>,
}

impl FormOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the generated class name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the base class.
    #[must_use]
    pub fn base_class(mut self, base: FormClass) -> Self {
        self.base_class = Some(base);
        self
    }

    /// Restricts and orders the generated fields.
    #[must_use]
    pub fn only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Leaves fields out.
    #[must_use]
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds overrides for one field.
    #[must_use]
    pub fn field_args(mut self, name: impl Into<String>, args: FieldArgs) -> Self {
        self.field_args.insert(name.into(), args);
        self
    }

    /// Adds a field that is not converted from the model.
    #[must_use]
    pub fn extra_field(mut self, field: FormFieldDef) -> Self {
        self.extra_fields.push(field);
        self
    }

    /// Sets the label for one field.
    #[must_use]
    pub fn column_label(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.column_labels.insert(name.into(), label.into());
        self
    }

    /// Sets the help text for one field.
    #[must_use]
    pub fn column_description(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.column_descriptions
            .insert(name.into(), description.into());
        self
    }
}

/// Turns model metadata into form classes.
pub trait ModelConverter {
    /// The converter registry.
    fn registry(&self) -> &ConverterRegistry;

    /// Whether lookup walks a column type's ancestors.
    fn use_ancestor_search(&self) -> bool;

    /// Finds the converter for a model attribute. A miss is `None`.
    fn get_converter(&self, field: &ModelField) -> Option<&Converts> {
        self.registry()
            .resolve(field.column_type, self.use_ancestor_search())
    }

    /// Generates a form class for `model`.
    fn get_form(&self, model: &ModelMeta, _options: &FormOptions) -> FormgenResult<FormClass> {
        Err(FormgenError::NotImplemented(format!(
            "form generation for model '{}' requires a concrete converter",
            model.name
        )))
    }
}

/// A converter that resolves fields but cannot generate forms.
#[derive(Debug, Clone)]
pub struct ModelConverterBase {
    registry: ConverterRegistry,
    use_ancestor_search: bool,
}

impl ModelConverterBase {
    /// Wraps a registry.
    pub const fn new(registry: ConverterRegistry, use_ancestor_search: bool) -> Self {
        Self {
            registry,
            use_ancestor_search,
        }
    }
}

impl ModelConverter for ModelConverterBase {
    fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    fn use_ancestor_search(&self) -> bool {
        self.use_ancestor_search
    }
}

// ── Built-in converters ────────────────────────────────────────────────

/// Upper bound on digits for fixed-precision columns without declared precision.
const NUMERIC_MAX_DIGITS: u32 = 28;
/// Decimal places allowed for fixed-precision columns.
const NUMERIC_DECIMAL_PLACES: u32 = 10;

/// The defaults every converter starts from: label, help text, required
/// flag derived from nullability and default, and initial value.
fn base_field(field: &ModelField, field_type: FormFieldType) -> FormFieldDef {
    let mut def = FormFieldDef::new(field.name.clone(), field_type)
        .required(!field.nullable && field.default.is_none())
        .help_text(field.help_text.clone());
    if let Some(label) = &field.label {
        def = def.label(label.clone());
    }
    if let Some(default) = &field.default {
        def = def.initial(default.clone());
    }
    def
}

fn conv_string(field: &ModelField) -> FormgenResult<FormFieldDef> {
    Ok(base_field(
        field,
        FormFieldType::Char {
            min_length: None,
            max_length: field.max_length,
            strip: true,
        },
    ))
}

fn conv_text(field: &ModelField) -> FormgenResult<FormFieldDef> {
    Ok(base_field(
        field,
        FormFieldType::Text {
            max_length: field.max_length,
        },
    ))
}

fn conv_enum(field: &ModelField) -> FormgenResult<FormFieldDef> {
    if field.choices.is_empty() {
        return Err(FormgenError::ImproperlyConfigured(format!(
            "Enum column '{}' declares no choices",
            field.name
        )));
    }
    let def = base_field(
        field,
        FormFieldType::Choice {
            choices: field.choices.clone(),
        },
    );
    Ok(def.widget(Arc::new(Select {
        allow_blank: field.nullable,
    })))
}

fn conv_integer(field: &ModelField) -> FormgenResult<FormFieldDef> {
    Ok(base_field(
        field,
        FormFieldType::Integer {
            min_value: None,
            max_value: None,
        },
    ))
}

fn conv_numeric(field: &ModelField) -> FormgenResult<FormFieldDef> {
    Ok(base_field(
        field,
        FormFieldType::Decimal {
            max_digits: NUMERIC_MAX_DIGITS,
            decimal_places: NUMERIC_DECIMAL_PLACES,
        },
    ))
}

fn conv_float(field: &ModelField) -> FormgenResult<FormFieldDef> {
    Ok(base_field(
        field,
        FormFieldType::Float {
            min_value: None,
            max_value: None,
        },
    ))
}

fn conv_boolean(field: &ModelField) -> FormgenResult<FormFieldDef> {
    // An unchecked checkbox submits nothing, so it can never be required.
    Ok(base_field(field, FormFieldType::Boolean).required(false))
}

fn conv_date(field: &ModelField) -> FormgenResult<FormFieldDef> {
    Ok(base_field(field, FormFieldType::Date))
}

fn conv_datetime(field: &ModelField) -> FormgenResult<FormFieldDef> {
    Ok(base_field(field, FormFieldType::DateTime))
}

fn conv_time(field: &ModelField) -> FormgenResult<FormFieldDef> {
    Ok(base_field(field, FormFieldType::Time))
}

fn conv_interval(field: &ModelField) -> FormgenResult<FormFieldDef> {
    Ok(base_field(field, FormFieldType::Duration))
}

fn conv_uuid(field: &ModelField) -> FormgenResult<FormFieldDef> {
    Ok(base_field(field, FormFieldType::Uuid))
}

fn conv_json(field: &ModelField) -> FormgenResult<FormFieldDef> {
    Ok(base_field(field, FormFieldType::Json))
}

fn conv_email(field: &ModelField) -> FormgenResult<FormFieldDef> {
    Ok(base_field(field, FormFieldType::Email))
}

fn conv_url(field: &ModelField) -> FormgenResult<FormFieldDef> {
    Ok(base_field(field, FormFieldType::Url))
}

fn conv_ip_address(field: &ModelField) -> FormgenResult<FormFieldDef> {
    Ok(base_field(field, FormFieldType::IpAddress))
}

/// Converters for the built-in column types.
///
/// Core types register bare names so subclasses reach them in the bare-name
/// pass; the string specializations register qualified names so they win
/// over `String` in the qualified pass.
pub static BUILTIN_CONVERTERS: &[Converts] = &[
    Converts::new("conv_string", &["String", "Unicode"], conv_string),
    Converts::new("conv_text", &["Text", "UnicodeText"], conv_text),
    Converts::new("conv_enum", &["Enum"], conv_enum),
    Converts::new(
        "conv_integer",
        &["Integer", "SmallInteger", "BigInteger"],
        conv_integer,
    ),
    Converts::new("conv_numeric", &["Numeric"], conv_numeric),
    Converts::new("conv_float", &["Float"], conv_float),
    Converts::new("conv_boolean", &["Boolean"], conv_boolean),
    Converts::new("conv_date", &["Date"], conv_date),
    Converts::new("conv_datetime", &["DateTime"], conv_datetime),
    Converts::new("conv_time", &["Time"], conv_time),
    Converts::new("conv_interval", &["Interval"], conv_interval),
    Converts::new("conv_uuid", &["Uuid"], conv_uuid),
    Converts::new("conv_json", &["Json"], conv_json),
    Converts::new("conv_email", &["formgen.types.extra.Email"], conv_email),
    Converts::new("conv_url", &["formgen.types.extra.Url"], conv_url),
    Converts::new(
        "conv_ip_address",
        &["formgen.types.extra.IpAddress"],
        conv_ip_address,
    ),
];

/// The concrete model converter used by admin views.
///
/// # Examples
///
/// ```
/// use formgen_admin::model_converter::{AdminModelConverter, FormOptions, ModelConverter};
/// use formgen_model::model::{ModelField, ModelMeta};
/// use formgen_model::types;
///
/// let post = ModelMeta::new("Post", vec![
///     ModelField::new("id", &types::INTEGER).primary_key(),
///     ModelField::new("title", &types::STRING).max_length(120),
///     ModelField::new("body", &types::TEXT).nullable(),
/// ]);
///
/// let converter = AdminModelConverter::new().unwrap();
/// let form = converter.get_form(&post, &FormOptions::new()).unwrap();
/// assert_eq!(form.name, "PostForm");
/// assert_eq!(form.field_names(), ["title", "body"]);
/// ```
#[derive(Debug, Clone)]
pub struct AdminModelConverter {
    registry: ConverterRegistry,
    use_ancestor_search: bool,
}

impl AdminModelConverter {
    /// Creates a converter configured from the global settings.
    pub fn new() -> FormgenResult<Self> {
        Self::from_settings(SETTINGS.get())
    }

    /// Creates a converter configured from `settings`.
    pub fn from_settings(settings: &Settings) -> FormgenResult<Self> {
        Self::with_seed(settings, HashMap::new())
    }

    /// Creates a converter whose registry starts from `seed`.
    ///
    /// Built-in entries override seeded entries for the same identifier.
    pub fn with_seed(settings: &Settings, seed: HashMap<String, Converts>) -> FormgenResult<Self> {
        let registry = ConverterRegistry::builder()
            .seed(seed)
            .table(BUILTIN_CONVERTERS)
            .reject_duplicates(settings.reject_duplicate_converters)
            .build()?;
        Ok(Self {
            registry,
            use_ancestor_search: settings.use_ancestor_search,
        })
    }

    /// Lays out placeholders and caller-supplied fields in final order.
    fn layout(model: &ModelMeta, options: &FormOptions) -> FormgenResult<Vec<Slot>> {
        let extra = |name: &str| options.extra_fields.iter().find(|f| f.name == name);

        let mut slots = Vec::new();
        if let Some(only) = &options.only {
            for name in only {
                if options.exclude.contains(name) {
                    continue;
                }
                if let Some(field) = model.field(name) {
                    if field.is_relation() {
                        // Inline scaffolding owns relation fields.
                        tracing::debug!(
                            model = %model.name,
                            column = %name,
                            "skipping relation column named in form columns"
                        );
                    } else {
                        slots.push(Slot::Model(FieldPlaceholder::new(field.clone())));
                    }
                } else if let Some(def) = extra(name) {
                    slots.push(Slot::Declared(def.clone()));
                } else {
                    return Err(FormgenError::ImproperlyConfigured(format!(
                        "Model '{}' has no column named '{name}'",
                        model.name
                    )));
                }
            }
        } else {
            slots.extend(
                model
                    .fields
                    .iter()
                    .filter(|f| !f.primary_key && !f.is_relation())
                    .filter(|f| !options.exclude.contains(&f.name))
                    .map(|f| Slot::Model(FieldPlaceholder::new(f.clone()))),
            );
        }

        for def in &options.extra_fields {
            let placed = slots.iter().any(|s| s.name() == def.name);
            if !placed && !options.exclude.contains(&def.name) {
                slots.push(Slot::Declared(def.clone()));
            }
        }
        Ok(slots)
    }

    fn convert(&self, placeholder: &FieldPlaceholder) -> FormgenResult<FormFieldDef> {
        let field = &placeholder.field;
        let converter = self.get_converter(field).ok_or_else(|| {
            FormgenError::ImproperlyConfigured(format!(
                "Could not find field converter for column '{}' ({})",
                field.name, field.column_type
            ))
        })?;
        tracing::trace!(column = %field.name, converter = converter.name, "converting column");
        converter.convert(field)
    }
}

/// One position in a generated form.
enum Slot {
    Model(FieldPlaceholder),
    Declared(FormFieldDef),
}

impl Slot {
    fn name(&self) -> &str {
        match self {
            Self::Model(p) => &p.field.name,
            Self::Declared(def) => &def.name,
        }
    }
}

impl ModelConverter for AdminModelConverter {
    fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    fn use_ancestor_search(&self) -> bool {
        self.use_ancestor_search
    }

    fn get_form(&self, model: &ModelMeta, options: &FormOptions) -> FormgenResult<FormClass> {
        let name = options
            .name
            .clone()
            .unwrap_or_else(|| format!("{}Form", model.name));
        let span = form_span(&name);
        let _guard = span.enter();

        let mut form = options
            .base_class
            .as_ref()
            .map_or_else(|| FormClass::new(name.clone()), |base| FormClass::derive(name.clone(), base));

        for slot in Self::layout(model, options)? {
            let mut def = match slot {
                Slot::Model(placeholder) => {
                    let mut def = self.convert(&placeholder)?;
                    if placeholder.field.label.is_none() {
                        def.label = options
                            .column_labels
                            .get(&def.name)
                            .cloned()
                            .unwrap_or_else(|| prettify_name(&def.name));
                    }
                    if let Some(description) = options.column_descriptions.get(&def.name) {
                        def.help_text.clone_from(description);
                    }
                    def
                }
                Slot::Declared(def) => def,
            };
            if let Some(args) = options.field_args.get(&def.name) {
                def = args.apply(def);
            }
            form.set_field(def);
        }

        tracing::debug!(model = %model.name, fields = form.len(), "generated form class");
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgen_forms::widgets::{Textarea, WidgetType};
    use formgen_model::model::RelationKind;
    use formgen_model::types;
    use formgen_model::validators::MaxLengthValidator;

    fn post_meta() -> ModelMeta {
        ModelMeta::new(
            "Post",
            vec![
                ModelField::new("id", &types::INTEGER).primary_key(),
                ModelField::new("title", &types::STRING).max_length(120),
                ModelField::new("body", &types::UNICODE_TEXT).nullable(),
                ModelField::new("status", &types::ENUM)
                    .choices([("draft", "Draft"), ("live", "Live")])
                    .default("draft"),
                ModelField::new("published", &types::BOOLEAN),
                ModelField::new("rating", &types::FLOAT).nullable(),
                ModelField::new("author_email", &types::EMAIL),
                ModelField::relation("comments", "Comment", RelationKind::OneToMany),
            ],
        )
    }

    fn converter() -> AdminModelConverter {
        AdminModelConverter::from_settings(&Settings::default()).unwrap()
    }

    #[test]
    fn test_base_converter_get_form_not_implemented() {
        let base = ModelConverterBase::new(ConverterRegistry::default(), true);
        let err = base.get_form(&post_meta(), &FormOptions::new()).unwrap_err();
        assert!(matches!(err, FormgenError::NotImplemented(_)));
    }

    #[test]
    fn test_base_converter_resolves() {
        let registry = ConverterRegistry::builder()
            .table(BUILTIN_CONVERTERS)
            .build()
            .unwrap();
        let base = ModelConverterBase::new(registry, false);
        let field = ModelField::new("body", &types::UNICODE_TEXT);
        assert_eq!(base.get_converter(&field).unwrap().name, "conv_text");
    }

    #[test]
    fn test_default_layout_skips_pk_and_relations() {
        let form = converter().get_form(&post_meta(), &FormOptions::new()).unwrap();
        assert_eq!(
            form.field_names(),
            ["title", "body", "status", "published", "rating", "author_email"]
        );
    }

    #[test]
    fn test_converted_field_types() {
        let form = converter().get_form(&post_meta(), &FormOptions::new()).unwrap();
        assert!(matches!(
            form.field("title").unwrap().field_type,
            FormFieldType::Char {
                max_length: Some(120),
                ..
            }
        ));
        let body = form.field("body").unwrap();
        assert!(matches!(body.field_type, FormFieldType::Text { .. }));
        assert_eq!(body.widget.widget_type(), WidgetType::Textarea);
        assert!(!body.required);
        assert!(matches!(
            form.field("status").unwrap().field_type,
            FormFieldType::Choice { .. }
        ));
        assert!(matches!(
            form.field("author_email").unwrap().field_type,
            FormFieldType::Email
        ));
        assert!(matches!(
            form.field("rating").unwrap().field_type,
            FormFieldType::Float { .. }
        ));
    }

    #[test]
    fn test_required_from_nullability_and_default() {
        let form = converter().get_form(&post_meta(), &FormOptions::new()).unwrap();
        assert!(form.field("title").unwrap().required);
        let status = form.field("status").unwrap();
        assert!(!status.required);
        assert_eq!(status.initial, Some(Value::from("draft")));
        assert!(!form.field("published").unwrap().required);
    }

    #[test]
    fn test_only_orders_and_restricts() {
        let options = FormOptions::new().only(["status", "id", "title"]);
        let form = converter().get_form(&post_meta(), &options).unwrap();
        assert_eq!(form.field_names(), ["status", "id", "title"]);
    }

    #[test]
    fn test_only_skips_relation_columns() {
        let options = FormOptions::new().only(["title", "comments"]);
        let form = converter().get_form(&post_meta(), &options).unwrap();
        assert_eq!(form.field_names(), ["title"]);
    }

    #[test]
    fn test_only_unknown_column() {
        let options = FormOptions::new().only(["nope"]);
        let err = converter().get_form(&post_meta(), &options).unwrap_err();
        assert!(matches!(err, FormgenError::ImproperlyConfigured(_)));
        assert!(err.to_string().contains("'nope'"));
    }

    #[test]
    fn test_exclude() {
        let options = FormOptions::new().exclude(["body", "rating"]);
        let form = converter().get_form(&post_meta(), &options).unwrap();
        assert!(!form.contains("body"));
        assert!(!form.contains("rating"));
        assert!(form.contains("title"));
    }

    #[test]
    fn test_labels_and_descriptions() {
        let options = FormOptions::new()
            .column_label("author_email", "E-mail")
            .column_description("title", "Shown in listings");
        let form = converter().get_form(&post_meta(), &options).unwrap();
        assert_eq!(form.field("author_email").unwrap().label, "E-mail");
        assert_eq!(form.field("rating").unwrap().label, "Rating");
        assert_eq!(form.field("title").unwrap().help_text, "Shown in listings");
    }

    #[test]
    fn test_field_args_override() {
        let options = FormOptions::new().field_args(
            "title",
            FieldArgs::new()
                .label("Headline")
                .required(false)
                .widget(Arc::new(Textarea))
                .validator(Arc::new(MaxLengthValidator::new(10)))
                .render_kw("placeholder", "Headline"),
        );
        let form = converter().get_form(&post_meta(), &options).unwrap();
        let title = form.field("title").unwrap();
        assert_eq!(title.label, "Headline");
        assert!(!title.required);
        assert_eq!(title.widget.widget_type(), WidgetType::Textarea);
        assert_eq!(title.validators.len(), 1);
        assert_eq!(title.render_attrs["placeholder"], "Headline");
    }

    #[test]
    fn test_extra_fields_keep_declared_position() {
        let captcha = FormFieldDef::new(
            "captcha",
            FormFieldType::Char {
                min_length: None,
                max_length: None,
                strip: true,
            },
        );
        let options = FormOptions::new()
            .only(["title", "captcha", "status"])
            .extra_field(captcha.clone());
        let form = converter().get_form(&post_meta(), &options).unwrap();
        assert_eq!(form.field_names(), ["title", "captcha", "status"]);

        let options = FormOptions::new().only(["title"]).extra_field(captcha);
        let form = converter().get_form(&post_meta(), &options).unwrap();
        assert_eq!(form.field_names(), ["title", "captcha"]);
    }

    #[test]
    fn test_base_class_fields_come_first() {
        let base = FormClass::new("Base").with_field(FormFieldDef::new(
            "csrf_token",
            FormFieldType::Char {
                min_length: None,
                max_length: None,
                strip: false,
            },
        ));
        let options = FormOptions::new()
            .name("PostEditForm")
            .base_class(base)
            .only(["title"]);
        let form = converter().get_form(&post_meta(), &options).unwrap();
        assert_eq!(form.name, "PostEditForm");
        assert_eq!(form.field_names(), ["csrf_token", "title"]);
    }

    #[test]
    fn test_missing_converter_is_configuration_error() {
        let model = ModelMeta::new(
            "Upload",
            vec![ModelField::new("blob", &types::LARGE_BINARY)],
        );
        let err = converter().get_form(&model, &FormOptions::new()).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("'blob'"));
        assert!(err.to_string().contains("formgen.types.LargeBinary"));
    }

    #[test]
    fn test_seed_supplies_missing_types() {
        fn conv_blob(field: &ModelField) -> FormgenResult<FormFieldDef> {
            Ok(base_field(field, FormFieldType::Json))
        }
        let mut seed = HashMap::new();
        seed.insert(
            "LargeBinary".to_string(),
            Converts::new("conv_blob", &[], conv_blob),
        );
        let converter = AdminModelConverter::with_seed(&Settings::default(), seed).unwrap();
        let model = ModelMeta::new(
            "Upload",
            vec![ModelField::new("blob", &types::LARGE_BINARY)],
        );
        let form = converter.get_form(&model, &FormOptions::new()).unwrap();
        assert!(form.contains("blob"));
    }

    #[test]
    fn test_exact_type_lookup_when_ancestor_search_off() {
        static SLUG: formgen_model::types::ColumnType =
            formgen_model::types::ColumnType::new("blog.types", "Slug", &[&types::STRING]);
        let model = ModelMeta::new("Tag", vec![ModelField::new("slug", &SLUG)]);

        let settings = Settings {
            use_ancestor_search: false,
            ..Settings::default()
        };
        let exact = AdminModelConverter::from_settings(&settings).unwrap();
        assert!(exact.get_form(&model, &FormOptions::new()).is_err());

        let form = converter().get_form(&model, &FormOptions::new()).unwrap();
        assert!(matches!(
            form.field("slug").unwrap().field_type,
            FormFieldType::Char { .. }
        ));
    }

    #[test]
    fn test_enum_without_choices() {
        let model = ModelMeta::new("Post", vec![ModelField::new("status", &types::ENUM)]);
        assert!(converter().get_form(&model, &FormOptions::new()).is_err());
    }
}
