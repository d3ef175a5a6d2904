//! Inline model editing.
//!
//! Inline models are related child records edited inside the parent's form.
//! Each one is described by an [`InlineFormAdmin`]: which columns to show,
//! per-field overrides, extra fields, layout rules, an optional form
//! override, a post-processing step, and a change hook called before a
//! child record is saved.
//!
//! Admin views declare inline models loosely as [`InlineModel`] values;
//! [`InlineConverterBase::get_info`] normalizes them, and
//! [`InlineModelConverter::contribute`] attaches the child form to the
//! parent form class as an inline field list.

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use formgen_core::logging::DEPRECATION_TARGET;
use formgen_core::utils::text::prettify_name;
use formgen_core::{FormgenError, FormgenResult};
use formgen_forms::fields::{FormFieldDef, FormFieldType};
use formgen_forms::form::{BoundForm, FormClass};
use formgen_forms::rules::{Rule, RuleSet};
use formgen_forms::widgets::HiddenInput;
use formgen_model::model::{ModelInstance, ModelMeta, RelationKind};

use crate::model_converter::{AdminModelConverter, FieldArgs, FormOptions, ModelConverter};

/// Post-processing step applied to a generated inline form class.
pub type PostprocessFn = Arc<dyn Fn(FormClass) -> FormClass + Send + Sync>;

/// Hook receiving the submitted form, the record about to be saved, and
/// whether the record is new.
pub type ChangeFn = Arc<dyn Fn(&BoundForm, &mut ModelInstance, bool) -> FormgenResult<()> + Send + Sync>;

/// Hook of the older two-argument form, unaware of record creation.
pub type LegacyChangeFn = Arc<dyn Fn(&BoundForm, &mut ModelInstance) -> FormgenResult<()> + Send + Sync>;

/// A change hook together with its calling convention.
///
/// The convention is fixed when the hook is registered. Registering a
/// [`Legacy`](Self::Legacy) hook through [`ModelChangeHook::legacy`] logs a
/// deprecation warning; every later call passes exactly two arguments.
#[derive(Clone)]
pub enum ModelChangeHook {
    /// `(form, model, is_created)`.
    WithCreated(ChangeFn),
    /// `(form, model)`.
    Legacy(LegacyChangeFn),
}

impl ModelChangeHook {
    /// Registers a three-argument hook.
    pub fn with_created<F>(hook: F) -> Self
    where
        F: Fn(&BoundForm, &mut ModelInstance, bool) -> FormgenResult<()> + Send + Sync + 'static,
    {
        Self::WithCreated(Arc::new(hook))
    }

    /// Registers a two-argument hook.
    pub fn legacy<F>(hook: F) -> Self
    where
        F: Fn(&BoundForm, &mut ModelInstance) -> FormgenResult<()> + Send + Sync + 'static,
    {
        tracing::warn!(
            target: DEPRECATION_TARGET,
            "on_model_change hooks without an `is_created` argument are deprecated"
        );
        Self::Legacy(Arc::new(hook))
    }

    /// Calls the hook with the arguments its convention expects.
    pub fn call(
        &self,
        form: &BoundForm,
        model: &mut ModelInstance,
        is_created: bool,
    ) -> FormgenResult<()> {
        match self {
            Self::WithCreated(hook) => hook(form, model, is_created),
            Self::Legacy(hook) => hook(form, model),
        }
    }
}

impl fmt::Debug for ModelChangeHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WithCreated(_) => f.write_str("ModelChangeHook::WithCreated(..)"),
            Self::Legacy(_) => f.write_str("ModelChangeHook::Legacy(..)"),
        }
    }
}

/// Customization of one inline model's form. Every option defaults to unset.
#[derive(Clone, Default)]
pub struct InlineOptions {
    /// Class the generated child form starts from.
    pub form_base_class: Option<FormClass>,
    /// Columns to include, in order.
    pub form_columns: Option<Vec<String>>,
    /// Columns to leave out.
    pub form_excluded_columns: Option<Vec<String>>,
    /// Per-field overrides.
    pub form_args: Option<HashMap<String, FieldArgs>>,
    /// Fields added to the generated child form.
    pub form_extra_fields: Option<Vec<FormFieldDef>>,
    /// Layout rules for the child form.
    pub form_rules: Option<Vec<Rule>>,
    /// Label of the inline field list on the parent form.
    pub form_label: Option<String>,
    /// A ready-made child form used instead of a generated one.
    pub form: Option<FormClass>,
    /// Post-processing applied to the child form.
    pub postprocess: Option<PostprocessFn>,
    /// Hook called before a child record is saved.
    pub on_model_change: Option<ModelChangeHook>,
}

impl InlineOptions {
    /// Creates options with everything unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base class of the generated child form.
    #[must_use]
    pub fn form_base_class(mut self, base: FormClass) -> Self {
        self.form_base_class = Some(base);
        self
    }

    /// Sets the included columns.
    #[must_use]
    pub fn form_columns(mut self, columns: Vec<&str>) -> Self {
        self.form_columns = Some(columns.into_iter().map(String::from).collect());
        self
    }

    /// Sets the excluded columns.
    #[must_use]
    pub fn form_excluded_columns(mut self, columns: Vec<&str>) -> Self {
        self.form_excluded_columns = Some(columns.into_iter().map(String::from).collect());
        self
    }

    /// Adds overrides for one field.
    #[must_use]
    pub fn form_arg(mut self, name: impl Into<String>, args: FieldArgs) -> Self {
        self.form_args
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), args);
        self
    }

    /// Adds an extra field.
    #[must_use]
    pub fn form_extra_field(mut self, field: FormFieldDef) -> Self {
        self.form_extra_fields
            .get_or_insert_with(Vec::new)
            .push(field);
        self
    }

    /// Sets the layout rules.
    #[must_use]
    pub fn form_rules(mut self, rules: Vec<Rule>) -> Self {
        self.form_rules = Some(rules);
        self
    }

    /// Sets the inline field list's label.
    #[must_use]
    pub fn form_label(mut self, label: impl Into<String>) -> Self {
        self.form_label = Some(label.into());
        self
    }

    /// Uses `form` instead of generating the child form.
    #[must_use]
    pub fn form(mut self, form: FormClass) -> Self {
        self.form = Some(form);
        self
    }

    /// Sets the post-processing step.
    #[must_use]
    pub fn postprocess<F>(mut self, f: F) -> Self
    where
        F: Fn(FormClass) -> FormClass + Send + Sync + 'static,
    {
        self.postprocess = Some(Arc::new(f));
        self
    }

    /// Sets the change hook.
    #[must_use]
    pub fn on_model_change(mut self, hook: ModelChangeHook) -> Self {
        self.on_model_change = Some(hook);
        self
    }
}

impl fmt::Debug for InlineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineOptions")
            .field("form_base_class", &self.form_base_class.as_ref().map(|c| &c.name))
            .field("form_columns", &self.form_columns)
            .field("form_excluded_columns", &self.form_excluded_columns)
            .field("form_args", &self.form_args.as_ref().map(HashMap::len))
            .field("form_extra_fields", &self.form_extra_fields.as_ref().map(Vec::len))
            .field("form_rules", &self.form_rules)
            .field("form_label", &self.form_label)
            .field("form", &self.form.as_ref().map(|c| &c.name))
            .field("postprocess", &self.postprocess.is_some())
            .field("on_model_change", &self.on_model_change)
            .finish()
    }
}

/// Inline form configuration without a bound model.
#[derive(Debug, Clone)]
pub struct InlineBaseFormAdmin {
    options: InlineOptions,
    rule_set: Option<RuleSet>,
}

impl InlineBaseFormAdmin {
    /// Creates the configuration, compiling `form_rules` if given.
    pub fn new(options: InlineOptions) -> Self {
        Self::with_owner("inline", options)
    }

    fn with_owner(owner: &str, options: InlineOptions) -> Self {
        let rule_set = options
            .form_rules
            .as_ref()
            .map(|rules| RuleSet::new(owner, rules.clone()));
        Self { options, rule_set }
    }

    /// The configured options.
    pub const fn options(&self) -> &InlineOptions {
        &self.options
    }

    /// The compiled layout rules, if `form_rules` was set.
    pub const fn rule_set(&self) -> Option<&RuleSet> {
        self.rule_set.as_ref()
    }

    /// The inline field list's label override.
    pub fn form_label(&self) -> Option<&str> {
        self.options.form_label.as_deref()
    }

    /// The child form override. `None` means the form is generated.
    pub const fn get_form(&self) -> Option<&FormClass> {
        self.options.form.as_ref()
    }

    /// Applies the configured post-processing step, if any.
    pub fn postprocess_form(&self, form: FormClass) -> FormClass {
        match &self.options.postprocess {
            Some(postprocess) => postprocess(form),
            None => form,
        }
    }

    /// Called before a record produced by this inline form is saved.
    ///
    /// Does nothing unless a hook is configured. Hook errors propagate.
    pub fn on_model_change(
        &self,
        form: &BoundForm,
        model: &mut ModelInstance,
        is_created: bool,
    ) -> FormgenResult<()> {
        match &self.options.on_model_change {
            Some(hook) => hook.call(form, model, is_created),
            None => Ok(()),
        }
    }
}

/// Inline form configuration for a related model.
#[derive(Debug, Clone)]
pub struct InlineFormAdmin {
    /// The child model.
    pub model: Arc<ModelMeta>,
    base: InlineBaseFormAdmin,
}

impl InlineFormAdmin {
    /// Creates the configuration for `model`.
    pub fn new(model: Arc<ModelMeta>, options: InlineOptions) -> Self {
        let base = InlineBaseFormAdmin::with_owner(&model.name, options);
        Self { model, base }
    }
}

impl Deref for InlineFormAdmin {
    type Target = InlineBaseFormAdmin;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

/// An inline model as declared on an admin view.
#[derive(Debug, Clone)]
pub enum InlineModel {
    /// A model with options.
    Options(Arc<ModelMeta>, InlineOptions),
    /// A ready-made configuration.
    Admin(InlineFormAdmin),
    /// A bare model; its configuration is all defaults.
    Model(Arc<ModelMeta>),
}

impl From<InlineFormAdmin> for InlineModel {
    fn from(admin: InlineFormAdmin) -> Self {
        Self::Admin(admin)
    }
}

impl From<Arc<ModelMeta>> for InlineModel {
    fn from(model: Arc<ModelMeta>) -> Self {
        Self::Model(model)
    }
}

/// Normalization and labeling of inline model declarations.
pub trait InlineConverterBase {
    /// The owning view's labels by field name.
    fn column_labels(&self) -> &HashMap<String, String>;

    /// Normalizes a declaration into a configuration.
    ///
    /// Options build a new configuration and a configuration passes through.
    /// A bare model yields `None`, leaving normalization to the caller.
    fn get_info(&self, inline: &InlineModel) -> Option<InlineFormAdmin> {
        match inline {
            InlineModel::Options(model, options) => {
                Some(InlineFormAdmin::new(Arc::clone(model), options.clone()))
            }
            InlineModel::Admin(admin) => Some(admin.clone()),
            InlineModel::Model(_) => None,
        }
    }

    /// Label for the inline field `name`: the configured `form_label`, then
    /// the view's column label, otherwise `None`.
    fn get_label(&self, info: &InlineBaseFormAdmin, name: &str) -> Option<String> {
        info.form_label()
            .map(str::to_string)
            .or_else(|| self.column_labels().get(name).cloned())
    }
}

/// Builds inline child forms for related models.
#[derive(Debug, Clone)]
pub struct InlineModelConverter {
    column_labels: HashMap<String, String>,
    converter: AdminModelConverter,
}

impl InlineConverterBase for InlineModelConverter {
    fn column_labels(&self) -> &HashMap<String, String> {
        &self.column_labels
    }
}

impl InlineModelConverter {
    /// Creates a converter for a view with the given column labels.
    pub const fn new(column_labels: HashMap<String, String>, converter: AdminModelConverter) -> Self {
        Self {
            column_labels,
            converter,
        }
    }

    /// Attaches the inline model `inline` to `form_class`, the form of
    /// `parent`.
    ///
    /// The parent must have a one-to-many or many-to-many relation to the
    /// child model; the inline field list takes that relation's name.
    ///
    /// # Errors
    ///
    /// Returns [`FormgenError::ImproperlyConfigured`] if no such relation
    /// exists, if the layout rules name fields the child form lacks, or if
    /// the child form cannot be generated.
    pub fn contribute(
        &self,
        parent: &ModelMeta,
        mut form_class: FormClass,
        inline: &InlineModel,
    ) -> FormgenResult<(FormClass, InlineFormAdmin)> {
        let info = match (self.get_info(inline), inline) {
            (Some(info), _) => info,
            (None, InlineModel::Model(model)) => {
                InlineFormAdmin::new(Arc::clone(model), InlineOptions::default())
            }
            (None, _) => {
                return Err(FormgenError::ImproperlyConfigured(
                    "Cannot normalize inline model declaration".to_string(),
                ))
            }
        };
        let child = &info.model;

        let (relation_name, remote_field) = parent
            .relations()
            .find_map(|field| {
                let relation = field.relation.as_ref()?;
                let to_child = relation.target == child.name
                    && matches!(relation.kind, RelationKind::OneToMany | RelationKind::ManyToMany);
                to_child.then(|| (field.name.clone(), relation.remote_field.clone()))
            })
            .ok_or_else(|| {
                FormgenError::ImproperlyConfigured(format!(
                    "Cannot find reverse relation for model '{}' on '{}'",
                    child.name, parent.name
                ))
            })?;

        let mut child_form = match info.get_form() {
            Some(form) => form.clone(),
            None => {
                let form = self.converter.get_form(child, &Self::child_options(&info, remote_field))?;
                Self::with_pk_field(form, child)
            }
        };

        child_form = info.postprocess_form(child_form);

        if let Some(rule_set) = info.rule_set() {
            let missing = rule_set.missing_fields(&child_form);
            if !missing.is_empty() {
                return Err(FormgenError::ImproperlyConfigured(format!(
                    "Rules for inline model '{}' name unknown fields: {}",
                    child.name,
                    missing.join(", ")
                )));
            }
        }

        let label = self
            .get_label(&info, &relation_name)
            .unwrap_or_else(|| prettify_name(&relation_name));
        form_class.set_field(
            FormFieldDef::new(
                relation_name.clone(),
                FormFieldType::InlineList {
                    form: Box::new(child_form),
                    min_entries: 0,
                },
            )
            .label(label)
            .required(false),
        );

        tracing::debug!(
            parent = %parent.name,
            child = %child.name,
            field = %relation_name,
            "contributed inline form"
        );
        Ok((form_class, info))
    }

    fn child_options(info: &InlineFormAdmin, remote_field: Option<String>) -> FormOptions {
        let options = info.options();
        let mut exclude = options.form_excluded_columns.clone().unwrap_or_default();
        exclude.extend(remote_field);

        FormOptions {
            name: Some(format!("{}InlineForm", info.model.name)),
            base_class: options.form_base_class.clone(),
            only: options.form_columns.clone(),
            exclude,
            field_args: options.form_args.clone().unwrap_or_default(),
            extra_fields: options.form_extra_fields.clone().unwrap_or_default(),
            column_labels: HashMap::new(),
            column_descriptions: HashMap::new(),
        }
    }

    /// Rows are matched to existing records by a hidden primary key.
    fn with_pk_field(mut form: FormClass, model: &ModelMeta) -> FormClass {
        if let Some(pk) = model.primary_key() {
            if !form.contains(&pk.name) {
                form.set_field(
                    FormFieldDef::new(
                        pk.name.clone(),
                        FormFieldType::Char {
                            min_length: None,
                            max_length: None,
                            strip: true,
                        },
                    )
                    .required(false)
                    .widget(Arc::new(HiddenInput)),
                );
            }
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use formgen_core::Settings;
    use formgen_model::model::ModelField;
    use formgen_model::types;

    fn comment_meta() -> Arc<ModelMeta> {
        Arc::new(ModelMeta::new(
            "Comment",
            vec![
                ModelField::new("id", &types::INTEGER).primary_key(),
                ModelField::new("body", &types::TEXT),
                ModelField::new("email", &types::EMAIL).nullable(),
                ModelField::new("post_id", &types::INTEGER),
                ModelField::relation("post", "Post", RelationKind::ManyToOne),
            ],
        ))
    }

    fn post_meta() -> ModelMeta {
        ModelMeta::new(
            "Post",
            vec![
                ModelField::new("id", &types::INTEGER).primary_key(),
                ModelField::new("title", &types::STRING),
                ModelField::relation("comments", "Comment", RelationKind::OneToMany)
                    .remote_field("post_id"),
            ],
        )
    }

    fn inline_converter(labels: &[(&str, &str)]) -> InlineModelConverter {
        let labels = labels
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        InlineModelConverter::new(
            labels,
            AdminModelConverter::from_settings(&Settings::default()).unwrap(),
        )
    }

    #[test]
    fn test_options_default_unset() {
        let options = InlineOptions::new();
        assert!(options.form_columns.is_none());
        assert!(options.form_excluded_columns.is_none());
        assert!(options.form_args.is_none());
        assert!(options.form_extra_fields.is_none());
        assert!(options.form_rules.is_none());
        assert!(options.form_base_class.is_none());
        let admin = InlineBaseFormAdmin::new(options);
        assert!(admin.rule_set().is_none());
        assert!(admin.get_form().is_none());
    }

    #[test]
    fn test_rules_compiled_with_owner() {
        let admin = InlineFormAdmin::new(
            comment_meta(),
            InlineOptions::new().form_rules(vec!["body".into()]),
        );
        let rule_set = admin.rule_set().unwrap();
        assert_eq!(rule_set.owner(), "Comment");
        assert_eq!(rule_set.visible_fields(), ["body"]);
    }

    #[test]
    fn test_postprocess_default_is_identity() {
        let admin = InlineBaseFormAdmin::new(InlineOptions::new());
        let form = FormClass::new("F").with_field(FormFieldDef::new("a", FormFieldType::Boolean));
        assert_eq!(admin.postprocess_form(form).field_names(), ["a"]);
    }

    #[test]
    fn test_get_info_shapes() {
        let conv = inline_converter(&[]);
        let model = comment_meta();

        let from_options = conv
            .get_info(&InlineModel::Options(
                Arc::clone(&model),
                InlineOptions::new().form_label("Notes"),
            ))
            .unwrap();
        assert_eq!(from_options.form_label(), Some("Notes"));

        let admin = InlineFormAdmin::new(Arc::clone(&model), InlineOptions::new().form_label("X"));
        let passed = conv.get_info(&admin.into()).unwrap();
        assert_eq!(passed.form_label(), Some("X"));

        assert!(conv.get_info(&InlineModel::Model(model)).is_none());
    }

    #[test]
    fn test_get_label_order() {
        let conv = inline_converter(&[("email", "E-mail")]);
        let plain = InlineBaseFormAdmin::new(InlineOptions::new());
        assert_eq!(conv.get_label(&plain, "email").as_deref(), Some("E-mail"));
        assert_eq!(conv.get_label(&plain, "body"), None);

        let custom = InlineBaseFormAdmin::new(InlineOptions::new().form_label("Custom"));
        assert_eq!(conv.get_label(&custom, "email").as_deref(), Some("Custom"));
    }

    #[test]
    fn test_on_model_change_hooks() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let admin = InlineBaseFormAdmin::new(InlineOptions::new().on_model_change(
            ModelChangeHook::with_created(move |_, model, is_created| {
                assert!(is_created);
                model.set("touched", true);
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        ));
        let form = FormClass::new("F").instantiate();
        let mut record = ModelInstance::new("Comment");
        admin.on_model_change(&form, &mut record, true).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert!(record.get("touched").is_some());

        let noop = InlineBaseFormAdmin::new(InlineOptions::new());
        assert!(noop.on_model_change(&form, &mut record, false).is_ok());
    }

    #[test]
    fn test_legacy_hook_called_with_two_arguments_every_time() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let hook = ModelChangeHook::legacy(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        assert!(matches!(hook, ModelChangeHook::Legacy(_)));

        let form = FormClass::new("F").instantiate();
        let mut record = ModelInstance::new("Comment");
        hook.call(&form, &mut record, true).unwrap();
        hook.call(&form, &mut record, false).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_hook_error_propagates() {
        let hook = ModelChangeHook::legacy(|_, _| {
            Err(FormgenError::ConfigurationError("boom".to_string()))
        });
        let form = FormClass::new("F").instantiate();
        let mut record = ModelInstance::new("Comment");
        assert!(hook.call(&form, &mut record, true).is_err());
    }

    #[test]
    fn test_contribute_bare_model() {
        let conv = inline_converter(&[]);
        let (form, info) = conv
            .contribute(&post_meta(), FormClass::new("PostForm"), &InlineModel::Model(comment_meta()))
            .unwrap();
        assert_eq!(info.model.name, "Comment");

        let field = form.field("comments").unwrap();
        assert_eq!(field.label, "Comments");
        assert!(!field.required);
        let FormFieldType::InlineList { form: child, .. } = &field.field_type else {
            panic!("expected inline list");
        };
        assert_eq!(child.name, "CommentInlineForm");
        assert_eq!(child.field_names(), ["body", "email", "id"]);
        assert!(!child.field("id").unwrap().required);
    }

    #[test]
    fn test_contribute_with_options() {
        let conv = inline_converter(&[("comments", "Replies")]);
        let inline = InlineModel::Options(
            comment_meta(),
            InlineOptions::new()
                .form_columns(vec!["email", "body"])
                .form_arg("body", FieldArgs::new().label("Text"))
                .postprocess(|mut form| {
                    form.remove_field("email");
                    form
                }),
        );
        let (form, _) = conv
            .contribute(&post_meta(), FormClass::new("PostForm"), &inline)
            .unwrap();
        let field = form.field("comments").unwrap();
        assert_eq!(field.label, "Replies");
        let FormFieldType::InlineList { form: child, .. } = &field.field_type else {
            panic!("expected inline list");
        };
        assert_eq!(child.field_names(), ["body", "id"]);
        assert_eq!(child.field("body").unwrap().label, "Text");
    }

    #[test]
    fn test_contribute_uses_form_override() {
        let conv = inline_converter(&[]);
        let custom = FormClass::new("Custom")
            .with_field(FormFieldDef::new("note", FormFieldType::Text { max_length: None }));
        let inline = InlineModel::Options(comment_meta(), InlineOptions::new().form(custom));
        let (form, _) = conv
            .contribute(&post_meta(), FormClass::new("PostForm"), &inline)
            .unwrap();
        let FormFieldType::InlineList { form: child, .. } = &form.field("comments").unwrap().field_type
        else {
            panic!("expected inline list");
        };
        assert_eq!(child.name, "Custom");
        assert_eq!(child.field_names(), ["note"]);
    }

    #[test]
    fn test_contribute_without_relation() {
        let conv = inline_converter(&[]);
        let orphan = Arc::new(ModelMeta::new(
            "Tag",
            vec![ModelField::new("id", &types::INTEGER).primary_key()],
        ));
        let err = conv
            .contribute(&post_meta(), FormClass::new("PostForm"), &InlineModel::Model(orphan))
            .unwrap_err();
        assert!(matches!(err, FormgenError::ImproperlyConfigured(_)));
    }

    #[test]
    fn test_contribute_rejects_rules_for_unknown_fields() {
        let conv = inline_converter(&[]);
        let inline = InlineModel::Options(
            comment_meta(),
            InlineOptions::new().form_rules(vec!["body".into(), "missing".into()]),
        );
        let err = conv
            .contribute(&post_meta(), FormClass::new("PostForm"), &inline)
            .unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_contribute_rules_see_postprocessed_fields() {
        let conv = inline_converter(&[]);
        let inline = InlineModel::Options(
            comment_meta(),
            InlineOptions::new()
                .form_rules(vec!["body".into(), "extra".into()])
                .postprocess(|form| {
                    form.with_field(FormFieldDef::new("extra", FormFieldType::Boolean))
                }),
        );
        let (form, _) = conv
            .contribute(&post_meta(), FormClass::new("PostForm"), &inline)
            .unwrap();
        let FormFieldType::InlineList { form: child, .. } =
            &form.field("comments").unwrap().field_type
        else {
            panic!("expected inline list");
        };
        assert!(child.contains("extra"));
    }
}
