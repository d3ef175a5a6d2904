//! Admin view configuration.
//!
//! [`ModelAdmin`] collects the form-related settings of one model's admin
//! view and scaffolds the classes the view renders: the create/edit form
//! with its inline child forms, and the editable list form.

use std::collections::HashMap;
use std::sync::Arc;

use formgen_core::FormgenResult;
use formgen_forms::fields::FormFieldDef;
use formgen_forms::form::FormClass;
use formgen_forms::rules::{Rule, RuleSet};
use formgen_forms::widgets::Widget;
use formgen_model::model::ModelMeta;

use crate::inline::{InlineFormAdmin, InlineModel, InlineModelConverter};
use crate::list_form::{create_editable_list_form, ListForm};
use crate::model_converter::{AdminModelConverter, FieldArgs, FormOptions, ModelConverter};

/// Form configuration of a model's admin view.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use formgen_admin::model_admin::ModelAdmin;
/// use formgen_admin::model_converter::AdminModelConverter;
/// use formgen_model::model::{ModelField, ModelMeta};
/// use formgen_model::types;
///
/// let post = Arc::new(ModelMeta::new("Post", vec![
///     ModelField::new("id", &types::INTEGER).primary_key(),
///     ModelField::new("title", &types::STRING),
///     ModelField::new("views", &types::INTEGER),
/// ]));
///
/// let admin = ModelAdmin::new(post)
///     .column_label("views", "Page views")
///     .column_editable_list(vec!["views"]);
///
/// let converter = AdminModelConverter::new().unwrap();
/// let form = admin.scaffold_form(&converter).unwrap();
/// assert_eq!(form.field("views").unwrap().label, "Page views");
///
/// let list = admin.scaffold_list_form(&converter, None).unwrap().unwrap();
/// assert_eq!(list.editable_fields(), ["views"]);
/// ```
#[derive(Debug, Clone)]
pub struct ModelAdmin {
    /// The administered model.
    pub model: Arc<ModelMeta>,
    /// Labels by field name.
    pub column_labels: HashMap<String, String>,
    /// Help texts by field name.
    pub column_descriptions: HashMap<String, String>,
    /// Fields shown on the form, in order.
    pub form_columns: Option<Vec<String>>,
    /// Fields left off the form.
    pub form_excluded_columns: Vec<String>,
    /// Per-field overrides.
    pub form_args: HashMap<String, FieldArgs>,
    /// Fields added to the generated form.
    pub form_extra_fields: Vec<FormFieldDef>,
    /// Layout rules for the form.
    pub form_rules: Option<Vec<Rule>>,
    /// Class the generated form starts from.
    pub form_base_class: Option<FormClass>,
    /// Fields editable in place in the list view.
    pub column_editable_list: Vec<String>,
    /// Related models edited inside the form.
    pub inline_models: Vec<InlineModel>,
}

impl ModelAdmin {
    /// Creates a view configuration with defaults.
    pub fn new(model: Arc<ModelMeta>) -> Self {
        Self {
            model,
            column_labels: HashMap::new(),
            column_descriptions: HashMap::new(),
            form_columns: None,
            form_excluded_columns: Vec::new(),
            form_args: HashMap::new(),
            form_extra_fields: Vec::new(),
            form_rules: None,
            form_base_class: None,
            column_editable_list: Vec::new(),
            inline_models: Vec::new(),
        }
    }

    /// Sets a field's label.
    #[must_use]
    pub fn column_label(mut self, name: &str, label: &str) -> Self {
        self.column_labels.insert(name.to_string(), label.to_string());
        self
    }

    /// Sets a field's help text.
    #[must_use]
    pub fn column_description(mut self, name: &str, description: &str) -> Self {
        self.column_descriptions
            .insert(name.to_string(), description.to_string());
        self
    }

    /// Sets the form's fields.
    #[must_use]
    pub fn form_columns(mut self, fields: Vec<&str>) -> Self {
        self.form_columns = Some(fields.into_iter().map(String::from).collect());
        self
    }

    /// Sets the excluded fields.
    #[must_use]
    pub fn form_excluded_columns(mut self, fields: Vec<&str>) -> Self {
        self.form_excluded_columns = fields.into_iter().map(String::from).collect();
        self
    }

    /// Adds overrides for one field.
    #[must_use]
    pub fn form_arg(mut self, name: &str, args: FieldArgs) -> Self {
        self.form_args.insert(name.to_string(), args);
        self
    }

    /// Adds an extra field.
    #[must_use]
    pub fn form_extra_field(mut self, field: FormFieldDef) -> Self {
        self.form_extra_fields.push(field);
        self
    }

    /// Sets the layout rules.
    #[must_use]
    pub fn form_rules(mut self, rules: Vec<Rule>) -> Self {
        self.form_rules = Some(rules);
        self
    }

    /// Sets the base form class.
    #[must_use]
    pub fn form_base_class(mut self, base: FormClass) -> Self {
        self.form_base_class = Some(base);
        self
    }

    /// Sets the fields editable in the list view.
    #[must_use]
    pub fn column_editable_list(mut self, fields: Vec<&str>) -> Self {
        self.column_editable_list = fields.into_iter().map(String::from).collect();
        self
    }

    /// Adds an inline model.
    #[must_use]
    pub fn inline_model(mut self, inline: impl Into<InlineModel>) -> Self {
        self.inline_models.push(inline.into());
        self
    }

    /// The options the form is generated with.
    pub fn form_options(&self) -> FormOptions {
        FormOptions {
            name: None,
            base_class: self.form_base_class.clone(),
            only: self.form_columns.clone(),
            exclude: self.form_excluded_columns.clone(),
            field_args: self.form_args.clone(),
            extra_fields: self.form_extra_fields.clone(),
            column_labels: self.column_labels.clone(),
            column_descriptions: self.column_descriptions.clone(),
        }
    }

    /// The compiled layout rules, if any.
    pub fn form_rule_set(&self) -> Option<RuleSet> {
        self.form_rules
            .as_ref()
            .map(|rules| RuleSet::new(self.model.name.clone(), rules.clone()))
    }

    /// Generates the create/edit form, inline models included.
    pub fn scaffold_form(&self, converter: &AdminModelConverter) -> FormgenResult<FormClass> {
        let form = converter.get_form(&self.model, &self.form_options())?;
        let (form, _) = self.scaffold_inline_form_models(form, converter)?;
        Ok(form)
    }

    /// Attaches every inline model to `form`, returning the normalized
    /// inline configurations alongside.
    pub fn scaffold_inline_form_models(
        &self,
        mut form: FormClass,
        converter: &AdminModelConverter,
    ) -> FormgenResult<(FormClass, Vec<InlineFormAdmin>)> {
        let inline_converter =
            InlineModelConverter::new(self.column_labels.clone(), converter.clone());
        let mut infos = Vec::with_capacity(self.inline_models.len());
        for inline in &self.inline_models {
            let (next, info) = inline_converter.contribute(&self.model, form, inline)?;
            form = next;
            infos.push(info);
        }
        Ok((form, infos))
    }

    /// Generates the editable list form, or `None` when no column is
    /// editable in place.
    pub fn scaffold_list_form(
        &self,
        converter: &AdminModelConverter,
        widget: Option<Arc<dyn Widget>>,
    ) -> FormgenResult<Option<ListForm>> {
        if self.column_editable_list.is_empty() {
            return Ok(None);
        }
        let options = FormOptions {
            name: Some(format!("{}ListForm", self.model.name)),
            base_class: None,
            only: Some(self.column_editable_list.clone()),
            ..self.form_options()
        };
        let source = converter.get_form(&self.model, &options)?;
        create_editable_list_form(&FormClass::new("BaseListForm"), &source, widget).map(Some)
    }
}
