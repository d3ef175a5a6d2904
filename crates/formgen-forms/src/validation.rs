//! Validation pipeline for form processing.
//!
//! 1. Field-level validation (type coercion + per-field validators)
//! 2. Form-level cross-field validation through [`Form::clean`]
//!
//! Errors accumulate rather than short-circuiting, so all validation
//! issues are reported at once.

use std::collections::HashMap;

use formgen_core::{FormgenError, FormgenResult, ValidationError};
use formgen_model::value::Value;

use crate::fields::{clean_field_value, FormFieldDef};
use crate::form::Form;

/// Performs field-level validation for all fields.
///
/// Disabled fields keep their initial value and skip validation. Inline
/// list fields are skipped; their rows validate as nested forms.
pub fn clean_fields(
    field_defs: &[FormFieldDef],
    raw_data: &HashMap<String, Option<String>>,
    cleaned_data: &mut HashMap<String, Value>,
    errors: &mut HashMap<String, Vec<String>>,
) {
    for field in field_defs {
        if field.is_inline_list() {
            continue;
        }
        if field.disabled {
            if let Some(initial) = &field.initial {
                cleaned_data.insert(field.name.clone(), initial.clone());
            }
            continue;
        }

        let raw = raw_data.get(&field.name).and_then(|v| v.as_deref());
        match clean_field_value(field, raw) {
            Ok(value) => {
                cleaned_data.insert(field.name.clone(), value);
            }
            Err(field_errors) => {
                errors.insert(field.name.clone(), field_errors);
            }
        }
    }
}

/// Runs the full pipeline and converts failures into a [`FormgenError`].
///
/// An unbound form fails with an empty validation error.
pub fn full_clean(form: &mut dyn Form) -> FormgenResult<()> {
    if form.is_valid() {
        Ok(())
    } else {
        Err(FormgenError::ValidationError(ValidationError::from_messages(
            form.errors(),
        )))
    }
}
