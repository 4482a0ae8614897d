//! Schema derivation: an ordered field list becomes validators and
//! default values.
//!
//! Derivation is pure. It performs no I/O and structurally equal input
//! always produces structurally equal output, so authoring and
//! presentation can both derive on demand and agree on the result.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{FieldsError, Result};
use crate::rules::{BaseCheck, ValidationRule};
use crate::types::{DefaultValueKind, FieldDefinition, FieldType};
use crate::value::FieldValue;

/// Outcome of validating one field's submitted value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum ValidationResult {
    Pass,
    Fail { message: String },
}

impl ValidationResult {
    pub fn fail(message: impl Into<String>) -> Self {
        ValidationResult::Fail {
            message: message.into(),
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, ValidationResult::Pass)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationResult::Pass => None,
            ValidationResult::Fail { message } => Some(message),
        }
    }
}

/// The composed validation rule for a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValidator {
    pub key: String,
    pub label: String,
    pub required: bool,
    base: BaseCheck,
    rules: Vec<ValidationRule>,
}

impl FieldValidator {
    /// Build the validator for one field. Schema derivation uses this
    /// per field; the render pipeline uses it for single-field checks.
    pub fn for_field(field: &FieldDefinition) -> Self {
        let base = match &field.field_type {
            FieldType::Email => BaseCheck::Email,
            FieldType::Phone => BaseCheck::Phone,
            FieldType::Url => BaseCheck::Url,
            FieldType::Number => BaseCheck::Number,
            FieldType::Select { options } => {
                BaseCheck::OneOf(options.iter().map(|o| o.value.clone()).collect())
            }
            FieldType::Checkbox { .. } => BaseCheck::List,
            _ => BaseCheck::Text,
        };
        Self {
            key: field.key.clone(),
            label: field.label.clone(),
            required: field.required,
            base,
            rules: field.validation.clone(),
        }
    }

    /// Validate a submitted value. A blank value fails required fields
    /// with "{label} is required" and passes optional ones without
    /// running format checks. Otherwise the base check runs first, then
    /// the supplemental rules in order; the first failure wins.
    pub fn validate(&self, value: &FieldValue) -> ValidationResult {
        if value.is_blank() {
            if self.required {
                return ValidationResult::fail(format!("{} is required", self.label));
            }
            return ValidationResult::Pass;
        }
        if let Some(message) = self.base.check(value) {
            return ValidationResult::Fail { message };
        }
        for rule in &self.rules {
            if let Some(message) = rule.check(value) {
                return ValidationResult::Fail { message };
            }
        }
        ValidationResult::Pass
    }
}

/// A form's derived artifacts: per-key validators and defaults, in
/// field order.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSchema {
    pub validators: IndexMap<String, FieldValidator>,
    pub defaults: IndexMap<String, FieldValue>,
}

/// Derive validators and default values for an ordered field list.
///
/// Rejects blank and duplicate keys instead of letting a later field
/// silently overwrite an earlier one's entries.
pub fn derive(fields: &[FieldDefinition]) -> Result<DerivedSchema> {
    let mut validators = IndexMap::new();
    let mut defaults = IndexMap::new();
    for field in fields {
        if field.key.trim().is_empty() {
            return Err(FieldsError::blank_key(&field.label));
        }
        if validators.contains_key(&field.key) {
            return Err(FieldsError::duplicate_key(&field.key));
        }
        validators.insert(field.key.clone(), FieldValidator::for_field(field));
        defaults.insert(field.key.clone(), default_value(field));
    }
    Ok(DerivedSchema {
        validators,
        defaults,
    })
}

/// The effective default for a field: the explicit default when one is
/// set (falsy values like `""` and `0` count as set), otherwise the
/// type-driven fallback.
pub fn default_value(field: &FieldDefinition) -> FieldValue {
    if let Some(value) = &field.default_value {
        return value.clone();
    }
    match field.field_type.describe().default_kind {
        DefaultValueKind::Text => FieldValue::empty_text(),
        DefaultValueKind::Number => FieldValue::Number(0.0),
        DefaultValueKind::FirstOption => field
            .field_type
            .options()
            .first()
            .map(|option| FieldValue::Text(option.value.clone()))
            .unwrap_or(FieldValue::Null),
        DefaultValueKind::EmptyList => FieldValue::empty_list(),
    }
}
