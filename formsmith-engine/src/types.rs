//! Form definitions, responses, and the partial-update carriers used
//! by the store's authoring operations.
//!
//! Everything serializes to/from JSON via serde with camelCase keys to
//! match the persisted collection layout.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use formsmith_fields::{FieldDefinition, FieldId, FieldType, FieldValue, ValidationRule};

use crate::ids::{FormId, ResponseId};

/// One captured submission of a form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub id: ResponseId,
    pub submitted_at: DateTime<Utc>,
    /// Submitted values keyed by field key, in field order.
    pub data: IndexMap<String, FieldValue>,
}

impl FormResponse {
    pub fn new(data: IndexMap<String, FieldValue>) -> Self {
        Self {
            id: ResponseId::new(),
            submitted_at: Utc::now(),
            data,
        }
    }
}

/// A form: metadata, ordered fields, publication state, and captured
/// responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    pub id: FormId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub responses: Vec<FormResponse>,
}

impl FormDefinition {
    /// Create an empty draft form.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: FormId::new(),
            name: name.into(),
            description: description.into(),
            fields: Vec::new(),
            created_at: now,
            updated_at: now,
            is_published: false,
            published_at: None,
            responses: Vec::new(),
        }
    }

    /// Look up a field by id.
    pub fn field(&self, id: FieldId) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }
}

/// Configuration for a new field, merged over the default field
/// template by `add_field`. Everything except the type and label
/// defaults to empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldConfig {
    #[serde(flatten)]
    pub field_type: FieldType,
    pub label: String,
    pub placeholder: String,
    pub help_text: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<ValidationRule>,
}

impl FieldConfig {
    pub fn new(field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            field_type,
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = help_text.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_default_value(mut self, value: FieldValue) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_validation(mut self, rules: Vec<ValidationRule>) -> Self {
        self.validation = rules;
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            field_type: FieldType::Text,
            label: String::new(),
            placeholder: String::new(),
            help_text: String::new(),
            required: false,
            default_value: None,
            validation: Vec::new(),
        }
    }
}

/// Partial update for `update_field`. Set members replace the field's
/// current values; unset members leave them alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldUpdate {
    pub field_type: Option<FieldType>,
    pub label: Option<String>,
    /// Manual key override. Once set, the key stops following the
    /// label.
    pub key: Option<String>,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub required: Option<bool>,
    pub default_value: Option<FieldValue>,
    pub validation: Option<Vec<ValidationRule>>,
    pub order: Option<usize>,
}

impl FieldUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_default_value(mut self, value: FieldValue) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_validation(mut self, rules: Vec<ValidationRule>) -> Self {
        self.validation = Some(rules);
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }
}

/// Partial update for `update_form_config`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FormConfigUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl FormConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
