//! Core field types for the form schema model.
//!
//! All types serialize to/from JSON via serde, matching the persisted
//! layout: a field definition carries its `type` tag inline, and choice
//! types carry their `options` next to it.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::key::generate_key;
use crate::rules::ValidationRule;
use crate::value::FieldValue;

/// Unique identifier for a field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldId(Ulid);

impl FieldId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FieldId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

/// A single option in a choice field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The type of a field, tagged on the persisted `type` key.
///
/// Choice types carry their options inline, so a select, radio, or
/// checkbox field cannot exist without an option list to draw from.
/// Anything unrecognized in persisted data lands on [`FieldType::Unknown`]
/// and renders as a plain text input instead of failing the load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldType {
    Text,
    Email,
    Password,
    Number,
    Phone,
    Textarea,
    Select { options: Vec<FieldOption> },
    Radio { options: Vec<FieldOption> },
    Checkbox { options: Vec<FieldOption> },
    Date,
    Time,
    File,
    Url,
    /// Fallback for unrecognized persisted type tags.
    #[serde(other)]
    Unknown,
}

/// The interactive control a field renders as.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ControlKind {
    SingleLine,
    MultiLine,
    SelectMenu,
    RadioGroup,
    CheckboxGroup,
    FilePicker,
}

/// Input flavor for single-line controls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum InputMode {
    Text,
    Email,
    Password,
    Number,
    Phone,
    Date,
    Time,
    Url,
}

/// The shape a field's default value takes when none is set explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValueKind {
    /// Empty string.
    Text,
    /// Zero.
    Number,
    /// The first option's value, or null when there are no options.
    FirstOption,
    /// Empty list.
    EmptyList,
}

/// Static description of a field type: the control it renders as,
/// whether it needs options, what its implicit default looks like, and
/// the input flavor for single-line controls.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescription {
    pub control: ControlKind,
    pub options_required: bool,
    pub default_kind: DefaultValueKind,
    pub input_mode: Option<InputMode>,
}

impl TypeDescription {
    fn single_line(mode: InputMode, default_kind: DefaultValueKind) -> Self {
        Self {
            control: ControlKind::SingleLine,
            options_required: false,
            default_kind,
            input_mode: Some(mode),
        }
    }
}

impl FieldType {
    /// Describe how this type renders and defaults. Total over every
    /// variant, so a corrupted or unknown persisted type degrades to a
    /// plain text input rather than failing the renderer.
    pub fn describe(&self) -> TypeDescription {
        match self {
            FieldType::Text | FieldType::Unknown => {
                TypeDescription::single_line(InputMode::Text, DefaultValueKind::Text)
            }
            FieldType::Email => {
                TypeDescription::single_line(InputMode::Email, DefaultValueKind::Text)
            }
            FieldType::Password => {
                TypeDescription::single_line(InputMode::Password, DefaultValueKind::Text)
            }
            FieldType::Number => {
                TypeDescription::single_line(InputMode::Number, DefaultValueKind::Number)
            }
            FieldType::Phone => {
                TypeDescription::single_line(InputMode::Phone, DefaultValueKind::Text)
            }
            FieldType::Date => {
                TypeDescription::single_line(InputMode::Date, DefaultValueKind::Text)
            }
            FieldType::Time => {
                TypeDescription::single_line(InputMode::Time, DefaultValueKind::Text)
            }
            FieldType::Url => TypeDescription::single_line(InputMode::Url, DefaultValueKind::Text),
            FieldType::Textarea => TypeDescription {
                control: ControlKind::MultiLine,
                options_required: false,
                default_kind: DefaultValueKind::Text,
                input_mode: None,
            },
            FieldType::Select { .. } => TypeDescription {
                control: ControlKind::SelectMenu,
                options_required: true,
                default_kind: DefaultValueKind::FirstOption,
                input_mode: None,
            },
            FieldType::Radio { .. } => TypeDescription {
                control: ControlKind::RadioGroup,
                options_required: true,
                default_kind: DefaultValueKind::FirstOption,
                input_mode: None,
            },
            FieldType::Checkbox { .. } => TypeDescription {
                control: ControlKind::CheckboxGroup,
                options_required: true,
                default_kind: DefaultValueKind::EmptyList,
                input_mode: None,
            },
            FieldType::File => TypeDescription {
                control: ControlKind::FilePicker,
                options_required: false,
                default_kind: DefaultValueKind::Text,
                input_mode: None,
            },
        }
    }

    /// True for the choice types that cannot render without options.
    pub fn options_required(&self) -> bool {
        matches!(
            self,
            FieldType::Select { .. } | FieldType::Radio { .. } | FieldType::Checkbox { .. }
        )
    }

    /// The option list for choice types, empty for everything else.
    pub fn options(&self) -> &[FieldOption] {
        match self {
            FieldType::Select { options }
            | FieldType::Radio { options }
            | FieldType::Checkbox { options } => options,
            _ => &[],
        }
    }
}

/// A single form field: identity, derived key, type, display strings,
/// and validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: FieldId,
    pub key: String,
    #[serde(flatten)]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub help_text: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<ValidationRule>,
    #[serde(default)]
    pub order: usize,
}

impl FieldDefinition {
    /// Create a field of the given type. The key is derived from the
    /// label; de-duplicating keys within a form is the store's job.
    pub fn new(field_type: FieldType, label: impl Into<String>) -> Self {
        let label = label.into();
        let key = generate_key(&label);
        Self {
            id: FieldId::new(),
            key,
            field_type,
            label,
            placeholder: String::new(),
            help_text: String::new(),
            required: false,
            default_value: None,
            validation: Vec::new(),
            order: 0,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
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

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// True while the key is exactly the one derived from the label.
    /// Suffixed and manually overridden keys stop tracking the label.
    pub fn key_derived_from_label(&self) -> bool {
        self.key == generate_key(&self.label)
    }
}
