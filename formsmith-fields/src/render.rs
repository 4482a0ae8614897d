//! Control rendering and single-field validation.
//!
//! Every field type maps to exactly one interactive control, and a
//! submitted value is checked against the same rule schema derivation
//! produces, so authoring-time and fill-time validation cannot drift
//! apart.

use serde::{Deserialize, Serialize};

use crate::derive::{FieldValidator, ValidationResult};
use crate::types::{ControlKind, FieldDefinition, FieldOption, InputMode};
use crate::value::FieldValue;

/// Everything a UI layer needs to draw one field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ControlDescription {
    pub control: ControlKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_mode: Option<InputMode>,
    pub label: String,
    pub placeholder: String,
    pub help_text: String,
    pub required: bool,
    pub options: Vec<FieldOption>,
    pub value: FieldValue,
}

/// Describe the control for a field with its current value filled in.
/// Pure dispatch on the field type; unknown persisted types come out
/// as plain text inputs.
pub fn render_control(field: &FieldDefinition, current_value: &FieldValue) -> ControlDescription {
    let description = field.field_type.describe();
    ControlDescription {
        control: description.control,
        input_mode: description.input_mode,
        label: field.label.clone(),
        placeholder: field.placeholder.clone(),
        help_text: field.help_text.clone(),
        required: field.required,
        options: field.field_type.options().to_vec(),
        value: current_value.clone(),
    }
}

/// Toggle one option value in a checkbox-group value: a present value
/// is removed, an absent one appended. Unrelated entries keep their
/// order and are never duplicated. Non-list current values are treated
/// as an empty selection.
pub fn toggle_choice(current: &FieldValue, option_value: &str) -> FieldValue {
    let mut items = current.as_many().map(<[String]>::to_vec).unwrap_or_default();
    match items.iter().position(|v| v == option_value) {
        Some(index) => {
            items.remove(index);
        }
        None => items.push(option_value.to_string()),
    }
    FieldValue::Many(items)
}

/// Validate one field's submitted value against its derived rule.
pub fn validate_submission(field: &FieldDefinition, value: &FieldValue) -> ValidationResult {
    FieldValidator::for_field(field).validate(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldType;

    #[test]
    fn text_field_renders_single_line_input() {
        let field = FieldDefinition::new(FieldType::Email, "Email")
            .with_placeholder("you@example.com")
            .with_required(true);
        let control = render_control(&field, &FieldValue::empty_text());

        assert_eq!(control.control, ControlKind::SingleLine);
        assert_eq!(control.input_mode, Some(InputMode::Email));
        assert_eq!(control.placeholder, "you@example.com");
        assert!(control.required);
        assert!(control.options.is_empty());
    }

    #[test]
    fn textarea_renders_multi_line() {
        let field = FieldDefinition::new(FieldType::Textarea, "Bio");
        let control = render_control(&field, &FieldValue::empty_text());
        assert_eq!(control.control, ControlKind::MultiLine);
        assert_eq!(control.input_mode, None);
    }

    #[test]
    fn radio_renders_group_with_options() {
        let field = FieldDefinition::new(
            FieldType::Radio {
                options: vec![FieldOption::new("Yes", "yes"), FieldOption::new("No", "no")],
            },
            "Subscribe",
        );
        let control = render_control(&field, &FieldValue::Text("yes".into()));
        assert_eq!(control.control, ControlKind::RadioGroup);
        assert_eq!(control.options.len(), 2);
        assert_eq!(control.value, FieldValue::Text("yes".into()));
    }

    #[test]
    fn file_renders_picker() {
        let field = FieldDefinition::new(FieldType::File, "Resume");
        let control = render_control(&field, &FieldValue::Null);
        assert_eq!(control.control, ControlKind::FilePicker);
    }

    #[test]
    fn toggle_adds_absent_value() {
        let current = FieldValue::Many(vec!["a".into()]);
        let toggled = toggle_choice(&current, "b");
        assert_eq!(toggled, FieldValue::Many(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn toggle_removes_present_value_only() {
        let current = FieldValue::Many(vec!["a".into(), "b".into(), "c".into()]);
        let toggled = toggle_choice(&current, "b");
        assert_eq!(toggled, FieldValue::Many(vec!["a".into(), "c".into()]));
    }

    #[test]
    fn toggle_on_non_list_starts_fresh() {
        let toggled = toggle_choice(&FieldValue::Null, "a");
        assert_eq!(toggled, FieldValue::Many(vec!["a".into()]));

        let toggled = toggle_choice(&FieldValue::empty_text(), "a");
        assert_eq!(toggled, FieldValue::Many(vec!["a".into()]));
    }

    #[test]
    fn toggle_twice_restores_original() {
        let current = FieldValue::Many(vec!["a".into(), "b".into()]);
        let toggled = toggle_choice(&toggle_choice(&current, "c"), "c");
        assert_eq!(toggled, current);
    }

    #[test]
    fn validate_submission_matches_derived_rule() {
        let field = FieldDefinition::new(FieldType::Email, "Email").with_required(true);

        let result = validate_submission(&field, &FieldValue::empty_text());
        assert_eq!(result.message(), Some("Email is required"));

        let result = validate_submission(&field, &FieldValue::Text("a@b.co".into()));
        assert!(result.is_pass());
    }
}
