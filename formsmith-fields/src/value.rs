//! Field value shapes.

use serde::{Deserialize, Serialize};

/// A value a field can hold: nothing, a string, a number, or a list of
/// strings for checkbox groups. File fields store the chosen file name
/// as a string.
///
/// Serializes untagged, so persisted data reads back as plain JSON
/// strings, numbers, arrays, and nulls.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Text(String),
    Number(f64),
    Many(Vec<String>),
}

impl FieldValue {
    /// An empty string, the text-like default.
    pub fn empty_text() -> Self {
        FieldValue::Text(String::new())
    }

    /// An empty list, the checkbox-group default.
    pub fn empty_list() -> Self {
        FieldValue::Many(Vec::new())
    }

    /// True when the value counts as empty for required-field checks:
    /// null, a blank string, or an empty list. Numbers are never
    /// blank, zero included.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) => false,
            FieldValue::Many(items) => items.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_many(&self) -> Option<&[String]> {
        match self {
            FieldValue::Many(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::Many(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_blank_string_are_blank() {
        assert!(FieldValue::Null.is_blank());
        assert!(FieldValue::empty_text().is_blank());
        assert!(FieldValue::Text("   ".into()).is_blank());
        assert!(!FieldValue::Text("x".into()).is_blank());
    }

    #[test]
    fn empty_list_is_blank() {
        assert!(FieldValue::empty_list().is_blank());
        assert!(!FieldValue::Many(vec!["a".into()]).is_blank());
    }

    #[test]
    fn zero_is_not_blank() {
        assert!(!FieldValue::Number(0.0).is_blank());
    }

    #[test]
    fn json_round_trip_keeps_plain_shapes() {
        let value = FieldValue::Text("hello".into());
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"hello\"");

        let value = FieldValue::Many(vec!["a".into(), "b".into()]);
        assert_eq!(serde_json::to_string(&value).unwrap(), "[\"a\",\"b\"]");

        let parsed: FieldValue = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, FieldValue::Null);

        let parsed: FieldValue = serde_json::from_str("42.5").unwrap();
        assert_eq!(parsed, FieldValue::Number(42.5));
    }
}
