//! Validation checks and per-field rules.
//!
//! Base checks are selected by field type during schema derivation;
//! supplemental [`ValidationRule`]s attach to individual fields and run
//! after the base check, in order. Failure messages match the strings
//! the form renderer shows end users.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$")
        .expect("phone pattern compiles")
});

/// The type-driven check a value must pass before supplemental rules.
///
/// Checks only run on non-blank values; required-field emptiness is
/// handled separately so optional fields accept blank input.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseCheck {
    /// Any string-shaped value passes.
    Text,
    Email,
    Phone,
    Url,
    Number,
    /// Value must be one of the listed option values.
    OneOf(Vec<String>),
    /// Checkbox groups hold a list of selected option values.
    List,
}

impl BaseCheck {
    /// Check a non-blank value, returning the failure message if it
    /// does not hold.
    pub fn check(&self, value: &FieldValue) -> Option<String> {
        match self {
            BaseCheck::Text => None,
            BaseCheck::Email => {
                let text = value.as_text().unwrap_or_default();
                (!EMAIL_RE.is_match(text)).then(|| "Invalid email address".to_string())
            }
            BaseCheck::Phone => {
                let text = value.as_text().unwrap_or_default();
                (!PHONE_RE.is_match(text)).then(|| "Invalid phone number".to_string())
            }
            BaseCheck::Url => {
                let text = value.as_text().unwrap_or_default();
                url::Url::parse(text)
                    .is_err()
                    .then(|| "Invalid URL".to_string())
            }
            BaseCheck::Number => {
                let parses = match value {
                    FieldValue::Number(_) => true,
                    FieldValue::Text(s) => s.trim().parse::<f64>().is_ok(),
                    _ => false,
                };
                (!parses).then(|| "Must be a number".to_string())
            }
            BaseCheck::OneOf(values) => {
                let text = value.as_text().unwrap_or_default();
                (!values.iter().any(|v| v == text)).then(|| "Invalid option".to_string())
            }
            BaseCheck::List => value
                .as_many()
                .is_none()
                .then(|| "Invalid selection".to_string()),
        }
    }
}

/// A supplemental validation rule attached to a field definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum ValidationRule {
    /// Minimum character count for string values.
    MinLength { min: usize },
    /// Maximum character count for string values.
    MaxLength { max: usize },
    /// Custom regex with its own failure message.
    Pattern { pattern: String, message: String },
}

impl ValidationRule {
    /// Check a non-blank value, returning the failure message if the
    /// rule does not hold. A pattern that fails to compile fails the
    /// check, so a misconfigured rule surfaces instead of passing
    /// everything.
    pub fn check(&self, value: &FieldValue) -> Option<String> {
        match self {
            ValidationRule::MinLength { min } => {
                let len = value.as_text().map(|s| s.chars().count()).unwrap_or(0);
                (len < *min).then(|| format!("Minimum {min} characters required"))
            }
            ValidationRule::MaxLength { max } => {
                let len = value.as_text().map(|s| s.chars().count()).unwrap_or(0);
                (len > *max).then(|| format!("Maximum {max} characters allowed"))
            }
            ValidationRule::Pattern { pattern, message } => {
                let text = value.as_text().unwrap_or_default();
                let matches = Regex::new(pattern)
                    .map(|re| re.is_match(text))
                    .unwrap_or(false);
                (!matches).then(|| message.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.into())
    }

    #[test]
    fn email_check_accepts_plain_addresses() {
        assert_eq!(BaseCheck::Email.check(&text("a@b.co")), None);
        assert_eq!(
            BaseCheck::Email.check(&text("not-an-email")),
            Some("Invalid email address".into())
        );
        assert_eq!(
            BaseCheck::Email.check(&text("a b@c.d")),
            Some("Invalid email address".into())
        );
    }

    #[test]
    fn phone_check_accepts_common_formats() {
        assert_eq!(BaseCheck::Phone.check(&text("555-123-4567")), None);
        assert_eq!(BaseCheck::Phone.check(&text("(555)123-4567")), None);
        assert_eq!(BaseCheck::Phone.check(&text("+555 123 4567")), None);
        assert_eq!(
            BaseCheck::Phone.check(&text("12")),
            Some("Invalid phone number".into())
        );
    }

    #[test]
    fn url_check_requires_parseable_url() {
        assert_eq!(BaseCheck::Url.check(&text("https://example.com")), None);
        assert_eq!(
            BaseCheck::Url.check(&text("example")),
            Some("Invalid URL".into())
        );
    }

    #[test]
    fn number_check_parses_text_and_numbers() {
        assert_eq!(BaseCheck::Number.check(&text("42")), None);
        assert_eq!(BaseCheck::Number.check(&text("-3.5")), None);
        assert_eq!(BaseCheck::Number.check(&FieldValue::Number(7.0)), None);
        assert_eq!(
            BaseCheck::Number.check(&text("abc")),
            Some("Must be a number".into())
        );
    }

    #[test]
    fn one_of_check_enforces_membership() {
        let check = BaseCheck::OneOf(vec!["A".into(), "B".into()]);
        assert_eq!(check.check(&text("A")), None);
        assert_eq!(check.check(&text("C")), Some("Invalid option".into()));
    }

    #[test]
    fn min_length_counts_characters() {
        let rule = ValidationRule::MinLength { min: 3 };
        assert_eq!(rule.check(&text("abc")), None);
        assert_eq!(
            rule.check(&text("ab")),
            Some("Minimum 3 characters required".into())
        );
    }

    #[test]
    fn max_length_counts_characters() {
        let rule = ValidationRule::MaxLength { max: 2 };
        assert_eq!(rule.check(&text("ab")), None);
        assert_eq!(
            rule.check(&text("abc")),
            Some("Maximum 2 characters allowed".into())
        );
    }

    #[test]
    fn pattern_rule_uses_its_own_message() {
        let rule = ValidationRule::Pattern {
            pattern: "^[0-9]{4}$".into(),
            message: "Must be a 4-digit code".into(),
        };
        assert_eq!(rule.check(&text("1234")), None);
        assert_eq!(rule.check(&text("12x4")), Some("Must be a 4-digit code".into()));
    }

    #[test]
    fn invalid_pattern_fails_the_check() {
        let rule = ValidationRule::Pattern {
            pattern: "([".into(),
            message: "broken".into(),
        };
        assert_eq!(rule.check(&text("anything")), Some("broken".into()));
    }

    #[test]
    fn rule_json_round_trip() {
        let rule = ValidationRule::MinLength { min: 8 };
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"rule":"minLength","min":8}"#);
        let parsed: ValidationRule = serde_json::from_str(&json).unwrap();
        assert_eq!(rule, parsed);
    }
}
