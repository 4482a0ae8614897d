//! Field key generation.
//!
//! A field's label becomes its camel-case key, used as the data and
//! validation key everywhere downstream. The transform is deterministic
//! and idempotent: feeding a generated key back in returns it
//! unchanged.

/// Generate a camel-case key from a human label.
///
/// The trimmed label is split into words on runs of whitespace,
/// hyphens, and underscores, and before each uppercase character. The
/// first word is lowercased; every later word gets an uppercase first
/// character and a lowercase tail. Blank input yields an empty string,
/// which callers must reject before using it as a key.
///
/// Uniqueness is not guaranteed here; the store de-duplicates keys
/// within a form at write time.
pub fn generate_key(label: &str) -> String {
    let words = split_words(label);
    let mut key = String::with_capacity(label.len());
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            key.extend(word.chars().flat_map(char::to_lowercase));
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                key.extend(first.to_uppercase());
                key.extend(chars.flat_map(char::to_lowercase));
            }
        }
    }
    key
}

fn split_words(label: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for ch in label.trim().chars() {
        if ch.is_whitespace() || ch == '-' || ch == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if ch.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
            current.push(ch);
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaced_label_becomes_camel_case() {
        assert_eq!(generate_key("Email Address"), "emailAddress");
        assert_eq!(generate_key("Full Name"), "fullName");
        assert_eq!(generate_key("email"), "email");
    }

    #[test]
    fn hyphens_and_underscores_split_words() {
        assert_eq!(generate_key("first-name"), "firstName");
        assert_eq!(generate_key("first_name"), "firstName");
        assert_eq!(generate_key("first - name"), "firstName");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(generate_key("  Phone Number  "), "phoneNumber");
        assert_eq!(generate_key(""), "");
        assert_eq!(generate_key("   "), "");
    }

    #[test]
    fn digits_stay_attached() {
        assert_eq!(generate_key("Address 2"), "address2");
        assert_eq!(generate_key("Campaign-2024 Launch"), "campaign2024Launch");
    }

    #[test]
    fn copy_suffix_keeps_parentheses() {
        assert_eq!(generate_key("Name (copy)"), "name(copy)");
    }

    #[test]
    fn camel_case_input_is_a_fixed_point() {
        assert_eq!(generate_key("emailAddress"), "emailAddress");
        assert_eq!(generate_key("phoneNumber"), "phoneNumber");
    }

    #[test]
    fn generate_key_is_idempotent() {
        let labels = [
            "Email Address",
            "emailAddress",
            "HTTPServer",
            "a A B",
            "Name (copy)",
            "first-name_last",
            "  spaced   out  ",
            "Address 2",
            "X",
            "",
        ];
        for label in labels {
            let once = generate_key(label);
            assert_eq!(generate_key(&once), once, "not idempotent for {label:?}");
        }
    }
}
