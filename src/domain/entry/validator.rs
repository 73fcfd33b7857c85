//! Entry content validation and sanitization.
//!
//! Every text field of an entry goes through [`sanitize_field`] before it is
//! persisted, both on create and on partial update. The function is pure: the
//! same input always produces the same output or the same error.
//!
//! Per field, in order:
//!
//! 1. trim surrounding whitespace, reject if empty
//! 2. reject if longer than [`MAX_FIELD_LENGTH`] characters
//! 3. strip markup tags and injection characters (quotes, backticks, semicolons)
//! 4. trim again, reject if nothing is left
//! 5. reject anything outside letters, digits, whitespace and common punctuation

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Maximum length of each entry field, in characters.
pub const MAX_FIELD_LENGTH: usize = 256;

static MARKUP_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<>]*>").expect("valid tag regex"));

static INJECTION_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"['"`;]"#).expect("valid injection regex"));

static ALLOWED_CONTENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}\p{N}\s.,!?:()/&+#%@_\-]+$").expect("valid allow-list regex")
});

/// The three free-text fields of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Work,
    Struggle,
    Intention,
}

impl EntryField {
    pub const ALL: [EntryField; 3] = [EntryField::Work, EntryField::Struggle, EntryField::Intention];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryField::Work => "work",
            EntryField::Struggle => "struggle",
            EntryField::Intention => "intention",
        }
    }

    /// Label used when the entry is rendered as text.
    pub fn label(&self) -> &'static str {
        match self {
            EntryField::Work => "Work",
            EntryField::Struggle => "Struggle",
            EntryField::Intention => "Intention",
        }
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated and sanitized content of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryContent {
    pub work: String,
    pub struggle: String,
    pub intention: String,
}

/// Validates and sanitizes all three fields.
///
/// Fields are checked in order (work, struggle, intention); the first failure wins.
pub fn validate_and_sanitize(
    work: &str,
    struggle: &str,
    intention: &str,
) -> Result<EntryContent, ValidationError> {
    Ok(EntryContent {
        work: sanitize_field(EntryField::Work, work)?,
        struggle: sanitize_field(EntryField::Struggle, struggle)?,
        intention: sanitize_field(EntryField::Intention, intention)?,
    })
}

/// Validates and sanitizes a single field.
pub fn sanitize_field(field: EntryField, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field.as_str()));
    }

    let length = trimmed.chars().count();
    if length > MAX_FIELD_LENGTH {
        return Err(ValidationError::too_long(field.as_str(), MAX_FIELD_LENGTH, length));
    }

    let without_tags = MARKUP_TAG_RE.replace_all(trimmed, "");
    let stripped = INJECTION_CHARS_RE.replace_all(&without_tags, "");
    let cleaned = stripped.trim();

    if cleaned.is_empty() {
        return Err(ValidationError::empty_field(field.as_str()));
    }

    if !ALLOWED_CONTENT_RE.is_match(cleaned) {
        return Err(ValidationError::invalid_format(
            field.as_str(),
            "invalid_characters",
        ));
    }

    Ok(cleaned.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_plain_text() {
        let content = validate_and_sanitize("Studied APIs", "async", "practice DB").unwrap();
        assert_eq!(content.work, "Studied APIs");
        assert_eq!(content.struggle, "async");
        assert_eq!(content.intention, "practice DB");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let value = sanitize_field(EntryField::Work, "  Read the book \n").unwrap();
        assert_eq!(value, "Read the book");
    }

    #[test]
    fn rejects_empty_field() {
        let err = sanitize_field(EntryField::Work, "").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("work"));
    }

    #[test]
    fn rejects_whitespace_only_field() {
        let err = sanitize_field(EntryField::Struggle, "   \t ").unwrap_err();
        assert_eq!(err.field(), "struggle");
        assert_eq!(err.reason(), "empty");
    }

    #[test]
    fn accepts_exactly_max_length() {
        let value = "a".repeat(MAX_FIELD_LENGTH);
        assert_eq!(sanitize_field(EntryField::Work, &value).unwrap(), value);
    }

    #[test]
    fn rejects_one_over_max_length() {
        let value = "a".repeat(MAX_FIELD_LENGTH + 1);
        let err = sanitize_field(EntryField::Work, &value).unwrap_err();
        assert_eq!(err, ValidationError::too_long("work", 256, 257));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let value = "é".repeat(MAX_FIELD_LENGTH);
        assert!(sanitize_field(EntryField::Intention, &value).is_ok());
    }

    #[test]
    fn strips_markup_tags() {
        let value = sanitize_field(EntryField::Work, "<b>Bold</b> move <script>x</script>").unwrap();
        assert_eq!(value, "Bold move x");
    }

    #[test]
    fn strips_quotes_and_semicolons() {
        let value = sanitize_field(EntryField::Work, r#"Robert"); DROP TABLE entries"#).unwrap();
        assert_eq!(value, "Robert) DROP TABLE entries");
    }

    #[test]
    fn rejects_field_that_is_only_markup() {
        let err = sanitize_field(EntryField::Intention, "<br/><hr>").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("intention"));
    }

    #[test]
    fn rejects_characters_outside_allow_list() {
        let err = sanitize_field(EntryField::Work, "a < b").unwrap_err();
        assert_eq!(err.reason(), "invalid_characters");

        let err = sanitize_field(EntryField::Work, "curly {braces}").unwrap_err();
        assert_eq!(err.field(), "work");
    }

    #[test]
    fn accepts_common_punctuation() {
        let text = "Fixed 3 bugs, wrote tests (finally)! Next: deploy & review - 100% done?";
        assert_eq!(sanitize_field(EntryField::Work, text).unwrap(), text);
    }

    #[test]
    fn reports_first_failing_field() {
        let err = validate_and_sanitize("ok", "", "").unwrap_err();
        assert_eq!(err.field(), "struggle");
    }

    proptest! {
        #[test]
        fn alphanumeric_input_within_limit_is_preserved(s in "[A-Za-z0-9][A-Za-z0-9 ]{0,200}[A-Za-z0-9]") {
            let out = sanitize_field(EntryField::Work, &s).unwrap();
            prop_assert_eq!(out, s);
        }

        #[test]
        fn sanitized_output_never_contains_forbidden_characters(s in "\\PC{1,256}") {
            if let Ok(out) = sanitize_field(EntryField::Struggle, &s) {
                prop_assert!(!out.contains(['<', '>', '\'', '"', ';', '`']));
                prop_assert!(!out.is_empty());
                prop_assert!(out.chars().count() <= MAX_FIELD_LENGTH);
                prop_assert_eq!(out.trim(), out.as_str());
            }
        }

        #[test]
        fn sanitizing_is_idempotent(s in "\\PC{1,256}") {
            if let Ok(once) = sanitize_field(EntryField::Intention, &s) {
                let twice = sanitize_field(EntryField::Intention, &once).unwrap();
                prop_assert_eq!(once, twice);
            }
        }
    }
}
