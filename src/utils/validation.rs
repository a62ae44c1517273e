use crate::utils::error::{Result, StudyBuddyError};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(StudyBuddyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(StudyBuddyError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(StudyBuddyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StudyBuddyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(StudyBuddyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Request-side check: the field must be present and not blank.
/// Returns the trimmed value.
pub fn require_text<'a>(field_name: &str, value: &'a Option<String>) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(StudyBuddyError::missing_field(field_name)),
    }
}

/// Request-side check: the field must be present.
pub fn require_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| StudyBuddyError::missing_field(field_name))
}

/// Falls back to `default` when the field is missing or blank.
pub fn text_or<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => default,
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("groq.base_url", "https://api.groq.com").is_ok());
        assert!(validate_url("groq.base_url", "http://localhost:8080").is_ok());
        assert!(validate_url("groq.base_url", "").is_err());
        assert!(validate_url("groq.base_url", "invalid-url").is_err());
        assert!(validate_url("groq.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("numDays", 30, 1, 365).is_ok());
        assert!(validate_range("numDays", 0, 1, 365).is_err());
        assert!(validate_range("numDays", 366, 1, 365).is_err());
    }

    #[test]
    fn test_require_text() {
        let present = Some("  Physics ".to_string());
        assert_eq!(require_text("Subject", &present).unwrap(), "Physics");

        let blank = Some("   ".to_string());
        let err = require_text("Subject", &blank).unwrap_err();
        assert_eq!(err.to_string(), "Subject is required");

        assert!(require_text("Subject", &None).is_err());
    }

    #[test]
    fn test_text_or() {
        assert_eq!(text_or(&None, "General"), "General");
        assert_eq!(text_or(&Some(" ".to_string()), "General"), "General");
        assert_eq!(text_or(&Some("Chemistry".to_string()), "General"), "Chemistry");
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("student@example.com"));
        assert!(!is_valid_email("student@example"));
        assert!(!is_valid_email("student example@x.com"));
        assert!(!is_valid_email("@example.com"));
    }
}
