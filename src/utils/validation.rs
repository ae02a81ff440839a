use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, AppResult};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

const MAX_FIELD_LENGTH: usize = 320;

pub fn normalize_optional_string(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Trims a required field; blank or missing is a validation error naming it.
pub fn require_field(field: &str, value: Option<String>) -> AppResult<String> {
    require_text(field, value, MAX_FIELD_LENGTH)
}

pub fn require_text(field: &str, value: Option<String>, max_chars: usize) -> AppResult<String> {
    let value = normalize_optional_string(value)
        .ok_or_else(|| AppError::invalid_field(field, format!("{field} is required")))?;
    if value.chars().count() > max_chars {
        return Err(AppError::invalid_field(
            field,
            format!("{field} must be at most {max_chars} characters"),
        ));
    }
    Ok(value)
}

/// Optional free-text field: trimmed, blank becomes `None`, length capped.
pub fn optional_field(field: &str, value: Option<String>) -> AppResult<Option<String>> {
    match normalize_optional_string(value) {
        Some(value) => require_field(field, Some(value)).map(Some),
        None => Ok(None),
    }
}

/// Required, trimmed, lower-cased, and shaped like an address.
pub fn require_email(field: &str, value: Option<String>) -> AppResult<String> {
    let email = require_field(field, value)?.to_lowercase();
    if !EMAIL_PATTERN.is_match(&email) {
        return Err(AppError::invalid_field(
            field,
            format!("{field} must be a valid email address"),
        ));
    }
    Ok(email)
}
