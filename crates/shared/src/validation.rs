//! Common validation utilities.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use std::borrow::Cow;
use validator::{ValidateUrl, ValidationError};

/// Maximum length of a machine field name.
pub const MAX_FIELD_NAME_LENGTH: usize = 100;

lazy_static::lazy_static! {
    /// Machine keys: lowercase letter first, then lowercase letters, digits or underscores.
    pub static ref FIELD_NAME_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z][a-z0-9_]*$").unwrap();

    /// Basic `local@domain.tld` shape.
    pub static ref EMAIL_REGEX: regex::Regex =
        regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    /// Telephone numbers: digits with optional leading +, spaces, dashes, dots and parentheses.
    pub static ref TEL_REGEX: regex::Regex =
        regex::Regex::new(r"^\+?\(?[0-9][0-9 ()\-.]{3,}$").unwrap();
}

/// Build a validation error with a code and a human readable message.
pub fn error_with_message(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Validates a machine field name (`^[a-z][a-z0-9_]*$`, at most 100 characters).
pub fn validate_field_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(error_with_message(
            "field_name_required",
            "Field name is required",
        ));
    }
    if name.len() > MAX_FIELD_NAME_LENGTH {
        return Err(error_with_message(
            "field_name_too_long",
            "Field name must be at most 100 characters",
        ));
    }
    if !FIELD_NAME_REGEX.is_match(name) {
        return Err(error_with_message(
            "field_name_format",
            "Field name must start with a lowercase letter and contain only lowercase letters, numbers and underscores",
        ));
    }
    Ok(())
}

/// Returns true when the value looks like `local@domain.tld`.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Returns true when the value parses as an absolute URL.
pub fn is_valid_url(value: &str) -> bool {
    !value.trim().is_empty() && value.validate_url()
}

/// Returns true when the value looks like a telephone number.
pub fn is_valid_tel(value: &str) -> bool {
    TEL_REGEX.is_match(value)
}

/// Returns true for calendar dates in `YYYY-MM-DD` form.
pub fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Returns true for RFC 3339 timestamps or local `YYYY-MM-DDTHH:MM[:SS]` values.
pub fn is_valid_datetime(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
}

/// Returns true for `HH:MM` or `HH:MM:SS` times of day.
pub fn is_valid_time(value: &str) -> bool {
    NaiveTime::parse_from_str(value, "%H:%M").is_ok()
        || NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok()
}
