// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::Date;
use time::macros::format_description;

/// Maximum length of names, locations and similar short fields.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of free-text descriptions.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Smallest and largest accepted space capacity.
pub const CAPACITY_RANGE: std::ops::RangeInclusive<i64> = 1..=1000;

/// Validates a short, required text field and returns it trimmed.
///
/// # Arguments
///
/// * `field` - The field name used in the error message
/// * `value` - The raw value
///
/// # Errors
///
/// Returns an error if the trimmed value is empty or longer than
/// `MAX_NAME_LENGTH` characters.
pub fn validate_name(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed: &str = value.trim();

    // Rule: name must not be empty
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName {
            field,
            reason: String::from("cannot be empty"),
        });
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidName {
            field,
            reason: format!("must be at most {MAX_NAME_LENGTH} characters"),
        });
    }

    Ok(trimmed.to_string())
}

/// Validates an email address and returns it trimmed and lowercased.
///
/// This is a structural check only: one `@`, a non-empty local part, and a
/// dotted domain without whitespace.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is malformed.
pub fn validate_email(email: &str) -> Result<String, DomainError> {
    let normalized: String = email.trim().to_lowercase();
    let invalid = || DomainError::InvalidEmail(email.to_string());

    if normalized.len() > 254 || normalized.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = normalized.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(normalized)
}

/// Validates a space capacity.
///
/// # Errors
///
/// Returns `DomainError::InvalidCapacity` if the capacity is outside 1..=1000.
pub fn validate_capacity(capacity: i64) -> Result<u16, DomainError> {
    if !CAPACITY_RANGE.contains(&capacity) {
        return Err(DomainError::InvalidCapacity { capacity });
    }
    u16::try_from(capacity).map_err(|_| DomainError::InvalidCapacity { capacity })
}

/// Validates a department code and returns it uppercased.
///
/// # Errors
///
/// Returns `DomainError::InvalidDepartmentCode` unless the code is 2 to 10
/// ASCII letters or digits.
pub fn validate_department_code(code: &str) -> Result<String, DomainError> {
    let trimmed: &str = code.trim();
    if !(2..=10).contains(&trimmed.len()) || !trimmed.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(DomainError::InvalidDepartmentCode(code.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Normalizes an optional description.
///
/// Blank descriptions become `None`.
///
/// # Errors
///
/// Returns `DomainError::DescriptionTooLong` if the description exceeds
/// `MAX_DESCRIPTION_LENGTH` characters.
pub fn validate_description(description: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(text) = description.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    let length: usize = text.chars().count();
    if length > MAX_DESCRIPTION_LENGTH {
        return Err(DomainError::DescriptionTooLong {
            length,
            max: MAX_DESCRIPTION_LENGTH,
        });
    }

    Ok(Some(text.to_string()))
}

/// Validates that a reservation date is not before `today`.
///
/// # Errors
///
/// Returns `DomainError::DateInPast` if `date < today`.
pub fn validate_not_past(date: Date, today: Date) -> Result<(), DomainError> {
    if date < today {
        return Err(DomainError::DateInPast { date });
    }
    Ok(())
}

/// Parses an ISO `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(date_string: &str) -> Result<Date, DomainError> {
    Date::parse(
        date_string.trim(),
        format_description!("[year]-[month]-[day]"),
    )
    .map_err(|e| DomainError::DateParseError {
        date_string: date_string.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as ISO `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
