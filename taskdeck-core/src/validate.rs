//! Input validation for task fields.
//!
//! Raw, untrusted strings come in; either a well-formed value or a specific
//! rejection reason comes out. Nothing here touches the store — the
//! operations layer only writes after every field has validated.
//!
//! One strict due-date parser is used for both the add and update flows.
//! Accepting shape-only matches (separator positions without checking the
//! digits) on one path and a full parse on the other would let values like
//! `"2024-ab-cd xy:zw"` through on update; both paths share
//! [`parse_due_date`] instead.

use chrono::NaiveDateTime;

/// The exact due-date input format.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A rejected task field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Title was empty
    #[error("title cannot be empty")]
    EmptyTitle,

    /// Description was empty
    #[error("description cannot be empty")]
    EmptyDescription,

    /// Due date did not match `YYYY-MM-DD HH:MM`
    #[error("invalid date format, expected YYYY-MM-DD HH:MM")]
    InvalidDateFormat,
}

/// Validates a task title: any non-empty string passes.
///
/// No trimming is applied beyond what the caller supplies — `" "` is a
/// valid (if unhelpful) title.
pub fn validate_title(title: &str) -> Result<&str, ValidationError> {
    if title.is_empty() {
        Err(ValidationError::EmptyTitle)
    } else {
        Ok(title)
    }
}

/// Validates a task description: same rule as the title.
pub fn validate_description(description: &str) -> Result<&str, ValidationError> {
    if description.is_empty() {
        Err(ValidationError::EmptyDescription)
    } else {
        Ok(description)
    }
}

/// Parses an optional due date.
///
/// Empty input means "no due date" and maps to `Ok(None)`. Non-empty input
/// must match `YYYY-MM-DD HH:MM` exactly: 4-digit year, 2-digit month and
/// day, a literal space, 2-digit hour and minute. The shape check runs
/// before the calendar parse because chrono alone accepts unpadded numbers
/// (`2024-1-5 9:30`), which the format forbids.
///
/// # Example
///
/// ```
/// use taskdeck_core::validate::parse_due_date;
///
/// assert!(parse_due_date("").unwrap().is_none());
/// assert!(parse_due_date("2024-01-05 09:30").unwrap().is_some());
/// assert!(parse_due_date("2024-1-5 9:30").is_err());
/// ```
pub fn parse_due_date(input: &str) -> Result<Option<NaiveDateTime>, ValidationError> {
    if input.is_empty() {
        return Ok(None);
    }

    if !has_due_date_shape(input) {
        return Err(ValidationError::InvalidDateFormat);
    }

    // The shape is right; this rejects impossible calendar values (month 13,
    // hour 25, February 30th).
    NaiveDateTime::parse_from_str(input, DUE_DATE_FORMAT)
        .map(Some)
        .map_err(|_| ValidationError::InvalidDateFormat)
}

/// Byte-exact shape check for `YYYY-MM-DD HH:MM`.
fn has_due_date_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    if bytes.len() != 16 {
        return false;
    }

    bytes.iter().enumerate().all(|(i, &b)| match i {
        4 | 7 => b == b'-',
        10 => b == b' ',
        13 => b == b':',
        _ => b.is_ascii_digit(),
    })
}
