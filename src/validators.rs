//! Input validation and sanitization for kgdash
//!
//! Everything typed on the command line or read from the config file passes
//! through here before it reaches the list engine or the chart renderers.
//! Validators return `Result<T, String>` with a message fit for the user.

use crate::table::FieldFilter;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::num::NonZeroUsize;

/// Longest search term kept, in characters
pub const MAX_SEARCH_LEN: usize = 256;

/// Largest page size accepted for any list view
pub const MAX_PAGE_SIZE: usize = 500;

/// Sanitizes a free-text search term.
///
/// Removes control characters, trims surrounding whitespace and caps the
/// length at [`MAX_SEARCH_LEN`] characters.
///
/// # Examples
///
/// ```
/// use kgdash::validators::sanitize_search_term;
///
/// assert_eq!(sanitize_search_term("  pump\n"), "pump");
/// ```
pub fn sanitize_search_term(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_SEARCH_LEN)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Validates a page size.
///
/// # Errors
///
/// Returns `Err` if the size is 0 or above [`MAX_PAGE_SIZE`].
pub fn validate_page_size(size: usize) -> Result<NonZeroUsize, String> {
    if size > MAX_PAGE_SIZE {
        return Err(format!("Page size too large (max {MAX_PAGE_SIZE})"));
    }
    NonZeroUsize::new(size).ok_or_else(|| "Page size must be at least 1".to_string())
}

/// Validates a CSS hex colour (`#rgb` or `#rrggbb`).
///
/// # Errors
///
/// Returns `Err` if the value is not a `#` followed by 3 or 6 hex digits.
pub fn validate_hex_color(input: &str) -> Result<String, String> {
    let Some(digits) = input.strip_prefix('#') else {
        return Err(format!("Colour must start with '#': {input}"));
    };
    if !matches!(digits.len(), 3 | 6) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("Invalid hex colour: {input}"));
    }
    Ok(input.to_string())
}

/// Validates a record field name used in filters and sorting.
///
/// # Errors
///
/// Returns `Err` if the name is empty, longer than 64 characters, or contains
/// anything other than ASCII letters, digits and underscores.
pub fn validate_field_name(name: &str) -> Result<String, String> {
    if name.is_empty() {
        return Err("Field name cannot be empty".to_string());
    }
    if name.len() > 64 {
        return Err("Field name too long (max 64 characters)".to_string());
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("Invalid field name: {name}"));
    }
    Ok(name.to_string())
}

/// Parses a `--where` clause.
///
/// - `field=value` → exact match (`field=all` disables the filter)
/// - `field~value` → case-insensitive substring match
///
/// # Errors
///
/// Returns `Err` if the clause has no `=` or `~`, or the field name is invalid.
pub fn parse_field_filter(clause: &str) -> Result<(String, FieldFilter), String> {
    let split = clause
        .char_indices()
        .find(|(_, c)| matches!(c, '=' | '~'))
        .ok_or_else(|| format!("Expected field=value or field~value, got: {clause}"))?;
    let (index, op) = split;
    let field = validate_field_name(clause[..index].trim())?;
    let value = clause[index + op.len_utf8()..].trim();

    let filter = match op {
        '~' => FieldFilter::Contains(value.to_string()),
        _ => FieldFilter::from_selection(value),
    };
    Ok((field, filter))
}

/// Which end of a date range a bound is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

/// Parses a date-range bound: RFC 3339 (`2025-01-15T14:30:00Z`) or a plain
/// date (`2025-01-15`).
///
/// A plain date is the first instant of that day for a start bound and the
/// last instant for an end bound, so both ends of the range are inclusive.
///
/// # Errors
///
/// Returns `Err` if the input matches neither format.
pub fn parse_date_bound(input: &str, bound: Bound) -> Result<DateTime<Utc>, String> {
    let input = input.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date (use YYYY-MM-DD or RFC 3339): {input}"))?;
    let time = match bound {
        Bound::Start => NaiveTime::MIN,
        Bound::End => NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
            .ok_or_else(|| "Invalid end-of-day time".to_string())?,
    };
    Ok(date.and_time(time).and_utc())
}
