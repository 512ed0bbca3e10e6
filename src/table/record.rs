//! Field access for list-view records
//!
//! The engine never knows concrete record types. Each type exposes its
//! columns by name through [`Record::field`] and the text used by free-text
//! search through [`Record::search_text`].

use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::fmt;

/// A typed column value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Number(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl<'a> FieldValue<'a> {
    pub fn text(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }

    /// Wraps an enum whose `as_ref()` is its wire name (e.g. `partially_mapped`)
    pub fn status<S: AsRef<str> + ?Sized>(value: &'a S) -> Self {
        Self::Text(Cow::Borrowed(value.as_ref()))
    }

    pub fn count(value: u64) -> Self {
        Self::Number(value as f64)
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
        }
    }
}

/// A row that can be filtered, sorted and paginated
pub trait Record {
    /// Returns the value of the named column, or `None` if the record has no
    /// such column or the value is unset.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Every textual value matched by free-text search.
    fn search_text(&self) -> Vec<Cow<'_, str>>;

    /// Column used by date-range filters, if the record type has one.
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        None
    }
}
