//! Record predicates for list views
//!
//! A record passes a [`FilterState`] when every active predicate matches:
//! the free-text search, each per-field filter, and the date range.

use super::record::{FieldValue, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel selection that disables a field filter
pub const ALL: &str = "all";

/// Filter on a single named field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum FieldFilter {
    /// Matches every record
    All,
    /// Field's value must equal this string exactly
    Equals(String),
    /// Field's value must contain this string, ignoring case
    Contains(String),
}

impl FieldFilter {
    /// Builds a filter from a dropdown selection, where `"all"` disables it.
    pub fn from_selection(value: &str) -> Self {
        if value == ALL {
            Self::All
        } else {
            Self::Equals(value.to_string())
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::All)
    }

    pub fn matches(&self, value: Option<&FieldValue<'_>>) -> bool {
        match (self, value) {
            (Self::All, _) => true,
            (_, None) => false,
            (Self::Equals(expected), Some(value)) => value.to_string() == *expected,
            (Self::Contains(needle), Some(value)) => value
                .to_string()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

/// Inclusive timestamp window; an unset bound is unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| ts >= start) && self.end.is_none_or(|end| ts <= end)
    }
}

/// Search and filter criteria of one list view
///
/// Owned by the caller, mutated on user input, and passed by reference to the
/// engine. Nothing is cached between evaluations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub field_filters: BTreeMap<String, FieldFilter>,
    #[serde(default)]
    pub date_range: DateRange,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, filter: FieldFilter) -> Self {
        self.set_filter(field, filter);
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    /// Sets or replaces the filter on `field`. Setting [`FieldFilter::All`]
    /// removes it.
    pub fn set_filter(&mut self, field: impl Into<String>, filter: FieldFilter) {
        let field = field.into();
        if filter.is_active() {
            self.field_filters.insert(field, filter);
        } else {
            self.field_filters.remove(&field);
        }
    }

    /// Whether any predicate would exclude records
    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty()
            || self.field_filters.values().any(FieldFilter::is_active)
            || self.date_range.is_active()
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.matches_with_needle(&self.search_term.to_lowercase(), record)
    }

    /// Same as [`FilterState::matches`] with the search term already lowercased.
    pub(crate) fn matches_with_needle<R: Record>(&self, needle: &str, record: &R) -> bool {
        matches_search(needle, record)
            && self
                .field_filters
                .iter()
                .all(|(field, filter)| filter.matches(record.field(field).as_ref()))
            && (!self.date_range.is_active()
                || record
                    .timestamp()
                    .is_some_and(|ts| self.date_range.contains(ts)))
    }
}

fn matches_search<R: Record>(needle: &str, record: &R) -> bool {
    needle.is_empty()
        || record
            .search_text()
            .iter()
            .any(|text| text.to_lowercase().contains(needle))
}
