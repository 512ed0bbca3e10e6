//! Shared fixtures for table engine tests
//!
//! This module is only compiled in test mode.

use super::record::{FieldValue, Record};
use chrono::{DateTime, Utc};
use std::borrow::Cow;

/// Minimal record with one text, one category and one numeric column
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub name: String,
    pub category: String,
    pub count: u64,
    pub seen_at: Option<DateTime<Utc>>,
}

impl Asset {
    pub fn new(name: impl Into<String>, category: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            count,
            seen_at: None,
        }
    }

    pub fn at(mut self, ts: DateTime<Utc>) -> Self {
        self.seen_at = Some(ts);
        self
    }
}

impl Record for Asset {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::text(&self.name)),
            "category" => Some(FieldValue::text(&self.category)),
            "count" => Some(FieldValue::count(self.count)),
            _ => None,
        }
    }

    fn search_text(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(&self.name), Cow::Borrowed(&self.category)]
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.seen_at
    }
}

/// `n` assets named `Asset 01..` with counts `1..=n`
pub fn numbered_assets(n: u64) -> Vec<Asset> {
    (1..=n)
        .map(|i| Asset::new(format!("Asset {i:02}"), "maintenance", i))
        .collect()
}

/// Parses an RFC 3339 timestamp, panicking on bad test input
pub fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}
