//! Single-column sorting for list views

use super::record::{FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction of the active column
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The active sort column and its direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Column-header click: the same column flips direction, a new column
    /// starts ascending.
    pub fn toggle(&mut self, field: &str) {
        if self.field == field {
            self.direction = self.direction.reversed();
        } else {
            self.field = field.to_string();
            self.direction = SortDirection::Asc;
        }
    }

    fn orient(&self, ordering: Ordering) -> Ordering {
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Sorts `records` in place. The sort is stable: equal keys keep their input
/// order in both directions.
///
/// A record without the column sorts as the empty value of the column's type
/// (`0` for numbers, `""` for text), where the type is taken from the first
/// record that has the column.
pub fn sort_records<'a, R: Record>(records: &mut [&'a R], spec: &SortSpec) {
    let mut keyed: Vec<_> = column_keys(records, &spec.field)
        .into_iter()
        .zip(records.iter().copied())
        .collect();
    keyed.sort_by(|(a, _), (b, _)| spec.orient(compare_values(a.as_ref(), b.as_ref())));
    for (slot, (_, record)) in records.iter_mut().zip(keyed) {
        *slot = record;
    }
}

/// Sort keys of one column, with missing values replaced by the column's
/// empty value when it has one.
fn column_keys<'a, R: Record>(records: &[&'a R], field: &str) -> Vec<Option<FieldValue<'a>>> {
    let mut keys: Vec<Option<FieldValue<'a>>> = records
        .iter()
        .map(|&record| record.field(field))
        .collect();
    if let Some(fallback) = keys.iter().flatten().find_map(empty_value) {
        for key in keys.iter_mut().filter(|key| key.is_none()) {
            *key = Some(fallback.clone());
        }
    }
    keys
}

fn empty_value(value: &FieldValue<'_>) -> Option<FieldValue<'static>> {
    match value {
        FieldValue::Number(_) => Some(FieldValue::Number(0.0)),
        FieldValue::Text(_) => Some(FieldValue::text("")),
        FieldValue::Bool(_) | FieldValue::Timestamp(_) => None,
    }
}

/// Orders two column values. This is a total order.
///
/// Text uses [`locale_compare`], numbers compare numerically with NaN last,
/// timestamps chronologically. Values of different types order by type:
/// missing, then booleans, numbers, timestamps and text.
pub fn compare_values(a: Option<&FieldValue<'_>>, b: Option<&FieldValue<'_>>) -> Ordering {
    match (a, b) {
        (Some(FieldValue::Text(a)), Some(FieldValue::Text(b))) => locale_compare(a, b),
        (Some(FieldValue::Number(a)), Some(FieldValue::Number(b))) => compare_numbers(*a, *b),
        (Some(FieldValue::Timestamp(a)), Some(FieldValue::Timestamp(b))) => a.cmp(b),
        (Some(FieldValue::Bool(a)), Some(FieldValue::Bool(b))) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: Option<&FieldValue<'_>>) -> u8 {
    match value {
        None => 0,
        Some(FieldValue::Bool(_)) => 1,
        Some(FieldValue::Number(_)) => 2,
        Some(FieldValue::Timestamp(_)) => 3,
        Some(FieldValue::Text(_)) => 4,
    }
}

fn compare_numbers(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Human-oriented string order.
///
/// Compares case-folded text first so `apple < Banana < cherry`, then falls
/// back to the raw text so distinct strings never tie arbitrarily.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| b.cmp(a))
}
