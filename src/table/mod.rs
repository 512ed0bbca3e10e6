//! Generic list-view engine
//!
//! Every list page (tables, forms, sync jobs, form responses) derives its
//! displayed rows the same way:
//!
//! - [`filter`]: free-text search, per-field filters and a date range (AND)
//! - [`sort`]: one column, ascending or descending, stable
//! - [`paginate`]: 1-indexed fixed-size pages
//! - [`engine`]: the combined pipeline and the caller-owned [`TableQuery`]
//!
//! Record types plug in through the [`Record`] trait. All functions are pure
//! and never fail.
//!
//! # Example
//!
//! ```
//! use kgdash::catalog::{KgStatus, TableEntry};
//! use kgdash::table::{FieldFilter, FilterState, SortSpec, TableQuery};
//! use std::num::NonZeroUsize;
//!
//! let tables = vec![
//!     TableEntry::new("t1", "WORK_ORDERS", "SAP", KgStatus::Mapped),
//!     TableEntry::new("t2", "ASSET_STATUS", "Maximo", KgStatus::Pending),
//! ];
//! let query = TableQuery::new(NonZeroUsize::new(10).unwrap())
//!     .with_filters(FilterState::new().with_filter("source", FieldFilter::from_selection("SAP")))
//!     .with_sort(SortSpec::asc("name"));
//!
//! let view = query.apply(&tables);
//! assert_eq!(view.total_count, 1);
//! assert_eq!(view.items[0].name, "WORK_ORDERS");
//! ```

pub mod engine;
pub mod filter;
pub mod paginate;
pub mod record;
pub mod sort;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use engine::{PageView, TableQuery, filter_and_sort, filter_records, filter_sort_paginate};
pub use filter::{ALL, DateRange, FieldFilter, FilterState};
pub use paginate::{page_buttons, paginate, total_pages};
pub use record::{FieldValue, Record};
pub use sort::{SortDirection, SortSpec, compare_values, locale_compare, sort_records};
