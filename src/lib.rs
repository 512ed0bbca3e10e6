//! kgdash - Knowledge-graph contextualisation dashboard
//!
//! Lists, filters and charts the tables, forms and sync jobs that feed an
//! industrial knowledge graph.
//!
//! # Architecture
//!
//! - [`charts`] - Donut, gauge, sparkline and progress geometry plus SVG output
//! - [`table`] - Generic filter, sort and paginate engine over [`table::Record`]s
//! - [`catalog`] - Catalog data model and JSON persistence
//! - [`dashboard`] - Summary metrics and widget rendering
//! - [`listing`] - Text and JSON output for list views
//! - [`validators`] - Input validation and sanitization
//! - [`config`] - Configuration persistence
//! - [`utils`] - XDG directories and logging setup

// Allow pedantic clippy warnings that are not worth fixing for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::needless_lifetimes)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;
pub mod charts;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod formatting;
pub mod listing;
pub mod table;
pub mod utils;
pub mod validators;

// Re-export commonly used types
pub use catalog::{Catalog, ListKind};
pub use core::error::{Error, Result};
pub use table::{FilterState, PageView, SortSpec, TableQuery};
