//! Filter → sort → paginate pipeline shared by every list view

use super::filter::FilterState;
use super::paginate::{page_buttons, page_range, total_pages};
use super::record::Record;
use super::sort::{SortSpec, sort_records};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// One page of a filtered and sorted collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView<'a, R> {
    pub items: Vec<&'a R>,
    /// Number of records that passed the filters, across all pages
    pub total_count: usize,
    pub total_pages: usize,
    /// Requested page (1-indexed), even if it is out of range
    pub page: usize,
    pub page_size: NonZeroUsize,
}

impl<R> PageView<'_, R> {
    /// 1-based positions of the first and last displayed record, for a
    /// "Showing 11 to 20 of 42" footer. `None` when the page is empty.
    pub fn showing_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let range = page_range(self.total_count, self.page, self.page_size);
        Some((range.start + 1, range.end))
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn page_buttons(&self, max_buttons: usize) -> std::ops::Range<usize> {
        page_buttons(self.total_pages, max_buttons)
    }
}

/// Records passing `filters`, in input order.
pub fn filter_records<'a, R: Record>(records: &'a [R], filters: &FilterState) -> Vec<&'a R> {
    let needle = filters.search_term.to_lowercase();
    records
        .iter()
        .filter(|record| filters.matches_with_needle(&needle, *record))
        .collect()
}

/// Records passing `filters`, sorted by `sort` when given.
pub fn filter_and_sort<'a, R: Record>(
    records: &'a [R],
    filters: &FilterState,
    sort: Option<&SortSpec>,
) -> Vec<&'a R> {
    let mut rows = filter_records(records, filters);
    if let Some(spec) = sort {
        sort_records(&mut rows, spec);
    }
    rows
}

/// Produces the displayed page of `records`.
///
/// Pure: identical inputs always give identical output, and concatenating
/// pages `1..=total_pages` yields exactly the filtered and sorted collection.
pub fn filter_sort_paginate<'a, R: Record>(
    records: &'a [R],
    filters: &FilterState,
    sort: Option<&SortSpec>,
    page: usize,
    page_size: NonZeroUsize,
) -> PageView<'a, R> {
    let mut rows = filter_and_sort(records, filters, sort);
    let total_count = rows.len();
    let range = page_range(total_count, page, page_size);

    tracing::debug!(
        input = records.len(),
        matched = total_count,
        page,
        page_size = page_size.get(),
        "filtered list view"
    );

    rows.truncate(range.end);
    rows.drain(..range.start);

    PageView {
        items: rows,
        total_count,
        total_pages: total_pages(total_count, page_size),
        page,
        page_size,
    }
}

/// Caller-owned state of one list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableQuery {
    #[serde(default)]
    pub filters: FilterState,
    #[serde(default)]
    pub sort: Option<SortSpec>,
    #[serde(default = "first_page")]
    pub page: usize,
    pub page_size: NonZeroUsize,
}

fn first_page() -> usize {
    1
}

impl TableQuery {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            filters: FilterState::default(),
            sort: None,
            page: 1,
            page_size,
        }
    }

    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn apply<'a, R: Record>(&self, records: &'a [R]) -> PageView<'a, R> {
        filter_sort_paginate(
            records,
            &self.filters,
            self.sort.as_ref(),
            self.page,
            self.page_size,
        )
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::table::test_helpers::Asset;
    use proptest::prelude::*;

    prop_compose! {
        fn arb_asset()(
            name in "[a-zA-Z ]{0,12}",
            category in prop_oneof![Just("maintenance"), Just("safety"), Just("process")],
            count in 0u64..50,
        ) -> Asset {
            Asset::new(name, category, count)
        }
    }

    proptest! {
        #[test]
        fn test_pages_concatenate_to_full_collection(
            assets in proptest::collection::vec(arb_asset(), 0..60),
            page_size in 1usize..15,
            search in "[a-z]{0,2}",
            descending in any::<bool>(),
        ) {
            let page_size = NonZeroUsize::new(page_size).unwrap();
            let filters = FilterState::new().with_search(search);
            let sort = if descending { SortSpec::desc("count") } else { SortSpec::asc("name") };

            let expected = filter_and_sort(&assets, &filters, Some(&sort));
            let first = filter_sort_paginate(&assets, &filters, Some(&sort), 1, page_size);

            let mut joined = Vec::new();
            for page in 1..=first.total_pages {
                let view = filter_sort_paginate(&assets, &filters, Some(&sort), page, page_size);
                joined.extend(view.items);
            }

            prop_assert_eq!(joined.len(), expected.len());
            for (a, b) in joined.iter().zip(&expected) {
                prop_assert!(std::ptr::eq(*a, *b));
            }
        }

        #[test]
        fn test_same_query_same_output(
            assets in proptest::collection::vec(arb_asset(), 0..40),
            page in 0usize..6,
        ) {
            let page_size = NonZeroUsize::new(7).unwrap();
            let filters = FilterState::new().with_search("a");
            let sort = SortSpec::asc("name");

            let first = filter_sort_paginate(&assets, &filters, Some(&sort), page, page_size);
            let second = filter_sort_paginate(&assets, &filters, Some(&sort), page, page_size);
            prop_assert_eq!(first, second);
        }
    }
}
