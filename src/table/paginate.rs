//! Page slicing
//!
//! Pages are 1-indexed. The page size is a [`NonZeroUsize`], so a zero page
//! size cannot reach the arithmetic below.

use std::num::NonZeroUsize;
use std::ops::Range;

/// Number of pages needed for `count` items: `ceil(count / page_size)`.
pub fn total_pages(count: usize, page_size: NonZeroUsize) -> usize {
    count.div_ceil(page_size.get())
}

/// Index range of `page` within a collection of `count` items.
///
/// Page 0 and pages past the end give an empty range; no clamping to the last
/// page happens here.
pub fn page_range(count: usize, page: usize, page_size: NonZeroUsize) -> Range<usize> {
    let Some(index) = page.checked_sub(1) else {
        return 0..0;
    };
    let start = index.saturating_mul(page_size.get()).min(count);
    let end = page.saturating_mul(page_size.get()).min(count);
    start..end
}

/// Slices `items` to the requested page.
pub fn paginate<T>(items: &[T], page: usize, page_size: NonZeroUsize) -> &[T] {
    &items[page_range(items.len(), page, page_size)]
}

/// Page-number buttons shown under a list: `1..=min(max_buttons, total_pages)`.
pub fn page_buttons(total_pages: usize, max_buttons: usize) -> Range<usize> {
    1..total_pages.min(max_buttons) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_twelve_items_page_size_five() {
        let items: Vec<u32> = (1..=12).collect();
        assert_eq!(total_pages(items.len(), size(5)), 3);
        assert_eq!(paginate(&items, 1, size(5)), &[1, 2, 3, 4, 5]);
        assert_eq!(paginate(&items, 3, size(5)), &[11, 12]);
    }

    #[test]
    fn test_beyond_last_page_is_empty() {
        let items: Vec<u32> = (1..=12).collect();
        assert!(paginate(&items, 4, size(5)).is_empty());
        assert!(paginate(&items, usize::MAX, size(5)).is_empty());
    }

    #[test]
    fn test_page_zero_is_empty() {
        let items = [1, 2, 3];
        assert!(paginate(&items, 0, size(10)).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let items: [u8; 0] = [];
        assert_eq!(total_pages(0, size(10)), 0);
        assert!(paginate(&items, 1, size(10)).is_empty());
    }

    #[test]
    fn test_exact_multiple() {
        assert_eq!(total_pages(20, size(10)), 2);
        assert_eq!(total_pages(21, size(10)), 3);
    }

    #[test]
    fn test_page_buttons_window() {
        assert_eq!(page_buttons(12, 5), 1..6);
        assert_eq!(page_buttons(3, 5), 1..4);
        assert!(page_buttons(0, 5).is_empty());
    }
}
