//! Fixed-size, 1-based pagination over a pipeline result.

use serde::Serialize;

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Requested page number (1-based).
    pub number: usize,
    /// Rows per page.
    pub size: usize,
    /// Rows on this page; empty when `number` is out of range.
    pub items: Vec<T>,
    /// Rows across all pages.
    pub total_items: usize,
    /// Number of non-empty pages.
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.number >= 1 && self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1 && self.number <= self.total_pages
    }

    /// 1-based position of the first row on this page, `0` when empty.
    pub fn first_row(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.number - 1) * self.size + 1
        }
    }
}

/// Number of pages needed for `total_items` rows; a size of 0 is treated as 1.
pub fn page_count(total_items: usize, size: usize) -> usize {
    total_items.div_ceil(size.max(1))
}

/// Return rows `[(number-1)*size, number*size)` of `items`.
///
/// Page 0 and pages past the end yield an empty page rather than an error.
pub fn paginate<T: Clone>(items: &[T], number: usize, size: usize) -> Page<T> {
    let size = size.max(1);
    let total_items = items.len();

    let rows = match number.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(size).min(total_items);
            let end = start.saturating_add(size).min(total_items);
            items[start..end].to_vec()
        }
        None => Vec::new(),
    };

    Page {
        number,
        size,
        items: rows,
        total_items,
        total_pages: page_count(total_items, size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_partition_without_gaps_or_overlap() {
        let items: Vec<u32> = (0..23).collect();
        let size = 10;
        let pages = page_count(items.len(), size);
        assert_eq!(pages, 3);

        let mut rebuilt = Vec::new();
        for n in 1..=pages {
            let page = paginate(&items, n, size);
            assert!(page.items.len() <= size);
            if n < pages {
                assert_eq!(page.items.len(), size, "only the last page may be short");
            }
            rebuilt.extend(page.items);
        }
        assert_eq!(rebuilt, items);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<u32> = (0..5).collect();
        assert!(paginate(&items, 0, 10).is_empty());
        assert!(paginate(&items, 2, 10).is_empty());
        assert!(paginate(&items, usize::MAX, 10).is_empty());

        let page = paginate(&items, 9, 10);
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.first_row(), 0);
    }

    #[test]
    fn empty_input_has_no_pages() {
        let page = paginate::<u32>(&[], 1, 10);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn navigation_flags() {
        let items: Vec<u32> = (0..25).collect();
        let first = paginate(&items, 1, 10);
        assert!(first.has_next());
        assert!(!first.has_previous());
        assert_eq!(first.first_row(), 1);

        let last = paginate(&items, 3, 10);
        assert!(!last.has_next());
        assert!(last.has_previous());
        assert_eq!(last.items, vec![20, 21, 22, 23, 24]);
        assert_eq!(last.first_row(), 21);
    }

    #[test]
    fn zero_size_is_clamped() {
        let items = [1, 2, 3];
        let page = paginate(&items, 2, 0);
        assert_eq!(page.size, 1);
        assert_eq!(page.items, vec![2]);
    }
}
