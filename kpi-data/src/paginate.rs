//! Fixed-size pagination with self-correcting page numbers.
//!
//! Slicing is pure: [`clamp_page`] maps an out-of-range request to page 1
//! before slicing, so a page past the end is never shown empty. Persisting
//! the corrected number is the caller's job (see [`crate::navigation`]).

use std::num::NonZeroUsize;
use std::ops::Range;

use serde::Serialize;

/// Page sizes offered by the results table.
pub const PAGE_SIZE_CHOICES: [usize; 4] = [10, 20, 50, 100];

/// Rows per page. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

/// Page size used until the user picks another.
pub const DEFAULT_PAGE_SIZE: PageSize = match NonZeroUsize::new(20) {
    Some(size) => PageSize(size),
    None => panic!("default page size must be non-zero"),
};

impl Default for PageSize {
    fn default() -> Self {
        DEFAULT_PAGE_SIZE
    }
}

/// Number of pages needed for `total_items`, 0 when there are none.
pub fn total_pages(total_items: usize, page_size: PageSize) -> usize {
    total_items.div_ceil(page_size.get())
}

/// Requested page if it is in `[1, total_pages]`, else page 1.
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    if requested == 0 || requested > total_pages {
        1
    } else {
        requested
    }
}

/// Navigation metadata of one page.
///
/// `start_index` and `end_index` are 1-based and inclusive for display
/// ("showing 21-25 of 25"); both are 0 when there is nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub total_pages: usize,
    pub current_page: usize,
    pub total_items: usize,
    pub start_index: usize,
    pub end_index: usize,
}

impl PageWindow {
    /// Compute the window for a requested page, correcting it if out of range.
    pub fn new(total_items: usize, requested_page: usize, page_size: PageSize) -> Self {
        let total_pages = total_pages(total_items, page_size);
        let current_page = clamp_page(requested_page, total_pages);
        let offset = (current_page - 1) * page_size.get();
        let end = (offset + page_size.get()).min(total_items);
        let (start_index, end_index) = if end > offset {
            (offset + 1, end)
        } else {
            (0, 0)
        };
        Self {
            total_pages,
            current_page,
            total_items,
            start_index,
            end_index,
        }
    }

    /// Zero-based slice range of the page's rows.
    pub fn range(&self) -> Range<usize> {
        if self.end_index == 0 {
            0..0
        } else {
            (self.start_index - 1)..self.end_index
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// One page of a collection plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    pub data: &'a [T],
    #[serde(flatten)]
    pub window: PageWindow,
}

/// Slice `items` into the requested page.
pub fn paginate<T>(items: &[T], requested_page: usize, page_size: PageSize) -> Page<'_, T> {
    let window = PageWindow::new(items.len(), requested_page, page_size);
    Page {
        data: &items[window.range()],
        window,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn size(n: usize) -> PageSize {
        PageSize::new(n).unwrap()
    }

    #[test]
    fn default_page_size_is_twenty() {
        assert_eq!(PageSize::default().get(), 20);
        assert!(PAGE_SIZE_CHOICES.contains(&PageSize::default().get()));
        assert_eq!(PageSize::new(0), None);
    }

    #[test]
    fn second_page_of_twenty_five() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, 2, size(20));
        assert_eq!(page.data, &[21, 22, 23, 24, 25]);
        assert_eq!(page.window.total_pages, 2);
        assert_eq!(page.window.current_page, 2);
        assert_eq!(page.window.total_items, 25);
        assert_eq!(page.window.start_index, 21);
        assert_eq!(page.window.end_index, 25);
        assert!(page.window.has_previous());
        assert!(!page.window.has_next());
    }

    #[test]
    fn shrinking_collection_self_corrects_to_first_page() {
        let items: Vec<u32> = (1..=10).collect();
        let page = paginate(&items, 2, size(20));
        assert_eq!(page.window.total_pages, 1);
        assert_eq!(page.window.current_page, 1);
        assert_eq!(page.data.len(), 10);
        assert_eq!(page.window.start_index, 1);
        assert_eq!(page.window.end_index, 10);
    }

    #[test]
    fn out_of_range_request_goes_to_page_one_not_last() {
        let items: Vec<u32> = (1..=45).collect();
        let page = paginate(&items, 9, size(10));
        assert_eq!(page.window.current_page, 1);
        assert_eq!(page.data[0], 1);
    }

    #[test]
    fn page_zero_is_page_one() {
        let items = [1, 2, 3];
        assert_eq!(paginate(&items, 0, size(2)).window.current_page, 1);
    }

    #[test]
    fn empty_collection() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 3, size(10));
        assert!(page.data.is_empty());
        assert_eq!(page.window.total_pages, 0);
        assert_eq!(page.window.current_page, 1);
        assert_eq!(page.window.start_index, 0);
        assert_eq!(page.window.end_index, 0);
        assert!(!page.window.has_next());
    }

    #[test]
    fn window_serializes_flat() {
        let items = [1, 2, 3];
        let json = serde_json::to_value(paginate(&items, 1, size(2))).unwrap();
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["endIndex"], 2);
    }

    proptest! {
        #[test]
        fn pages_reconstruct_the_collection(len in 0usize..200, per_page in 1usize..30) {
            let items: Vec<usize> = (0..len).collect();
            let page_size = size(per_page);
            let pages = total_pages(len, page_size);
            let mut rebuilt = Vec::new();
            for n in 1..=pages {
                let page = paginate(&items, n, page_size);
                prop_assert_eq!(page.window.current_page, n);
                rebuilt.extend_from_slice(page.data);
            }
            prop_assert_eq!(rebuilt, items);
        }

        #[test]
        fn past_the_end_yields_first_page(
            len in 1usize..200,
            per_page in 1usize..30,
            extra in 1usize..10,
        ) {
            let items: Vec<usize> = (0..len).collect();
            let page_size = size(per_page);
            let beyond = total_pages(len, page_size) + extra;
            let page = paginate(&items, beyond, page_size);
            prop_assert!(!page.data.is_empty());
            prop_assert_eq!(page.data, paginate(&items, 1, page_size).data);
        }
    }
}
