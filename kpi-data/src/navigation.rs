//! Page navigation state.
//!
//! The current page always stays in `[1, total_pages]`, or at 1 while
//! there are no pages. Every transition preserves that invariant.

use thiserror::Error;

use crate::paginate::clamp_page;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("page {requested} is out of range (1..={total_pages})")]
    OutOfRange { requested: usize, total_pages: usize },
}

/// Current page of a paginated table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNavigator {
    current_page: usize,
    total_pages: usize,
}

impl Default for PageNavigator {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
        }
    }
}

impl PageNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Go back one page, stopping at 1.
    pub fn previous(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    /// Go forward one page, stopping at the last page.
    pub fn next(&mut self) {
        if self.current_page < self.total_pages {
            self.current_page += 1;
        }
    }

    /// Jump straight to `page`; the state is unchanged on error.
    pub fn jump_to(&mut self, page: usize) -> Result<(), NavigationError> {
        if page == 0 || page > self.total_pages.max(1) {
            return Err(NavigationError::OutOfRange {
                requested: page,
                total_pages: self.total_pages,
            });
        }
        self.current_page = page;
        Ok(())
    }

    /// Back to page 1, after a filter or page size change.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Record a new page count and correct the current page if it fell out
    /// of range. Returns true when the page was corrected.
    pub fn sync(&mut self, total_pages: usize) -> bool {
        self.total_pages = total_pages;
        let corrected = clamp_page(self.current_page, total_pages);
        let changed = corrected != self.current_page;
        if changed {
            log::debug!(
                "navigation: page {} out of range for {} pages, reset to {}",
                self.current_page,
                total_pages,
                corrected
            );
            self.current_page = corrected;
        }
        changed
    }
}
