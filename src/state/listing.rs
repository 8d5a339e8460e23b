//! Paged list state for the admin users/products consoles.
//!
//! DESIGN
//! ======
//! Plain data with transition methods; pages hold it in a signal and call
//! the `ApiClient` themselves. Keeping the transitions here lets the paging
//! rules be tested without a browser.

#[cfg(test)]
#[path = "listing_test.rs"]
mod listing_test;

use crate::error::ApiError;
use crate::net::types::{ApiListResponse, PageParams};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct PagedList<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
            total_pages: 0,
            loading: false,
            error: None,
        }
    }
}

impl<T> PagedList<T> {
    /// Parameters for the next load of the current page.
    #[must_use]
    pub fn params(&self) -> PageParams {
        PageParams { page: self.page, limit: self.page_size }
    }

    /// Mark a load (or a mutation followed by reload) as in flight.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replace the items and totals with a fresh page.
    pub fn apply(&mut self, response: ApiListResponse<T>) {
        let page = response.data;
        self.items = page.data;
        self.total = page.meta.total;
        self.total_pages = page.meta.total_pages;
        self.loading = false;
    }

    /// Record a failed load or mutation. Items are kept as they were.
    pub fn fail(&mut self, error: &ApiError, fallback: &str) {
        tracing::warn!(error = %error, "list request failed");
        self.error = Some(error.user_message(fallback));
        self.loading = false;
    }

    /// Move to `page` if it exists. Returns whether a reload is needed.
    pub fn go_to_page(&mut self, page: u32) -> bool {
        if page >= 1 && page <= self.total_pages {
            self.page = page;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn page_numbers(&self) -> Vec<u32> {
        (1..=self.total_pages).collect()
    }

    /// 1-based index range of the rows shown, for "Showing 11-20 of 31".
    #[must_use]
    pub fn showing_range(&self) -> Option<(u64, u64)> {
        if self.total == 0 {
            return None;
        }
        let start = u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size) + 1;
        let end = (u64::from(self.page) * u64::from(self.page_size)).min(self.total);
        (start <= end).then_some((start, end))
    }
}
