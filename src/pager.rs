//! Fixed-size pages over a ranked (and usually filtered) schedule list.

use std::borrow::Borrow;
use std::fmt::Write as _;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::models::Schedule;

/// Splits lists into pages of `page_size` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
}

/// One page of items.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// Zero-based page index.
    pub index: usize,
    /// Position of the first item in the full list.
    pub offset: usize,
    /// Items on this page (empty past the last page).
    pub items: &'a [T],
    /// Length of the full list.
    pub total_items: usize,
    /// Number of non-empty pages.
    pub total_pages: usize,
}

impl Pager {
    /// Creates a pager (page size is at least 1).
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// Items per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages needed for `total_items`.
    pub fn page_count(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size)
    }

    /// Returns page `index` of `items`.
    pub fn page<'a, T>(&self, items: &'a [T], index: usize) -> Page<'a, T> {
        let offset = index.saturating_mul(self.page_size).min(items.len());
        let end = offset.saturating_add(self.page_size).min(items.len());
        Page {
            index,
            offset,
            items: &items[offset..end],
            total_items: items.len(),
            total_pages: self.page_count(items.len()),
        }
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T> Page<'_, T> {
    /// Whether the page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a later page has items.
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.total_pages
    }

    /// Whether an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// One-based heading, e.g. `Page 2 of 3 (14 matching schedules)`.
    pub fn heading(&self) -> String {
        format!(
            "Page {} of {} ({} matching schedules)",
            self.index.saturating_add(1),
            self.total_pages.max(1),
            self.total_items
        )
    }
}

impl<T: Borrow<Schedule>> Page<'_, T> {
    /// Renders each schedule as `#n`, its header line, and its daily
    /// summary, numbered by position in the full list.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, item) in self.items.iter().enumerate() {
            let schedule = <T as Borrow<Schedule>>::borrow(item);
            let _ = writeln!(out, "#{}", self.offset + i);
            let _ = writeln!(out, "{schedule}");
            let _ = writeln!(out, "{}", schedule.daily_summary());
        }
        out
    }
}
