//! Ordering rules for the news feed and comment threads.
//!
//! The Postgres repositories express the same rules in `ORDER BY` clauses
//! (with `id` as the insertion-order tie-break); these functions are used by
//! the in-memory store and document the contract.

use crate::types::Timestamp;

/// Default number of news items on the home page.
pub const NEWS_COUNT_ON_HOME_PAGE: usize = 10;

/// Sort newest first and keep at most `page_size` items.
///
/// The sort is stable: items with equal timestamps keep their input
/// (insertion) order.
pub fn newest_first<T>(
    mut items: Vec<T>,
    date: impl Fn(&T) -> Timestamp,
    page_size: usize,
) -> Vec<T> {
    items.sort_by(|a, b| date(b).cmp(&date(a)));
    items.truncate(page_size);
    items
}

/// Sort oldest first, i.e. chronological reading order. Stable.
pub fn oldest_first<T>(mut items: Vec<T>, date: impl Fn(&T) -> Timestamp) -> Vec<T> {
    items.sort_by_key(|item| date(item));
    items
}
