//! Page envelopes and requested page sizes.

use serde::{Deserialize, Serialize};

use crate::TimestampCursor;

/// Number of rows requested for one page.
///
/// A zero page size is valid and means "return nothing without querying".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PageSize(u32);

impl PageSize {
    /// Wrap an explicit row count.
    #[must_use]
    pub const fn new(rows: u32) -> Self {
        Self(rows)
    }

    /// Normalise a signed request: non-positive values become zero and
    /// oversized values saturate at `u32::MAX`.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageSize;
    ///
    /// assert!(PageSize::from_requested(-3).is_zero());
    /// assert_eq!(PageSize::from_requested(25).get(), 25);
    /// ```
    #[must_use]
    pub fn from_requested(requested: i64) -> Self {
        if requested <= 0 {
            return Self(0);
        }
        Self(u32::try_from(requested).unwrap_or(u32::MAX))
    }

    /// Requested row count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// True when no rows are requested.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Row count as a SQL `LIMIT` operand.
    #[must_use]
    pub fn as_limit(self) -> i64 {
        i64::from(self.0)
    }

    fn as_len(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}

/// One page of newest-first results.
///
/// `cursor` echoes the bound the page was queried with, so a client can
/// repeat the request exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    cursor: TimestampCursor,
    has_more: bool,
}

impl<T> Page<T> {
    /// A page with no items and `has_more = false`.
    #[must_use]
    pub const fn empty(cursor: TimestampCursor) -> Self {
        Self {
            items: Vec::new(),
            cursor,
            has_more: false,
        }
    }

    /// Wrap rows fetched with `LIMIT requested`.
    ///
    /// `has_more` is true exactly when the row count equals the requested
    /// size. Rows beyond the requested size are dropped.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageSize, TimestampCursor};
    ///
    /// let cursor = TimestampCursor::from_micros(100).expect("cursor");
    /// let page = Page::from_rows(vec![3, 2], cursor, PageSize::new(2));
    /// assert!(page.has_more());
    ///
    /// let page = Page::from_rows(vec![1], cursor, PageSize::new(2));
    /// assert!(!page.has_more());
    /// ```
    #[must_use]
    pub fn from_rows(mut rows: Vec<T>, cursor: TimestampCursor, requested: PageSize) -> Self {
        if requested.is_zero() {
            return Self::empty(cursor);
        }
        rows.truncate(requested.as_len());
        let has_more = rows.len() == requested.as_len();
        Self {
            items: rows,
            cursor,
            has_more,
        }
    }

    /// Items on this page, newest first.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// The exclusive upper bound this page was queried with.
    #[must_use]
    pub const fn cursor(&self) -> TimestampCursor {
        self.cursor
    }

    /// Whether another request may return further items.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Number of items on the page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the page carries no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cursor for the following page, derived from the oldest item.
    ///
    /// Returns `None` when `has_more` is false.
    pub fn next_cursor<F>(&self, timestamp_of: F) -> Option<TimestampCursor>
    where
        F: Fn(&T) -> TimestampCursor,
    {
        if !self.has_more {
            return None;
        }
        self.items.last().map(timestamp_of)
    }

    /// Transform every item, keeping cursor and `has_more`.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            cursor: self.cursor,
            has_more: self.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for page envelopes.

    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn cursor() -> TimestampCursor {
        TimestampCursor::from_micros(1_000).expect("cursor")
    }

    #[rstest]
    #[case(-10, 0)]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(10, 10)]
    #[case(i64::MAX, u32::MAX)]
    fn from_requested_normalises(#[case] requested: i64, #[case] expected: u32) {
        assert_eq!(PageSize::from_requested(requested).get(), expected);
    }

    #[rstest]
    #[case(vec![], 3, false)]
    #[case(vec![3, 2], 3, false)]
    #[case(vec![3, 2, 1], 3, true)]
    #[case(vec![1], 1, true)]
    fn has_more_reflects_page_fill(
        cursor: TimestampCursor,
        #[case] rows: Vec<u8>,
        #[case] requested: u32,
        #[case] expected: bool,
    ) {
        let page = Page::from_rows(rows, cursor, PageSize::new(requested));
        assert_eq!(page.has_more(), expected);
    }

    #[rstest]
    fn zero_page_size_yields_empty_page(cursor: TimestampCursor) {
        let page = Page::from_rows(vec![1, 2, 3], cursor, PageSize::new(0));
        assert!(page.is_empty());
        assert!(!page.has_more());
        assert_eq!(page.cursor(), cursor);
    }

    #[rstest]
    fn oversized_row_sets_are_truncated(cursor: TimestampCursor) {
        let page = Page::from_rows(vec![5, 4, 3, 2], cursor, PageSize::new(2));
        assert_eq!(page.items(), &[5, 4]);
        assert!(page.has_more());
    }

    #[rstest]
    fn next_cursor_uses_oldest_item(cursor: TimestampCursor) {
        let page = Page::from_rows(vec![900_i64, 800], cursor, PageSize::new(2));
        let next = page.next_cursor(|micros| {
            TimestampCursor::from_micros(*micros).expect("item cursor")
        });
        assert_eq!(next.map(|c| c.micros()), Some(800));
    }

    #[rstest]
    fn next_cursor_is_none_on_last_page(cursor: TimestampCursor) {
        let page = Page::from_rows(vec![900_i64], cursor, PageSize::new(2));
        assert!(page.next_cursor(|_| cursor).is_none());
    }

    #[rstest]
    fn map_preserves_envelope(cursor: TimestampCursor) {
        let page = Page::from_rows(vec![1, 2], cursor, PageSize::new(2)).map(|n| n * 10);
        assert_eq!(page.items(), &[10, 20]);
        assert!(page.has_more());
        assert_eq!(page.cursor(), cursor);
    }

    #[rstest]
    fn serialises_camel_case(cursor: TimestampCursor) {
        let page = Page::from_rows(vec!["a"], cursor, PageSize::new(1));
        let value = serde_json::to_value(&page).expect("serialise page");
        assert_eq!(value["items"], serde_json::json!(["a"]));
        assert_eq!(value["cursor"], serde_json::json!(1_000));
        assert_eq!(value["hasMore"], serde_json::json!(true));
    }
}
