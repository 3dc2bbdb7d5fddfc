//! Timestamp cursor and page envelope primitives for newest-first feeds.
//!
//! A feed page is bounded above by a [`TimestampCursor`]: every item on the
//! page is strictly older than the cursor. Clients continue by sending the
//! creation timestamp of the oldest item they hold as the next cursor.
//!
//! [`Page::from_rows`] reports `has_more` when the number of rows returned
//! equals the requested [`PageSize`]. That is a heuristic: when exactly one
//! page worth of rows remained, the client issues one extra request and
//! receives an empty page. Callers rely on this behaviour, so it is kept.

mod cursor;
mod page;

pub use cursor::{CursorError, TimestampCursor};
pub use page::{Page, PageSize};
