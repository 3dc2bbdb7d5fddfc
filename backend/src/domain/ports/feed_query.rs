//! Driving port for paging through the public feed.

use async_trait::async_trait;
use pagination::{Page, PageSize, TimestampCursor};

use crate::domain::{Entry, Error, UserId};

/// One page of hydrated feed entries.
pub type FeedPage = Page<Entry>;

/// Feed page request.
///
/// A missing cursor means "start from now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedPageRequest {
    pub before: Option<TimestampCursor>,
    pub page_size: PageSize,
    pub author: Option<UserId>,
}

/// Domain use-case port for reading the feed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedQuery: Send + Sync {
    /// Fetch entries strictly older than the cursor, newest first.
    async fn page(&self, request: FeedPageRequest) -> Result<FeedPage, Error>;
}
