//! Feed pagination service.
//!
//! Resolves the effective cursor, short-circuits empty page requests, and
//! wraps repository rows in a [`pagination::Page`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, TimestampCursor};

use crate::domain::Error;
use crate::domain::entry_service::map_entry_repository_error;
use crate::domain::ports::{EntryRepository, FeedPage, FeedPageRequest, FeedQuery};

/// Feed service implementing [`FeedQuery`].
#[derive(Clone)]
pub struct FeedService<R> {
    entries: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> FeedService<R> {
    /// Create a feed service reading from `entries`; `clock` supplies "now"
    /// when a request carries no cursor.
    pub fn new(entries: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { entries, clock }
    }

    fn effective_cursor(&self, requested: Option<TimestampCursor>) -> TimestampCursor {
        requested.unwrap_or_else(|| TimestampCursor::from_datetime(self.clock.utc()))
    }
}

#[async_trait]
impl<R> FeedQuery for FeedService<R>
where
    R: EntryRepository,
{
    async fn page(&self, request: FeedPageRequest) -> Result<FeedPage, Error> {
        let cursor = self.effective_cursor(request.before);
        if request.page_size.is_zero() {
            return Ok(Page::empty(cursor));
        }

        let rows = self
            .entries
            .list_entries(cursor, request.page_size, request.author)
            .await
            .map_err(map_entry_repository_error)?;

        Ok(Page::from_rows(rows, cursor, request.page_size))
    }
}

#[cfg(test)]
mod tests {
    //! Feed pagination behaviour against a mocked repository.

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::UserId;
    use crate::domain::ports::{EntryRepositoryError, MockEntryRepository};
    use crate::domain::test_fixtures::{FixtureClock, at_micros, entry, user};
    use pagination::PageSize;
    use rstest::{fixture, rstest};

    const NOW_MICROS: i64 = 1_700_000_000_000_000;

    #[fixture]
    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixtureClock {
            utc_now: at_micros(NOW_MICROS),
        })
    }

    fn request(before: Option<i64>, size: i64, author: Option<i64>) -> FeedPageRequest {
        FeedPageRequest {
            before: before.map(|micros| TimestampCursor::from_micros(micros).expect("cursor")),
            page_size: PageSize::from_requested(size),
            author: author.map(|id| UserId::new(id).expect("user id")),
        }
    }

    #[rstest]
    #[case(0)]
    #[case(-5)]
    #[tokio::test]
    async fn non_positive_page_size_skips_the_query(clock: Arc<dyn Clock>, #[case] size: i64) {
        let mut repo = MockEntryRepository::new();
        repo.expect_list_entries().times(0);

        let service = FeedService::new(Arc::new(repo), clock);
        let page = service
            .page(request(Some(500), size, None))
            .await
            .expect("empty page");

        assert!(page.is_empty());
        assert!(!page.has_more());
        assert_eq!(page.cursor().micros(), 500);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_cursor_defaults_to_now(clock: Arc<dyn Clock>) {
        let mut repo = MockEntryRepository::new();
        repo.expect_list_entries()
            .withf(|before, limit, author| {
                before.micros() == NOW_MICROS && limit.get() == 10 && author.is_none()
            })
            .times(1)
            .return_once(|_, _, _| Ok(Vec::new()));

        let service = FeedService::new(Arc::new(repo), clock);
        let page = service
            .page(request(None, 10, None))
            .await
            .expect("page");

        assert_eq!(page.cursor().micros(), NOW_MICROS);
        assert!(page.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn full_page_reports_more(clock: Arc<dyn Clock>) {
        let author = user(1, "Fuming");
        let newest = entry(3, &author, 300);
        let mut repo = MockEntryRepository::new();
        let rows = vec![newest.clone()];
        repo.expect_list_entries()
            .times(1)
            .return_once(move |_, _, _| Ok(rows));

        let service = FeedService::new(Arc::new(repo), clock);
        let page = service
            .page(request(Some(1_000), 1, None))
            .await
            .expect("page");

        assert_eq!(page.items(), &[newest]);
        assert!(page.has_more());
    }

    #[rstest]
    #[tokio::test]
    async fn author_filter_is_forwarded(clock: Arc<dyn Clock>) {
        let mut repo = MockEntryRepository::new();
        repo.expect_list_entries()
            .withf(|_, _, author| author.map(UserId::get) == Some(42))
            .times(1)
            .return_once(|_, _, _| Ok(Vec::new()));

        let service = FeedService::new(Arc::new(repo), clock);
        service
            .page(request(Some(1_000), 5, Some(42)))
            .await
            .expect("page");
    }

    #[rstest]
    #[case(EntryRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(EntryRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn storage_faults_are_not_not_found(
        clock: Arc<dyn Clock>,
        #[case] failure: EntryRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockEntryRepository::new();
        repo.expect_list_entries()
            .times(1)
            .return_once(move |_, _, _| Err(failure));

        let service = FeedService::new(Arc::new(repo), clock);
        let error = service
            .page(request(None, 10, None))
            .await
            .expect_err("storage failure");

        assert_eq!(error.code(), expected);
    }
}
