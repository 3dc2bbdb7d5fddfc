//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use pagination::PageSize;

use crate::domain::ports::{
    EntryCommand, EntryQuery, FeedQuery, IdentityProvider, ReferenceDataQuery, UserCommand,
    UserQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub feed: Arc<dyn FeedQuery>,
    pub entries: Arc<dyn EntryCommand>,
    pub entries_query: Arc<dyn EntryQuery>,
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
    pub reference_data: Arc<dyn ReferenceDataQuery>,
    pub identity: Arc<dyn IdentityProvider>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub feed: Arc<dyn FeedQuery>,
    pub entries: Arc<dyn EntryCommand>,
    pub entries_query: Arc<dyn EntryQuery>,
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
    pub reference_data: Arc<dyn ReferenceDataQuery>,
    pub identity: Arc<dyn IdentityProvider>,
    /// Rows returned per feed page.
    pub feed_page_size: PageSize,
}

impl HttpState {
    /// Construct state from a ports bundle and the configured feed page size.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use angrypros_backend::domain::ports::FixtureIdentityProvider;
    /// use angrypros_backend::domain::{
    ///     EntryService, EntryTextLimits, FeedService, ReferenceDataService, UserService,
    ///     UserTitleLimits,
    /// };
    /// use angrypros_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use angrypros_backend::outbound::memory::InMemoryStore;
    /// use mockable::DefaultClock;
    /// use pagination::PageSize;
    ///
    /// let store = Arc::new(InMemoryStore::seeded(Arc::new(DefaultClock)));
    /// let entries = Arc::new(EntryService::new(store.clone(), EntryTextLimits::default()));
    /// let users = Arc::new(UserService::new(store.clone(), UserTitleLimits::default()));
    /// let ports = HttpStatePorts {
    ///     feed: Arc::new(FeedService::new(store.clone(), Arc::new(DefaultClock))),
    ///     entries: entries.clone(),
    ///     entries_query: entries,
    ///     users: users.clone(),
    ///     users_query: users,
    ///     reference_data: Arc::new(ReferenceDataService::new(store)),
    ///     identity: Arc::new(FixtureIdentityProvider),
    /// };
    /// let state = HttpState::new(ports, PageSize::new(10));
    /// assert_eq!(state.feed_page_size.get(), 10);
    /// ```
    pub fn new(ports: HttpStatePorts, feed_page_size: PageSize) -> Self {
        let HttpStatePorts {
            feed,
            entries,
            entries_query,
            users,
            users_query,
            reference_data,
            identity,
        } = ports;
        Self {
            feed,
            entries,
            entries_query,
            users,
            users_query,
            reference_data,
            identity,
            feed_page_size,
        }
    }
}
