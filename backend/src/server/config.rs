//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use angrypros_backend::domain::ports::IdentityProvider;
use angrypros_backend::domain::{EntryTextLimits, UserTitleLimits};
use angrypros_backend::outbound::persistence::DbPool;
use pagination::PageSize;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) identity: Arc<dyn IdentityProvider>,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) feed_page_size: PageSize,
    pub(crate) entry_text_limits: EntryTextLimits,
    pub(crate) user_title_limits: UserTitleLimits,
}

impl ServerConfig {
    /// Configuration with in-memory storage and default limits.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            bind_addr,
            identity,
            db_pool: None,
            feed_page_size: PageSize::new(10),
            entry_text_limits: EntryTextLimits::default(),
            user_title_limits: UserTitleLimits::default(),
        }
    }

    /// Serve storage ports from PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_feed_page_size(mut self, page_size: PageSize) -> Self {
        self.feed_page_size = page_size;
        self
    }

    /// Validation bounds for entry text and user titles.
    #[must_use]
    pub fn with_limits(mut self, entry_text: EntryTextLimits, user_title: UserTitleLimits) -> Self {
        self.entry_text_limits = entry_text;
        self.user_title_limits = user_title;
        self
    }
}
