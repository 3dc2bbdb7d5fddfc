//! Driving port for reading single entries and entry form configuration.

use async_trait::async_trait;

use crate::domain::{AngerTier, Entry, EntryId, EntryTextLimits, Error};

/// Values a client needs to render the "new entry" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryConfig {
    pub text_limits: EntryTextLimits,
    pub anger_tiers: Vec<AngerTier>,
}

/// Domain use-case port for entry reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryQuery: Send + Sync {
    /// Fetch a hydrated entry.
    async fn get_entry(&self, id: EntryId) -> Result<Entry, Error>;

    /// Text limits and tiers, ascending by rank.
    async fn entry_config(&self) -> Result<EntryConfig, Error>;
}
