//! Driven port for entry and anger tier persistence.

use async_trait::async_trait;
use pagination::{PageSize, TimestampCursor};

use crate::domain::{AngerTier, Entry, EntryId, EntryText, NewEntry, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by entry repository adapters.
    pub enum EntryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "entry repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "entry repository query failed: {message}",
        /// The entry references a user that does not exist.
        UnknownUser { user_id: i64 } =>
            "entry author {user_id} does not exist",
        /// The entry references an anger tier that does not exist.
        UnknownAngerTier { anger_tier_id: i64 } =>
            "anger tier {anger_tier_id} does not exist",
        /// The entry references a country that does not exist.
        UnknownCountry { country_code: String } =>
            "country {country_code} does not exist",
    }
}

/// Port for reading and writing feed entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// All seeded anger tiers, ascending by rank.
    async fn list_anger_tiers(&self) -> Result<Vec<AngerTier>, EntryRepositoryError>;

    /// Insert an entry and return it hydrated.
    async fn create_entry(&self, entry: &NewEntry) -> Result<Entry, EntryRepositoryError>;

    /// Find a hydrated entry by id.
    async fn find_entry(&self, id: EntryId) -> Result<Option<Entry>, EntryRepositoryError>;

    /// Replace the entry text, bumping `updated_at`.
    ///
    /// Returns `None` when the entry does not exist.
    async fn update_entry_text(
        &self,
        id: EntryId,
        text: &EntryText,
    ) -> Result<Option<Entry>, EntryRepositoryError>;

    /// Entries created strictly before `before`, newest first, at most
    /// `limit` rows, optionally restricted to one author.
    async fn list_entries(
        &self,
        before: TimestampCursor,
        limit: PageSize,
        author: Option<UserId>,
    ) -> Result<Vec<Entry>, EntryRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn constraint_errors_name_the_reference() {
        assert_eq!(
            EntryRepositoryError::unknown_anger_tier(4_i64).to_string(),
            "anger tier 4 does not exist"
        );
        assert_eq!(
            EntryRepositoryError::unknown_country("ZZ").to_string(),
            "country ZZ does not exist"
        );
    }
}
