//! Driving port for creating and editing entries.

use async_trait::async_trait;

use crate::domain::{Entry, EntryId, Error, User};

/// Request to post a new entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEntryRequest {
    pub text: String,
    pub rage_level: i32,
}

/// Request to change an entry's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEntryRequest {
    pub entry_id: EntryId,
    pub text: String,
}

/// Domain use-case port for entry mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryCommand: Send + Sync {
    /// Classify and store a new entry written by `author`.
    async fn create_entry(&self, author: &User, request: CreateEntryRequest)
    -> Result<Entry, Error>;

    /// Edit an entry; only its author may do so.
    async fn edit_entry(&self, editor: &User, request: EditEntryRequest) -> Result<Entry, Error>;
}
