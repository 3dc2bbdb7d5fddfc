//! Entry domain services.
//!
//! Creating an entry classifies its raw rage level into an anger tier before
//! persisting; editing is restricted to the entry's author.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CreateEntryRequest, EditEntryRequest, EntryCommand, EntryConfig, EntryQuery, EntryRepository,
    EntryRepositoryError,
};
use crate::domain::{
    AngerTier, ClassificationError, Entry, EntryId, EntryText, EntryTextLimits, Error, NewEntry,
    RageTierClassifier, RawRageLevel, User,
};

pub(crate) fn map_entry_repository_error(error: EntryRepositoryError) -> Error {
    match error {
        EntryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("entry repository unavailable: {message}"))
        }
        EntryRepositoryError::Query { message } => {
            Error::internal(format!("entry repository error: {message}"))
        }
        err @ (EntryRepositoryError::UnknownUser { .. }
        | EntryRepositoryError::UnknownCountry { .. }) => Error::invalid_request(err.to_string()),
        err @ EntryRepositoryError::UnknownAngerTier { .. } => Error::internal(err.to_string()),
    }
}

fn map_classification_error(error: ClassificationError) -> Error {
    Error::internal(format!("anger tier configuration cannot classify: {error}"))
}

/// Entry service implementing [`EntryCommand`] and [`EntryQuery`].
#[derive(Clone)]
pub struct EntryService<R> {
    entries: Arc<R>,
    text_limits: EntryTextLimits,
}

impl<R> EntryService<R> {
    /// Create a new entry service with the entry repository and text bounds.
    pub fn new(entries: Arc<R>, text_limits: EntryTextLimits) -> Self {
        Self {
            entries,
            text_limits,
        }
    }

    fn parse_text(&self, raw: &str) -> Result<EntryText, Error> {
        EntryText::new(raw, self.text_limits).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(serde_json::json!({
                "field": "text",
                "code": "invalid_text",
            }))
        })
    }
}

impl<R> EntryService<R>
where
    R: EntryRepository,
{
    async fn load_tiers(&self) -> Result<Vec<AngerTier>, Error> {
        self.entries
            .list_anger_tiers()
            .await
            .map_err(map_entry_repository_error)
    }

    async fn owned_entry(&self, editor: &User, id: EntryId) -> Result<Entry, Error> {
        let entry = self
            .entries
            .find_entry(id)
            .await
            .map_err(map_entry_repository_error)?
            .ok_or_else(|| Error::not_found(format!("entry {id} not found")))?;

        if !entry.is_authored_by(editor.id()) {
            return Err(Error::forbidden(format!(
                "entry {id} belongs to another user"
            )));
        }
        Ok(entry)
    }
}

#[async_trait]
impl<R> EntryCommand for EntryService<R>
where
    R: EntryRepository,
{
    async fn create_entry(
        &self,
        author: &User,
        request: CreateEntryRequest,
    ) -> Result<Entry, Error> {
        let text = self.parse_text(&request.text)?;
        let rage_level = RawRageLevel::new(request.rage_level).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(serde_json::json!({
                "field": "rageLevel",
                "code": "negative_rage_level",
            }))
        })?;

        let classifier =
            RageTierClassifier::new(self.load_tiers().await?).map_err(map_classification_error)?;
        let tier = classifier
            .classify(rage_level)
            .map_err(map_classification_error)?;

        let new_entry = NewEntry {
            author_id: author.id(),
            country_code: author.country().code().clone(),
            anger_tier_id: tier.id(),
            text,
            rage_level,
        };

        self.entries
            .create_entry(&new_entry)
            .await
            .map_err(map_entry_repository_error)
    }

    async fn edit_entry(&self, editor: &User, request: EditEntryRequest) -> Result<Entry, Error> {
        let text = self.parse_text(&request.text)?;
        let entry = self.owned_entry(editor, request.entry_id).await?;

        self.entries
            .update_entry_text(entry.id(), &text)
            .await
            .map_err(map_entry_repository_error)?
            .ok_or_else(|| Error::not_found(format!("entry {} not found", entry.id())))
    }
}

#[async_trait]
impl<R> EntryQuery for EntryService<R>
where
    R: EntryRepository,
{
    async fn get_entry(&self, id: EntryId) -> Result<Entry, Error> {
        self.entries
            .find_entry(id)
            .await
            .map_err(map_entry_repository_error)?
            .ok_or_else(|| Error::not_found(format!("entry {id} not found")))
    }

    async fn entry_config(&self) -> Result<EntryConfig, Error> {
        let classifier =
            RageTierClassifier::new(self.load_tiers().await?).map_err(map_classification_error)?;
        Ok(EntryConfig {
            text_limits: self.text_limits,
            anger_tiers: classifier.into_tiers(),
        })
    }
}

#[cfg(test)]
#[path = "entry_service_tests.rs"]
mod tests;
