//! Feed entries and their text constraints.

use std::fmt;

use chrono::{DateTime, Utc};
use pagination::TimestampCursor;
use serde::{Deserialize, Serialize};

use super::{AngerTier, AngerTierId, Country, CountryCode, RawRageLevel, UserId, UserSummary};

/// Default minimum entry length, in characters.
pub const DEFAULT_ENTRY_TEXT_MIN_LENGTH: usize = 1;
/// Default maximum entry length, in characters.
pub const DEFAULT_ENTRY_TEXT_MAX_LENGTH: usize = 500;

/// Validation errors for entry primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryValidationError {
    #[error("entry id must be positive, got {value}")]
    NonPositiveId { value: i64 },
    #[error("entry text must be at least {min} characters")]
    TextTooShort { min: usize },
    #[error("entry text must be at most {max} characters")]
    TextTooLong { max: usize },
}

/// Database-assigned entry identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct EntryId(i64);

impl EntryId {
    /// Validate a raw identifier.
    pub fn new(value: i64) -> Result<Self, EntryValidationError> {
        if value <= 0 {
            return Err(EntryValidationError::NonPositiveId { value });
        }
        Ok(Self(value))
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for EntryId {
    type Error = EntryValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntryId> for i64 {
    fn from(value: EntryId) -> Self {
        value.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive character bounds for [`EntryText`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTextLimits {
    min: usize,
    max: usize,
}

impl EntryTextLimits {
    /// Build limits; `min` is at least one and `max` at least `min`.
    #[must_use]
    pub fn new(min: usize, max: usize) -> Self {
        let min = min.max(1);
        Self {
            min,
            max: max.max(min),
        }
    }

    /// Minimum length.
    #[must_use]
    pub const fn min(self) -> usize {
        self.min
    }

    /// Maximum length.
    #[must_use]
    pub const fn max(self) -> usize {
        self.max
    }
}

impl Default for EntryTextLimits {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRY_TEXT_MIN_LENGTH, DEFAULT_ENTRY_TEXT_MAX_LENGTH)
    }
}

/// Entry body, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryText(String);

impl EntryText {
    /// Trim and validate text against `limits`.
    pub fn new(raw: impl AsRef<str>, limits: EntryTextLimits) -> Result<Self, EntryValidationError> {
        let trimmed = raw.as_ref().trim();
        let length = trimmed.chars().count();
        if length < limits.min() {
            return Err(EntryValidationError::TextTooShort { min: limits.min() });
        }
        if length > limits.max() {
            return Err(EntryValidationError::TextTooLong { max: limits.max() });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub(crate) fn from_persisted(raw: String) -> Self {
        Self(raw)
    }

    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Field bundle for [`Entry::new`].
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub id: EntryId,
    pub author: UserSummary,
    pub country: Country,
    pub anger_tier: AngerTier,
    pub text: EntryText,
    pub rage_level: RawRageLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A feed entry hydrated with its author, country, and tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    author: UserSummary,
    country: Country,
    anger_tier: AngerTier,
    text: EntryText,
    rage_level: RawRageLevel,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Entry {
    /// Assemble an entry from validated parts.
    #[must_use]
    pub fn new(draft: EntryDraft) -> Self {
        let EntryDraft {
            id,
            author,
            country,
            anger_tier,
            text,
            rage_level,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            author,
            country,
            anger_tier,
            text,
            rage_level,
            created_at,
            updated_at,
        }
    }

    /// Identifier.
    #[must_use]
    pub const fn id(&self) -> EntryId {
        self.id
    }

    /// Author's public profile.
    #[must_use]
    pub const fn author(&self) -> &UserSummary {
        &self.author
    }

    /// Country the entry was posted from.
    #[must_use]
    pub const fn country(&self) -> &Country {
        &self.country
    }

    /// Tier assigned when the entry was created.
    #[must_use]
    pub const fn anger_tier(&self) -> &AngerTier {
        &self.anger_tier
    }

    /// Body text.
    #[must_use]
    pub const fn text(&self) -> &EntryText {
        &self.text
    }

    /// Raw rage level submitted with the entry.
    #[must_use]
    pub const fn rage_level(&self) -> RawRageLevel {
        self.rage_level
    }

    /// Creation timestamp; the feed orders by it.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last edit timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// True when `user` wrote this entry.
    #[must_use]
    pub fn is_authored_by(&self, user: UserId) -> bool {
        self.author.id() == user
    }

    /// Cursor that pages strictly past this entry.
    #[must_use]
    pub fn cursor(&self) -> TimestampCursor {
        TimestampCursor::from_datetime(self.created_at)
    }
}

/// Data required to insert an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub author_id: UserId,
    pub country_code: CountryCode,
    pub anger_tier_id: AngerTierId,
    pub text: EntryText,
    pub rage_level: RawRageLevel,
}
