//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed entities for the feed and the services
//! that implement the driving ports consumed by inbound adapters. Types are
//! immutable once constructed and validate their invariants up front.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifiers.
//! - User, UserSummary, Country: registered authors and their location.
//! - AngerTier, RageTierClassifier: the tier lookup applied to new entries.
//! - Entry, NewEntry: hydrated feed entries and insert payloads.
//! - FeedService, EntryService, UserService, ReferenceDataService.

pub mod anger_tier;
pub mod entry;
mod entry_service;
pub mod error;
mod feed_service;
pub mod ports;
mod reference_data_service;
#[cfg(test)]
pub(crate) mod test_fixtures;
pub mod trace_id;
pub mod user;
mod user_service;

pub use self::anger_tier::{
    AngerTier, AngerTierId, AngerTierValidationError, ClassificationError,
    RAGE_LEVEL_BAND_WIDTH, RageTierClassifier, RawRageLevel, TierRank,
};
pub use self::entry::{
    DEFAULT_ENTRY_TEXT_MAX_LENGTH, DEFAULT_ENTRY_TEXT_MIN_LENGTH, Entry, EntryDraft, EntryId,
    EntryText, EntryTextLimits, EntryValidationError, NewEntry,
};
pub use self::entry_service::EntryService;
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::feed_service::FeedService;
pub use self::reference_data_service::ReferenceDataService;
pub use self::trace_id::TraceId;
pub use self::user::{
    Country, CountryCode, DEFAULT_TITLE_MAX_LENGTH, DEFAULT_TITLE_MIN_LENGTH, EmailAddress,
    IdentitySubject, User, UserDraft, UserId, UserSummary, UserTitle, UserTitleLimits,
    UserValidationError,
};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use angrypros_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
