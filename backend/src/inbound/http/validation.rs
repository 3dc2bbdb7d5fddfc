//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path identifiers arrive as raw strings. A segment that is not a valid
//! identifier cannot name an existing resource, so it maps to `404` rather
//! than a validation error.

use crate::domain::{EntryId, Error, UserId};

/// Newtype wrapper for the resource named in not-found messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResourceName(&'static str);

impl ResourceName {
    pub(crate) const ENTRY: Self = Self("entry");
    pub(crate) const PROFILE: Self = Self("profile");

    const fn as_str(self) -> &'static str {
        self.0
    }
}

fn not_found(raw: &str, resource: ResourceName) -> Error {
    Error::not_found(format!("{} {raw} not found", resource.as_str()))
}

pub(crate) fn parse_entry_id(raw: &str) -> Result<EntryId, Error> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|value| EntryId::new(value).ok())
        .ok_or_else(|| not_found(raw, ResourceName::ENTRY))
}

pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|value| UserId::new(value).ok())
        .ok_or_else(|| not_found(raw, ResourceName::PROFILE))
}
