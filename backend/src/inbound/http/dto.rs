//! Wire representations shared by several handlers.
//!
//! Domain types stay free of serialization concerns; these DTOs own the
//! camelCase JSON shape and the OpenAPI schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AngerTier, Country, Entry, UserSummary};

/// A country as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountryResponse {
    #[schema(example = "SG")]
    pub iso_alpha2_code: String,
    #[schema(example = "Singapore")]
    pub name: String,
}

impl From<&Country> for CountryResponse {
    fn from(country: &Country) -> Self {
        Self {
            iso_alpha2_code: country.code().as_str().to_owned(),
            name: country.name().to_owned(),
        }
    }
}

/// Public profile of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 42)]
    pub id: i64,
    #[schema(example = "Grumpy Reviewer")]
    pub title: String,
    pub country: CountryResponse,
}

impl From<&UserSummary> for UserResponse {
    fn from(user: &UserSummary) -> Self {
        Self {
            id: user.id().get(),
            title: user.title().as_str().to_owned(),
            country: user.country().into(),
        }
    }
}

/// An anger tier; `rageLevel` is the tier rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AngerTierResponse {
    #[schema(example = 2)]
    pub id: i64,
    #[schema(example = "Annoyed")]
    pub label: String,
    #[schema(example = 2)]
    pub rage_level: i32,
}

impl From<&AngerTier> for AngerTierResponse {
    fn from(tier: &AngerTier) -> Self {
        Self {
            id: tier.id().get(),
            label: tier.label().to_owned(),
            rage_level: tier.rank().get(),
        }
    }
}

/// A hydrated feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    #[schema(example = 1001)]
    pub id: i64,
    pub user: UserResponse,
    pub country: CountryResponse,
    pub anger_tier: AngerTierResponse,
    #[schema(example = "The deploy pipeline ate my Friday.")]
    pub text_content: String,
    /// Raw score submitted with the entry.
    #[schema(example = 14)]
    pub rage_level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Entry> for EntryResponse {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id().get(),
            user: entry.author().into(),
            country: entry.country().into(),
            anger_tier: entry.anger_tier().into(),
            text_content: entry.text().as_str().to_owned(),
            rage_level: entry.rage_level().get(),
            created_at: entry.created_at(),
            updated_at: entry.updated_at(),
        }
    }
}
