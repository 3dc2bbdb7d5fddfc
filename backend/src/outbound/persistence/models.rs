//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{anger_tiers, countries, entries, users};

/// Row struct for reading from the countries table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = countries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CountryRow {
    pub code: String,
    pub name: String,
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub subject: String,
    pub title: String,
    pub email: String,
    pub country_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for registering users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub subject: &'a str,
    pub title: &'a str,
    pub email: &'a str,
    pub country_code: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for profile edits.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileUpdate<'a> {
    pub title: &'a str,
    pub country_code: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the anger_tiers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = anger_tiers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AngerTierRow {
    pub id: i64,
    pub label: String,
    pub rank: i32,
}

/// Row struct for reading from the entries table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EntryRow {
    pub id: i64,
    pub country_code: String,
    pub text: String,
    pub rage_level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = entries)]
pub(crate) struct NewEntryRow<'a> {
    pub user_id: i64,
    pub country_code: &'a str,
    pub anger_tier_id: i64,
    pub text: &'a str,
    pub rage_level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for entry text edits.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = entries)]
pub(crate) struct EntryTextUpdate<'a> {
    pub text: &'a str,
    pub updated_at: DateTime<Utc>,
}
