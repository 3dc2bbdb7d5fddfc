//! PostgreSQL-backed `EntryRepository` implementation using Diesel ORM.
//!
//! Entries are read joined with their author and anger tier; countries for
//! both the entry and its author are resolved with one follow-up lookup.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use mockable::Clock;
use pagination::{PageSize, TimestampCursor};

use crate::domain::ports::{EntryRepository, EntryRepositoryError};
use crate::domain::{AngerTier, Entry, EntryId, EntryText, NewEntry, UserId};

use super::diesel_error_mapping::{
    KnownConstraint, known_constraint, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{AngerTierRow, CountryRow, EntryRow, EntryTextUpdate, NewEntryRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::row_mapping::{entry_from_rows, index_countries, tier_from_row};
use super::schema::{anger_tiers, countries, entries, users};

type EntryJoinRow = (EntryRow, UserRow, AngerTierRow);

/// Diesel-backed implementation of the entry repository port.
#[derive(Clone)]
pub struct DieselEntryRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselEntryRepository {
    /// Create a new repository with the given connection pool; `clock`
    /// stamps `created_at` and `updated_at` on writes.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }
}

fn map_pool_error(error: PoolError) -> EntryRepositoryError {
    map_basic_pool_error(error, EntryRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> EntryRepositoryError {
    map_basic_diesel_error(
        error,
        EntryRepositoryError::query,
        EntryRepositoryError::connection,
    )
}

fn map_insert_error(error: diesel::result::Error, entry: &NewEntry) -> EntryRepositoryError {
    match known_constraint(&error) {
        Some(KnownConstraint::EntryUser) => {
            EntryRepositoryError::unknown_user(entry.author_id.get())
        }
        Some(KnownConstraint::EntryCountry) => {
            EntryRepositoryError::unknown_country(entry.country_code.as_str())
        }
        Some(KnownConstraint::EntryAngerTier) => {
            EntryRepositoryError::unknown_anger_tier(entry.anger_tier_id.get())
        }
        _ => map_diesel_error(error),
    }
}

async fn hydrate(
    conn: &mut AsyncPgConnection,
    rows: Vec<EntryJoinRow>,
) -> Result<Vec<Entry>, EntryRepositoryError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let codes: BTreeSet<&str> = rows
        .iter()
        .flat_map(|(entry, author, _)| [entry.country_code.as_str(), author.country_code.as_str()])
        .collect();
    let country_rows: Vec<CountryRow> = countries::table
        .filter(countries::code.eq_any(codes))
        .select(CountryRow::as_select())
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    let index = index_countries(country_rows).map_err(EntryRepositoryError::query)?;

    rows.into_iter()
        .map(|(entry, author, tier)| entry_from_rows(entry, author, tier, &index))
        .collect::<Result<Vec<_>, _>>()
        .map_err(EntryRepositoryError::query)
}

async fn load_entry(
    conn: &mut AsyncPgConnection,
    id: i64,
) -> Result<Option<Entry>, EntryRepositoryError> {
    let row: Option<EntryJoinRow> = entries::table
        .inner_join(users::table)
        .inner_join(anger_tiers::table)
        .filter(entries::id.eq(id))
        .select((
            EntryRow::as_select(),
            UserRow::as_select(),
            AngerTierRow::as_select(),
        ))
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

    match row {
        Some(row) => Ok(hydrate(conn, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

#[async_trait]
impl EntryRepository for DieselEntryRepository {
    async fn list_anger_tiers(&self) -> Result<Vec<AngerTier>, EntryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AngerTierRow> = anger_tiers::table
            .order(anger_tiers::rank.asc())
            .select(AngerTierRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(tier_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(EntryRepositoryError::query)
    }

    async fn create_entry(&self, entry: &NewEntry) -> Result<Entry, EntryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let now = self.now();
        let row = NewEntryRow {
            user_id: entry.author_id.get(),
            country_code: entry.country_code.as_str(),
            anger_tier_id: entry.anger_tier_id.get(),
            text: entry.text.as_str(),
            rage_level: entry.rage_level.get(),
            created_at: now,
            updated_at: now,
        };
        let id: i64 = diesel::insert_into(entries::table)
            .values(&row)
            .returning(entries::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, entry))?;

        load_entry(&mut conn, id)
            .await?
            .ok_or_else(|| EntryRepositoryError::query(format!("entry {id} vanished after insert")))
    }

    async fn find_entry(&self, id: EntryId) -> Result<Option<Entry>, EntryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_entry(&mut conn, id.get()).await
    }

    async fn update_entry_text(
        &self,
        id: EntryId,
        text: &EntryText,
    ) -> Result<Option<Entry>, EntryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = EntryTextUpdate {
            text: text.as_str(),
            updated_at: self.now(),
        };
        let updated = diesel::update(entries::table.find(id.get()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Ok(None);
        }

        load_entry(&mut conn, id.get()).await
    }

    async fn list_entries(
        &self,
        before: TimestampCursor,
        limit: PageSize,
        author: Option<UserId>,
    ) -> Result<Vec<Entry>, EntryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = entries::table
            .inner_join(users::table)
            .inner_join(anger_tiers::table)
            .filter(entries::created_at.lt(before.as_datetime()))
            .select((
                EntryRow::as_select(),
                UserRow::as_select(),
                AngerTierRow::as_select(),
            ))
            .order((entries::created_at.desc(), entries::id.desc()))
            .limit(limit.as_limit())
            .into_boxed();
        if let Some(author) = author {
            query = query.filter(entries::user_id.eq(author.get()));
        }

        let rows: Vec<EntryJoinRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        hydrate(&mut conn, rows).await
    }
}
