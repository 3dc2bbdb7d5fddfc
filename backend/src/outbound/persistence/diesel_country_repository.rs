//! PostgreSQL-backed `CountryRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::Country;
use crate::domain::ports::{CountryRepository, CountryRepositoryError};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::CountryRow;
use super::pool::DbPool;
use super::row_mapping::country_from_row;
use super::schema::countries;

/// Diesel-backed implementation of the country repository port.
#[derive(Clone)]
pub struct DieselCountryRepository {
    pool: DbPool,
}

impl DieselCountryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountryRepository for DieselCountryRepository {
    async fn list_countries(&self) -> Result<Vec<Country>, CountryRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, CountryRepositoryError::connection))?;

        let rows: Vec<CountryRow> = countries::table
            .order(countries::name.asc())
            .select(CountryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| {
                map_basic_diesel_error(
                    err,
                    CountryRepositoryError::query,
                    CountryRepositoryError::connection,
                )
            })?;

        rows.into_iter()
            .map(country_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(CountryRepositoryError::query)
    }
}
