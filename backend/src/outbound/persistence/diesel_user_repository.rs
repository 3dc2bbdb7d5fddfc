//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use std::sync::Arc;

use async_trait::async_trait;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use mockable::Clock;

use crate::domain::ports::{NewUser, ProfileUpdate, UserRepository, UserRepositoryError};
use crate::domain::{CountryCode, EmailAddress, IdentitySubject, User, UserId};

use super::diesel_error_mapping::{
    KnownConstraint, known_constraint, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{CountryRow, NewUserRow, UserProfileUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::row_mapping::{country_from_row, user_from_row};
use super::schema::{countries, users};

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool; `clock`
    /// stamps `created_at` and `updated_at` on writes.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn map_write_error(error: diesel::result::Error, country: &CountryCode) -> UserRepositoryError {
    match known_constraint(&error) {
        Some(KnownConstraint::UserSubject) => UserRepositoryError::already_registered(),
        Some(KnownConstraint::UserEmail) => UserRepositoryError::email_in_use(),
        Some(KnownConstraint::UserCountry) => UserRepositoryError::unknown_country(country.as_str()),
        _ => map_diesel_error(error),
    }
}

fn into_user((user, country): (UserRow, CountryRow)) -> Result<User, UserRepositoryError> {
    let country = country_from_row(country).map_err(UserRepositoryError::query)?;
    user_from_row(user, country).map_err(UserRepositoryError::query)
}

#[derive(Debug, Clone, Copy)]
enum UserLookup<'a> {
    Id(i64),
    Subject(&'a str),
    Email(&'a str),
}

async fn load_user(
    conn: &mut AsyncPgConnection,
    lookup: UserLookup<'_>,
) -> Result<Option<User>, UserRepositoryError> {
    let query = users::table
        .inner_join(countries::table)
        .select((UserRow::as_select(), CountryRow::as_select()))
        .into_boxed();
    let query = match lookup {
        UserLookup::Id(id) => query.filter(users::id.eq(id)),
        UserLookup::Subject(subject) => query.filter(users::subject.eq(subject)),
        UserLookup::Email(email) => query.filter(users::email.eq(email)),
    };

    let row: Option<(UserRow, CountryRow)> = query
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

    row.map(into_user).transpose()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let now = self.now();
        let row = NewUserRow {
            subject: user.subject.as_str(),
            title: user.title.as_str(),
            email: user.email.as_str(),
            country_code: user.country_code.as_str(),
            created_at: now,
            updated_at: now,
        };
        let id: i64 = diesel::insert_into(users::table)
            .values(&row)
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &user.country_code))?;

        load_user(&mut conn, UserLookup::Id(id))
            .await?
            .ok_or_else(|| UserRepositoryError::query(format!("user {id} vanished after insert")))
    }

    async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = UserProfileUpdate {
            title: update.title.as_str(),
            country_code: update.country_code.as_str(),
            updated_at: self.now(),
        };
        let updated = diesel::update(users::table.find(id.get()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &update.country_code))?;
        if updated == 0 {
            return Ok(None);
        }

        load_user(&mut conn, UserLookup::Id(id.get())).await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_user(&mut conn, UserLookup::Id(id.get())).await
    }

    async fn find_by_subject(
        &self,
        subject: &IdentitySubject,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_user(&mut conn, UserLookup::Subject(subject.as_str())).await
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_user(&mut conn, UserLookup::Email(email.as_str())).await
    }
}
