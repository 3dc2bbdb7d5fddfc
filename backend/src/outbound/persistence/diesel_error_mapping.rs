//! Shared Diesel error mapping for the feed repositories.
//!
//! Constraint violations are classified from Diesel's `DatabaseErrorKind` and
//! the violated constraint's name, never from the driver's message text. The
//! names match the `CONSTRAINT` clauses in `backend/migrations`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Constraints with a dedicated domain meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum KnownConstraint {
    UserSubject,
    UserEmail,
    UserCountry,
    EntryUser,
    EntryCountry,
    EntryAngerTier,
}

const KNOWN_CONSTRAINTS: &[(DatabaseErrorKind, &str, KnownConstraint)] = &[
    (
        DatabaseErrorKind::UniqueViolation,
        "users_subject_key",
        KnownConstraint::UserSubject,
    ),
    (
        DatabaseErrorKind::UniqueViolation,
        "users_email_key",
        KnownConstraint::UserEmail,
    ),
    (
        DatabaseErrorKind::ForeignKeyViolation,
        "users_country_code_fkey",
        KnownConstraint::UserCountry,
    ),
    (
        DatabaseErrorKind::ForeignKeyViolation,
        "entries_user_id_fkey",
        KnownConstraint::EntryUser,
    ),
    (
        DatabaseErrorKind::ForeignKeyViolation,
        "entries_country_code_fkey",
        KnownConstraint::EntryCountry,
    ),
    (
        DatabaseErrorKind::ForeignKeyViolation,
        "entries_anger_tier_id_fkey",
        KnownConstraint::EntryAngerTier,
    ),
];

fn same_kind(left: &DatabaseErrorKind, right: &DatabaseErrorKind) -> bool {
    std::mem::discriminant(left) == std::mem::discriminant(right)
}

/// Identify which known constraint, if any, `error` violated.
pub(super) fn known_constraint(error: &DieselError) -> Option<KnownConstraint> {
    let DieselError::DatabaseError(kind, info) = error else {
        return None;
    };
    let name = info.constraint_name()?;
    KNOWN_CONSTRAINTS
        .iter()
        .find(|(known_kind, known_name, _)| same_kind(known_kind, kind) && *known_name == name)
        .map(|(_, _, constraint)| *constraint)
}

/// Map pool errors into a repository-specific connection error constructor.
pub(super) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel errors without a constraint meaning into query/connection
/// constructors.
pub(super) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::BrokenTransactionManager => connection("database connection error"),
        _ => query("database error"),
    }
}
