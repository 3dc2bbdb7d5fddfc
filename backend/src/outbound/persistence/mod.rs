//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations translate between Diesel rows and domain
//! types; row structs and the schema never leave this module. Connections
//! come from a `bb8` pool over `diesel-async`, and constraint violations are
//! mapped to typed port errors by constraint name.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use angrypros_backend::outbound::persistence::{DbPool, DieselEntryRepository, PoolConfig};
//! use mockable::DefaultClock;
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/angrypros")).await?;
//! let entries = DieselEntryRepository::new(pool, Arc::new(DefaultClock));
//! ```

mod diesel_country_repository;
mod diesel_entry_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod row_mapping;
mod schema;

pub use diesel_country_repository::DieselCountryRepository;
pub use diesel_entry_repository::DieselEntryRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
