//! Driven port for country reference data.

use async_trait::async_trait;

use crate::domain::Country;

use super::define_port_error;

define_port_error! {
    /// Errors raised by country repository adapters.
    pub enum CountryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "country repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "country repository query failed: {message}",
    }
}

/// Port for reading seeded countries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryRepository: Send + Sync {
    /// All countries ordered by name.
    async fn list_countries(&self) -> Result<Vec<Country>, CountryRepositoryError>;
}
