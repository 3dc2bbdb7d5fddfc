//! Driving port for static reference data.

use async_trait::async_trait;

use crate::domain::{Country, Error};

/// Domain use-case port for reference data reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceDataQuery: Send + Sync {
    /// Countries ordered by name.
    async fn countries(&self) -> Result<Vec<Country>, Error>;
}
