//! Reference data lookups backing registration forms.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Country;
use crate::domain::Error;
use crate::domain::ports::{CountryRepository, CountryRepositoryError, ReferenceDataQuery};

fn map_country_repository_error(error: CountryRepositoryError) -> Error {
    match error {
        CountryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("country repository unavailable: {message}"))
        }
        CountryRepositoryError::Query { message } => {
            Error::internal(format!("country repository error: {message}"))
        }
    }
}

/// Reference data service implementing [`ReferenceDataQuery`].
#[derive(Clone)]
pub struct ReferenceDataService<R> {
    countries: Arc<R>,
}

impl<R> ReferenceDataService<R> {
    /// Create a new reference data service with the country repository.
    pub fn new(countries: Arc<R>) -> Self {
        Self { countries }
    }
}

#[async_trait]
impl<R> ReferenceDataQuery for ReferenceDataService<R>
where
    R: CountryRepository,
{
    async fn countries(&self) -> Result<Vec<Country>, Error> {
        let mut countries = self
            .countries
            .list_countries()
            .await
            .map_err(map_country_repository_error)?;
        countries.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(countries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockCountryRepository;
    use crate::domain::{CountryCode, test_fixtures::singapore};

    fn country(code: &str, name: &str) -> Country {
        Country::new(CountryCode::new(code).expect("code"), name)
    }

    #[tokio::test]
    async fn countries_are_sorted_by_name() {
        let mut repo = MockCountryRepository::new();
        repo.expect_list_countries().times(1).return_once(|| {
            Ok(vec![
                singapore(),
                country("AU", "Australia"),
                country("NZ", "New Zealand"),
            ])
        });

        let names: Vec<String> = ReferenceDataService::new(Arc::new(repo))
            .countries()
            .await
            .expect("countries")
            .iter()
            .map(|c| c.name().to_owned())
            .collect();

        assert_eq!(names, ["Australia", "New Zealand", "Singapore"]);
    }

    #[tokio::test]
    async fn connection_failure_is_service_unavailable() {
        let mut repo = MockCountryRepository::new();
        repo.expect_list_countries()
            .times(1)
            .return_once(|| Err(CountryRepositoryError::connection("down")));

        let error = ReferenceDataService::new(Arc::new(repo))
            .countries()
            .await
            .expect_err("unavailable");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
