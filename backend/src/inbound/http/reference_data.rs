//! Public reference data handlers.
//!
//! ```text
//! GET /api/public/countries
//! GET /api/public/entry-config
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::EntryConfig;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{AngerTierResponse, CountryResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Countries a user may pick.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountriesResponse {
    pub countries: Vec<CountryResponse>,
}

/// Settings for the new-entry form.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryConfigResponse {
    #[schema(example = 1)]
    pub entry_text_content_minimum_length: usize,
    #[schema(example = 500)]
    pub entry_text_content_maximum_length: usize,
    /// Ascending by rank.
    pub anger_tiers: Vec<AngerTierResponse>,
}

impl From<EntryConfig> for EntryConfigResponse {
    fn from(config: EntryConfig) -> Self {
        Self {
            entry_text_content_minimum_length: config.text_limits.min(),
            entry_text_content_maximum_length: config.text_limits.max(),
            anger_tiers: config.anger_tiers.iter().map(AngerTierResponse::from).collect(),
        }
    }
}

/// List countries ordered by name.
#[utoipa::path(
    get,
    path = "/api/public/countries",
    responses(
        (status = 200, description = "Countries", body = CountriesResponse),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["reference"],
    operation_id = "listCountries",
    security([])
)]
#[get("/countries")]
pub async fn list_countries(state: web::Data<HttpState>) -> ApiResult<web::Json<CountriesResponse>> {
    let countries = state.reference_data.countries().await?;
    Ok(web::Json(CountriesResponse {
        countries: countries.iter().map(CountryResponse::from).collect(),
    }))
}

/// Text limits and anger tiers for composing an entry.
#[utoipa::path(
    get,
    path = "/api/public/entry-config",
    responses(
        (status = 200, description = "Entry form configuration", body = EntryConfigResponse),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["reference"],
    operation_id = "getEntryConfig",
    security([])
)]
#[get("/entry-config")]
pub async fn entry_config(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<EntryConfigResponse>> {
    let config = state.entries_query.entry_config().await?;
    Ok(web::Json(config.into()))
}
