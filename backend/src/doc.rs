//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler path, the wire DTO schemas, and the
//! bearer-token security scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use crate::inbound::http::dto::{AngerTierResponse, CountryResponse, EntryResponse, UserResponse};
use crate::inbound::http::entries::{CreateEntryBody, EditEntryBody};
use crate::inbound::http::feed::FeedResponse;
use crate::inbound::http::reference_data::{CountriesResponse, EntryConfigResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::UserProfileBody;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "IdentityToken";

/// Register the identity provider bearer token scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("ID token issued by the identity provider."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Angry Pros API",
        description = "Public feed of workplace grievances, graded by anger tier."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("IdentityToken" = [])),
    paths(
        crate::inbound::http::feed::get_feed,
        crate::inbound::http::entries::create_entry,
        crate::inbound::http::entries::get_entry,
        crate::inbound::http::entries::edit_entry,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::edit_user,
        crate::inbound::http::users::get_profile,
        crate::inbound::http::reference_data::list_countries,
        crate::inbound::http::reference_data::entry_config,
        crate::inbound::http::health::healthcheck,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CountryResponse,
        UserResponse,
        AngerTierResponse,
        EntryResponse,
        FeedResponse,
        CountriesResponse,
        EntryConfigResponse,
        CreateEntryBody,
        EditEntryBody,
        UserProfileBody,
    )),
    tags(
        (name = "feed", description = "Browsing entries"),
        (name = "entries", description = "Writing and editing entries"),
        (name = "users", description = "Registration and profiles"),
        (name = "reference", description = "Countries and entry form settings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
