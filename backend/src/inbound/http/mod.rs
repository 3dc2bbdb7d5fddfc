//! HTTP inbound adapter exposing REST endpoints.
//!
//! Routes live under two scopes: `/api/public`, where credentials are
//! optional and failures are ignored, and `/api`, where a bearer token is
//! required.

pub mod auth;
pub mod dto;
pub mod entries;
pub mod error;
pub mod feed;
pub mod health;
pub mod reference_data;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Mount the public and authenticated API scopes.
///
/// Expects [`state::HttpState`] to be registered as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use angrypros_backend::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(
            web::scope("/api/public")
                .service(health::healthcheck)
                .service(reference_data::list_countries)
                .service(reference_data::entry_config)
                .service(users::get_profile)
                .service(feed::get_feed),
        )
        .service(
            web::scope("/api")
                .service(users::current_user)
                .service(users::register_user)
                .service(users::edit_user)
                .service(entries::create_entry)
                .service(entries::get_entry)
                .service(entries::edit_entry),
        );
}
