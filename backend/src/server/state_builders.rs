//! Builders wiring repositories into services and HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use angrypros_backend::domain::ports::{CountryRepository, EntryRepository, UserRepository};
use angrypros_backend::domain::{EntryService, FeedService, ReferenceDataService, UserService};
use angrypros_backend::inbound::http::state::{HttpState, HttpStatePorts};
use angrypros_backend::outbound::memory::InMemoryStore;
use angrypros_backend::outbound::persistence::{
    DieselCountryRepository, DieselEntryRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Build every driving port over the given storage adapters.
fn build_ports<E, U, C>(
    entries: Arc<E>,
    users: Arc<U>,
    countries: Arc<C>,
    clock: Arc<dyn Clock>,
    config: &ServerConfig,
) -> HttpStatePorts
where
    E: EntryRepository + 'static,
    U: UserRepository + 'static,
    C: CountryRepository + 'static,
{
    let entry_service = Arc::new(EntryService::new(
        entries.clone(),
        config.entry_text_limits,
    ));
    let user_service = Arc::new(UserService::new(users, config.user_title_limits));
    HttpStatePorts {
        feed: Arc::new(FeedService::new(entries, clock)),
        entries: entry_service.clone(),
        entries_query: entry_service,
        users: user_service.clone(),
        users_query: user_service,
        reference_data: Arc::new(ReferenceDataService::new(countries)),
        identity: config.identity.clone(),
    }
}

/// Diesel adapters when a pool is configured, otherwise one shared
/// in-memory store seeded like the migrations.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let ports = match &config.db_pool {
        Some(pool) => build_ports(
            Arc::new(DieselEntryRepository::new(pool.clone(), clock.clone())),
            Arc::new(DieselUserRepository::new(pool.clone(), clock.clone())),
            Arc::new(DieselCountryRepository::new(pool.clone())),
            clock,
            config,
        ),
        None => {
            let store = Arc::new(InMemoryStore::seeded(clock.clone()));
            build_ports(store.clone(), store.clone(), store, clock, config)
        }
    };
    web::Data::new(HttpState::new(ports, config.feed_page_size))
}
