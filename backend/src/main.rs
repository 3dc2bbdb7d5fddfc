//! Backend entry-point: loads settings, prepares storage and identity
//! adapters, and serves the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use angrypros_backend::domain::ports::{FixtureIdentityProvider, IdentityProvider};
use angrypros_backend::inbound::http::health::HealthState;
use angrypros_backend::outbound::identity::{IdentityToolkitConfig, IdentityToolkitProvider};
use angrypros_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use angrypros_backend::settings::{
    AppSettings, IdentitySettings, RuntimeSettings, StorageSettings,
};
use server::{ServerConfig, create_server};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

fn load_settings() -> std::io::Result<RuntimeSettings> {
    let raw = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;
    raw.resolve()
        .map_err(|e| std::io::Error::other(format!("invalid configuration: {e}")))
}

fn build_identity(settings: &RuntimeSettings) -> std::io::Result<Arc<dyn IdentityProvider>> {
    match &settings.identity {
        IdentitySettings::IdentityToolkit { base_url, api_key } => {
            let config = IdentityToolkitConfig::new(base_url.clone(), api_key.clone());
            let provider = IdentityToolkitProvider::new(config).map_err(|e| {
                std::io::Error::other(format!("identity provider setup failed: {e}"))
            })?;
            Ok(Arc::new(provider))
        }
        IdentitySettings::Fixture => {
            warn!(
                environment = %settings.environment,
                "accepting fixture identity tokens"
            );
            Ok(Arc::new(FixtureIdentityProvider))
        }
    }
}

async fn build_pool(settings: &RuntimeSettings) -> std::io::Result<Option<DbPool>> {
    let StorageSettings::Database {
        url,
        max_connections,
    } = &settings.storage
    else {
        warn!(
            environment = %settings.environment,
            "no database configured; using in-memory storage"
        );
        return Ok(None);
    };

    if settings.run_migrations {
        run_pending_migrations(url)
            .await
            .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
    }
    let pool = DbPool::new(PoolConfig::new(url.clone()).with_max_size(*max_connections))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;
    Ok(Some(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let settings = load_settings()?;
    let identity = build_identity(&settings)?;
    let pool = build_pool(&settings).await?;

    let mut config = ServerConfig::new(settings.bind_addr, identity)
        .with_feed_page_size(settings.feed_page_size)
        .with_limits(settings.entry_text_limits, settings.user_title_limits);
    if let Some(pool) = pool {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(
        bind_addr = %settings.bind_addr,
        environment = %settings.environment,
        "server listening"
    );
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
