//! Application configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `ANGRYPROS_*` environment variables over an
//! optional config file. [`AppSettings::resolve`] validates the raw values
//! once at startup and yields [`RuntimeSettings`], so the rest of the
//! process never re-parses strings.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use pagination::PageSize;
use reqwest::Url;
use serde::Deserialize;

use crate::domain::{
    DEFAULT_ENTRY_TEXT_MAX_LENGTH, DEFAULT_ENTRY_TEXT_MIN_LENGTH, DEFAULT_TITLE_MAX_LENGTH,
    DEFAULT_TITLE_MIN_LENGTH, EntryTextLimits, UserTitleLimits,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_FEED_PAGE_SIZE: u32 = 10;
const DEFAULT_RUN_MIGRATIONS: bool = true;

/// Deployment environment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Test,
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Name used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    /// Whether development fixtures (in-memory storage, fixture tokens) may
    /// stand in for real adapters.
    #[must_use]
    pub const fn allows_fixtures(self) -> bool {
        !matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "test" => Ok(Self::Test),
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            _ => Err(SettingsError::UnknownEnvironment {
                name: s.to_owned(),
            }),
        }
    }
}

/// Configuration problems detected while resolving settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown environment `{name}`; expected test, development, or production")]
    UnknownEnvironment { name: String },
    #[error("bind address `{value}` is not a socket address")]
    InvalidBindAddr { value: String },
    #[error("identity base URL `{value}` is not a valid URL")]
    InvalidIdentityBaseUrl { value: String },
    #[error("{setting} is required in production")]
    MissingInProduction { setting: &'static str },
    #[error("{setting} minimum {min} exceeds maximum {max}")]
    InvertedLimits {
        setting: &'static str,
        min: usize,
        max: usize,
    },
}

/// Raw configuration values.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ANGRYPROS")]
pub struct AppSettings {
    /// Socket address for the HTTP listener.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; absent means in-memory storage.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Entries per feed page.
    pub feed_page_size: Option<u32>,
    pub entry_text_min_length: Option<usize>,
    pub entry_text_max_length: Option<usize>,
    pub user_title_min_length: Option<usize>,
    pub user_title_max_length: Option<usize>,
    /// Identity Toolkit web API key; absent means fixture tokens.
    pub identity_api_key: Option<String>,
    pub identity_base_url: Option<String>,
    /// Apply embedded migrations at startup.
    pub run_migrations: Option<bool>,
    /// One of `test`, `development`, `production`.
    pub environment: Option<String>,
}

/// Where entries and users are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageSettings {
    Database { url: String, max_connections: u32 },
    InMemory,
}

/// How bearer tokens are verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySettings {
    IdentityToolkit { base_url: Url, api_key: String },
    Fixture,
}

/// Validated settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
    pub environment: Environment,
    pub bind_addr: SocketAddr,
    pub storage: StorageSettings,
    pub identity: IdentitySettings,
    pub run_migrations: bool,
    pub feed_page_size: PageSize,
    pub entry_text_limits: EntryTextLimits,
    pub user_title_limits: UserTitleLimits,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn checked_bounds(
    setting: &'static str,
    min: usize,
    max: usize,
) -> Result<(usize, usize), SettingsError> {
    if min > max {
        return Err(SettingsError::InvertedLimits { setting, min, max });
    }
    Ok((min, max))
}

impl AppSettings {
    /// The configured environment, defaulting to development.
    ///
    /// # Errors
    ///
    /// [`SettingsError::UnknownEnvironment`] for any other name.
    pub fn environment(&self) -> Result<Environment, SettingsError> {
        non_blank(self.environment.as_ref()).map_or(Ok(Environment::default()), str::parse)
    }

    /// The listener address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = non_blank(self.bind_addr.as_ref()).unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
        })
    }

    pub fn feed_page_size(&self) -> PageSize {
        PageSize::new(self.feed_page_size.unwrap_or(DEFAULT_FEED_PAGE_SIZE))
    }

    fn storage(&self) -> StorageSettings {
        match non_blank(self.database_url.as_ref()) {
            Some(url) => StorageSettings::Database {
                url: url.to_owned(),
                max_connections: self
                    .db_max_connections
                    .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            },
            None => StorageSettings::InMemory,
        }
    }

    fn identity(&self) -> Result<IdentitySettings, SettingsError> {
        let Some(api_key) = non_blank(self.identity_api_key.as_ref()) else {
            return Ok(IdentitySettings::Fixture);
        };
        let raw = non_blank(self.identity_base_url.as_ref()).unwrap_or(DEFAULT_IDENTITY_BASE_URL);
        let base_url = Url::parse(raw).map_err(|_| SettingsError::InvalidIdentityBaseUrl {
            value: raw.to_owned(),
        })?;
        Ok(IdentitySettings::IdentityToolkit {
            base_url,
            api_key: api_key.to_owned(),
        })
    }

    fn entry_text_limits(&self) -> Result<EntryTextLimits, SettingsError> {
        let (min, max) = checked_bounds(
            "entry_text_length",
            self.entry_text_min_length
                .unwrap_or(DEFAULT_ENTRY_TEXT_MIN_LENGTH),
            self.entry_text_max_length
                .unwrap_or(DEFAULT_ENTRY_TEXT_MAX_LENGTH),
        )?;
        Ok(EntryTextLimits::new(min, max))
    }

    fn user_title_limits(&self) -> Result<UserTitleLimits, SettingsError> {
        let (min, max) = checked_bounds(
            "user_title_length",
            self.user_title_min_length.unwrap_or(DEFAULT_TITLE_MIN_LENGTH),
            self.user_title_max_length.unwrap_or(DEFAULT_TITLE_MAX_LENGTH),
        )?;
        Ok(UserTitleLimits::new(min, max))
    }

    /// Validate every value and apply defaults.
    ///
    /// Production refuses the in-memory store and fixture tokens.
    ///
    /// # Errors
    ///
    /// Returns the first [`SettingsError`] encountered.
    pub fn resolve(&self) -> Result<RuntimeSettings, SettingsError> {
        let environment = self.environment()?;
        let storage = self.storage();
        let identity = self.identity()?;
        if !environment.allows_fixtures() {
            if storage == StorageSettings::InMemory {
                return Err(SettingsError::MissingInProduction {
                    setting: "database_url",
                });
            }
            if identity == IdentitySettings::Fixture {
                return Err(SettingsError::MissingInProduction {
                    setting: "identity_api_key",
                });
            }
        }
        Ok(RuntimeSettings {
            environment,
            bind_addr: self.bind_addr()?,
            storage,
            identity,
            run_migrations: self.run_migrations.unwrap_or(DEFAULT_RUN_MIGRATIONS),
            feed_page_size: self.feed_page_size(),
            entry_text_limits: self.entry_text_limits()?,
            user_title_limits: self.user_title_limits()?,
        })
    }
}
