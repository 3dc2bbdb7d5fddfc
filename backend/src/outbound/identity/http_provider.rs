//! Reqwest-backed Identity Toolkit adapter.
//!
//! Verifies ID tokens by looking up the account they belong to. The adapter
//! owns transport details only: request shape, timeout, status mapping, and
//! JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::warn;

use super::dto::{LookupRequestDto, LookupResponseDto};
use crate::domain::ports::{IdentityProvider, IdentityProviderError, VerifiedIdentity};

const LOOKUP_PATH: &str = "v1/accounts:lookup";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`IdentityToolkitProvider`].
#[derive(Debug, Clone)]
pub struct IdentityToolkitConfig {
    /// Service root, for example `https://identitytoolkit.googleapis.com`.
    pub base_url: Url,
    /// Web API key appended as the `key` query parameter.
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl IdentityToolkitConfig {
    /// Settings with the default ten second timeout.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Identity provider adapter calling `accounts:lookup`.
pub struct IdentityToolkitProvider {
    client: Client,
    lookup_url: Url,
}

impl IdentityToolkitProvider {
    /// Build the adapter.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::Unavailable`] when the lookup URL
    /// cannot be derived from `base_url` or the HTTP client cannot be built.
    pub fn new(config: IdentityToolkitConfig) -> Result<Self, IdentityProviderError> {
        let lookup_url = lookup_url(&config.base_url, &config.api_key)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| IdentityProviderError::unavailable(err.to_string()))?;
        Ok(Self { client, lookup_url })
    }
}

fn lookup_url(base_url: &Url, api_key: &str) -> Result<Url, IdentityProviderError> {
    let mut root = base_url.clone();
    if !root.path().ends_with('/') {
        let path = format!("{}/", root.path());
        root.set_path(&path);
    }
    let mut url = root
        .join(LOOKUP_PATH)
        .map_err(|err| IdentityProviderError::unavailable(format!("invalid lookup url: {err}")))?;
    url.query_pairs_mut().append_pair("key", api_key);
    Ok(url)
}

#[async_trait]
impl IdentityProvider for IdentityToolkitProvider {
    async fn verify_id_token(&self, token: &str) -> Result<VerifiedIdentity, IdentityProviderError> {
        let response = self
            .client
            .post(self.lookup_url.clone())
            .json(&LookupRequestDto { id_token: token })
            .send()
            .await
            .map_err(|err| IdentityProviderError::unavailable(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| IdentityProviderError::unavailable(err.to_string()))?;
        if !status.is_success() {
            return Err(map_status_error(status));
        }

        parse_identity(body.as_ref())
    }
}

fn parse_identity(body: &[u8]) -> Result<VerifiedIdentity, IdentityProviderError> {
    let decoded: LookupResponseDto = serde_json::from_slice(body).map_err(|err| {
        IdentityProviderError::unavailable(format!("invalid lookup payload: {err}"))
    })?;
    decoded
        .into_identity()
        .map_err(IdentityProviderError::invalid_token)
}

fn map_status_error(status: StatusCode) -> IdentityProviderError {
    let message = format!("identity lookup returned status {}", status.as_u16());
    match status {
        StatusCode::BAD_REQUEST => IdentityProviderError::invalid_token(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            warn!(
                status = status.as_u16(),
                "identity provider rejected the API key"
            );
            IdentityProviderError::unavailable(message)
        }
        _ => {
            warn!(status = status.as_u16(), "identity provider unavailable");
            IdentityProviderError::unavailable(message)
        }
    }
}
