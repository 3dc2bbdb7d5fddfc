//! Driven port for verifying identity provider ID tokens.
//!
//! Clients authenticate with a third-party identity provider and send the
//! resulting ID token as a bearer credential. The provider resolves it to a
//! stable subject and, when the account has one, an email address.

use async_trait::async_trait;

use crate::domain::{EmailAddress, IdentitySubject};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The token is malformed, expired, or unknown to the provider.
        InvalidToken { message: String } =>
            "identity token rejected: {message}",
        /// The provider could not be reached or answered unexpectedly.
        Unavailable { message: String } =>
            "identity provider unavailable: {message}",
    }
}

/// Identity resolved from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub subject: IdentitySubject,
    pub email: Option<EmailAddress>,
}

/// Port for verifying bearer tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve an ID token to the identity it was issued for.
    async fn verify_id_token(&self, token: &str) -> Result<VerifiedIdentity, IdentityProviderError>;
}

/// Development provider accepting tokens of the form
/// `fixture:<subject>` or `fixture:<subject>:<email>`.
///
/// # Examples
/// ```
/// use angrypros_backend::domain::ports::{FixtureIdentityProvider, IdentityProvider};
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let identity = FixtureIdentityProvider
///     .verify_id_token("fixture:uid-1:one@example.com")
///     .await
///     .expect("fixture token");
/// assert_eq!(identity.subject.as_str(), "uid-1");
/// # });
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

const FIXTURE_TOKEN_PREFIX: &str = "fixture:";

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn verify_id_token(&self, token: &str) -> Result<VerifiedIdentity, IdentityProviderError> {
        let rest = token
            .strip_prefix(FIXTURE_TOKEN_PREFIX)
            .ok_or_else(|| IdentityProviderError::invalid_token("not a fixture token"))?;
        let (subject, email) = match rest.split_once(':') {
            Some((subject, email)) => (subject, Some(email)),
            None => (rest, None),
        };
        let subject = IdentitySubject::new(subject)
            .map_err(|err| IdentityProviderError::invalid_token(err.to_string()))?;
        let email = email
            .map(EmailAddress::new)
            .transpose()
            .map_err(|err| IdentityProviderError::invalid_token(err.to_string()))?;
        Ok(VerifiedIdentity { subject, email })
    }
}
