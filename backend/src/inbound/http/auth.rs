//! Bearer-token extractors used by HTTP handlers.
//!
//! Clients send the identity provider's ID token as
//! `Authorization: Bearer <token>`. The extractors verify it through the
//! [`IdentityProvider`](crate::domain::ports::IdentityProvider) port and
//! resolve the registered user, so handlers receive domain values only.
//!
//! Failures carry a `reason` detail: `no_auth` (header missing),
//! `invalid_auth` (malformed or rejected token), `auth_incomplete` (valid
//! token but no registered user).

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use tracing::warn;

use crate::domain::ports::{IdentityProviderError, VerifiedIdentity};
use crate::domain::{Error, User};

use super::state::HttpState;

const BEARER_SCHEME: &str = "Bearer";

/// Why a request could not be authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthFailure {
    NoAuth,
    InvalidAuth,
    AuthIncomplete,
}

impl AuthFailure {
    const fn reason(self) -> &'static str {
        match self {
            Self::NoAuth => "no_auth",
            Self::InvalidAuth => "invalid_auth",
            Self::AuthIncomplete => "auth_incomplete",
        }
    }

    fn into_error(self) -> Error {
        let error = match self {
            Self::NoAuth => Error::unauthorized("authorization header is required"),
            Self::InvalidAuth => Error::unauthorized("bearer token is invalid"),
            Self::AuthIncomplete => Error::forbidden("registration is incomplete"),
        };
        error.with_details(json!({ "reason": self.reason() }))
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<String, Error> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AuthFailure::NoAuth.into_error())?;
    let value = value
        .to_str()
        .map_err(|_| AuthFailure::InvalidAuth.into_error())?;
    match value.trim().split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case(BEARER_SCHEME) && !token.trim().is_empty() =>
        {
            Ok(token.trim().to_owned())
        }
        _ => Err(AuthFailure::InvalidAuth.into_error()),
    }
}

fn state_from_request(request: &HttpRequest) -> Result<web::Data<HttpState>, Error> {
    request
        .app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| Error::internal("http state missing"))
}

fn map_identity_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::InvalidToken { .. } => AuthFailure::InvalidAuth.into_error(),
        IdentityProviderError::Unavailable { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
    }
}

async fn verify(request: &HttpRequest) -> Result<(web::Data<HttpState>, VerifiedIdentity), Error> {
    let state = state_from_request(request)?;
    let token = bearer_token(request.headers())?;
    let identity = state
        .identity
        .verify_id_token(&token)
        .await
        .map_err(map_identity_error)?;
    Ok((state, identity))
}

async fn resolve_user(request: &HttpRequest) -> Result<User, Error> {
    let (state, identity) = verify(request).await?;
    state
        .users_query
        .find_by_subject(&identity.subject)
        .await?
        .ok_or_else(|| AuthFailure::AuthIncomplete.into_error())
}

/// A caller whose token verified, registered or not.
///
/// Only registration accepts callers without a user record.
#[derive(Debug, Clone)]
pub struct VerifiedCaller(pub VerifiedIdentity);

impl FromRequest for VerifiedCaller {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { verify(&req).await.map(|(_, identity)| Self(identity)) })
    }
}

/// The registered user making the request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { resolve_user(&req).await.map(Self) })
    }
}

/// The registered user when the request carries valid credentials.
///
/// Public endpoints never fail on authentication; problems are logged and
/// the request proceeds anonymously.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<User>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            if !req.headers().contains_key(AUTHORIZATION) {
                return Ok(Self(None));
            }
            match resolve_user(&req).await {
                Ok(user) => Ok(Self(Some(user))),
                Err(error) => {
                    warn!(
                        code = ?error.code(),
                        details = ?error.details(),
                        "ignoring failed optional authentication"
                    );
                    Ok(Self(None))
                }
            }
        })
    }
}
