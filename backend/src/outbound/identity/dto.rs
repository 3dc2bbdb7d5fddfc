//! DTOs for the Identity Toolkit `accounts:lookup` call.
//!
//! The adapter decodes the provider's response into these transport types,
//! then maps the first account into a [`VerifiedIdentity`].

use serde::{Deserialize, Serialize};

use crate::domain::ports::VerifiedIdentity;
use crate::domain::{EmailAddress, IdentitySubject};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LookupRequestDto<'a> {
    pub(super) id_token: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct LookupResponseDto {
    #[serde(default)]
    pub(super) users: Vec<AccountDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AccountDto {
    pub(super) local_id: String,
    pub(super) email: Option<String>,
}

impl LookupResponseDto {
    /// The verified account, or a reason the token carries none.
    pub(super) fn into_identity(self) -> Result<VerifiedIdentity, String> {
        let account = self
            .users
            .into_iter()
            .next()
            .ok_or_else(|| "token does not resolve to an account".to_owned())?;
        let subject = IdentitySubject::new(account.local_id).map_err(|err| err.to_string())?;
        // Accounts created by phone sign-in may carry no usable email.
        let email = account
            .email
            .as_deref()
            .and_then(|raw| EmailAddress::new(raw).ok());
        Ok(VerifiedIdentity { subject, email })
    }
}
