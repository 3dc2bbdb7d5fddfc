//! Driving port for registration and profile edits.

use async_trait::async_trait;

use crate::domain::{Error, User};

use super::VerifiedIdentity;

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    pub title: String,
    pub country_code: String,
}

/// Profile edit payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditProfileRequest {
    pub title: String,
    pub country_code: String,
}

/// Domain use-case port for user mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Create the user record for a verified identity.
    async fn register(
        &self,
        identity: &VerifiedIdentity,
        request: RegisterUserRequest,
    ) -> Result<User, Error>;

    /// Update the caller's title and country.
    async fn edit_profile(&self, user: &User, request: EditProfileRequest) -> Result<User, Error>;
}
