//! Driven port for user persistence.

use async_trait::async_trait;

use crate::domain::{CountryCode, EmailAddress, IdentitySubject, User, UserId, UserTitle};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// A user already exists for the identity subject.
        AlreadyRegistered =>
            "identity subject is already registered",
        /// Another user already holds the email address.
        EmailInUse =>
            "email address is already registered",
        /// The referenced country does not exist.
        UnknownCountry { country_code: String } =>
            "country {country_code} does not exist",
    }
}

/// Data required to register a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub subject: IdentitySubject,
    pub title: UserTitle,
    pub email: EmailAddress,
    pub country_code: CountryCode,
}

/// Editable profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub title: UserTitle,
    pub country_code: CountryCode,
}

/// Port for user storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return it with its country populated.
    async fn create_user(&self, user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Apply a profile update. Returns `None` when the user does not exist.
    async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Find a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Find a user by identity provider subject.
    async fn find_by_subject(
        &self,
        subject: &IdentitySubject,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Find a user by normalised email address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError>;
}
