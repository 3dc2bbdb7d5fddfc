//! User registration and profile services.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    EditProfileRequest, NewUser, ProfileUpdate, RegisterUserRequest, UserCommand, UserQuery,
    UserRepository, UserRepositoryError, VerifiedIdentity,
};
use crate::domain::{
    CountryCode, Error, IdentitySubject, User, UserId, UserSummary, UserTitle, UserTitleLimits,
    UserValidationError,
};

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        err @ (UserRepositoryError::AlreadyRegistered | UserRepositoryError::EmailInUse) => {
            Error::conflict(err.to_string())
        }
        err @ UserRepositoryError::UnknownCountry { .. } => Error::invalid_request(err.to_string()),
    }
}

fn field_error(field: &str, code: &str, err: &UserValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(serde_json::json!({
        "field": field,
        "code": code,
    }))
}

/// User service implementing [`UserCommand`] and [`UserQuery`].
#[derive(Clone)]
pub struct UserService<R> {
    users: Arc<R>,
    title_limits: UserTitleLimits,
}

impl<R> UserService<R> {
    /// Create a new user service with the user repository and title bounds.
    pub fn new(users: Arc<R>, title_limits: UserTitleLimits) -> Self {
        Self {
            users,
            title_limits,
        }
    }

    fn parse_profile(&self, title: &str, country: &str) -> Result<ProfileUpdate, Error> {
        let title = UserTitle::new(title, self.title_limits)
            .map_err(|err| field_error("title", "invalid_title", &err))?;
        let country_code = CountryCode::new(country)
            .map_err(|err| field_error("countryCode", "invalid_country_code", &err))?;
        Ok(ProfileUpdate {
            title,
            country_code,
        })
    }
}

#[async_trait]
impl<R> UserCommand for UserService<R>
where
    R: UserRepository,
{
    async fn register(
        &self,
        identity: &VerifiedIdentity,
        request: RegisterUserRequest,
    ) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_subject(&identity.subject)
            .await
            .map_err(map_user_repository_error)?;
        if existing.is_some() {
            return Err(map_user_repository_error(
                UserRepositoryError::already_registered(),
            ));
        }

        let email = identity.email.clone().ok_or_else(|| {
            Error::invalid_request("identity token carries no email address")
        })?;
        let profile = self.parse_profile(&request.title, &request.country_code)?;

        let email_owner = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_repository_error)?;
        if email_owner.is_some() {
            return Err(map_user_repository_error(UserRepositoryError::email_in_use()));
        }

        let new_user = NewUser {
            subject: identity.subject.clone(),
            title: profile.title,
            email,
            country_code: profile.country_code,
        };
        self.users
            .create_user(&new_user)
            .await
            .map_err(map_user_repository_error)
    }

    async fn edit_profile(&self, user: &User, request: EditProfileRequest) -> Result<User, Error> {
        let update = self.parse_profile(&request.title, &request.country_code)?;
        self.users
            .update_profile(user.id(), &update)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {} not found", user.id())))
    }
}

#[async_trait]
impl<R> UserQuery for UserService<R>
where
    R: UserRepository,
{
    async fn profile(&self, id: UserId) -> Result<UserSummary, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_repository_error)?
            .map(|user| user.summary())
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }

    async fn find_by_subject(&self, subject: &IdentitySubject) -> Result<Option<User>, Error> {
        self.users
            .find_by_subject(subject)
            .await
            .map_err(map_user_repository_error)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
