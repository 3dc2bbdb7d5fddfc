//! Driving port for user lookups.

use async_trait::async_trait;

use crate::domain::{Error, IdentitySubject, User, UserId, UserSummary};

/// Domain use-case port for user reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Public profile of a user.
    async fn profile(&self, id: UserId) -> Result<UserSummary, Error>;

    /// The registered user behind an identity subject, if any.
    async fn find_by_subject(&self, subject: &IdentitySubject) -> Result<Option<User>, Error>;
}
