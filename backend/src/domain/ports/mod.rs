//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `*Command`) are implemented by domain services
//! and consumed by inbound adapters. Driven ports (`*Repository`,
//! [`IdentityProvider`]) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod country_repository;
mod entry_command;
mod entry_query;
mod entry_repository;
mod feed_query;
mod identity_provider;
mod reference_data_query;
mod user_command;
mod user_query;
mod user_repository;

#[cfg(test)]
pub use country_repository::MockCountryRepository;
pub use country_repository::{CountryRepository, CountryRepositoryError};
#[cfg(test)]
pub use entry_command::MockEntryCommand;
pub use entry_command::{CreateEntryRequest, EditEntryRequest, EntryCommand};
#[cfg(test)]
pub use entry_query::MockEntryQuery;
pub use entry_query::{EntryConfig, EntryQuery};
#[cfg(test)]
pub use entry_repository::MockEntryRepository;
pub use entry_repository::{EntryRepository, EntryRepositoryError};
#[cfg(test)]
pub use feed_query::MockFeedQuery;
pub use feed_query::{FeedPage, FeedPageRequest, FeedQuery};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    FixtureIdentityProvider, IdentityProvider, IdentityProviderError, VerifiedIdentity,
};
#[cfg(test)]
pub use reference_data_query::MockReferenceDataQuery;
pub use reference_data_query::ReferenceDataQuery;
#[cfg(test)]
pub use user_command::MockUserCommand;
pub use user_command::{EditProfileRequest, RegisterUserRequest, UserCommand};
#[cfg(test)]
pub use user_query::MockUserQuery;
pub use user_query::UserQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUser, ProfileUpdate, UserRepository, UserRepositoryError};
