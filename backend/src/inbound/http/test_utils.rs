//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::{App, web};
use pagination::PageSize;

use crate::domain::User;
use crate::domain::ports::{
    FixtureIdentityProvider, IdentityProvider, MockEntryCommand, MockEntryQuery, MockFeedQuery,
    MockReferenceDataQuery, MockUserCommand, MockUserQuery,
};

use super::state::{HttpState, HttpStatePorts};

/// Page size used by handler tests.
pub const TEST_PAGE_SIZE: u32 = 3;

/// Mocked driving ports plus a real fixture identity provider.
///
/// Tokens of the form `fixture:<subject>` verify without network access;
/// mocks without expectations panic if a handler touches them.
pub struct TestPorts {
    pub feed: MockFeedQuery,
    pub entries: MockEntryCommand,
    pub entries_query: MockEntryQuery,
    pub users: MockUserCommand,
    pub users_query: MockUserQuery,
    pub reference_data: MockReferenceDataQuery,
    identity: Arc<dyn IdentityProvider>,
}

impl Default for TestPorts {
    fn default() -> Self {
        Self {
            feed: MockFeedQuery::new(),
            entries: MockEntryCommand::new(),
            entries_query: MockEntryQuery::new(),
            users: MockUserCommand::new(),
            users_query: MockUserQuery::new(),
            reference_data: MockReferenceDataQuery::new(),
            identity: Arc::new(FixtureIdentityProvider),
        }
    }
}

impl TestPorts {
    /// Swap the identity provider.
    pub fn with_identity(mut self, identity: impl IdentityProvider + 'static) -> Self {
        self.identity = Arc::new(identity);
        self
    }

    /// Resolve every subject lookup to `user`.
    pub fn expect_registered(&mut self, user: User) {
        self.users_query
            .expect_find_by_subject()
            .returning(move |_| Ok(Some(user.clone())));
    }

    /// Freeze the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                feed: Arc::new(self.feed),
                entries: Arc::new(self.entries),
                entries_query: Arc::new(self.entries_query),
                users: Arc::new(self.users),
                users_query: Arc::new(self.users_query),
                reference_data: Arc::new(self.reference_data),
                identity: self.identity,
            },
            PageSize::new(TEST_PAGE_SIZE),
        )
    }
}

/// Application with every API route mounted over `ports`.
pub fn test_app(
    ports: TestPorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .configure(super::configure_api)
}
