//! In-memory storage adapter for local development and behaviour tests.
//!
//! [`InMemoryStore`] implements every storage port against a mutex-guarded
//! state seeded with the same anger tiers and countries as the database
//! migrations. Ordering, filtering, and constraint checks mirror the Diesel
//! adapters so scenarios exercised here hold against PostgreSQL too.

mod seed;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use pagination::{PageSize, TimestampCursor};

use crate::domain::ports::{
    CountryRepository, CountryRepositoryError, EntryRepository, EntryRepositoryError, NewUser,
    ProfileUpdate, UserRepository, UserRepositoryError,
};
use crate::domain::{
    AngerTier, Country, CountryCode, EmailAddress, Entry, EntryDraft, EntryId, EntryText,
    IdentitySubject, NewEntry, RawRageLevel, User, UserDraft, UserId,
};

pub use seed::{seed_anger_tiers, seed_countries};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Debug, Clone)]
struct StoredEntry {
    author_id: UserId,
    country_code: CountryCode,
    anger_tier: AngerTier,
    text: EntryText,
    rage_level: RawRageLevel,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct State {
    countries: BTreeMap<CountryCode, Country>,
    tiers: Vec<AngerTier>,
    users: BTreeMap<UserId, User>,
    entries: BTreeMap<EntryId, StoredEntry>,
    last_user_id: i64,
    last_entry_id: i64,
}

impl State {
    fn country(&self, code: &CountryCode) -> Option<&Country> {
        self.countries.get(code)
    }

    fn next_user_id(&mut self) -> Result<UserId, String> {
        self.last_user_id += 1;
        UserId::new(self.last_user_id).map_err(|err| err.to_string())
    }

    fn next_entry_id(&mut self) -> Result<EntryId, String> {
        self.last_entry_id += 1;
        EntryId::new(self.last_entry_id).map_err(|err| err.to_string())
    }

    fn hydrate(&self, id: EntryId, stored: &StoredEntry) -> Result<Entry, String> {
        let author = self
            .users
            .get(&stored.author_id)
            .ok_or_else(|| format!("entry {id} references missing user {}", stored.author_id))?;
        let country = self
            .country(&stored.country_code)
            .cloned()
            .ok_or_else(|| format!("entry {id} references missing country"))?;
        Ok(Entry::new(EntryDraft {
            id,
            author: author.summary(),
            country,
            anger_tier: stored.anger_tier.clone(),
            text: stored.text.clone(),
            rage_level: stored.rage_level,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }))
    }

    fn email_taken(&self, email: &EmailAddress, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|user| user.email() == email && Some(user.id()) != except)
    }
}

/// Mutex-guarded store implementing the entry, user, and country ports.
pub struct InMemoryStore {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    /// Store holding the given reference data and no users or entries.
    pub fn new(clock: Arc<dyn Clock>, tiers: Vec<AngerTier>, countries: Vec<Country>) -> Self {
        let state = State {
            countries: countries
                .into_iter()
                .map(|country| (country.code().clone(), country))
                .collect(),
            tiers,
            ..State::default()
        };
        Self {
            state: Mutex::new(state),
            clock,
        }
    }

    /// Store seeded with the same tiers and countries as the migrations.
    pub fn seeded(clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, seed_anger_tiers(), seed_countries())
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, String> {
        self.state.lock().map_err(|_| POISONED.to_owned())
    }

    fn now(&self) -> DateTime<Utc> {
        TimestampCursor::from_datetime(self.clock.utc()).as_datetime()
    }

    /// Insert an entry with an explicit creation time.
    ///
    /// Useful for arranging feeds whose ordering matters; timestamps are
    /// truncated to microseconds like PostgreSQL `timestamptz`.
    ///
    /// # Errors
    ///
    /// Fails with the same typed errors as [`EntryRepository::create_entry`].
    pub fn insert_entry_at(
        &self,
        entry: &NewEntry,
        created_at: DateTime<Utc>,
    ) -> Result<Entry, EntryRepositoryError> {
        let mut state = self.lock().map_err(EntryRepositoryError::query)?;
        if !state.users.contains_key(&entry.author_id) {
            return Err(EntryRepositoryError::unknown_user(entry.author_id.get()));
        }
        if state.country(&entry.country_code).is_none() {
            return Err(EntryRepositoryError::unknown_country(
                entry.country_code.as_str(),
            ));
        }
        let anger_tier = state
            .tiers
            .iter()
            .find(|tier| tier.id() == entry.anger_tier_id)
            .cloned()
            .ok_or_else(|| EntryRepositoryError::unknown_anger_tier(entry.anger_tier_id.get()))?;

        let created_at = TimestampCursor::from_datetime(created_at).as_datetime();
        let id = state.next_entry_id().map_err(EntryRepositoryError::query)?;
        let stored = StoredEntry {
            author_id: entry.author_id,
            country_code: entry.country_code.clone(),
            anger_tier,
            text: entry.text.clone(),
            rage_level: entry.rage_level,
            created_at,
            updated_at: created_at,
        };
        let hydrated = state
            .hydrate(id, &stored)
            .map_err(EntryRepositoryError::query)?;
        state.entries.insert(id, stored);
        Ok(hydrated)
    }
}

#[async_trait]
impl EntryRepository for InMemoryStore {
    async fn list_anger_tiers(&self) -> Result<Vec<AngerTier>, EntryRepositoryError> {
        let state = self.lock().map_err(EntryRepositoryError::query)?;
        let mut tiers = state.tiers.clone();
        tiers.sort_by_key(AngerTier::rank);
        Ok(tiers)
    }

    async fn create_entry(&self, entry: &NewEntry) -> Result<Entry, EntryRepositoryError> {
        self.insert_entry_at(entry, self.clock.utc())
    }

    async fn find_entry(&self, id: EntryId) -> Result<Option<Entry>, EntryRepositoryError> {
        let state = self.lock().map_err(EntryRepositoryError::query)?;
        state
            .entries
            .get(&id)
            .map(|stored| state.hydrate(id, stored))
            .transpose()
            .map_err(EntryRepositoryError::query)
    }

    async fn update_entry_text(
        &self,
        id: EntryId,
        text: &EntryText,
    ) -> Result<Option<Entry>, EntryRepositoryError> {
        let now = self.now();
        let mut state = self.lock().map_err(EntryRepositoryError::query)?;
        let Some(stored) = state.entries.get_mut(&id) else {
            return Ok(None);
        };
        stored.text = text.clone();
        stored.updated_at = now;
        let stored = stored.clone();
        state
            .hydrate(id, &stored)
            .map(Some)
            .map_err(EntryRepositoryError::query)
    }

    async fn list_entries(
        &self,
        before: TimestampCursor,
        limit: PageSize,
        author: Option<UserId>,
    ) -> Result<Vec<Entry>, EntryRepositoryError> {
        let state = self.lock().map_err(EntryRepositoryError::query)?;
        let mut matching: Vec<(&EntryId, &StoredEntry)> = state
            .entries
            .iter()
            .filter(|(_, stored)| stored.created_at < before.as_datetime())
            .filter(|(_, stored)| author.is_none_or(|author| stored.author_id == author))
            .collect();
        matching.sort_by(|(left_id, left), (right_id, right)| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| right_id.cmp(left_id))
        });

        matching
            .into_iter()
            .take(usize::try_from(limit.get()).unwrap_or(usize::MAX))
            .map(|(id, stored)| state.hydrate(*id, stored))
            .collect::<Result<Vec<_>, _>>()
            .map_err(EntryRepositoryError::query)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let now = self.now();
        let mut state = self.lock().map_err(UserRepositoryError::query)?;
        if state.users.values().any(|existing| existing.subject() == &user.subject) {
            return Err(UserRepositoryError::already_registered());
        }
        if state.email_taken(&user.email, None) {
            return Err(UserRepositoryError::email_in_use());
        }
        let country = state
            .country(&user.country_code)
            .cloned()
            .ok_or_else(|| UserRepositoryError::unknown_country(user.country_code.as_str()))?;

        let id = state.next_user_id().map_err(UserRepositoryError::query)?;
        let created = User::new(UserDraft {
            id,
            subject: user.subject.clone(),
            title: user.title.clone(),
            email: user.email.clone(),
            country,
            created_at: now,
            updated_at: now,
        });
        state.users.insert(id, created.clone());
        Ok(created)
    }

    async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, UserRepositoryError> {
        let now = self.now();
        let mut state = self.lock().map_err(UserRepositoryError::query)?;
        let country = state
            .country(&update.country_code)
            .cloned()
            .ok_or_else(|| UserRepositoryError::unknown_country(update.country_code.as_str()))?;
        let Some(current) = state.users.get(&id) else {
            return Ok(None);
        };
        let updated = User::new(UserDraft {
            id,
            subject: current.subject().clone(),
            title: update.title.clone(),
            email: current.email().clone(),
            country,
            created_at: current.created_at(),
            updated_at: now,
        });
        state.users.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let state = self.lock().map_err(UserRepositoryError::query)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_subject(
        &self,
        subject: &IdentitySubject,
    ) -> Result<Option<User>, UserRepositoryError> {
        let state = self.lock().map_err(UserRepositoryError::query)?;
        Ok(state
            .users
            .values()
            .find(|user| user.subject() == subject)
            .cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let state = self.lock().map_err(UserRepositoryError::query)?;
        Ok(state
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }
}

#[async_trait]
impl CountryRepository for InMemoryStore {
    async fn list_countries(&self) -> Result<Vec<Country>, CountryRepositoryError> {
        let state = self.lock().map_err(CountryRepositoryError::query)?;
        let mut countries: Vec<Country> = state.countries.values().cloned().collect();
        countries.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(countries)
    }
}
