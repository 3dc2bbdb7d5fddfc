//! Integration tests for `DieselEntryRepository` against embedded PostgreSQL.
//!
//! These tests run the feed listing SQL for real: the strict cursor bound,
//! newest-first ordering with the id tie-break, the author filter, the row
//! limit, and the joins that hydrate author, country, and tier. Writes are
//! stamped from an injected clock so timestamps are exact.
//!
//! Each test provisions its own migrated database on a shared cluster. Set
//! `SKIP_TEST_CLUSTER=1` to skip them where PostgreSQL cannot start.

use std::sync::{Arc, Mutex};

use angrypros_backend::domain::ports::{EntryRepository, NewUser, UserRepository};
use angrypros_backend::domain::{
    AngerTier, CountryCode, EmailAddress, Entry, EntryText, EntryTextLimits, IdentitySubject,
    NewEntry, RawRageLevel, User, UserTitle, UserTitleLimits,
};
use angrypros_backend::outbound::persistence::{
    DbPool, DieselEntryRepository, DieselUserRepository, PoolConfig,
};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use pagination::{PageSize, TimestampCursor};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::embedded_postgres::provision_migrated_database;
use support::handle_cluster_setup_failure;

const BASE_MICROS: i64 = 1_700_000_000_000_000;

// -----------------------------------------------------------------------------
// Clock
// -----------------------------------------------------------------------------

/// Clock whose reading is moved by the test between writes.
struct SteppedClock {
    now: Mutex<DateTime<Utc>>,
}

impl SteppedClock {
    fn starting_at(micros: i64) -> Self {
        Self {
            now: Mutex::new(at(micros)),
        }
    }

    fn set(&self, micros: i64) {
        *self.now.lock().expect("clock lock") = at(micros);
    }
}

impl Clock for SteppedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

fn at(micros: i64) -> DateTime<Utc> {
    Utc.timestamp_micros(micros)
        .single()
        .expect("fixture timestamp")
}

fn cursor(micros: i64) -> TimestampCursor {
    TimestampCursor::from_micros(micros).expect("cursor")
}

// -----------------------------------------------------------------------------
// Test Context
// -----------------------------------------------------------------------------

struct TestContext {
    runtime: Runtime,
    clock: Arc<SteppedClock>,
    users: DieselUserRepository,
    entries: DieselEntryRepository,
    _database: TemporaryDatabase,
}

impl TestContext {
    fn register(&self, subject: &str, country: &str) -> User {
        let new_user = NewUser {
            subject: IdentitySubject::new(subject).expect("subject"),
            title: UserTitle::new(format!("{subject} title"), UserTitleLimits::default())
                .expect("title"),
            email: EmailAddress::new(format!("{subject}@example.com")).expect("email"),
            country_code: CountryCode::new(country).expect("country"),
        };
        self.runtime
            .block_on(self.users.create_user(&new_user))
            .expect("user should be created")
    }

    fn tier(&self, rank: i32) -> AngerTier {
        self.runtime
            .block_on(self.entries.list_anger_tiers())
            .expect("tiers should load")
            .into_iter()
            .find(|tier| tier.rank().get() == rank)
            .expect("seeded tier")
    }

    fn post_at(&self, author: &User, country: &str, tier_rank: i32, micros: i64) -> Entry {
        self.clock.set(micros);
        let entry = NewEntry {
            author_id: author.id(),
            country_code: CountryCode::new(country).expect("country"),
            anger_tier_id: self.tier(tier_rank).id(),
            text: EntryText::new(format!("complaint at {micros}"), EntryTextLimits::default())
                .expect("text"),
            rage_level: RawRageLevel::new((tier_rank - 1) * 10).expect("rage level"),
        };
        self.runtime
            .block_on(self.entries.create_entry(&entry))
            .expect("entry should be created")
    }

    fn list(&self, before: i64, limit: u32, author: Option<&User>) -> Vec<Entry> {
        self.runtime
            .block_on(self.entries.list_entries(
                cursor(before),
                PageSize::new(limit),
                author.map(User::id),
            ))
            .expect("entries should list")
    }
}

fn ids(entries: &[Entry]) -> Vec<i64> {
    entries.iter().map(|entry| entry.id().get()).collect()
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let database = provision_migrated_database(&runtime)?;

    let config = PoolConfig::new(database.url())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    let clock = Arc::new(SteppedClock::starting_at(BASE_MICROS));
    let users = DieselUserRepository::new(pool.clone(), clock.clone());
    let entries = DieselEntryRepository::new(pool, clock.clone());

    Ok(TestContext {
        runtime,
        clock,
        users,
        entries,
        _database: database,
    })
}

#[fixture]
fn diesel_world() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[rstest]
fn listing_excludes_entries_at_the_cursor(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: listing_excludes_entries_at_the_cursor skipped");
        return;
    };
    let author = ctx.register("cursor-author", "SG");
    let posted: Vec<Entry> = [100, 200, 300, 400]
        .into_iter()
        .map(|offset| ctx.post_at(&author, "SG", 1, BASE_MICROS + offset))
        .collect();

    let listed = ctx.list(BASE_MICROS + 300, 10, None);

    let stamps: Vec<i64> = listed.iter().map(|entry| entry.cursor().micros()).collect();
    assert_eq!(stamps, vec![BASE_MICROS + 200, BASE_MICROS + 100]);
    assert_eq!(ids(&listed), vec![posted[1].id().get(), posted[0].id().get()]);
    assert!(ctx.list(BASE_MICROS + 100, 10, None).is_empty());
}

#[rstest]
fn listing_breaks_timestamp_ties_by_descending_id(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: listing_breaks_timestamp_ties_by_descending_id skipped");
        return;
    };
    let author = ctx.register("tie-author", "AU");
    let older = ctx.post_at(&author, "AU", 1, BASE_MICROS + 10);
    let first_tied = ctx.post_at(&author, "AU", 2, BASE_MICROS + 20);
    let second_tied = ctx.post_at(&author, "AU", 3, BASE_MICROS + 20);
    let newest = ctx.post_at(&author, "AU", 4, BASE_MICROS + 30);

    let listed = ctx.list(BASE_MICROS + 1_000, 10, None);

    assert_eq!(
        ids(&listed),
        vec![
            newest.id().get(),
            second_tied.id().get(),
            first_tied.id().get(),
            older.id().get(),
        ]
    );
    assert_eq!(ctx.list(BASE_MICROS + 1_000, 10, None), listed);
}

#[rstest]
fn listing_filters_by_author_and_applies_the_limit(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: listing_filters_by_author_and_applies_the_limit skipped");
        return;
    };
    let first = ctx.register("first-author", "AU");
    let second = ctx.register("second-author", "US");
    let mut seconds = Vec::new();
    for step in 1..=4 {
        ctx.post_at(&first, "AU", 1, BASE_MICROS + step * 10);
        seconds.push(ctx.post_at(&second, "US", 1, BASE_MICROS + step * 10 + 1));
    }

    let limited = ctx.list(BASE_MICROS + 1_000, 3, None);
    assert_eq!(limited.len(), 3);

    let narrowed = ctx.list(BASE_MICROS + 1_000, 2, Some(&second));
    assert_eq!(
        ids(&narrowed),
        vec![seconds[3].id().get(), seconds[2].id().get()]
    );
    assert!(narrowed.iter().all(|entry| entry.is_authored_by(second.id())));

    assert!(ctx.list(BASE_MICROS + 1_000, 0, None).is_empty());
}

#[rstest]
fn listed_entries_are_hydrated(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: listed_entries_are_hydrated skipped");
        return;
    };
    let author = ctx.register("travelling-author", "GB");
    let posted = ctx.post_at(&author, "JP", 3, BASE_MICROS + 50);

    let listed = ctx.list(BASE_MICROS + 1_000, 10, None);
    let [entry] = listed.as_slice() else {
        panic!("expected exactly one entry, got {listed:?}");
    };

    assert_eq!(entry, &posted);
    assert_eq!(entry.author().id(), author.id());
    assert_eq!(entry.author().title().as_str(), "travelling-author title");
    assert_eq!(entry.author().country().code().as_str(), "GB");
    assert_eq!(entry.author().country().name(), "United Kingdom");
    assert_eq!(entry.country().code().as_str(), "JP");
    assert_eq!(entry.country().name(), "Japan");
    assert_eq!(entry.anger_tier().label(), "Cross");
    assert_eq!(entry.anger_tier().rank().get(), 3);
    assert_eq!(entry.rage_level().get(), 20);
}

#[rstest]
fn writes_are_stamped_from_the_clock(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: writes_are_stamped_from_the_clock skipped");
        return;
    };
    ctx.clock.set(BASE_MICROS + 5);
    let author = ctx.register("stamped-author", "NZ");
    assert_eq!(author.created_at(), at(BASE_MICROS + 5));
    assert_eq!(author.updated_at(), at(BASE_MICROS + 5));

    let posted = ctx.post_at(&author, "NZ", 1, BASE_MICROS + 10);
    assert_eq!(posted.created_at(), at(BASE_MICROS + 10));
    assert_eq!(posted.updated_at(), at(BASE_MICROS + 10));

    ctx.clock.set(BASE_MICROS + 90);
    let edited_text = EntryText::new("calmer now", EntryTextLimits::default()).expect("text");
    let edited = ctx
        .runtime
        .block_on(ctx.entries.update_entry_text(posted.id(), &edited_text))
        .expect("update should succeed")
        .expect("entry exists");
    assert_eq!(edited.text().as_str(), "calmer now");
    assert_eq!(edited.created_at(), at(BASE_MICROS + 10));
    assert_eq!(edited.updated_at(), at(BASE_MICROS + 90));

    let reloaded = ctx
        .runtime
        .block_on(ctx.entries.find_entry(posted.id()))
        .expect("lookup should succeed")
        .expect("entry exists");
    assert_eq!(reloaded, edited);
}
