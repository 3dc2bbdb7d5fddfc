//! Builders for domain values shared by unit tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{
    AngerTier, AngerTierId, Country, CountryCode, EmailAddress, Entry, EntryDraft, EntryId,
    EntryText, EntryTextLimits, IdentitySubject, RawRageLevel, TierRank, User, UserDraft, UserId,
    UserTitle, UserTitleLimits,
};

pub(crate) struct FixtureClock {
    pub(crate) utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn at_micros(micros: i64) -> DateTime<Utc> {
    Utc.timestamp_micros(micros)
        .single()
        .expect("fixture timestamp in range")
}

pub(crate) fn singapore() -> Country {
    Country::new(CountryCode::new("SG").expect("country code"), "Singapore")
}

pub(crate) fn user(id: i64, title: &str) -> User {
    let created = at_micros(1_600_000_000_000_000);
    User::new(UserDraft {
        id: UserId::new(id).expect("user id"),
        subject: IdentitySubject::new(format!("uid-{id}")).expect("subject"),
        title: UserTitle::new(title, UserTitleLimits::default()).expect("title"),
        email: EmailAddress::new(format!("user{id}@example.com")).expect("email"),
        country: singapore(),
        created_at: created,
        updated_at: created,
    })
}

pub(crate) fn tier(id: i64, label: &str, rank: i32) -> AngerTier {
    AngerTier::new(
        AngerTierId::new(id).expect("tier id"),
        label,
        TierRank::new(rank).expect("tier rank"),
    )
    .expect("tier")
}

pub(crate) fn default_tiers() -> Vec<AngerTier> {
    vec![
        tier(1, "Displeased", 1),
        tier(2, "Annoyed", 2),
        tier(3, "Cross", 3),
    ]
}

pub(crate) fn entry(id: i64, author: &User, created_micros: i64) -> Entry {
    let created = at_micros(created_micros);
    Entry::new(EntryDraft {
        id: EntryId::new(id).expect("entry id"),
        author: author.summary(),
        country: author.country().clone(),
        anger_tier: tier(1, "Displeased", 1),
        text: EntryText::new(format!("entry {id}"), EntryTextLimits::default()).expect("text"),
        rage_level: RawRageLevel::new(5).expect("rage level"),
        created_at: created,
        updated_at: created,
    })
}
