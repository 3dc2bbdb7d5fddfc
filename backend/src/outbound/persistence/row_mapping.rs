//! Conversion of Diesel rows into validated domain values.
//!
//! A row that fails domain validation indicates corrupt data; callers map the
//! returned message into their repository's `Query` variant.

use std::collections::HashMap;

use crate::domain::{
    AngerTier, AngerTierId, Country, CountryCode, EmailAddress, Entry, EntryDraft, EntryId,
    EntryText, IdentitySubject, RawRageLevel, TierRank, User, UserDraft, UserId, UserTitle,
};

use super::models::{AngerTierRow, CountryRow, EntryRow, UserRow};

pub(super) type CountryIndex = HashMap<String, Country>;

fn corrupt(table: &str, id: impl std::fmt::Display, err: impl std::fmt::Display) -> String {
    format!("corrupt {table} row {id}: {err}")
}

pub(super) fn country_from_row(row: CountryRow) -> Result<Country, String> {
    let code = CountryCode::new(&row.code).map_err(|err| corrupt("countries", &row.code, err))?;
    Ok(Country::new(code, row.name))
}

pub(super) fn index_countries(rows: Vec<CountryRow>) -> Result<CountryIndex, String> {
    rows.into_iter()
        .map(|row| {
            let code = row.code.clone();
            country_from_row(row).map(|country| (code, country))
        })
        .collect()
}

fn lookup_country(countries: &CountryIndex, code: &str) -> Result<Country, String> {
    countries
        .get(code)
        .cloned()
        .ok_or_else(|| format!("country {code} missing from reference data"))
}

pub(super) fn tier_from_row(row: AngerTierRow) -> Result<AngerTier, String> {
    let id = AngerTierId::new(row.id).map_err(|err| corrupt("anger_tiers", row.id, err))?;
    let rank = TierRank::new(row.rank).map_err(|err| corrupt("anger_tiers", row.id, err))?;
    AngerTier::new(id, row.label, rank).map_err(|err| corrupt("anger_tiers", row.id, err))
}

pub(super) fn user_from_row(row: UserRow, country: Country) -> Result<User, String> {
    let row_id = row.id;
    let invalid = |err: crate::domain::UserValidationError| corrupt("users", row_id, err);
    Ok(User::new(UserDraft {
        id: UserId::new(row.id).map_err(invalid)?,
        subject: IdentitySubject::new(row.subject).map_err(invalid)?,
        title: UserTitle::from_persisted(row.title),
        email: EmailAddress::new(&row.email).map_err(invalid)?,
        country,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

pub(super) fn entry_from_rows(
    entry: EntryRow,
    author: UserRow,
    tier: AngerTierRow,
    countries: &CountryIndex,
) -> Result<Entry, String> {
    let author_country = lookup_country(countries, &author.country_code)?;
    let author = user_from_row(author, author_country)?.summary();

    Ok(Entry::new(EntryDraft {
        id: EntryId::new(entry.id).map_err(|err| corrupt("entries", entry.id, err))?,
        author,
        country: lookup_country(countries, &entry.country_code)?,
        anger_tier: tier_from_row(tier)?,
        text: EntryText::from_persisted(entry.text),
        rage_level: RawRageLevel::new(entry.rage_level)
            .map_err(|err| corrupt("entries", entry.id, err))?,
        created_at: entry.created_at,
        updated_at: entry.updated_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn countries() -> CountryIndex {
        index_countries(vec![
            CountryRow {
                code: "SG".to_owned(),
                name: "Singapore".to_owned(),
            },
            CountryRow {
                code: "NZ".to_owned(),
                name: "New Zealand".to_owned(),
            },
        ])
        .expect("valid countries")
    }

    fn user_row(country: &str) -> UserRow {
        let at = Utc.timestamp_opt(1_700_000_000, 0).single().expect("timestamp");
        UserRow {
            id: 3,
            subject: "uid-3".to_owned(),
            title: "Fuming".to_owned(),
            email: "fuming@example.com".to_owned(),
            country_code: country.to_owned(),
            created_at: at,
            updated_at: at,
        }
    }

    fn entry_row(country: &str) -> EntryRow {
        let at = Utc.timestamp_opt(1_700_000_100, 0).single().expect("timestamp");
        EntryRow {
            id: 11,
            country_code: country.to_owned(),
            text: "Standup ran long".to_owned(),
            rage_level: 14,
            created_at: at,
            updated_at: at,
        }
    }

    fn tier_row() -> AngerTierRow {
        AngerTierRow {
            id: 2,
            label: "Annoyed".to_owned(),
            rank: 2,
        }
    }

    #[rstest]
    fn entry_and_author_keep_their_own_countries(countries: CountryIndex) {
        let entry = entry_from_rows(entry_row("SG"), user_row("NZ"), tier_row(), &countries)
            .expect("hydrated");

        assert_eq!(entry.country().code().as_str(), "SG");
        assert_eq!(entry.author().country().code().as_str(), "NZ");
        assert_eq!(entry.anger_tier().label(), "Annoyed");
        assert_eq!(entry.rage_level().get(), 14);
    }

    #[rstest]
    fn missing_country_is_reported(countries: CountryIndex) {
        let err = entry_from_rows(entry_row("ZZ"), user_row("SG"), tier_row(), &countries)
            .expect_err("unknown country");
        assert!(err.contains("ZZ"));
    }

    #[rstest]
    fn corrupt_rank_is_reported() {
        let err = tier_from_row(AngerTierRow {
            id: 9,
            label: "Broken".to_owned(),
            rank: 0,
        })
        .expect_err("invalid rank");
        assert!(err.starts_with("corrupt anger_tiers row 9"));
    }
}
