//! Reference data matching the rows seeded by the database migrations.

use crate::domain::{AngerTier, AngerTierId, Country, CountryCode, TierRank};

const ANGER_TIERS: &[(i64, &str, i32)] = &[
    (1, "Displeased", 1),
    (2, "Annoyed", 2),
    (3, "Cross", 3),
    (4, "Irritated", 4),
    (5, "Furious", 5),
    (6, "Livid", 6),
    (7, "Seething", 7),
    (8, "Apoplectic", 8),
];

const COUNTRIES: &[(&str, &str)] = &[
    ("AU", "Australia"),
    ("CA", "Canada"),
    ("DE", "Germany"),
    ("FR", "France"),
    ("GB", "United Kingdom"),
    ("IN", "India"),
    ("JP", "Japan"),
    ("MY", "Malaysia"),
    ("NZ", "New Zealand"),
    ("SG", "Singapore"),
    ("US", "United States"),
];

/// The seeded anger tier ladder in rank order.
pub fn seed_anger_tiers() -> Vec<AngerTier> {
    ANGER_TIERS
        .iter()
        .filter_map(|&(id, label, rank)| {
            let id = AngerTierId::new(id).ok()?;
            let rank = TierRank::new(rank).ok()?;
            AngerTier::new(id, label, rank).ok()
        })
        .collect()
}

/// The seeded countries, sorted by code.
pub fn seed_countries() -> Vec<Country> {
    COUNTRIES
        .iter()
        .filter_map(|&(code, name)| CountryCode::new(code).ok().map(|code| Country::new(code, name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RageTierClassifier;

    #[test]
    fn every_seed_row_is_valid() {
        assert_eq!(seed_anger_tiers().len(), ANGER_TIERS.len());
        assert_eq!(seed_countries().len(), COUNTRIES.len());
    }

    #[test]
    fn seeded_ladder_covers_the_expected_input_range() {
        let classifier = RageTierClassifier::new(seed_anger_tiers()).expect("distinct ranks");
        let top = classifier
            .classify(crate::domain::RawRageLevel::new(79).expect("raw"))
            .expect("covered");
        assert_eq!(top.label(), "Apoplectic");
    }
}
