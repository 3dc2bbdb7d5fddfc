//! Anger tiers and the raw rage level classifier.
//!
//! Users submit a raw rage level (roughly 0 to 80). Tiers are seeded
//! reference rows, each with a rank `1..=N` that orders them. Tier `n`
//! covers raw levels below `n * RAGE_LEVEL_BAND_WIDTH`; the first tier in
//! rank order whose bound exceeds the raw level wins.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width of the raw rage band covered by one tier rank.
pub const RAGE_LEVEL_BAND_WIDTH: i32 = 10;

/// Validation errors for tier and rage level primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AngerTierValidationError {
    #[error("anger tier id must be positive, got {value}")]
    NonPositiveId { value: i64 },
    #[error("anger tier rank must be at least 1, got {value}")]
    InvalidRank { value: i32 },
    #[error("anger tier label must not be empty")]
    EmptyLabel,
    #[error("rage level must not be negative, got {value}")]
    NegativeRageLevel { value: i32 },
}

/// Failures of [`RageTierClassifier`].
///
/// Both indicate a mismatch between seeded tiers and the expected input
/// range, never a client error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    #[error("no anger tier covers rage level {raw} (highest rank {max_rank:?})")]
    Exhausted { raw: i32, max_rank: Option<i32> },
    #[error("anger tiers share rank {rank}")]
    DuplicateRank { rank: i32 },
}

/// Database identifier of an anger tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct AngerTierId(i64);

impl AngerTierId {
    /// Validate a raw identifier.
    pub fn new(value: i64) -> Result<Self, AngerTierValidationError> {
        if value <= 0 {
            return Err(AngerTierValidationError::NonPositiveId { value });
        }
        Ok(Self(value))
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for AngerTierId {
    type Error = AngerTierValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AngerTierId> for i64 {
    fn from(value: AngerTierId) -> Self {
        value.0
    }
}

/// Band index ordering the tiers; exposed to clients as `rageLevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TierRank(i32);

impl TierRank {
    /// Validate a rank.
    pub fn new(value: i32) -> Result<Self, AngerTierValidationError> {
        if value < 1 {
            return Err(AngerTierValidationError::InvalidRank { value });
        }
        Ok(Self(value))
    }

    /// The raw rank.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Exclusive upper bound of raw rage levels covered by this rank.
    #[must_use]
    pub fn upper_bound(self) -> i64 {
        i64::from(self.0) * i64::from(RAGE_LEVEL_BAND_WIDTH)
    }
}

/// Raw rage level submitted with an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawRageLevel(i32);

impl RawRageLevel {
    /// Validate a submitted level.
    pub fn new(value: i32) -> Result<Self, AngerTierValidationError> {
        if value < 0 {
            return Err(AngerTierValidationError::NegativeRageLevel { value });
        }
        Ok(Self(value))
    }

    /// The raw level.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for RawRageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seeded anger tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AngerTier {
    id: AngerTierId,
    label: String,
    rank: TierRank,
}

impl AngerTier {
    /// Build a tier; the label must not be blank.
    pub fn new(
        id: AngerTierId,
        label: impl Into<String>,
        rank: TierRank,
    ) -> Result<Self, AngerTierValidationError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(AngerTierValidationError::EmptyLabel);
        }
        Ok(Self { id, label, rank })
    }

    /// Identifier.
    #[must_use]
    pub const fn id(&self) -> AngerTierId {
        self.id
    }

    /// Display label such as "Annoyed".
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Ordering rank.
    #[must_use]
    pub const fn rank(&self) -> TierRank {
        self.rank
    }

    fn covers(&self, raw: RawRageLevel) -> bool {
        i64::from(raw.get()) < self.rank.upper_bound()
    }
}

/// Classifies raw rage levels against a tier set.
///
/// Tiers are sorted by rank on construction, whatever order the caller
/// supplied; duplicate ranks are rejected.
///
/// # Examples
/// ```
/// use angrypros_backend::domain::{AngerTier, AngerTierId, RageTierClassifier, RawRageLevel, TierRank};
///
/// let tier = |id: i64, label: &str, rank: i32| {
///     AngerTier::new(AngerTierId::new(id).unwrap(), label, TierRank::new(rank).unwrap()).unwrap()
/// };
/// let classifier = RageTierClassifier::new(vec![
///     tier(2, "Annoyed", 2),
///     tier(1, "Displeased", 1),
/// ])
/// .expect("distinct ranks");
///
/// let hit = classifier.classify(RawRageLevel::new(10).unwrap()).expect("covered");
/// assert_eq!(hit.label(), "Annoyed");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RageTierClassifier {
    tiers: Vec<AngerTier>,
}

impl RageTierClassifier {
    /// Sort `tiers` by rank and check ranks are unique.
    pub fn new(mut tiers: Vec<AngerTier>) -> Result<Self, ClassificationError> {
        tiers.sort_by_key(AngerTier::rank);
        let duplicate = tiers.windows(2).find_map(|pair| match pair {
            [lower, upper] if lower.rank() == upper.rank() => Some(lower.rank().get()),
            _ => None,
        });
        if let Some(rank) = duplicate {
            return Err(ClassificationError::DuplicateRank { rank });
        }
        Ok(Self { tiers })
    }

    /// Tiers in ascending rank order.
    #[must_use]
    pub fn tiers(&self) -> &[AngerTier] {
        &self.tiers
    }

    /// Consume the classifier, returning its sorted tiers.
    #[must_use]
    pub fn into_tiers(self) -> Vec<AngerTier> {
        self.tiers
    }

    /// Return the first tier, by rank, whose upper bound exceeds `raw`.
    ///
    /// A raw level equal to a tier's bound belongs to the next tier up.
    pub fn classify(&self, raw: RawRageLevel) -> Result<&AngerTier, ClassificationError> {
        self.tiers
            .iter()
            .find(|tier| tier.covers(raw))
            .ok_or_else(|| ClassificationError::Exhausted {
                raw: raw.get(),
                max_rank: self.tiers.last().map(|tier| tier.rank().get()),
            })
    }
}
