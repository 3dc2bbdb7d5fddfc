//! User identity, profile, and country primitives.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default bounds for profile titles, in characters.
pub const DEFAULT_TITLE_MIN_LENGTH: usize = 3;
/// See [`DEFAULT_TITLE_MIN_LENGTH`].
pub const DEFAULT_TITLE_MAX_LENGTH: usize = 32;

const SUBJECT_MAX_LENGTH: usize = 128;
const EMAIL_MAX_LENGTH: usize = 254;

/// Validation errors raised by user primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    NonPositiveId { value: i64 },
    EmptySubject,
    SubjectTooLong { max: usize },
    InvalidEmail,
    TitleTooShort { min: usize },
    TitleTooLong { max: usize },
    InvalidCountryCode { value: String },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId { value } => write!(f, "user id must be positive, got {value}"),
            Self::EmptySubject => write!(f, "identity subject must not be empty"),
            Self::SubjectTooLong { max } => {
                write!(f, "identity subject must be at most {max} characters")
            }
            Self::InvalidEmail => write!(f, "email address is not valid"),
            Self::TitleTooShort { min } => write!(f, "title must be at least {min} characters"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::InvalidCountryCode { value } => {
                write!(f, "country code must be two letters, got {value:?}")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Database-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate a raw identifier.
    pub fn new(value: i64) -> Result<Self, UserValidationError> {
        if value <= 0 {
            return Err(UserValidationError::NonPositiveId { value });
        }
        Ok(Self(value))
    }

    /// Interpret a raw query-string value; anything but a positive integer
    /// means "no user".
    #[must_use]
    pub fn parse_param(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|value| value.trim().parse::<i64>().ok())
            .and_then(|value| Self::new(value).ok())
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable subject identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentitySubject(String);

impl IdentitySubject {
    /// Validate a provider subject.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptySubject);
        }
        if trimmed.chars().count() > SUBJECT_MAX_LENGTH {
            return Err(UserValidationError::SubjectTooLong {
                max: SUBJECT_MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the subject text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentitySubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email address normalised to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trim, lowercase, and sanity-check an address.
    ///
    /// # Examples
    /// ```
    /// use angrypros_backend::domain::EmailAddress;
    ///
    /// let email = EmailAddress::new(" Grumpy@Example.COM ").expect("valid email");
    /// assert_eq!(email.as_str(), "grumpy@example.com");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        let valid = normalised.len() <= EMAIL_MAX_LENGTH
            && !normalised.chars().any(char::is_whitespace)
            && normalised
                .split_once('@')
                .is_some_and(|(local, domain)| {
                    !local.is_empty() && !domain.is_empty() && !domain.contains('@')
                });
        if !valid {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }

    /// Borrow the normalised address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inclusive character bounds for [`UserTitle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserTitleLimits {
    min: usize,
    max: usize,
}

impl UserTitleLimits {
    /// Build limits; `min` is at least one and `max` at least `min`.
    #[must_use]
    pub fn new(min: usize, max: usize) -> Self {
        let min = min.max(1);
        Self {
            min,
            max: max.max(min),
        }
    }

    /// Minimum title length.
    #[must_use]
    pub const fn min(self) -> usize {
        self.min
    }

    /// Maximum title length.
    #[must_use]
    pub const fn max(self) -> usize {
        self.max
    }
}

impl Default for UserTitleLimits {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE_MIN_LENGTH, DEFAULT_TITLE_MAX_LENGTH)
    }
}

/// Public profile title, shown beside every entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserTitle(String);

impl UserTitle {
    /// Trim and validate a title against `limits`.
    pub fn new(raw: impl AsRef<str>, limits: UserTitleLimits) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        let length = trimmed.chars().count();
        if length < limits.min() {
            return Err(UserValidationError::TitleTooShort { min: limits.min() });
        }
        if length > limits.max() {
            return Err(UserValidationError::TitleTooLong { max: limits.max() });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Rehydrate a title that was validated when it was stored.
    ///
    /// Limits may have changed since; stored titles stay readable.
    pub(crate) fn from_persisted(raw: String) -> Self {
        Self(raw)
    }

    /// Borrow the title text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ISO 3166-1 alpha-2 country code, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryCode(String);

impl CountryCode {
    /// Normalise and validate a two-letter code.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_ascii_uppercase();
        if normalised.len() != 2 || !normalised.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(UserValidationError::InvalidCountryCode {
                value: raw.as_ref().to_owned(),
            });
        }
        Ok(Self(normalised))
    }

    /// Borrow the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference country record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    code: CountryCode,
    name: String,
}

impl Country {
    /// Pair a code with its display name.
    pub fn new(code: CountryCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }

    /// ISO code.
    #[must_use]
    pub const fn code(&self) -> &CountryCode {
        &self.code
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Field bundle for [`User::new`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub id: UserId,
    pub subject: IdentitySubject,
    pub title: UserTitle,
    pub email: EmailAddress,
    pub country: Country,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    subject: IdentitySubject,
    title: UserTitle,
    email: EmailAddress,
    country: Country,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a user from validated parts.
    #[must_use]
    pub fn new(draft: UserDraft) -> Self {
        let UserDraft {
            id,
            subject,
            title,
            email,
            country,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            subject,
            title,
            email,
            country,
            created_at,
            updated_at,
        }
    }

    /// Database identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Identity provider subject.
    #[must_use]
    pub const fn subject(&self) -> &IdentitySubject {
        &self.subject
    }

    /// Public title.
    #[must_use]
    pub const fn title(&self) -> &UserTitle {
        &self.title
    }

    /// Normalised email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Home country; new entries are tagged with it.
    #[must_use]
    pub const fn country(&self) -> &Country {
        &self.country
    }

    /// Registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last profile change.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Public projection without private contact data.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary::new(self.id, self.title.clone(), self.country.clone())
    }
}

/// Public view of a user, embedded in entries and profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    id: UserId,
    title: UserTitle,
    country: Country,
}

impl UserSummary {
    /// Build a summary.
    #[must_use]
    pub const fn new(id: UserId, title: UserTitle, country: Country) -> Self {
        Self { id, title, country }
    }

    /// User identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Public title.
    #[must_use]
    pub const fn title(&self) -> &UserTitle {
        &self.title
    }

    /// Home country.
    #[must_use]
    pub const fn country(&self) -> &Country {
        &self.country
    }
}
