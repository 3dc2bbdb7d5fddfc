//! Microsecond timestamp cursors.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errors raised when constructing a [`TimestampCursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// Zero is reserved for "no cursor supplied".
    #[error("cursor timestamp must not be zero")]
    Zero,
    /// The timestamp cannot be represented as a calendar instant.
    #[error("cursor timestamp {micros} is outside the supported range")]
    OutOfRange {
        /// Rejected microsecond value.
        micros: i64,
    },
}

/// Exclusive upper bound for a newest-first page.
///
/// The wire form is an integer count of microseconds since the Unix epoch.
///
/// # Examples
/// ```
/// use pagination::TimestampCursor;
///
/// let cursor = TimestampCursor::from_micros(1_700_000_000_000_123).expect("valid cursor");
/// assert_eq!(cursor.micros(), 1_700_000_000_000_123);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TimestampCursor {
    at: DateTime<Utc>,
}

impl TimestampCursor {
    /// Build a cursor from microseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::Zero`] for `0` and [`CursorError::OutOfRange`]
    /// when the value has no calendar representation.
    pub fn from_micros(micros: i64) -> Result<Self, CursorError> {
        if micros == 0 {
            return Err(CursorError::Zero);
        }
        DateTime::<Utc>::from_timestamp_micros(micros)
            .map(|at| Self { at })
            .ok_or(CursorError::OutOfRange { micros })
    }

    /// Build a cursor from an instant, truncating to microsecond precision.
    #[must_use]
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        let truncated = DateTime::<Utc>::from_timestamp_micros(at.timestamp_micros()).unwrap_or(at);
        Self { at: truncated }
    }

    /// Interpret a raw query-string value.
    ///
    /// Absent, empty, non-numeric, zero, and out-of-range values all yield
    /// `None`, which callers treat as "start from now".
    ///
    /// # Examples
    /// ```
    /// use pagination::TimestampCursor;
    ///
    /// assert!(TimestampCursor::parse_param(None).is_none());
    /// assert!(TimestampCursor::parse_param(Some("0")).is_none());
    /// assert!(TimestampCursor::parse_param(Some("soon")).is_none());
    /// assert!(TimestampCursor::parse_param(Some("42")).is_some());
    /// ```
    #[must_use]
    pub fn parse_param(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .and_then(|value| value.parse::<i64>().ok())
            .and_then(|micros| Self::from_micros(micros).ok())
    }

    /// Microseconds since the Unix epoch.
    #[must_use]
    pub fn micros(&self) -> i64 {
        self.at.timestamp_micros()
    }

    /// The cursor as a UTC instant.
    #[must_use]
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.at
    }
}

impl TryFrom<i64> for TimestampCursor {
    type Error = CursorError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_micros(value)
    }
}

impl From<TimestampCursor> for i64 {
    fn from(value: TimestampCursor) -> Self {
        value.micros()
    }
}

impl From<DateTime<Utc>> for TimestampCursor {
    fn from(value: DateTime<Utc>) -> Self {
        Self::from_datetime(value)
    }
}

impl fmt::Display for TimestampCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.micros())
    }
}
