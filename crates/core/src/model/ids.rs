use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a learner account.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a `UserId` from an existing UUID.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generates a fresh random `UserId`.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn value(&self) -> Uuid {
        self.0
    }
}

/// Slug identifying a lesson, e.g. `day-1`, `alphabets`, `casual-conversations`.
///
/// Slugs are lowercase ASCII letters, digits and single dashes.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LessonId(String);

impl LessonId {
    /// Parses a lesson slug.
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` if the slug is empty or contains characters
    /// other than `a-z`, `0-9` and `-`.
    pub fn new(slug: impl Into<String>) -> Result<Self, ParseIdError> {
        let slug = slug.into();
        let valid = !slug.is_empty()
            && !slug.starts_with('-')
            && !slug.ends_with('-')
            && !slug.contains("--")
            && slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(ParseIdError::new("LessonId"));
        }
        Ok(Self(slug))
    }

    /// The lesson id used for the given day of the daily course.
    #[must_use]
    pub fn day(day: DayNumber) -> Self {
        Self(format!("day-{}", day.value()))
    }

    /// Returns the day number when this lesson is a `day-N` lesson.
    #[must_use]
    pub fn as_day(&self) -> Option<DayNumber> {
        self.0
            .strip_prefix("day-")
            .and_then(|n| n.parse::<u8>().ok())
            .and_then(|n| DayNumber::new(n).ok())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LessonId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LessonId> for String {
    fn from(value: LessonId) -> Self {
        value.0
    }
}

/// One-based position of a lesson in the daily course.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayNumber(u8);

impl DayNumber {
    pub const FIRST: DayNumber = DayNumber(1);

    /// Creates a day number.
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` for day `0`.
    pub fn new(day: u8) -> Result<Self, ParseIdError> {
        if day == 0 {
            return Err(ParseIdError::new("DayNumber"));
        }
        Ok(Self(day))
    }

    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }

    /// The day before this one, `None` for day 1.
    #[must_use]
    pub fn previous(&self) -> Option<DayNumber> {
        (self.0 > 1).then(|| DayNumber(self.0 - 1))
    }

    /// The day after this one, `None` on overflow.
    #[must_use]
    pub fn next(&self) -> Option<DayNumber> {
        self.0.checked_add(1).map(DayNumber)
    }
}

impl TryFrom<u8> for DayNumber {
    type Error = ParseIdError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DayNumber> for u8 {
    fn from(value: DayNumber) -> Self {
        value.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Debug for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LessonId({})", self.0)
    }
}

impl fmt::Debug for DayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DayNumber({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for DayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl ParseIdError {
    fn new(kind: &'static str) -> Self {
        Self { kind }
    }
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for UserId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(UserId::new)
            .map_err(|_| ParseIdError::new("UserId"))
    }
}

impl FromStr for LessonId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LessonId::new(s)
    }
}

impl FromStr for DayNumber {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u8>()
            .map_err(|_| ParseIdError::new("DayNumber"))
            .and_then(DayNumber::new)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_id_accepts_slugs() {
        let id: LessonId = "casual-conversations".parse().unwrap();
        assert_eq!(id.to_string(), "casual-conversations");
    }

    #[test]
    fn lesson_id_rejects_invalid_slugs() {
        assert!(LessonId::new("").is_err());
        assert!(LessonId::new("Day 1").is_err());
        assert!(LessonId::new("-day").is_err());
        assert!(LessonId::new("day--1").is_err());
    }

    #[test]
    fn day_lesson_id_round_trips() {
        let day = DayNumber::new(3).unwrap();
        let id = LessonId::day(day);
        assert_eq!(id.as_str(), "day-3");
        assert_eq!(id.as_day(), Some(day));
        assert_eq!(LessonId::new("alphabets").unwrap().as_day(), None);
    }

    #[test]
    fn day_number_rejects_zero() {
        assert!(DayNumber::new(0).is_err());
        assert!("0".parse::<DayNumber>().is_err());
        assert_eq!(DayNumber::FIRST.previous(), None);
        assert_eq!(
            DayNumber::new(2).unwrap().previous(),
            Some(DayNumber::FIRST)
        );
    }

    #[test]
    fn user_id_from_str() {
        let id = UserId::random();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<UserId>().is_err());
    }

    #[test]
    fn lesson_id_serde_validates() {
        let ok: LessonId = serde_json::from_str("\"day-2\"").unwrap();
        assert_eq!(ok.as_str(), "day-2");
        assert!(serde_json::from_str::<LessonId>("\"Bad Slug\"").is_err());
    }
}
