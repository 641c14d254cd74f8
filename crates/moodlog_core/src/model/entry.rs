//! Mood entry domain model.
//!
//! # Responsibility
//! - Define the canonical record shared by store, codec and query layers.
//! - Provide level-range validation and the fixed five-label lexicon.
//! - Normalize unvalidated import candidates into accepted entries.
//!
//! # Invariants
//! - `id` is stable and never reused for another entry.
//! - `level` is always within `LEVEL_MIN..=LEVEL_MAX` once stored.
//! - `timestamp` is a concrete UTC instant; callers impose ordering.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable opaque identifier for a mood entry.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Generated ids are UUID v4 text; ids supplied by import sources are
/// accepted verbatim as long as they stay unique within the collection.
pub type EntryId = String;

/// Lowest recordable mood level.
pub const LEVEL_MIN: u8 = 1;
/// Highest recordable mood level.
pub const LEVEL_MAX: u8 = 5;

const LEVEL_LABELS: [&str; 5] = ["Very Bad", "Bad", "Neutral", "Good", "Very Good"];

/// Validation error for entry invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    /// Level is missing or outside the recordable range.
    LevelOutOfRange(Option<i64>),
    /// Timestamp is missing or does not parse to a UTC instant.
    InvalidTimestamp(Option<String>),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LevelOutOfRange(Some(level)) => write!(
                f,
                "mood level {level} is outside the supported range {LEVEL_MIN}..={LEVEL_MAX}"
            ),
            Self::LevelOutOfRange(None) => write!(f, "mood level is missing"),
            Self::InvalidTimestamp(Some(raw)) => write!(f, "timestamp `{raw}` is not parseable"),
            Self::InvalidTimestamp(None) => write!(f, "timestamp is missing"),
        }
    }
}

impl Error for EntryValidationError {}

/// Canonical mood record.
///
/// Serialized shape matches the persisted blob and the JSON export format:
/// `{id, level, notes, timestamp}` with the timestamp as an ISO-8601 string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Stable opaque ID used for deletion and de-duplication.
    pub id: EntryId,
    /// Mood rating on the fixed 1..=5 scale.
    pub level: u8,
    /// Free-form notes; empty string when the user supplied none.
    #[serde(default)]
    pub notes: String,
    /// Creation (or import-supplied) instant; primary ordering key.
    pub timestamp: DateTime<Utc>,
}

impl MoodEntry {
    /// Creates a new entry with a generated id and the current instant.
    ///
    /// Level-range validation happens on the store's write path, mirroring
    /// how candidates are validated on import.
    pub fn new(level: u8, notes: impl Into<String>) -> Self {
        Self::with_id(generate_entry_id(), level, notes, Utc::now())
    }

    /// Creates an entry with caller-provided identity and timestamp.
    ///
    /// Used by import/restore paths where identity already exists externally.
    pub fn with_id(
        id: EntryId,
        level: u8,
        notes: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            level,
            notes: notes.into(),
            timestamp,
        }
    }

    /// Checks the level-range invariant.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if level_in_range(i64::from(self.level)) {
            Ok(())
        } else {
            Err(EntryValidationError::LevelOutOfRange(Some(i64::from(
                self.level,
            ))))
        }
    }
}

/// Unvalidated entry-shaped record produced by parsing an import source.
///
/// All fields are lenient; a candidate only becomes a [`MoodEntry`] through
/// [`CandidateEntry::into_entry`], which enforces the entity invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateEntry {
    #[serde(default)]
    pub id: Option<String>,
    /// Accepts the legacy `moodLevel` spelling found in older exports.
    #[serde(default, alias = "moodLevel")]
    pub level: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl CandidateEntry {
    /// Accepts this candidate into a canonical entry.
    ///
    /// # Contract
    /// - `level` must be present and within `LEVEL_MIN..=LEVEL_MAX`.
    /// - `timestamp` must be present and parseable (see [`parse_timestamp`]).
    /// - Missing `id` is backfilled with a generated one; missing `notes`
    ///   default to empty.
    pub fn into_entry(self) -> Result<MoodEntry, EntryValidationError> {
        let level = match self.level {
            Some(value) if level_in_range(value) => value as u8,
            other => return Err(EntryValidationError::LevelOutOfRange(other)),
        };

        let timestamp = match self.timestamp.as_deref() {
            Some(raw) => parse_timestamp(raw)
                .ok_or_else(|| EntryValidationError::InvalidTimestamp(Some(raw.to_string())))?,
            None => return Err(EntryValidationError::InvalidTimestamp(None)),
        };

        let id = self
            .id
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(generate_entry_id);

        Ok(MoodEntry::with_id(
            id,
            level,
            self.notes.unwrap_or_default(),
            timestamp,
        ))
    }
}

/// Generates a fresh opaque entry id.
pub fn generate_entry_id() -> EntryId {
    Uuid::new_v4().to_string()
}

/// Returns the display label for a mood level.
///
/// Total over all inputs; out-of-range levels map to `"Unknown"`.
pub fn mood_label(level: u8) -> &'static str {
    if (LEVEL_MIN..=LEVEL_MAX).contains(&level) {
        LEVEL_LABELS[usize::from(level - 1)]
    } else {
        "Unknown"
    }
}

/// Parses a timestamp string into a UTC instant.
///
/// Accepts RFC-3339 with offset, naive `YYYY-MM-DDTHH:MM:SS[.fff]` and
/// `YYYY-MM-DD HH:MM:SS` forms (UTC assumed), and a bare `YYYY-MM-DD`
/// date (midnight UTC). Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn level_in_range(level: i64) -> bool {
    level >= i64::from(LEVEL_MIN) && level <= i64::from(LEVEL_MAX)
}

#[cfg(test)]
mod tests {
    use super::{mood_label, parse_timestamp, CandidateEntry, EntryValidationError, MoodEntry};
    use chrono::{TimeZone, Utc};

    #[test]
    fn mood_label_covers_lexicon_and_out_of_range() {
        assert_eq!(mood_label(1), "Very Bad");
        assert_eq!(mood_label(3), "Neutral");
        assert_eq!(mood_label(5), "Very Good");
        assert_eq!(mood_label(0), "Unknown");
        assert_eq!(mood_label(6), "Unknown");
    }

    #[test]
    fn parse_timestamp_accepts_rfc3339_and_lenient_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 2, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-02T10:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-02T10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-02 10:30:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-01-02T12:30:00+02:00"),
            Some(expected)
        );

        let midnight = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-02"), Some(midnight));

        assert_eq!(parse_timestamp("bad"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn candidate_acceptance_enforces_level_and_timestamp() {
        let accepted = CandidateEntry {
            id: None,
            level: Some(3),
            notes: None,
            timestamp: Some("2024-01-01T00:00:00Z".to_string()),
        }
        .into_entry()
        .unwrap();
        assert_eq!(accepted.level, 3);
        assert_eq!(accepted.notes, "");
        assert!(!accepted.id.is_empty());

        let out_of_range = CandidateEntry {
            level: Some(9),
            timestamp: Some("2024-01-01T00:00:00Z".to_string()),
            ..CandidateEntry::default()
        }
        .into_entry()
        .unwrap_err();
        assert_eq!(
            out_of_range,
            EntryValidationError::LevelOutOfRange(Some(9))
        );

        let bad_timestamp = CandidateEntry {
            level: Some(2),
            timestamp: Some("bad".to_string()),
            ..CandidateEntry::default()
        }
        .into_entry()
        .unwrap_err();
        assert!(matches!(
            bad_timestamp,
            EntryValidationError::InvalidTimestamp(Some(_))
        ));
    }

    #[test]
    fn candidate_keeps_supplied_identity_verbatim() {
        let entry = CandidateEntry {
            id: Some("1712345678901".to_string()),
            level: Some(4),
            notes: Some("walked outside".to_string()),
            timestamp: Some("2024-03-05T08:00:00Z".to_string()),
        }
        .into_entry()
        .unwrap();
        assert_eq!(entry.id, "1712345678901");
        assert_eq!(entry.notes, "walked outside");
    }

    #[test]
    fn entry_validate_rejects_out_of_range_level() {
        let mut entry = MoodEntry::new(3, "ok");
        entry.validate().unwrap();
        entry.level = 0;
        assert!(entry.validate().is_err());
    }
}
