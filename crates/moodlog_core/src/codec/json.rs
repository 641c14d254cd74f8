//! JSON export/import for the mood collection.
//!
//! # Responsibility
//! - Render the collection as a pretty-printed JSON array.
//! - Parse a JSON payload into unvalidated candidate records.

use super::FormatError;
use crate::model::entry::{CandidateEntry, MoodEntry};

/// Serializes the collection as a pretty-printed JSON array with ISO-8601
/// timestamps, matching the persisted blob shape.
pub fn export_json(entries: &[MoodEntry]) -> Result<String, FormatError> {
    serde_json::to_string_pretty(entries).map_err(FormatError::Json)
}

/// Parses a JSON payload into candidate records.
///
/// The top-level value must be an array; element fields are taken as-is.
/// Range validation of the candidates happens in the store's import path.
pub fn parse_json(text: &str) -> Result<Vec<CandidateEntry>, FormatError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(FormatError::Json)?;

    let serde_json::Value::Array(items) = value else {
        return Err(FormatError::NotAnArray);
    };

    items
        .into_iter()
        .map(|item| serde_json::from_value::<CandidateEntry>(item).map_err(FormatError::Json))
        .collect()
}
