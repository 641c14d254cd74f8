//! Import/export codecs for the mood collection.
//!
//! # Responsibility
//! - Convert the collection to/from JSON and CSV text.
//! - Surface malformed payloads as typed format errors.
//!
//! # Invariants
//! - Both import formats are atomic: the first structural or row error
//!   rejects the whole payload.
//! - Range validation of accepted candidates belongs to the store's import
//!   path, not to the codecs.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod csv;
pub mod json;

/// Malformed import payload error.
#[derive(Debug)]
pub enum FormatError {
    /// JSON top-level value is not an array.
    NotAnArray,
    /// JSON payload is syntactically or structurally malformed.
    Json(serde_json::Error),
    /// CSV payload has fewer than header + one data row.
    TooFewLines,
    /// One CSV data row is malformed; `row` is the 1-based line number.
    Row { row: usize, kind: RowError },
}

/// Row-level CSV failure cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    TooFewFields { found: usize },
    InvalidDate(String),
    InvalidLevel(String),
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnArray => write!(f, "invalid data format: expected an array of mood entries"),
            Self::Json(err) => write!(f, "malformed JSON payload: {err}"),
            Self::TooFewLines => write!(f, "CSV file is empty or has no data rows"),
            Self::Row { row, kind } => match kind {
                RowError::TooFewFields { found } => {
                    write!(f, "row {row}: expected at least 2 fields, found {found}")
                }
                RowError::InvalidDate(value) => write!(f, "row {row}: invalid date `{value}`"),
                RowError::InvalidLevel(value) => {
                    write!(f, "row {row}: invalid mood level `{value}`")
                }
            },
        }
    }
}

impl Error for FormatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

/// Supported export file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Derives the export file name `<base>-<YYYY-MM-DD>.<ext>`.
pub fn export_file_name(base: &str, format: ExportFormat, date: NaiveDate) -> String {
    format!("{base}-{}.{}", date.format("%Y-%m-%d"), format.extension())
}

#[cfg(test)]
mod tests {
    use super::{export_file_name, ExportFormat};
    use chrono::NaiveDate;

    #[test]
    fn export_file_name_follows_pattern() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(
            export_file_name("mood-export", ExportFormat::Json, date),
            "mood-export-2024-03-05.json"
        );
        assert_eq!(
            export_file_name("mood-export", ExportFormat::Csv, date),
            "mood-export-2024-03-05.csv"
        );
    }
}
