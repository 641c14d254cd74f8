//! CSV export/import with RFC-4180-style quoting.
//!
//! # Responsibility
//! - Render entries under the fixed `Date,Mood Level,Mood Label,Notes`
//!   header.
//! - Parse data rows back into candidate records with a quote-aware line
//!   scanner.
//!
//! # Invariants
//! - Notes are always emitted double-quoted, internal quotes doubled, so a
//!   comma or quote in notes never breaks column alignment.
//! - A malformed row aborts the whole parse with its 1-based line number.

use super::{FormatError, RowError};
use crate::model::entry::{
    mood_label, parse_timestamp, CandidateEntry, MoodEntry, LEVEL_MAX, LEVEL_MIN,
};
use chrono::SecondsFormat;

/// Header row shared by export and import.
pub const CSV_HEADER: &str = "Date,Mood Level,Mood Label,Notes";

/// Renders the collection as CSV text.
///
/// Dates are ISO-8601 to the second (`2024-01-01T00:00:00Z`); labels come
/// from the fixed five-point lexicon.
pub fn export_csv(entries: &[MoodEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for entry in entries {
        lines.push(format!(
            "{},{},{},{}",
            entry.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            entry.level,
            mood_label(entry.level),
            quote_field(&entry.notes),
        ));
    }

    lines.join("\n")
}

/// Parses CSV text into candidate records.
///
/// Expects the export column order: header plus at least one data row.
/// Blank lines are skipped; row errors carry the physical line number.
pub fn parse_csv(text: &str) -> Result<Vec<CandidateEntry>, FormatError> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(FormatError::TooFewLines);
    }

    lines[1..]
        .iter()
        .map(|&(row, line)| parse_row(row, line))
        .collect()
}

/// Splits one CSV line into fields with quote-aware scanning.
///
/// State machine: a `"` opening an empty field enters quoted mode; `""`
/// inside quotes emits one literal quote; a single `"` inside quotes exits;
/// `,` outside quotes ends the field. End of line flushes the last field
/// regardless of state.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if quoted {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => quoted = false,
                other => field.push(other),
            }
        } else {
            match ch {
                '"' if field.is_empty() => quoted = true,
                ',' => fields.push(std::mem::take(&mut field)),
                other => field.push(other),
            }
        }
    }

    fields.push(field);
    fields
}

fn parse_row(row: usize, line: &str) -> Result<CandidateEntry, FormatError> {
    let fields = split_csv_line(line);
    if fields.len() < 2 {
        return Err(FormatError::Row {
            row,
            kind: RowError::TooFewFields {
                found: fields.len(),
            },
        });
    }

    let date_field = fields[0].trim();
    if parse_timestamp(date_field).is_none() {
        return Err(FormatError::Row {
            row,
            kind: RowError::InvalidDate(date_field.to_string()),
        });
    }

    let level_field = fields[1].trim();
    let level = level_field
        .parse::<i64>()
        .ok()
        .filter(|level| *level >= i64::from(LEVEL_MIN) && *level <= i64::from(LEVEL_MAX))
        .ok_or_else(|| FormatError::Row {
            row,
            kind: RowError::InvalidLevel(level_field.to_string()),
        })?;

    Ok(CandidateEntry {
        id: None,
        level: Some(level),
        notes: Some(fields.get(3).cloned().unwrap_or_default()),
        timestamp: Some(date_field.to_string()),
    })
}

fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
