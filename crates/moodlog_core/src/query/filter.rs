//! Snapshot filtering and sorting.
//!
//! # Responsibility
//! - Combine free-text, level-set and date-range filters into one pass.
//! - Sort by date or level in either direction.
//!
//! # Invariants
//! - An empty search string or level set means "no filter".
//! - The end date is inclusive: its time component is forced to
//!   23:59:59.999 before comparison.

use crate::model::entry::MoodEntry;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Filter state combined by [`compute_filtered`].
///
/// Mirrors the history view's controls: free-text search over notes, a set
/// of acceptable levels, and an inclusive date range.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Case-insensitive substring matched against notes; blank disables.
    pub search: String,
    /// Acceptable levels; empty disables level filtering.
    pub levels: Vec<u8>,
    /// Inclusive lower bound (start of day, UTC).
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound (end of day, UTC).
    pub end_date: Option<NaiveDate>,
}

/// Sort key for history views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Returns the entries passing every active filter, in input order.
pub fn compute_filtered(entries: &[MoodEntry], filter: &EntryFilter) -> Vec<MoodEntry> {
    let search = filter.search.trim().to_lowercase();
    let start = filter.start_date.map(start_of_day_utc);
    let end = filter.end_date.map(end_of_day_utc);

    entries
        .iter()
        .filter(|entry| {
            if !search.is_empty() && !entry.notes.to_lowercase().contains(&search) {
                return false;
            }
            if !filter.levels.is_empty() && !filter.levels.contains(&entry.level) {
                return false;
            }
            if let Some(start) = start {
                if entry.timestamp < start {
                    return false;
                }
            }
            if let Some(end) = end {
                if entry.timestamp > end {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Sorts entries in place; stable for equal keys.
pub fn sort_entries(entries: &mut [MoodEntry], key: SortKey, direction: SortDirection) {
    entries.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Date => a.timestamp.cmp(&b.timestamp),
            SortKey::Level => a.level.cmp(&b.level),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

fn end_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid end-of-day time");
    Utc.from_utc_datetime(&date.and_time(end_of_day))
}

#[cfg(test)]
mod tests {
    use super::{compute_filtered, sort_entries, EntryFilter, SortDirection, SortKey};
    use crate::model::entry::{parse_timestamp, MoodEntry};
    use chrono::NaiveDate;

    fn entry_at(id: &str, level: u8, notes: &str, iso: &str) -> MoodEntry {
        MoodEntry::with_id(id.to_string(), level, notes, parse_timestamp(iso).unwrap())
    }

    #[test]
    fn date_range_is_inclusive_with_end_of_day() {
        let entries = vec![
            entry_at("a", 3, "", "2024-01-01T23:00:00"),
            entry_at("b", 3, "", "2024-01-02T10:00:00"),
            entry_at("c", 3, "", "2024-01-03T01:00:00"),
        ];
        let filter = EntryFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 2),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 2),
            ..EntryFilter::default()
        };

        let filtered = compute_filtered(&entries, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "b");
    }

    #[test]
    fn search_is_case_insensitive_substring_over_notes() {
        let entries = vec![
            entry_at("a", 2, "Morning Walk", "2024-01-01T08:00:00"),
            entry_at("b", 4, "late meeting", "2024-01-01T20:00:00"),
        ];
        let filter = EntryFilter {
            search: "WALK".to_string(),
            ..EntryFilter::default()
        };

        let filtered = compute_filtered(&entries, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "a");
    }

    #[test]
    fn empty_level_set_means_no_level_filter() {
        let entries = vec![
            entry_at("a", 1, "", "2024-01-01T08:00:00"),
            entry_at("b", 5, "", "2024-01-02T08:00:00"),
        ];

        let all = compute_filtered(&entries, &EntryFilter::default());
        assert_eq!(all.len(), 2);

        let only_five = compute_filtered(
            &entries,
            &EntryFilter {
                levels: vec![5],
                ..EntryFilter::default()
            },
        );
        assert_eq!(only_five.len(), 1);
        assert_eq!(only_five[0].id, "b");
    }

    #[test]
    fn sort_by_level_descending_is_stable_for_equal_keys() {
        let mut entries = vec![
            entry_at("first", 3, "", "2024-01-01T08:00:00"),
            entry_at("second", 3, "", "2024-01-02T08:00:00"),
            entry_at("low", 1, "", "2024-01-03T08:00:00"),
        ];
        sort_entries(&mut entries, SortKey::Level, SortDirection::Descending);

        assert_eq!(entries[0].id, "first");
        assert_eq!(entries[1].id, "second");
        assert_eq!(entries[2].id, "low");
    }

    #[test]
    fn sort_by_date_orders_both_directions() {
        let mut entries = vec![
            entry_at("b", 2, "", "2024-01-02T08:00:00"),
            entry_at("a", 4, "", "2024-01-01T08:00:00"),
        ];

        sort_entries(&mut entries, SortKey::Date, SortDirection::Ascending);
        assert_eq!(entries[0].id, "a");

        sort_entries(&mut entries, SortKey::Date, SortDirection::Descending);
        assert_eq!(entries[0].id, "b");
    }
}
