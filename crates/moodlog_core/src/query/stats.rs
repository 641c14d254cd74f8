//! Aggregate statistics over entry snapshots.
//!
//! # Responsibility
//! - Compute the per-level histogram and the mean level.
//! - Provide the recent-window slice used by dashboard views.
//!
//! # Invariants
//! - Percentages are rounded to the nearest integer and are 0 for an empty
//!   snapshot.
//! - The average of an empty snapshot is 0.0.

use crate::model::entry::{mood_label, MoodEntry, LEVEL_MAX, LEVEL_MIN};
use chrono::{DateTime, Utc};

/// One histogram bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStat {
    pub level: u8,
    pub label: &'static str,
    pub count: usize,
    /// Share of the total entry count, rounded to the nearest percent.
    pub percentage: u32,
}

/// Counts entries per level 1..=5 with integer percentages of the total.
pub fn histogram(entries: &[MoodEntry]) -> [LevelStat; 5] {
    let mut counts = [0usize; 5];
    for entry in entries {
        if (LEVEL_MIN..=LEVEL_MAX).contains(&entry.level) {
            counts[usize::from(entry.level - 1)] += 1;
        }
    }

    let total = entries.len();
    std::array::from_fn(|index| {
        let level = index as u8 + 1;
        LevelStat {
            level,
            label: mood_label(level),
            count: counts[index],
            percentage: percentage(counts[index], total),
        }
    })
}

/// Arithmetic mean of levels; 0.0 for an empty snapshot.
pub fn average_level(entries: &[MoodEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let sum: u64 = entries.iter().map(|entry| u64::from(entry.level)).sum();
    sum as f64 / entries.len() as f64
}

/// Entries at or after `cutoff`, in input order.
///
/// Dashboard views pass `now - 7 days` for the weekly window.
pub fn entries_since(entries: &[MoodEntry], cutoff: DateTime<Utc>) -> Vec<MoodEntry> {
    entries
        .iter()
        .filter(|entry| entry.timestamp >= cutoff)
        .cloned()
        .collect()
}

fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        ((count as f64 / total as f64) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::{average_level, entries_since, histogram};
    use crate::model::entry::{parse_timestamp, MoodEntry};
    use chrono::Duration;

    fn entry(level: u8, iso: &str) -> MoodEntry {
        MoodEntry::with_id(
            format!("id-{level}-{iso}"),
            level,
            "",
            parse_timestamp(iso).unwrap(),
        )
    }

    #[test]
    fn histogram_counts_and_percentages() {
        let entries = vec![
            entry(1, "2024-01-01T08:00:00Z"),
            entry(1, "2024-01-02T08:00:00Z"),
            entry(1, "2024-01-03T08:00:00Z"),
            entry(5, "2024-01-04T08:00:00Z"),
        ];

        let stats = histogram(&entries);
        assert_eq!(stats[0].count, 3);
        assert_eq!(stats[0].percentage, 75);
        assert_eq!(stats[4].count, 1);
        assert_eq!(stats[4].percentage, 25);
        for middle in &stats[1..4] {
            assert_eq!(middle.count, 0);
            assert_eq!(middle.percentage, 0);
        }
        assert_eq!(stats[2].label, "Neutral");
    }

    #[test]
    fn histogram_of_empty_snapshot_is_all_zero() {
        let stats = histogram(&[]);
        assert!(stats.iter().all(|stat| stat.count == 0 && stat.percentage == 0));
    }

    #[test]
    fn average_matches_arithmetic_mean_and_empty_default() {
        let entries = vec![
            entry(1, "2024-01-01T08:00:00Z"),
            entry(1, "2024-01-02T08:00:00Z"),
            entry(1, "2024-01-03T08:00:00Z"),
            entry(5, "2024-01-04T08:00:00Z"),
        ];
        assert_eq!(average_level(&entries), 2.0);
        assert_eq!(average_level(&[]), 0.0);
    }

    #[test]
    fn entries_since_keeps_cutoff_inclusive() {
        let old = entry(3, "2024-01-01T00:00:00Z");
        let recent = entry(4, "2024-01-08T00:00:00Z");
        let cutoff = parse_timestamp("2024-01-08T00:00:00Z").unwrap();

        let window = entries_since(&[old, recent.clone()], cutoff);
        assert_eq!(window, vec![recent]);

        let week_before = cutoff - Duration::days(7);
        assert_eq!(week_before, parse_timestamp("2024-01-01T00:00:00Z").unwrap());
    }
}
