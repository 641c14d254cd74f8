//! Core domain logic for the mood journal.
//! This crate is the single source of truth for business invariants.

pub mod codec;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod storage;
pub mod store;

pub use codec::csv::{export_csv, parse_csv, split_csv_line, CSV_HEADER};
pub use codec::json::{export_json, parse_json};
pub use codec::{export_file_name, ExportFormat, FormatError, RowError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{
    generate_entry_id, mood_label, parse_timestamp, CandidateEntry, EntryId, EntryValidationError,
    MoodEntry, LEVEL_MAX, LEVEL_MIN,
};
pub use query::filter::{compute_filtered, sort_entries, EntryFilter, SortDirection, SortKey};
pub use query::stats::{average_level, entries_since, histogram, LevelStat};
pub use storage::adapter::{SqliteStorage, StorageAdapter, STORAGE_KEY};
pub use store::mood_store::{ImportOutcome, MoodStore, SubscriberId};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
