//! Storage adapter contract and SQLite key-value implementation.
//!
//! # Responsibility
//! - Serialize/deserialize the full mood collection as one JSON blob.
//! - Degrade storage failures to safe defaults at this boundary.
//!
//! # Invariants
//! - `load` never fails: absent key or unreadable blob yields an empty
//!   collection.
//! - `save` never fails: a rejected write leaves the prior stored state
//!   unchanged.

use crate::model::entry::MoodEntry;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};

/// Fixed key the whole collection is stored under.
pub const STORAGE_KEY: &str = "mood-tracker-data";

/// Durability contract consumed by the mood store.
///
/// Both operations are infallible by design: the adapter owns the fail-soft
/// policy for storage errors, so store code never branches on persistence
/// failures.
pub trait StorageAdapter {
    /// Reads the last committed collection; empty when nothing was stored
    /// or the stored blob is unreadable.
    fn load(&self) -> Vec<MoodEntry>;

    /// Overwrites the committed collection with `entries`.
    fn save(&self, entries: &[MoodEntry]);
}

/// SQLite-backed adapter storing the collection as a JSON array blob
/// (timestamps as ISO-8601 strings) under [`STORAGE_KEY`].
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Wraps a bootstrapped connection (see [`crate::db::open_db`]).
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    fn read_blob(&self) -> rusqlite::Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()
    }

    fn write_blob(&self, blob: &str) -> rusqlite::Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![STORAGE_KEY, blob],
        )?;
        Ok(())
    }
}

impl StorageAdapter for SqliteStorage {
    fn load(&self) -> Vec<MoodEntry> {
        let blob = match self.read_blob() {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(err) => {
                error!(
                    "event=storage_load module=storage status=error error_code=read_failed error={err}"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<MoodEntry>>(&blob) {
            Ok(entries) => {
                info!(
                    "event=storage_load module=storage status=ok entry_count={}",
                    entries.len()
                );
                entries
            }
            Err(err) => {
                error!(
                    "event=storage_load module=storage status=error error_code=blob_parse_failed error={err}"
                );
                Vec::new()
            }
        }
    }

    fn save(&self, entries: &[MoodEntry]) {
        let blob = match serde_json::to_string(entries) {
            Ok(blob) => blob,
            Err(err) => {
                error!(
                    "event=storage_save module=storage status=error error_code=serialize_failed error={err}"
                );
                return;
            }
        };

        match self.write_blob(&blob) {
            Ok(()) => info!(
                "event=storage_save module=storage status=ok entry_count={}",
                entries.len()
            ),
            Err(err) => error!(
                "event=storage_save module=storage status=error error_code=write_failed error={err}"
            ),
        }
    }
}
