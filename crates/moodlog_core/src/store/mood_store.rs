//! Mood store: owned collection, write-through persistence, subscriptions.
//!
//! # Responsibility
//! - Provide add/get/delete/replace/import operations over the collection.
//! - Notify subscribers with a snapshot after every mutation.
//!
//! # Invariants
//! - Entry ids are unique within the collection; collisions are resolved by
//!   regenerating the incoming id.
//! - Every stored level satisfies the `1..=5` range; violating candidates
//!   are excluded, never stored.
//! - Single execution context: the store is not `Send` and all operations
//!   run to completion before the next one starts.

use crate::model::entry::{
    generate_entry_id, CandidateEntry, EntryId, EntryValidationError, MoodEntry,
};
use crate::storage::adapter::StorageAdapter;
use log::info;
use std::collections::HashSet;

/// Handle returned by [`MoodStore::subscribe`], used to unsubscribe.
pub type SubscriberId = u64;

type SnapshotCallback = Box<dyn FnMut(&[MoodEntry])>;

/// Outcome of a bulk replace/import operation.
///
/// Rejection is not an error: excluded candidates are only observable here
/// and through the smaller resulting collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    pub accepted: usize,
    pub rejected: usize,
}

/// Single authoritative store for mood entries.
///
/// Constructed once at application start and passed by reference to all
/// consumers; durability is delegated to the injected [`StorageAdapter`]
/// and every mutation is written through synchronously.
pub struct MoodStore<S: StorageAdapter> {
    storage: S,
    entries: Vec<MoodEntry>,
    subscribers: Vec<(SubscriberId, SnapshotCallback)>,
    next_subscriber_id: SubscriberId,
}

impl<S: StorageAdapter> MoodStore<S> {
    /// Creates a store seeded with the adapter's last committed collection.
    pub fn open(storage: S) -> Self {
        let entries = storage.load();
        info!(
            "event=store_open module=store status=ok entry_count={}",
            entries.len()
        );
        Self {
            storage,
            entries,
            subscribers: Vec::new(),
            next_subscriber_id: 0,
        }
    }

    /// Records a new entry with a fresh id and the current instant.
    ///
    /// Returns the created entry after persisting and broadcasting.
    pub fn add(
        &mut self,
        level: u8,
        notes: impl Into<String>,
    ) -> Result<MoodEntry, EntryValidationError> {
        let entry = MoodEntry::new(level, notes);
        entry.validate()?;

        self.entries.push(entry.clone());
        self.commit_and_broadcast();
        info!(
            "event=store_add module=store status=ok level={} entry_count={}",
            entry.level,
            self.entries.len()
        );
        Ok(entry)
    }

    /// Returns a snapshot of the full collection.
    pub fn get_all(&self) -> Vec<MoodEntry> {
        self.entries.clone()
    }

    /// Borrowed view of the current collection.
    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Registers a snapshot callback and immediately replays the current
    /// snapshot to it. Subsequent mutations deliver exactly one snapshot
    /// per subscriber, in mutation order.
    pub fn subscribe(&mut self, mut callback: impl FnMut(&[MoodEntry]) + 'static) -> SubscriberId {
        let id = self.next_subscriber_id;
        self.next_subscriber_id += 1;
        callback(&self.entries);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscription; returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// Removes the entry with the matching id.
    ///
    /// An absent id is a no-op returning `false`, not an error; nothing is
    /// persisted or broadcast in that case.
    pub fn delete_by_id(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;

        if removed {
            self.commit_and_broadcast();
        }
        info!(
            "event=store_delete module=store status=ok removed={removed} entry_count={}",
            self.entries.len()
        );
        removed
    }

    /// Replaces the whole collection with already-shaped entries.
    ///
    /// Restore path: empty ids are backfilled, colliding ids regenerated,
    /// and entries violating the level-range invariant are excluded so the
    /// stored collection can never carry an out-of-range level.
    pub fn replace_all(&mut self, entries: Vec<MoodEntry>) -> ImportOutcome {
        let mut seen = HashSet::new();
        let mut accepted = Vec::with_capacity(entries.len());
        let mut rejected = 0usize;

        for mut entry in entries {
            if entry.validate().is_err() {
                rejected += 1;
                continue;
            }
            normalize_id(&mut entry.id, &mut seen);
            accepted.push(entry);
        }

        let outcome = ImportOutcome {
            accepted: accepted.len(),
            rejected,
        };
        self.entries = accepted;
        self.commit_and_broadcast();
        info!(
            "event=store_replace module=store status=ok accepted={} rejected={}",
            outcome.accepted, outcome.rejected
        );
        outcome
    }

    /// Replaces the whole collection with the valid subset of `candidates`.
    ///
    /// Candidates without an in-range numeric level or a parseable timestamp
    /// are dropped silently. This is a destructive replace, not a merge: it
    /// is the restore half of the export/import backup pair, and entries not
    /// present in the imported payload are discarded.
    pub fn import_validated(&mut self, candidates: Vec<CandidateEntry>) -> ImportOutcome {
        let mut seen = HashSet::new();
        let mut accepted = Vec::with_capacity(candidates.len());
        let mut rejected = 0usize;

        for candidate in candidates {
            match candidate.into_entry() {
                Ok(mut entry) => {
                    normalize_id(&mut entry.id, &mut seen);
                    accepted.push(entry);
                }
                Err(_) => rejected += 1,
            }
        }

        let outcome = ImportOutcome {
            accepted: accepted.len(),
            rejected,
        };
        self.entries = accepted;
        self.commit_and_broadcast();
        info!(
            "event=store_import module=store status=ok accepted={} rejected={}",
            outcome.accepted, outcome.rejected
        );
        outcome
    }

    fn commit_and_broadcast(&mut self) {
        self.storage.save(&self.entries);
        let entries = &self.entries;
        for (_, callback) in &mut self.subscribers {
            callback(entries);
        }
    }
}

fn normalize_id(id: &mut EntryId, seen: &mut HashSet<EntryId>) {
    if id.trim().is_empty() || seen.contains(id.as_str()) {
        *id = generate_entry_id();
    }
    seen.insert(id.clone());
}
