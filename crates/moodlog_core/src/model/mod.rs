//! Canonical domain model for mood journaling.
//!
//! # Responsibility
//! - Define the entry record persisted and broadcast by the store.
//! - Define the unvalidated candidate shape produced by import parsing.
//!
//! # Invariants
//! - Every stored entry is identified by a stable opaque `EntryId`.
//! - Stored levels always satisfy `LEVEL_MIN <= level <= LEVEL_MAX`.

pub mod entry;
