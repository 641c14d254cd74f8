//! Authoritative in-memory mood collection and its mutation API.
//!
//! # Responsibility
//! - Own the single source of truth for recorded entries.
//! - Write every mutation through the storage adapter before broadcasting.
//!
//! # Invariants
//! - The in-memory collection always matches the last durable save.
//! - Broadcasts are delivered in mutation order, one snapshot per mutation.

pub mod mood_store;
