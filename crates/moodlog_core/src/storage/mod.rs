//! Persistence boundary for the mood collection.
//!
//! # Responsibility
//! - Define the durability contract the store writes through.
//! - Keep single-key blob storage details out of store/business code.
//!
//! # Invariants
//! - The whole collection lives under one fixed key; writes are single-key
//!   overwrites, never partial.
//! - Read/write failures are absorbed here (logged, degraded), never raised
//!   to callers.

pub mod adapter;
