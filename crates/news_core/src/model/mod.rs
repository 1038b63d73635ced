//! Domain model for news records.
//!
//! # Responsibility
//! - Define canonical data structures used by the store and its callers.
//!
//! # Invariants
//! - Every stored record is identified by a store-assigned `NewsId`.
//! - Deletion is a hard delete; no tombstones are kept.

pub mod news;
