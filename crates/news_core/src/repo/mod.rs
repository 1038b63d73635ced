//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define the storage contract the news service writes through.
//! - Allow swapping the in-memory map for real persistence later.
//!
//! # Invariants
//! - Repositories never validate; validation belongs to the service.

pub mod news_repo;
