//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for the event store.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes validate model values before persistence.
//! - Repository APIs return semantic errors (`EventNotFound`, `ItemNotFound`)
//!   in addition to DB transport errors.

pub mod event_repo;
