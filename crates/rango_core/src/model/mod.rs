//! Domain model for potluck events.
//!
//! # Responsibility
//! - Define canonical data structures used by the draw engine and the store.
//! - Normalize and validate user input before it reaches storage.
//!
//! # Invariants
//! - Every event, item and family is identified by a random UUID v4.
//! - Item quantities are always >= 1.
//! - `assignments` is only present once an event is `completed`.

pub mod assignment;
pub mod event;
pub mod family;
pub mod item;
pub mod validation;
