//! Domain model for notes.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Provide the seeded welcome note.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Exactly one note carries the reserved welcome id.

pub mod note;
pub mod welcome;
