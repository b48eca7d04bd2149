//! Persistence adapter over the key-value storage medium.
//!
//! # Responsibility
//! - Serialize the note collection as one snapshot under a fixed key.
//! - Track the first-run flag.
//!
//! # Invariants
//! - Snapshots are written whole; there are no partial updates.
//! - Read paths reject undecodable snapshots instead of masking them.

pub mod note_repo;
