//! Note snapshot repository.
//!
//! # Responsibility
//! - Load and save the note collection as a JSON array.
//! - Read and set the first-run flag.
//!
//! # Invariants
//! - A missing snapshot key reads as an empty collection.
//! - The first-run flag is cleared only by writing the literal `"false"`.

use crate::config::StorageKeys;
use crate::model::note::Note;
use crate::storage::{KeyValueStore, StorageError};
use log::{error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const FIRST_LOAD_DONE: &str = "false";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure for snapshot reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    /// Stored snapshot could not be decoded.
    InvalidData(String),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted notes: {message}"),
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Repository interface for the persisted note snapshot.
pub trait NoteRepository {
    /// Loads the whole collection; empty when nothing was stored yet.
    fn load_notes(&self) -> RepoResult<Vec<Note>>;
    /// Replaces the stored collection with `notes`.
    fn save_notes(&mut self, notes: &[Note]) -> RepoResult<()>;
    /// Returns whether the first-run seeding has not completed yet.
    fn is_first_load(&self) -> RepoResult<bool>;
    /// Records that first-run seeding completed.
    fn mark_first_load_done(&mut self) -> RepoResult<()>;
}

/// Snapshot repository writing JSON into a `KeyValueStore`.
pub struct KvNoteRepository<S: KeyValueStore> {
    store: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> KvNoteRepository<S> {
    /// Uses the default `notes` / `notesAppFirstLoad` keys.
    pub fn new(store: S) -> Self {
        Self::with_keys(store, StorageKeys::default())
    }

    pub fn with_keys(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> NoteRepository for KvNoteRepository<S> {
    fn load_notes(&self) -> RepoResult<Vec<Note>> {
        let Some(raw) = self.store.get(&self.keys.notes)? else {
            return Ok(Vec::new());
        };
        decode_snapshot(&raw).map_err(|err| {
            error!(
                "event=snapshot_load module=repo status=error error_code=snapshot_decode_failed bytes={}",
                raw.len()
            );
            err
        })
    }

    fn save_notes(&mut self, notes: &[Note]) -> RepoResult<()> {
        let encoded = encode_snapshot(notes)?;
        self.store.set(&self.keys.notes, &encoded).map_err(|err| {
            warn!(
                "event=snapshot_save module=repo status=error count={} bytes={} error={}",
                notes.len(),
                encoded.len(),
                err
            );
            RepoError::from(err)
        })
    }

    fn is_first_load(&self) -> RepoResult<bool> {
        let flag = self.store.get(&self.keys.first_load)?;
        Ok(flag.as_deref() != Some(FIRST_LOAD_DONE))
    }

    fn mark_first_load_done(&mut self) -> RepoResult<()> {
        self.store.set(&self.keys.first_load, FIRST_LOAD_DONE)?;
        Ok(())
    }
}

/// Serializes a collection into the snapshot JSON array.
pub fn encode_snapshot(notes: &[Note]) -> RepoResult<String> {
    serde_json::to_string(notes).map_err(RepoError::Encode)
}

/// Parses a snapshot JSON array.
///
/// Blank input reads as an empty collection.
pub fn decode_snapshot(raw: &str) -> RepoResult<Vec<Note>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|err| RepoError::InvalidData(err.to_string()))
}
