//! Core domain logic for Memopad.
//! This crate is the single source of truth for note lifecycle, selection and
//! protection invariants.

pub mod api;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use api::{NoteCard, NotesApp};
pub use config::{AppConfig, StorageKeys};
pub use logging::{init_logging, LogLevel, LoggingOutcome};
pub use model::note::{
    Note, NoteAccess, NoteFields, NoteId, NoteValidationError, PaperStyle, DEFAULT_FONT_SIZE,
    DEFAULT_FONT_STYLE, WELCOME_NOTE_ID,
};
pub use model::welcome::welcome_note;
pub use repo::note_repo::{
    decode_snapshot, encode_snapshot, KvNoteRepository, NoteRepository, RepoError, RepoResult,
};
pub use service::clock::{format_display_date, Clock, FixedClock, SystemClock};
pub use service::editor::{EditorSession, EditorState, OpenOutcome};
pub use service::error::{NoteError, NoteResult};
pub use service::note_store::NoteStore;
pub use service::preview::{derive_content_preview, ContentPreview};
pub use service::selection::SelectionSet;
pub use storage::{KeyValueStore, MemoryStore, SqliteKvStore, StorageError, StorageResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
