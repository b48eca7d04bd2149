//! Error taxonomy for note use-cases.

use crate::model::note::{NoteId, NoteValidationError};
use crate::repo::note_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type NoteResult<T> = Result<T, NoteError>;

/// Use-case error surfaced to the presentation boundary.
///
/// None of these are fatal; the in-memory state stays usable after each.
#[derive(Debug)]
pub enum NoteError {
    /// Required title or content is empty.
    Validation(NoteValidationError),
    /// No note with this id exists.
    NotFound(NoteId),
    /// Mutation attempted on a protected note.
    Protected(NoteId),
    /// Storage read or write failed.
    Persistence(RepoError),
    /// Editor action requires an open editor.
    EditorClosed,
    /// Editor is already open; commit, discard or close it first.
    EditorBusy,
}

impl NoteError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(_) => "Please fill in both title and content".to_string(),
            Self::NotFound(_) => "This note no longer exists.".to_string(),
            Self::Protected(_) => "This note cannot be deleted.".to_string(),
            Self::Persistence(_) => {
                "Your notes could not be saved. Free up storage space and try again.".to_string()
            }
            Self::EditorClosed => "No note is open.".to_string(),
            Self::EditorBusy => "Save or discard the open note first.".to_string(),
        }
    }
}

impl Display for NoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid note: {err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Protected(id) => write!(f, "note is protected: {id}"),
            Self::Persistence(err) => write!(f, "persistence failed: {err}"),
            Self::EditorClosed => write!(f, "editor is not open"),
            Self::EditorBusy => write!(f, "editor is already open"),
        }
    }
}

impl Error for NoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::NotFound(_) | Self::Protected(_) | Self::EditorClosed | Self::EditorBusy => {
                None
            }
        }
    }
}

impl From<NoteValidationError> for NoteError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for NoteError {
    fn from(value: RepoError) -> Self {
        Self::Persistence(value)
    }
}
