//! Editor session state machine.
//!
//! # Responsibility
//! - Hold the working copy of the note being composed or edited.
//! - Route commits to note creation or in-place update.
//!
//! # Invariants
//! - States are `Closed`, `Creating`, `Editing`, `Viewing`; `Closed` is initial.
//! - Opening only succeeds from `Closed`; `Creating`/`Editing` leave via
//!   commit or discard, `Viewing` only via `close_viewer`.
//! - Working fields are untouched when a view-only note is opened.
//! - A failed commit keeps the session open with its working fields.

use crate::model::note::{Note, NoteFields, NoteId, PaperStyle};
use crate::repo::note_repo::NoteRepository;
use crate::service::error::{NoteError, NoteResult};
use crate::service::note_store::NoteStore;
use crate::service::preview::markup_to_text;
use log::debug;

/// Current editor state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Closed,
    /// Composing a note that does not exist yet.
    Creating,
    /// Editing an existing note.
    Editing(NoteId),
    /// Presenting a view-only note.
    Viewing(NoteId),
}

/// Result of asking the editor to open an existing note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Working fields now hold the note for editing.
    Editing,
    /// Note is view-only; present it read-only instead.
    ReadOnly(Note),
}

/// Transient editing session bound to at most one note.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    state: EditorState,
    draft: NoteFields,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts composing a new note with default fields.
    ///
    /// # Errors
    /// - `EditorBusy` unless the session is closed.
    pub fn open_for_create(&mut self) -> NoteResult<()> {
        self.ensure_closed("create")?;
        self.draft = NoteFields::default();
        self.state = EditorState::Creating;
        debug!("event=editor_open module=editor status=ok mode=create");
        Ok(())
    }

    /// Opens `id` for editing, or for read-only viewing when view-only.
    ///
    /// # Errors
    /// - `EditorBusy` unless the session is closed.
    /// - `NotFound` when `id` is not in `notes`.
    pub fn open_for_edit(&mut self, notes: &[Note], id: &NoteId) -> NoteResult<OpenOutcome> {
        self.ensure_closed("edit")?;
        let note = notes
            .iter()
            .find(|note| &note.id == id)
            .ok_or_else(|| NoteError::NotFound(id.clone()))?;

        if note.view_only {
            self.state = EditorState::Viewing(id.clone());
            debug!("event=editor_open module=editor status=ok mode=view note_id={id}");
            return Ok(OpenOutcome::ReadOnly(note.clone()));
        }

        self.draft = note.fields();
        self.state = EditorState::Editing(id.clone());
        debug!("event=editor_open module=editor status=ok mode=edit note_id={id}");
        Ok(OpenOutcome::Editing)
    }

    /// Saves the working fields and closes the session.
    ///
    /// # Errors
    /// - `EditorClosed` when nothing is open.
    /// - `Protected` while viewing a view-only note.
    /// - `Validation`, `NotFound`, `Persistence` from the store; the session
    ///   stays open so the user can retry.
    pub fn commit<R: NoteRepository>(&mut self, store: &mut NoteStore<R>) -> NoteResult<NoteId> {
        let id = match &self.state {
            EditorState::Closed => return Err(NoteError::EditorClosed),
            EditorState::Viewing(id) => return Err(NoteError::Protected(id.clone())),
            EditorState::Creating => {
                self.draft.validate()?;
                store.create(self.draft.clone())?
            }
            EditorState::Editing(id) => {
                self.draft.validate()?;
                store.update(id, self.draft.clone())?;
                id.clone()
            }
        };

        self.reset();
        Ok(id)
    }

    /// Drops the working fields without saving.
    ///
    /// Returns `false` (and does nothing) unless creating or editing.
    pub fn discard(&mut self) -> bool {
        match self.state {
            EditorState::Creating | EditorState::Editing(_) => {
                self.reset();
                true
            }
            EditorState::Closed | EditorState::Viewing(_) => false,
        }
    }

    /// Leaves read-only viewing. Returns `false` when not viewing.
    pub fn close_viewer(&mut self) -> bool {
        if matches!(self.state, EditorState::Viewing(_)) {
            self.reset();
            return true;
        }
        false
    }

    /// Deletes the note currently being edited and closes the session.
    ///
    /// # Errors
    /// - `EditorClosed` unless editing an existing note.
    /// - `Protected` while viewing a view-only note.
    /// - `NotFound`, `Persistence` from the store.
    pub fn delete_current<R: NoteRepository>(
        &mut self,
        store: &mut NoteStore<R>,
    ) -> NoteResult<NoteId> {
        let id = match &self.state {
            EditorState::Editing(id) => id.clone(),
            EditorState::Viewing(id) => return Err(NoteError::Protected(id.clone())),
            EditorState::Closed | EditorState::Creating => return Err(NoteError::EditorClosed),
        };
        store.delete(&id)?;
        self.reset();
        Ok(id)
    }

    /// Closes the session when its bound note is no longer in `notes`.
    ///
    /// Returns whether the session was closed.
    pub fn release_if_missing(&mut self, notes: &[Note]) -> bool {
        let Some(id) = self.current_id() else {
            return false;
        };
        if notes.iter().any(|note| &note.id == id) {
            return false;
        }
        debug!("event=editor_release module=editor status=ok reason=note_deleted note_id={id}");
        self.reset();
        true
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Id targeted by the session, if it is bound to an existing note.
    pub fn current_id(&self) -> Option<&NoteId> {
        match &self.state {
            EditorState::Editing(id) | EditorState::Viewing(id) => Some(id),
            EditorState::Closed | EditorState::Creating => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state != EditorState::Closed
    }

    pub fn draft(&self) -> &NoteFields {
        &self.draft
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    pub fn set_font_style(&mut self, font_style: impl Into<String>) {
        self.draft.font_style = font_style.into();
    }

    pub fn set_font_size(&mut self, font_size: impl Into<String>) {
        self.draft.font_size = font_size.into();
    }

    pub fn set_sheet_style(&mut self, sheet_style: PaperStyle) {
        self.draft.sheet_style = sheet_style;
    }

    /// Number of text lines in the working content, for the line gutter.
    pub fn line_count(&self) -> usize {
        markup_to_text(&self.draft.content).split('\n').count()
    }

    fn ensure_closed(&self, mode: &'static str) -> NoteResult<()> {
        if self.is_open() {
            debug!("event=editor_open module=editor status=rejected mode={mode} reason=busy");
            return Err(NoteError::EditorBusy);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.state = EditorState::Closed;
        self.draft = NoteFields::default();
    }
}
