//! Presentation-facing use-case API.
//!
//! # Responsibility
//! - Compose note store, selection and editor session into one facade.
//! - Produce render-ready note cards for any presentation layer.
//!
//! # Invariants
//! - Methods never panic; failures are returned as `NoteError`.
//! - The selection never references deleted notes after a facade call.
//! - The editor is never left bound to a deleted note.

use crate::config::StorageKeys;
use crate::model::note::{Note, NoteFields, NoteId, PaperStyle};
use crate::repo::note_repo::KvNoteRepository;
use crate::service::clock::Clock;
use crate::service::editor::{EditorSession, EditorState, OpenOutcome};
use crate::service::error::NoteResult;
use crate::service::note_store::NoteStore;
use crate::service::preview::derive_content_preview;
use crate::service::selection::SelectionSet;
use crate::storage::KeyValueStore;
use log::info;

/// Render-ready projection of one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub id: NoteId,
    pub title: String,
    pub date: String,
    pub font_style: String,
    pub font_size: String,
    pub sheet_style: PaperStyle,
    pub protected: bool,
    pub view_only: bool,
    pub selected: bool,
    /// Content characters with markup removed.
    pub char_count: usize,
    pub preview_text: Option<String>,
}

/// One running notes session over a key-value store.
pub struct NotesApp<S: KeyValueStore> {
    store: NoteStore<KvNoteRepository<S>>,
    selection: SelectionSet,
    editor: EditorSession,
}

impl<S: KeyValueStore> NotesApp<S> {
    /// Loads notes from `storage` using the default keys and wall clock.
    pub fn open(storage: S) -> NoteResult<Self> {
        let store = NoteStore::load(KvNoteRepository::new(storage))?;
        Ok(Self::from_store(store))
    }

    /// Loads notes with explicit storage keys and clock.
    pub fn open_with(storage: S, keys: StorageKeys, clock: Box<dyn Clock>) -> NoteResult<Self> {
        let repo = KvNoteRepository::with_keys(storage, keys);
        let store = NoteStore::load_with_clock(repo, clock)?;
        Ok(Self::from_store(store))
    }

    fn from_store(store: NoteStore<KvNoteRepository<S>>) -> Self {
        info!(
            "event=app_open module=api status=ok notes={}",
            store.len()
        );
        Self {
            store,
            selection: SelectionSet::new(),
            editor: EditorSession::new(),
        }
    }

    pub fn list_notes(&self) -> &[Note] {
        self.store.list()
    }

    pub fn get_note(&self, id: &NoteId) -> Option<&Note> {
        self.store.get(id)
    }

    /// Builds cards for every note in display order.
    pub fn note_cards(&self) -> Vec<NoteCard> {
        self.store
            .list()
            .iter()
            .map(|note| {
                let preview = derive_content_preview(&note.content);
                NoteCard {
                    id: note.id.clone(),
                    title: note.title.clone(),
                    date: note.date.clone(),
                    font_style: note.font_style.clone(),
                    font_size: note.font_size.clone(),
                    sheet_style: note.sheet_style.clone(),
                    protected: note.protected,
                    view_only: note.view_only,
                    selected: self.selection.contains(&note.id),
                    char_count: preview.char_count,
                    preview_text: preview.preview_text,
                }
            })
            .collect()
    }

    pub fn create_note(&mut self, fields: NoteFields) -> NoteResult<NoteId> {
        self.store.create(fields)
    }

    pub fn update_note(&mut self, id: &NoteId, fields: NoteFields) -> NoteResult<()> {
        self.store.update(id, fields)
    }

    pub fn delete_note(&mut self, id: &NoteId) -> NoteResult<()> {
        self.store.delete(id)?;
        self.selection.prune(self.store.list());
        self.editor.release_if_missing(self.store.list());
        Ok(())
    }

    /// Deletes the listed non-protected notes and clears the selection.
    pub fn delete_many(&mut self, ids: &[NoteId]) -> NoteResult<usize> {
        let removed = self.store.bulk_delete(ids)?;
        self.selection.clear();
        self.editor.release_if_missing(self.store.list());
        Ok(removed)
    }

    /// Deletes every selected note and clears the selection.
    pub fn delete_selected(&mut self) -> NoteResult<usize> {
        let removed = self.store.bulk_delete(self.selection.ids())?;
        self.selection.clear();
        self.editor.release_if_missing(self.store.list());
        Ok(removed)
    }

    pub fn toggle_select(&mut self, id: &NoteId) -> NoteResult<bool> {
        self.selection.toggle(self.store.list(), id)
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(self.store.list());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection_count(&self) -> usize {
        self.selection.count()
    }

    pub fn is_all_selected(&self) -> bool {
        self.selection.is_all_selected(self.store.list())
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Opens the editor for a new note (`None`) or an existing one.
    ///
    /// Fails with `EditorBusy` while another session is open.
    pub fn open_editor(&mut self, id: Option<&NoteId>) -> NoteResult<OpenOutcome> {
        match id {
            None => {
                self.editor.open_for_create()?;
                Ok(OpenOutcome::Editing)
            }
            Some(id) => self.editor.open_for_edit(self.store.list(), id),
        }
    }

    pub fn commit_editor(&mut self) -> NoteResult<NoteId> {
        self.editor.commit(&mut self.store)
    }

    pub fn discard_editor(&mut self) -> bool {
        self.editor.discard()
    }

    pub fn close_viewer(&mut self) -> bool {
        self.editor.close_viewer()
    }

    /// Deletes the note open in the editor.
    pub fn delete_open_note(&mut self) -> NoteResult<NoteId> {
        let id = self.editor.delete_current(&mut self.store)?;
        self.selection.prune(self.store.list());
        Ok(id)
    }

    pub fn editor(&self) -> &EditorSession {
        &self.editor
    }

    /// Mutable access for working-field edits.
    pub fn editor_mut(&mut self) -> &mut EditorSession {
        &mut self.editor
    }

    pub fn editor_state(&self) -> &EditorState {
        self.editor.state()
    }

    /// Retries writing the current snapshot.
    pub fn sync(&mut self) -> NoteResult<()> {
        self.store.sync()
    }

    pub fn storage(&self) -> &S {
        self.store.repo().store()
    }

    pub fn storage_mut(&mut self) -> &mut S {
        self.store.repo_mut().store_mut()
    }
}
