//! Multi-select state for bulk operations.
//!
//! # Invariants
//! - The selection only ever holds ids of non-protected notes.
//! - Toggling a protected note is a no-op, not an error.

use crate::model::note::{Note, NoteId};
use crate::service::error::{NoteError, NoteResult};
use std::collections::BTreeSet;

/// Set of note ids chosen for bulk deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<NoteId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips selection of `id` and returns whether it is now selected.
    ///
    /// Protected notes are left unselected and yield `Ok(false)`.
    ///
    /// # Errors
    /// - `NotFound` when `id` is not in `notes`.
    pub fn toggle(&mut self, notes: &[Note], id: &NoteId) -> NoteResult<bool> {
        let note = notes
            .iter()
            .find(|note| &note.id == id)
            .ok_or_else(|| NoteError::NotFound(id.clone()))?;
        if note.protected {
            return Ok(false);
        }

        if self.ids.remove(id) {
            Ok(false)
        } else {
            self.ids.insert(id.clone());
            Ok(true)
        }
    }

    /// Selects exactly the non-protected notes.
    pub fn select_all(&mut self, notes: &[Note]) {
        self.ids = selectable(notes);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops ids whose notes no longer exist.
    pub fn prune(&mut self, notes: &[Note]) {
        let alive = selectable(notes);
        self.ids.retain(|id| alive.contains(id));
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.ids.contains(id)
    }

    /// True iff every selectable note is selected and at least one exists.
    pub fn is_all_selected(&self, notes: &[Note]) -> bool {
        let all = selectable(notes);
        !all.is_empty() && self.ids == all
    }

    pub fn ids(&self) -> &BTreeSet<NoteId> {
        &self.ids
    }
}

fn selectable(notes: &[Note]) -> BTreeSet<NoteId> {
    notes
        .iter()
        .filter(|note| !note.protected)
        .map(|note| note.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::SelectionSet;
    use crate::model::note::{Note, NoteFields, NoteId};
    use crate::model::welcome::welcome_note;
    use crate::service::error::NoteError;

    fn notes() -> Vec<Note> {
        vec![
            welcome_note(),
            Note::from_fields(NoteId::Timestamp(1), NoteFields::new("a", "b"), ""),
            Note::from_fields(NoteId::Timestamp(2), NoteFields::new("c", "d"), ""),
        ]
    }

    #[test]
    fn toggle_adds_then_removes() {
        let notes = notes();
        let mut selection = SelectionSet::new();
        assert!(selection.toggle(&notes, &NoteId::Timestamp(1)).unwrap());
        assert_eq!(selection.count(), 1);
        assert!(!selection.toggle(&notes, &NoteId::Timestamp(1)).unwrap());
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_protected_is_noop() {
        let notes = notes();
        let mut selection = SelectionSet::new();
        assert!(!selection.toggle(&notes, &NoteId::welcome()).unwrap());
        assert!(!selection.contains(&NoteId::welcome()));
    }

    #[test]
    fn toggle_unknown_is_not_found() {
        let mut selection = SelectionSet::new();
        let err = selection.toggle(&notes(), &NoteId::Timestamp(99)).unwrap_err();
        assert!(matches!(err, NoteError::NotFound(NoteId::Timestamp(99))));
    }

    #[test]
    fn all_selected_requires_every_selectable_note() {
        let notes = notes();
        let mut selection = SelectionSet::new();
        selection.toggle(&notes, &NoteId::Timestamp(1)).unwrap();
        assert!(!selection.is_all_selected(&notes));
        selection.toggle(&notes, &NoteId::Timestamp(2)).unwrap();
        assert!(selection.is_all_selected(&notes));
    }

    #[test]
    fn all_selected_is_false_with_only_protected_notes() {
        let notes = vec![welcome_note()];
        let mut selection = SelectionSet::new();
        selection.select_all(&notes);
        assert!(selection.is_empty());
        assert!(!selection.is_all_selected(&notes));
    }

    #[test]
    fn prune_drops_removed_ids() {
        let mut notes = notes();
        let mut selection = SelectionSet::new();
        selection.select_all(&notes);
        notes.truncate(2);
        selection.prune(&notes);
        assert_eq!(selection.count(), 1);
        assert!(selection.contains(&NoteId::Timestamp(1)));
    }
}
