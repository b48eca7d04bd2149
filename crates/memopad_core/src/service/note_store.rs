//! Note store: ordered in-memory collection synced to the repository.
//!
//! # Responsibility
//! - Own the note collection and its create/update/delete lifecycle.
//! - Seed the protected welcome note on first run.
//! - Persist a full snapshot after every mutation.
//!
//! # Invariants
//! - New notes are prepended; updates keep position.
//! - Exactly one note carries the welcome id, and it is never removed.
//! - In-memory state only changes after the snapshot write succeeded.

use crate::model::note::{Note, NoteFields, NoteId};
use crate::model::welcome::welcome_note;
use crate::repo::note_repo::NoteRepository;
use crate::service::clock::{format_display_date, Clock, SystemClock};
use crate::service::error::{NoteError, NoteResult};
use log::{info, warn};
use std::collections::BTreeSet;

/// Note collection bound to a persistence repository.
pub struct NoteStore<R: NoteRepository> {
    repo: R,
    clock: Box<dyn Clock>,
    notes: Vec<Note>,
}

impl<R: NoteRepository> NoteStore<R> {
    /// Loads the collection using the wall clock.
    pub fn load(repo: R) -> NoteResult<Self> {
        Self::load_with_clock(repo, Box::new(SystemClock))
    }

    /// Loads the collection, seeding the welcome note when needed.
    ///
    /// # Errors
    /// - `Persistence` when the snapshot cannot be read or decoded.
    ///
    /// A failed seeding write is logged and does not fail loading; call
    /// [`NoteStore::sync`] to retry it.
    pub fn load_with_clock(repo: R, clock: Box<dyn Clock>) -> NoteResult<Self> {
        let first_load = repo.is_first_load()?;
        let stored = repo.load_notes()?;
        let stored_count = stored.len();
        let (notes, normalized) = normalize_collection(stored);

        let mut store = Self { repo, clock, notes };
        if first_load || normalized {
            if let Err(err) = store.sync() {
                warn!(
                    "event=store_seed module=store status=error first_load={first_load} error={err}"
                );
            }
        }

        info!(
            "event=store_load module=store status=ok stored={stored_count} loaded={} first_load={first_load} normalized={normalized}",
            store.notes.len()
        );
        Ok(store)
    }

    /// Writes the current collection and clears the first-run flag.
    pub fn sync(&mut self) -> NoteResult<()> {
        self.repo.save_notes(&self.notes)?;
        self.repo.mark_first_load_done()?;
        Ok(())
    }

    /// Creates a note at the front of the collection.
    ///
    /// # Errors
    /// - `Validation` when title or content is empty.
    /// - `Persistence` when the snapshot write fails.
    pub fn create(&mut self, fields: NoteFields) -> NoteResult<NoteId> {
        fields.validate()?;
        let id = self.fresh_id();
        let note = Note::from_fields(id.clone(), fields, self.display_date());

        let mut next = Vec::with_capacity(self.notes.len() + 1);
        next.push(note);
        next.extend(self.notes.iter().cloned());
        self.replace(next, "note_create", &id)?;
        Ok(id)
    }

    /// Replaces a note in place, re-stamping its date and access flags.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    /// - `Validation` when title or content is empty.
    /// - `Persistence` when the snapshot write fails.
    pub fn update(&mut self, id: &NoteId, fields: NoteFields) -> NoteResult<()> {
        let index = self.position(id)?;
        fields.validate()?;

        let mut next = self.notes.clone();
        next[index] = Note::from_fields(id.clone(), fields, self.display_date());
        self.replace(next, "note_update", id)
    }

    /// Removes one note.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    /// - `Protected` when the note is protected.
    /// - `Persistence` when the snapshot write fails.
    pub fn delete(&mut self, id: &NoteId) -> NoteResult<()> {
        let index = self.position(id)?;
        if self.notes[index].protected {
            warn!("event=note_delete module=store status=rejected reason=protected note_id={id}");
            return Err(NoteError::Protected(id.clone()));
        }

        let mut next = self.notes.clone();
        next.remove(index);
        self.replace(next, "note_delete", id)
    }

    /// Removes every listed note that is not protected.
    ///
    /// Protected and unknown ids are skipped. Writes once, and only when
    /// something was removed. Returns the number of removed notes.
    pub fn bulk_delete<'a>(
        &mut self,
        ids: impl IntoIterator<Item = &'a NoteId>,
    ) -> NoteResult<usize> {
        let targets: BTreeSet<&NoteId> = ids.into_iter().collect();
        let next: Vec<Note> = self
            .notes
            .iter()
            .filter(|note| note.protected || !targets.contains(&note.id))
            .cloned()
            .collect();

        let removed = self.notes.len() - next.len();
        if removed == 0 {
            return Ok(0);
        }

        if let Err(err) = self.repo.save_notes(&next) {
            warn!("event=note_bulk_delete module=store status=error removed={removed} error={err}");
            return Err(err.into());
        }
        self.notes = next;
        info!(
            "event=note_bulk_delete module=store status=ok requested={} removed={removed}",
            targets.len()
        );
        Ok(removed)
    }

    /// Read-only ordered view of the collection.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn repo_mut(&mut self) -> &mut R {
        &mut self.repo
    }

    pub fn into_repo(self) -> R {
        self.repo
    }

    fn position(&self, id: &NoteId) -> NoteResult<usize> {
        self.notes
            .iter()
            .position(|note| &note.id == id)
            .ok_or_else(|| NoteError::NotFound(id.clone()))
    }

    fn fresh_id(&self) -> NoteId {
        let mut candidate = self.clock.now_millis();
        while self.get(&NoteId::Timestamp(candidate)).is_some() {
            candidate += 1;
        }
        NoteId::Timestamp(candidate)
    }

    fn display_date(&self) -> String {
        format_display_date(self.clock.today())
    }

    fn replace(&mut self, next: Vec<Note>, event: &'static str, id: &NoteId) -> NoteResult<()> {
        if let Err(err) = self.repo.save_notes(&next) {
            warn!("event={event} module=store status=error note_id={id} error={err}");
            return Err(err.into());
        }
        self.notes = next;
        info!(
            "event={event} module=store status=ok note_id={id} count={}",
            self.notes.len()
        );
        Ok(())
    }
}

/// Enforces the welcome-note invariant on a loaded collection.
///
/// Keeps the first welcome record (prepending a fresh one when missing),
/// drops duplicates and re-derives access flags. Returns whether anything
/// changed.
pub fn normalize_collection(stored: Vec<Note>) -> (Vec<Note>, bool) {
    let mut changed = false;
    let mut seen_welcome = false;
    let mut notes = Vec::with_capacity(stored.len() + 1);

    for mut note in stored {
        if note.id.is_welcome() {
            if seen_welcome {
                changed = true;
                continue;
            }
            seen_welcome = true;
        }
        changed |= note.derive_access();
        notes.push(note);
    }

    if !seen_welcome {
        notes.insert(0, welcome_note());
        changed = true;
    }

    (notes, changed)
}
