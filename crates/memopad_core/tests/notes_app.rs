use chrono::NaiveDate;
use memopad_core::{
    EditorState, FixedClock, KeyValueStore, MemoryStore, NoteError, NoteFields, NoteId,
    NotesApp, OpenOutcome, SqliteKvStore, StorageKeys,
};

fn open_app(storage: MemoryStore) -> NotesApp<MemoryStore> {
    let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    NotesApp::open_with(
        storage,
        StorageKeys::default(),
        Box::new(FixedClock::new(1_748_736_000_000, date)),
    )
    .unwrap()
}

fn app_with_notes(count: usize) -> (NotesApp<MemoryStore>, Vec<NoteId>) {
    let mut app = open_app(MemoryStore::new());
    let ids = (0..count)
        .map(|idx| {
            app.create_note(NoteFields::new(format!("note {idx}"), "body"))
                .unwrap()
        })
        .collect();
    (app, ids)
}

#[test]
fn empty_storage_lists_only_welcome_note() {
    let app = open_app(MemoryStore::new());
    let notes = app.list_notes();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].protected);
    assert_eq!(notes[0].id, NoteId::welcome());
}

#[test]
fn create_then_update_keeps_original_position() {
    let mut app = open_app(MemoryStore::new());
    let id = app.create_note(NoteFields::new("A", "B")).unwrap();
    app.update_note(&id, NoteFields::new("A2", "B")).unwrap();

    let titled: Vec<_> = app
        .list_notes()
        .iter()
        .filter(|note| note.id == id)
        .collect();
    assert_eq!(titled.len(), 1);
    assert_eq!(titled[0].title, "A2");
    assert_eq!(app.list_notes()[0].id, id);
}

#[test]
fn select_all_then_clear_yields_empty_selection() {
    let (mut app, ids) = app_with_notes(3);

    assert!(!app.is_all_selected());
    app.toggle_select(&ids[0]).unwrap();
    app.toggle_select(&ids[1]).unwrap();
    assert!(!app.is_all_selected());
    app.toggle_select(&ids[2]).unwrap();
    assert!(app.is_all_selected());

    app.clear_selection();
    assert_eq!(app.selection_count(), 0);

    app.select_all();
    assert_eq!(app.selection_count(), 3);
    assert!(!app.selection().contains(&NoteId::welcome()));
    assert!(app.is_all_selected());
    app.clear_selection();
    assert_eq!(app.selection_count(), 0);
}

#[test]
fn toggling_protected_note_never_selects_it() {
    let (mut app, _) = app_with_notes(1);
    assert!(!app.toggle_select(&NoteId::welcome()).unwrap());
    assert_eq!(app.selection_count(), 0);
}

#[test]
fn delete_selected_keeps_protected_and_clears_selection() {
    let (mut app, ids) = app_with_notes(3);
    app.select_all();

    let removed = app.delete_selected().unwrap();

    assert_eq!(removed, 3);
    assert_eq!(app.list_notes().len(), 1);
    assert!(app.list_notes()[0].protected);
    assert_eq!(app.selection_count(), 0);
    assert!(ids.iter().all(|id| app.get_note(id).is_none()));
}

#[test]
fn delete_many_removes_only_non_protected() {
    let (mut app, ids) = app_with_notes(2);
    let removed = app
        .delete_many(&[ids[0].clone(), NoteId::welcome()])
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(app.list_notes().len(), 2);
    assert!(app.get_note(&NoteId::welcome()).is_some());
}

#[test]
fn delete_note_prunes_selection() {
    let (mut app, ids) = app_with_notes(2);
    app.select_all();
    app.delete_note(&ids[0]).unwrap();
    assert_eq!(app.selection_count(), 1);
    assert!(app.is_all_selected());

    let err = app.delete_note(&NoteId::welcome()).unwrap_err();
    assert!(matches!(err, NoteError::Protected(_)));
    assert_eq!(err.user_message(), "This note cannot be deleted.");
}

#[test]
fn editor_flow_through_facade() {
    let mut app = open_app(MemoryStore::new());

    assert_eq!(app.open_editor(None).unwrap(), OpenOutcome::Editing);
    app.editor_mut().set_title("From editor");
    app.editor_mut().set_content("<p>hello</p>");
    let id = app.commit_editor().unwrap();
    assert_eq!(app.editor_state(), &EditorState::Closed);

    app.open_editor(Some(&id)).unwrap();
    app.editor_mut().set_content("");
    let err = app.commit_editor().unwrap_err();
    assert_eq!(err.user_message(), "Please fill in both title and content");
    assert!(app.discard_editor());

    app.open_editor(Some(&id)).unwrap();
    app.select_all();
    assert_eq!(app.delete_open_note().unwrap(), id);
    assert_eq!(app.selection_count(), 0);

    let outcome = app.open_editor(Some(&NoteId::welcome())).unwrap();
    assert!(matches!(outcome, OpenOutcome::ReadOnly(_)));
    assert!(matches!(app.delete_open_note(), Err(NoteError::Protected(_))));
    assert!(app.close_viewer());
}

#[test]
fn note_cards_reflect_selection_and_plain_text() {
    let mut app = open_app(MemoryStore::new());
    let id = app
        .create_note(NoteFields::new("Card", "<b>bold</b> words"))
        .unwrap();
    app.toggle_select(&id).unwrap();

    let cards = app.note_cards();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].id, id);
    assert!(cards[0].selected);
    assert_eq!(cards[0].char_count, 10);
    assert_eq!(cards[0].preview_text.as_deref(), Some("bold words"));
    assert_eq!(cards[0].date, "June 1, 2025");
    assert!(cards[1].protected);
    assert!(!cards[1].selected);
}

#[test]
fn failed_write_is_reported_and_session_stays_usable() {
    let mut app = open_app(MemoryStore::new());
    app.storage_mut().set_offline(true);

    app.open_editor(None).unwrap();
    app.editor_mut().set_title("Offline");
    app.editor_mut().set_content("draft");
    let err = app.commit_editor().unwrap_err();
    assert!(matches!(err, NoteError::Persistence(_)));
    assert_eq!(app.editor_state(), &EditorState::Creating);
    assert_eq!(app.list_notes().len(), 1);

    app.storage_mut().set_offline(false);
    app.commit_editor().unwrap();
    assert_eq!(app.list_notes().len(), 2);
    assert!(app.storage().get("notes").unwrap().unwrap().contains("Offline"));
}

#[test]
fn notes_survive_reopen_on_sqlite_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memopad.sqlite3");

    let id = {
        let mut app = NotesApp::open(SqliteKvStore::open(&path).unwrap()).unwrap();
        app.create_note(NoteFields::new("Persisted", "across runs"))
            .unwrap()
    };

    let app = NotesApp::open(SqliteKvStore::open(&path).unwrap()).unwrap();
    let notes = app.list_notes();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id, id);
    assert_eq!(notes[0].title, "Persisted");
    assert!(notes[1].id.is_welcome());
    assert_eq!(
        app.storage().get("notesAppFirstLoad").unwrap().as_deref(),
        Some("false")
    );
}

#[test]
fn deleting_note_open_in_editor_closes_the_session() {
    let (mut app, ids) = app_with_notes(3);

    app.open_editor(Some(&ids[0])).unwrap();
    app.editor_mut().set_title("pending");
    app.delete_note(&ids[0]).unwrap();
    assert_eq!(app.editor_state(), &EditorState::Closed);
    assert!(matches!(app.commit_editor(), Err(NoteError::EditorClosed)));

    app.open_editor(Some(&ids[1])).unwrap();
    app.delete_many(&[ids[1].clone()]).unwrap();
    assert_eq!(app.editor_state(), &EditorState::Closed);

    app.open_editor(Some(&ids[2])).unwrap();
    app.select_all();
    assert_eq!(app.delete_selected().unwrap(), 1);
    assert_eq!(app.editor_state(), &EditorState::Closed);
    assert_eq!(app.list_notes().len(), 1);
}

#[test]
fn deleting_other_notes_keeps_editor_open() {
    let (mut app, ids) = app_with_notes(2);

    app.open_editor(Some(&ids[0])).unwrap();
    app.editor_mut().set_title("still editing");
    app.delete_note(&ids[1]).unwrap();

    assert_eq!(app.editor_state(), &EditorState::Editing(ids[0].clone()));
    assert_eq!(app.editor().draft().title, "still editing");
    assert!(matches!(app.open_editor(None), Err(NoteError::EditorBusy)));
    assert_eq!(app.commit_editor().unwrap(), ids[0]);
}
