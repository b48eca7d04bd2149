//! Command-line presentation layer for Memopad.
//!
//! # Responsibility
//! - Map one command invocation onto `NotesApp` operations.
//! - Render notes as plain text and errors as user-visible messages.
//!
//! Storage is a SQLite file (`MEMOPAD_DB_PATH`); logging is enabled when
//! `MEMOPAD_LOG_DIR` is set.

use log::info;
use memopad_core::{
    init_logging, AppConfig, NoteCard, NoteError, NoteFields, NoteId, NotesApp, OpenOutcome,
    PaperStyle, SqliteKvStore, SystemClock,
};
use std::process::ExitCode;

const USAGE: &str = "usage: memopad_cli <command>

commands:
  list                                  list notes, newest first
  show <id>                             print one note
  add <title> <content> [options]       create a note
  edit <id> <title> <content> [options] replace a note's fields
  delete <id>                           delete one note
  delete-many <id>...                   delete several notes
  delete-all                            delete every deletable note
  ping | version

options:
  --font <family>   --size <css size>   --paper <plain|lined|grid|dotted>";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List,
    Show(NoteId),
    Add(NoteFields),
    Edit(NoteId, NoteFields),
    Delete(NoteId),
    DeleteMany(Vec<NoteId>),
    DeleteAll,
    Ping,
    Version,
}

impl Command {
    fn parse(args: &[String]) -> Result<Self, String> {
        let (name, rest) = args.split_first().ok_or_else(|| USAGE.to_string())?;
        match (name.as_str(), rest) {
            ("list", []) => Ok(Self::List),
            ("show", [id]) => Ok(Self::Show(NoteId::parse(id))),
            ("add", [title, content, options @ ..]) => {
                Ok(Self::Add(parse_fields(title, content, options)?))
            }
            ("edit", [id, title, content, options @ ..]) => Ok(Self::Edit(
                NoteId::parse(id),
                parse_fields(title, content, options)?,
            )),
            ("delete", [id]) => Ok(Self::Delete(NoteId::parse(id))),
            ("delete-many", ids) if !ids.is_empty() => Ok(Self::DeleteMany(
                ids.iter().map(|id| NoteId::parse(id)).collect(),
            )),
            ("delete-all", []) => Ok(Self::DeleteAll),
            ("ping", []) => Ok(Self::Ping),
            ("version", []) => Ok(Self::Version),
            _ => Err(USAGE.to_string()),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Show(_) => "show",
            Self::Add(_) => "add",
            Self::Edit(..) => "edit",
            Self::Delete(_) => "delete",
            Self::DeleteMany(_) => "delete-many",
            Self::DeleteAll => "delete-all",
            Self::Ping => "ping",
            Self::Version => "version",
        }
    }
}

fn parse_fields(title: &str, content: &str, options: &[String]) -> Result<NoteFields, String> {
    let mut fields = NoteFields::new(title, content);
    let mut iter = options.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| format!("missing value for `{flag}`"))?;
        match flag.as_str() {
            "--font" => fields.font_style = value.clone(),
            "--size" => fields.font_size = value.clone(),
            "--paper" => fields.sheet_style = PaperStyle::from(value.as_str()),
            other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
        }
    }
    Ok(fields)
}

fn main() -> ExitCode {
    let config = AppConfig::from_env();
    if let Err(err) = init_logging(&config) {
        eprintln!("logging disabled: {err}");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    exit_code(Command::parse(&args).and_then(|command| run(&config, command)))
}

/// Usage and runtime errors share exit status 1.
fn exit_code(outcome: Result<(), String>) -> ExitCode {
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn open_app(config: &AppConfig) -> Result<NotesApp<SqliteKvStore>, String> {
    let storage = SqliteKvStore::open(&config.db_path)
        .map_err(|err| format!("cannot open {}: {err}", config.db_path.display()))?;
    NotesApp::open_with(storage, config.keys.clone(), Box::new(SystemClock))
        .map_err(|err| describe(&err))
}

fn run(config: &AppConfig, command: Command) -> Result<(), String> {
    match command {
        Command::Ping => {
            println!("memopad_core ping={}", memopad_core::ping());
            return Ok(());
        }
        Command::Version => {
            println!("memopad_core version={}", memopad_core::core_version());
            return Ok(());
        }
        _ => {}
    }

    let mut app = open_app(config)?;
    info!("event=cli_command module=cli status=start command={}", command.name());

    match command {
        Command::List => {
            for card in app.note_cards() {
                println!("{}", format_card(&card));
            }
        }
        Command::Show(id) => match app.open_editor(Some(&id)).map_err(|err| describe(&err))? {
            OpenOutcome::ReadOnly(note) => {
                println!("{} (read-only)\n{}\n\n{}", note.title, note.date, note.content.trim());
                app.close_viewer();
            }
            OpenOutcome::Editing => {
                let draft = app.editor().draft();
                println!("{}\n\n{}", draft.title, draft.content);
                app.discard_editor();
            }
        },
        Command::Add(fields) => {
            let id = app.create_note(fields).map_err(|err| describe(&err))?;
            println!("Note created: {id}");
        }
        Command::Edit(id, fields) => {
            app.update_note(&id, fields).map_err(|err| describe(&err))?;
            println!("Note updated: {id}");
        }
        Command::Delete(id) => {
            app.delete_note(&id).map_err(|err| describe(&err))?;
            println!("Note deleted: {id}");
        }
        Command::DeleteMany(ids) => {
            let removed = app.delete_many(&ids).map_err(|err| describe(&err))?;
            println!("Deleted {removed} note(s).");
        }
        Command::DeleteAll => {
            app.select_all();
            let removed = app.delete_selected().map_err(|err| describe(&err))?;
            println!("Deleted {removed} note(s).");
        }
        Command::Ping | Command::Version => {}
    }
    Ok(())
}

fn describe(err: &NoteError) -> String {
    format!("{} ({err})", err.user_message())
}

fn format_card(card: &NoteCard) -> String {
    let marker = if card.protected { " [protected]" } else { "" };
    format!(
        "{:>14}  {}{}  |  {}  |  {} characters  |  {}",
        card.id.to_string(),
        card.title,
        marker,
        card.date,
        card.char_count,
        card.preview_text.as_deref().unwrap_or("")
    )
}

#[cfg(test)]
mod tests {
    use super::{exit_code, format_card, open_app, Command};
    use memopad_core::config::DB_PATH_ENV;
    use memopad_core::{AppConfig, KeyValueStore, NoteCard, NoteFields, NoteId, PaperStyle};
    use std::process::ExitCode;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_add_with_options() {
        let command = Command::parse(&args(&[
            "add", "Title", "<b>Body</b>", "--size", "20px", "--paper", "grid",
        ]))
        .unwrap();

        let mut expected = NoteFields::new("Title", "<b>Body</b>");
        expected.font_size = "20px".to_string();
        expected.sheet_style = PaperStyle::Grid;
        assert_eq!(command, Command::Add(expected));
    }

    #[test]
    fn parses_ids_as_timestamps_or_names() {
        assert_eq!(
            Command::parse(&args(&["delete-many", "17", "welcome-note"])).unwrap(),
            Command::DeleteMany(vec![NoteId::Timestamp(17), NoteId::welcome()])
        );
    }

    #[test]
    fn rejects_unknown_commands_and_dangling_options() {
        assert!(Command::parse(&args(&[])).is_err());
        assert!(Command::parse(&args(&["frobnicate"])).is_err());
        assert!(Command::parse(&args(&["delete-many"])).is_err());
        let err = Command::parse(&args(&["add", "t", "c", "--font"])).unwrap_err();
        assert!(err.contains("--font"));
    }

    #[test]
    fn card_line_marks_protected_notes() {
        let card = NoteCard {
            id: NoteId::welcome(),
            title: "Welcome".to_string(),
            date: "January 31, 2025".to_string(),
            font_style: "Arial, sans-serif".to_string(),
            font_size: "16px".to_string(),
            sheet_style: PaperStyle::Plain,
            protected: true,
            view_only: true,
            selected: false,
            char_count: 3,
            preview_text: Some("hi!".to_string()),
        };
        let line = format_card(&card);
        assert!(line.contains("[protected]"));
        assert!(line.contains("3 characters"));
    }

    #[test]
    fn usage_and_runtime_errors_exit_with_failure() {
        assert_eq!(exit_code(Ok(())), ExitCode::SUCCESS);
        let usage = Command::parse(&args(&["frobnicate"])).map(|_| ());
        assert_eq!(exit_code(usage), ExitCode::FAILURE);
        assert_eq!(exit_code(Err("note not found".to_string())), ExitCode::FAILURE);
    }

    #[test]
    fn open_app_uses_configured_storage_keys() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("cli.sqlite3");
        let db_path_value = db_path.to_str().unwrap().to_string();
        let mut config = AppConfig::from_lookup(|name| {
            (name == DB_PATH_ENV).then(|| db_path_value.clone())
        });
        config.keys.notes = "cliNotes".to_string();
        config.keys.first_load = "cliFirstLoad".to_string();

        let mut app = open_app(&config).unwrap();
        app.create_note(NoteFields::new("Keyed", "body")).unwrap();

        let storage = app.storage();
        assert!(storage.get("cliNotes").unwrap().unwrap().contains("Keyed"));
        assert!(storage.get("cliFirstLoad").unwrap().is_some());
        assert_eq!(storage.get("notes").unwrap(), None);
    }
}
