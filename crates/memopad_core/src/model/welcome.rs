//! Seeded welcome note.

use super::note::{Note, NoteFields, NoteId, PaperStyle, DEFAULT_FONT_SIZE, DEFAULT_FONT_STYLE};

const WELCOME_TITLE: &str = "Welcome to Notes";
const WELCOME_DATE: &str = "January 31, 2025";
const WELCOME_CONTENT: &str = r#"
<div style="text-align: center; margin-bottom: 20px;">
    <p>Notes are a great way to capture inspiration and organize your thoughts....</p>
</div>
<div style="margin-top: 20px;">
    <h3>Terms and Conditions</h3>
    <p>By using this Notes application, you agree to the following terms:</p>
    <ul>
        <li>Your notes are stored locally on this device</li>
        <li>We do not collect any personal data</li>
        <li>You are responsible for backing up your own notes</li>
        <li>This application is provided "as is" without warranty of any kind</li>
    </ul>
    <p style="margin-top: 15px;">This is a simple notepad application that allows you to:</p>
    <ul>
        <li>Create and edit notes</li>
        <li>Format text (bold, italic, underline)</li>
        <li>Choose different fonts and sizes</li>
        <li>Select different paper styles</li>
        <li>Delete notes when no longer needed</li>
    </ul>
</div>
"#;

/// Builds the protected welcome note seeded on first run.
pub fn welcome_note() -> Note {
    let fields = NoteFields {
        title: WELCOME_TITLE.to_string(),
        content: WELCOME_CONTENT.to_string(),
        font_style: DEFAULT_FONT_STYLE.to_string(),
        font_size: DEFAULT_FONT_SIZE.to_string(),
        sheet_style: PaperStyle::Plain,
    };
    Note::from_fields(NoteId::welcome(), fields, WELCOME_DATE)
}
