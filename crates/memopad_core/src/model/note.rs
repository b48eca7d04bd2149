//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record and its snapshot wire shape.
//! - Own the access derivation rule (`protected` / `view_only`).
//!
//! # Invariants
//! - `id` is immutable after creation.
//! - `protected` holds iff `id` is the reserved welcome id.
//! - `view_only` always equals `protected` for records produced by core.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reserved identifier of the seeded welcome note.
pub const WELCOME_NOTE_ID: &str = "welcome-note";
/// Font family applied to new notes.
pub const DEFAULT_FONT_STYLE: &str = "Arial, sans-serif";
/// Font size applied to new notes.
pub const DEFAULT_FONT_SIZE: &str = "16px";

/// Stable note identifier.
///
/// User notes get an epoch-millisecond timestamp; the welcome note uses a
/// reserved string. Serialized untagged so snapshots carry plain numbers or
/// strings in `id`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteId {
    Timestamp(i64),
    Named(String),
}

impl NoteId {
    /// Returns the reserved welcome note id.
    pub fn welcome() -> Self {
        Self::Named(WELCOME_NOTE_ID.to_string())
    }

    /// Returns whether this is the reserved welcome note id.
    pub fn is_welcome(&self) -> bool {
        matches!(self, Self::Named(name) if name == WELCOME_NOTE_ID)
    }

    /// Parses user-facing id text; digits become timestamps.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.parse::<i64>() {
            Ok(millis) => Self::Timestamp(millis),
            Err(_) => Self::Named(trimmed.to_string()),
        }
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timestamp(millis) => write!(f, "{millis}"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

impl From<i64> for NoteId {
    fn from(value: i64) -> Self {
        Self::Timestamp(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self::Named(value.to_string())
    }
}

/// Paper background used when rendering a note.
///
/// Unknown values found in a snapshot are preserved verbatim in `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaperStyle {
    #[default]
    Plain,
    Lined,
    Grid,
    Dotted,
    Custom(String),
}

impl PaperStyle {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain => "plain",
            Self::Lined => "lined",
            Self::Grid => "grid",
            Self::Dotted => "dotted",
            Self::Custom(value) => value.as_str(),
        }
    }
}

impl From<String> for PaperStyle {
    fn from(value: String) -> Self {
        match value.as_str() {
            "plain" => Self::Plain,
            "lined" => Self::Lined,
            "grid" => Self::Grid,
            "dotted" => Self::Dotted,
            _ => Self::Custom(value),
        }
    }
}

impl From<&str> for PaperStyle {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<PaperStyle> for String {
    fn from(value: PaperStyle) -> Self {
        match value {
            PaperStyle::Custom(value) => value,
            other => other.as_str().to_string(),
        }
    }
}

/// Access level derived from note identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAccess {
    /// Regular note: editable, deletable, selectable.
    Editable,
    /// Seeded welcome note: display only, never deleted or selected.
    ViewOnlyProtected,
}

impl NoteAccess {
    /// Derives access from a note id.
    pub fn for_id(id: &NoteId) -> Self {
        if id.is_welcome() {
            Self::ViewOnlyProtected
        } else {
            Self::Editable
        }
    }
}

/// Validation failures for user-provided note fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyTitle,
    EmptyContent,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyContent => write!(f, "content must not be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// Editable note fields supplied by the editor or a direct API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFields {
    pub title: String,
    /// Rich-text markup, stored as an opaque string.
    pub content: String,
    pub font_style: String,
    pub font_size: String,
    pub sheet_style: PaperStyle,
}

impl NoteFields {
    /// Builds fields with default font, size and paper.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Checks required fields.
    ///
    /// Whitespace-only title or content counts as empty.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if self.content.trim().is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        Ok(())
    }
}

impl Default for NoteFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            font_style: DEFAULT_FONT_STYLE.to_string(),
            font_size: DEFAULT_FONT_SIZE.to_string(),
            sheet_style: PaperStyle::Plain,
        }
    }
}

/// Canonical note record, serialized as one element of the snapshot array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NoteWire")]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Display date, e.g. `January 31, 2025`.
    pub date: String,
    pub font_style: String,
    pub font_size: String,
    pub sheet_style: PaperStyle,
    pub protected: bool,
    pub view_only: bool,
}

impl Note {
    /// Builds a note from fields, deriving access flags from `id`.
    ///
    /// The title is stored trimmed.
    pub fn from_fields(id: NoteId, fields: NoteFields, date: impl Into<String>) -> Self {
        let mut note = Self {
            id,
            title: fields.title.trim().to_string(),
            content: fields.content,
            date: date.into(),
            font_style: fields.font_style,
            font_size: fields.font_size,
            sheet_style: fields.sheet_style,
            protected: false,
            view_only: false,
        };
        note.derive_access();
        note
    }

    /// Re-applies the access derivation rule. Returns whether flags changed.
    pub fn derive_access(&mut self) -> bool {
        let protected = self.id.is_welcome();
        let changed = self.protected != protected || self.view_only != protected;
        self.protected = protected;
        self.view_only = protected;
        changed
    }

    pub fn access(&self) -> NoteAccess {
        if self.protected {
            NoteAccess::ViewOnlyProtected
        } else {
            NoteAccess::Editable
        }
    }

    /// Copies the editable fields out of this record.
    pub fn fields(&self) -> NoteFields {
        NoteFields {
            title: self.title.clone(),
            content: self.content.clone(),
            font_style: self.font_style.clone(),
            font_size: self.font_size.clone(),
            sheet_style: self.sheet_style.clone(),
        }
    }
}

/// Lenient snapshot shape: tolerates missing style fields and `viewOnly`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteWire {
    id: NoteId,
    title: String,
    content: String,
    #[serde(default)]
    date: String,
    #[serde(default = "default_font_style")]
    font_style: String,
    #[serde(default = "default_font_size")]
    font_size: String,
    #[serde(default)]
    sheet_style: PaperStyle,
    #[serde(default)]
    protected: bool,
    view_only: Option<bool>,
}

impl From<NoteWire> for Note {
    fn from(value: NoteWire) -> Self {
        Self {
            id: value.id,
            title: value.title,
            content: value.content,
            date: value.date,
            font_style: value.font_style,
            font_size: value.font_size,
            sheet_style: value.sheet_style,
            protected: value.protected,
            view_only: value.view_only.unwrap_or(value.protected),
        }
    }
}

fn default_font_style() -> String {
    DEFAULT_FONT_STYLE.to_string()
}

fn default_font_size() -> String {
    DEFAULT_FONT_SIZE.to_string()
}
