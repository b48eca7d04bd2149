//! Plain-text projections of rich-text note content.

use once_cell::sync::Lazy;
use regex::Regex;

const PREVIEW_MAX_CHARS: usize = 100;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|<(p|div|li|h[1-6])(\s[^>]*)?>").expect("valid line break regex")
});
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Card projection of a note body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPreview {
    /// Characters left after removing markup tags.
    pub char_count: usize,
    /// Whitespace-normalized text, first 100 chars.
    pub preview_text: Option<String>,
}

/// Counts characters of `content` with markup tags removed.
pub fn char_count(content: &str) -> usize {
    TAG_RE.replace_all(content, "").chars().count()
}

/// Converts markup to text, starting a new line at each block element and `<br>`.
pub fn markup_to_text(content: &str) -> String {
    let with_breaks = LINE_BREAK_RE.replace_all(content, "\n");
    let text = TAG_RE.replace_all(&with_breaks, "");
    text.trim_matches('\n').to_string()
}

/// Derives the card preview for a note body.
pub fn derive_content_preview(content: &str) -> ContentPreview {
    let text = markup_to_text(content);
    let normalized = WHITESPACE_RE.replace_all(&text, " ");
    let trimmed = normalized.trim();
    let preview_text = if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    };

    ContentPreview {
        char_count: char_count(content),
        preview_text,
    }
}
