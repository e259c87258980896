//! Note card view model.
//!
//! One card shape serves both the list and the grid layouts; the layout only
//! changes how much preview text is kept.

use crate::model::note::{Note, NoteId};
use crate::model::timestamp::Timestamp;
use crate::presentation::palette::CategoryPalette;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const LIST_PREVIEW_CHARS: usize = 120;
const GRID_PREVIEW_CHARS: usize = 60;
const DATE_LABEL_FORMAT: &str = "%b %d, %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardLayout {
    #[default]
    List,
    Grid,
}

impl CardLayout {
    pub fn preview_chars(self) -> usize {
        match self {
            Self::List => LIST_PREVIEW_CHARS,
            Self::Grid => GRID_PREVIEW_CHARS,
        }
    }

    /// Parses `list` / `grid` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "list" => Some(Self::List),
            "grid" => Some(Self::Grid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub id: NoteId,
    pub title: String,
    /// Whitespace-collapsed, length-capped content; `None` for blank content.
    pub preview: Option<String>,
    pub category: String,
    pub color: String,
    /// `MMM DD, YYYY` of `updated_at`.
    pub updated_label: String,
}

impl NoteCard {
    pub fn build(note: &Note, layout: CardLayout, palette: &CategoryPalette) -> Self {
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            preview: derive_preview(&note.content, layout.preview_chars()),
            category: note.category.clone(),
            color: palette.color_for(&note.category).to_string(),
            updated_label: date_label(&note.updated_at),
        }
    }
}

/// Builds cards for a sequence of notes.
pub fn build_cards<'a>(
    notes: impl IntoIterator<Item = &'a Note>,
    layout: CardLayout,
    palette: &CategoryPalette,
) -> Vec<NoteCard> {
    notes
        .into_iter()
        .map(|note| NoteCard::build(note, layout, palette))
        .collect()
}

pub fn derive_preview(content: &str, max_chars: usize) -> Option<String> {
    let collapsed = WHITESPACE_RE.replace_all(content, " ");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut preview = trimmed.chars().take(max_chars).collect::<String>();
    if trimmed.chars().count() > max_chars {
        preview.push_str("...");
    }
    Some(preview)
}

pub fn date_label(value: &Timestamp) -> String {
    value.format(DATE_LABEL_FORMAT).to_string()
}
