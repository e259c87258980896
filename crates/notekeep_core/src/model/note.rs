//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record and its add/update inputs.
//! - Resolve the category fallback for missing or empty values.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `updated_at >= created_at`.
//! - `category` is never empty; it falls back to [`UNCATEGORIZED`].

use crate::model::timestamp::{iso_millis, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Fallback category for notes without one or whose category was deleted.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Opaque note identifier.
///
/// Freshly created notes get a UUID v4 string. Identifiers loaded from a
/// snapshot are kept verbatim, whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generates a new random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// User-authored note record.
///
/// Serialized with camelCase keys to match the snapshot format
/// `{id, title, content, category, createdAt, updatedAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// May be empty; callers validate before creating.
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(with = "iso_millis")]
    pub created_at: Timestamp,
    #[serde(with = "iso_millis")]
    pub updated_at: Timestamp,
}

impl Note {
    /// Returns whether this note is filed under the fallback category.
    pub fn is_uncategorized(&self) -> bool {
        self.category == UNCATEGORIZED
    }
}

/// Input for creating a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    /// `None` or an empty string resolves to [`UNCATEGORIZED`].
    pub category: Option<String>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Partial update for an existing note. Only `Some` fields are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
}

impl NotePatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Returns whether no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.category.is_none()
    }
}

/// Resolves an optional category to a stored value.
///
/// Empty strings are treated the same as a missing category.
pub fn resolve_category(category: Option<&str>) -> String {
    match category {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => UNCATEGORIZED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_category, NoteId, NotePatch, UNCATEGORIZED};

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(NoteId::generate(), NoteId::generate());
    }

    #[test]
    fn missing_or_empty_category_falls_back() {
        assert_eq!(resolve_category(None), UNCATEGORIZED);
        assert_eq!(resolve_category(Some("")), UNCATEGORIZED);
        assert_eq!(resolve_category(Some("Work")), "Work");
    }

    #[test]
    fn patch_builder_tracks_supplied_fields() {
        assert!(NotePatch::default().is_empty());
        let patch = NotePatch::default().content("body");
        assert!(!patch.is_empty());
        assert!(patch.title.is_none());
    }
}
