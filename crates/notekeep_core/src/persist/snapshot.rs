//! Serialized store snapshot.
//!
//! JSON shape: `{ "notes": [Note...], "categories": ["..."] }` where each note
//! is `{id, title, content, category, createdAt, updatedAt}`.

use crate::model::note::Note;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub notes: Vec<Note>,
    pub categories: Vec<String>,
}

impl Snapshot {
    /// Checks structural invariants a loaded snapshot must satisfy.
    ///
    /// # Errors
    /// - Duplicate note ids.
    /// - Duplicate category names.
    /// - A note whose `updated_at` precedes its `created_at`.
    pub fn validate(&self) -> Result<(), String> {
        let mut ids = HashSet::with_capacity(self.notes.len());
        for note in &self.notes {
            if !ids.insert(note.id.as_str()) {
                return Err(format!("duplicate note id `{}`", note.id));
            }
            if note.updated_at < note.created_at {
                return Err(format!("note `{}` has updatedAt before createdAt", note.id));
            }
        }

        let mut names = HashSet::with_capacity(self.categories.len());
        for name in &self.categories {
            if !names.insert(name.as_str()) {
                return Err(format!("duplicate category `{name}`"));
            }
        }

        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
