//! Substring + category note filter.
//!
//! # Invariants
//! - Text matching is a case-insensitive substring test over title or content.
//! - Category matching is exact and case-sensitive.
//! - An empty query with no category matches every note.

use crate::model::note::Note;

/// Filter options for note search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Free-text query; empty matches everything.
    pub query: String,
    /// Optional exact category match.
    pub category: Option<String>,
}

impl NoteFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: None,
        }
    }

    /// Restricts matches to one category.
    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Returns whether this filter keeps every note.
    pub fn is_identity(&self) -> bool {
        self.query.is_empty() && self.category.is_none()
    }

    /// Tests a single note.
    pub fn matches(&self, note: &Note) -> bool {
        self.matches_category(note) && self.matches_text(note, &self.query.to_lowercase())
    }

    fn matches_category(&self, note: &Note) -> bool {
        self.category
            .as_deref()
            .map_or(true, |category| note.category == category)
    }

    fn matches_text(&self, note: &Note, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        note.title.to_lowercase().contains(needle) || note.content.to_lowercase().contains(needle)
    }
}

/// Returns the notes kept by `filter`, in input order.
pub fn filter_notes<'a>(notes: &'a [Note], filter: &NoteFilter) -> Vec<&'a Note> {
    if filter.is_identity() {
        return notes.iter().collect();
    }

    let needle = filter.query.to_lowercase();
    notes
        .iter()
        .filter(|note| filter.matches_category(note) && filter.matches_text(note, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_notes, NoteFilter};
    use crate::model::note::{Note, NoteId};
    use chrono::{TimeZone, Utc};

    fn note(id: &str, title: &str, content: &str, category: &str) -> Note {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        Note {
            id: NoteId::from(id),
            title: title.to_string(),
            content: content.to_string(),
            category: category.to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    fn fixture() -> Vec<Note> {
        vec![
            note("1", "Buy milk", "and bread", "Personal"),
            note("2", "Write report", "quarterly MILK sales", "Work"),
            note("3", "Ideas", "nothing here", "Ideas"),
        ]
    }

    #[test]
    fn empty_filter_returns_all_in_order() {
        let notes = fixture();
        let ids = filter_notes(&notes, &NoteFilter::default())
            .into_iter()
            .map(|note| note.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn query_matches_title_or_content_case_insensitively() {
        let notes = fixture();
        let hits = filter_notes(&notes, &NoteFilter::new("Milk"));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id.as_str(), "1");
        assert_eq!(hits[1].id.as_str(), "2");
    }

    #[test]
    fn category_filter_intersects_with_query() {
        let notes = fixture();
        let hits = filter_notes(&notes, &NoteFilter::new("milk").in_category("Work"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "2");

        let none = filter_notes(&notes, &NoteFilter::new("milk").in_category("Ideas"));
        assert!(none.is_empty());
    }

    #[test]
    fn category_filter_is_exact() {
        let notes = fixture();
        assert!(filter_notes(&notes, &NoteFilter::new("").in_category("work")).is_empty());
    }

    #[test]
    fn matches_agrees_with_filter_notes() {
        let notes = fixture();
        let filter = NoteFilter::new("report");
        assert!(filter.matches(&notes[1]));
        assert!(!filter.matches(&notes[0]));
    }
}
