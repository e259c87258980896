//! Note store state transitions.
//!
//! # Responsibility
//! - Implement add/update/delete for notes and add/delete for categories.
//! - Provide read access and the derived filter path.
//!
//! # Invariants
//! - Note order is insertion order; updates mutate in place.
//! - `updated_at` never moves backwards, even when the clock does.
//! - A category referenced by a note is in the set or is `Uncategorized`.
//! - Deleting a category leaves no note referencing it.

use crate::model::category::CategorySet;
use crate::model::note::{resolve_category, Note, NoteDraft, NoteId, NotePatch, UNCATEGORIZED};
use crate::model::timestamp::Timestamp;
use crate::persist::snapshot::Snapshot;
use crate::search::filter::{filter_notes, NoteFilter};
use crate::store::clock::{Clock, SystemClock};
use crate::store::{StoreError, StoreResult};

/// Outcome of [`NoteStore::delete_category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRemoval {
    /// Whether the name was present in the set.
    pub removed: bool,
    /// Number of notes moved to `Uncategorized`.
    pub reassigned: usize,
}

/// Ordered note collection plus category set.
#[derive(Debug, Clone)]
pub struct NoteStore<C: Clock = SystemClock> {
    notes: Vec<Note>,
    categories: CategorySet,
    clock: C,
}

impl NoteStore<SystemClock> {
    /// Creates an empty store seeded with the default categories.
    pub fn new() -> Self {
        Self::with_clock(SystemClock, CategorySet::default())
    }
}

impl Default for NoteStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> NoteStore<C> {
    /// Creates an empty store with the given clock and categories.
    pub fn with_clock(clock: C, categories: CategorySet) -> Self {
        Self {
            notes: Vec::new(),
            categories,
            clock,
        }
    }

    /// Rebuilds a store from a persisted snapshot.
    ///
    /// Categories referenced by notes but missing from the snapshot set are
    /// appended so the referential invariant holds after load.
    pub fn from_snapshot(clock: C, snapshot: Snapshot) -> StoreResult<Self> {
        snapshot.validate().map_err(StoreError::InvalidSnapshot)?;

        let mut categories = CategorySet::from_names(snapshot.categories);
        for note in &snapshot.notes {
            if !categories.is_valid_reference(&note.category) {
                categories.insert(note.category.clone());
            }
        }

        Ok(Self {
            notes: snapshot.notes,
            categories,
            clock,
        })
    }

    /// Exports the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            notes: self.notes.clone(),
            categories: self.categories.as_slice().to_vec(),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn categories(&self) -> &[String] {
        self.categories.as_slice()
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn get_note(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    /// Counts notes filed under `category`.
    pub fn count_in_category(&self, category: &str) -> usize {
        self.notes
            .iter()
            .filter(|note| note.category == category)
            .count()
    }

    /// Creates a note and appends it to the collection.
    ///
    /// Always succeeds. A category not yet in the set is registered.
    pub fn add_note(&mut self, draft: NoteDraft) -> &Note {
        let now = self.clock.now();
        let category = resolve_category(draft.category.as_deref());
        self.register_category(&category);

        let note = Note {
            id: self.fresh_id(),
            title: draft.title,
            content: draft.content,
            category,
            created_at: now,
            updated_at: now,
        };
        self.notes.push(note);
        &self.notes[self.notes.len() - 1]
    }

    /// Merges supplied fields into the note and refreshes `updated_at`.
    ///
    /// # Errors
    /// - `NoteNotFound` when no note has `id`; the store is left untouched.
    pub fn update_note(&mut self, id: &NoteId, patch: NotePatch) -> StoreResult<&Note> {
        let index = self.position_of(id)?;
        let now = self.clock.now();

        let category = patch
            .category
            .as_deref()
            .map(|value| resolve_category(Some(value)));
        if let Some(category) = category.as_deref() {
            self.register_category(category);
        }

        let note = &mut self.notes[index];
        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(content) = patch.content {
            note.content = content;
        }
        if let Some(category) = category {
            note.category = category;
        }
        note.updated_at = monotonic(note.updated_at, now);

        Ok(&self.notes[index])
    }

    /// Removes the note with `id` and returns it.
    ///
    /// # Errors
    /// - `NoteNotFound` when no note has `id`; the store is left untouched.
    pub fn delete_note(&mut self, id: &NoteId) -> StoreResult<Note> {
        let index = self.position_of(id)?;
        Ok(self.notes.remove(index))
    }

    /// Appends `name` to the category set. Returns `false` when already present.
    pub fn add_category(&mut self, name: &str) -> bool {
        self.categories.insert(name)
    }

    /// Removes `name` and moves its notes to `Uncategorized`.
    ///
    /// Reassigned notes get a fresh `updated_at`. Absent names are a no-op.
    pub fn delete_category(&mut self, name: &str) -> CategoryRemoval {
        if !self.categories.remove(name) {
            return CategoryRemoval {
                removed: false,
                reassigned: 0,
            };
        }

        let mut reassigned = 0;
        if name != UNCATEGORIZED {
            let now = self.clock.now();
            for note in self.notes.iter_mut().filter(|note| note.category == name) {
                note.category = UNCATEGORIZED.to_string();
                note.updated_at = monotonic(note.updated_at, now);
                reassigned += 1;
            }
        }

        CategoryRemoval {
            removed: true,
            reassigned,
        }
    }

    /// Returns notes matching `filter` in collection order.
    pub fn filter_notes(&self, filter: &NoteFilter) -> Vec<&Note> {
        filter_notes(&self.notes, filter)
    }

    fn position_of(&self, id: &NoteId) -> StoreResult<usize> {
        self.notes
            .iter()
            .position(|note| &note.id == id)
            .ok_or_else(|| StoreError::NoteNotFound(id.clone()))
    }

    fn fresh_id(&self) -> NoteId {
        loop {
            let candidate = NoteId::generate();
            if self.get_note(&candidate).is_none() {
                return candidate;
            }
        }
    }

    fn register_category(&mut self, category: &str) {
        if !self.categories.is_valid_reference(category) {
            self.categories.insert(category);
        }
    }
}

fn monotonic(previous: Timestamp, now: Timestamp) -> Timestamp {
    if now > previous {
        now
    } else {
        previous
    }
}
