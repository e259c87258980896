//! Note use-case service.
//!
//! # Responsibility
//! - Own one `NoteStore` and one `SnapshotStore`, handed in by the caller.
//! - Validate user input (blank titles, blank category names).
//! - Trim category names on every path that can register one; a blank
//!   category on a draft or patch files the note under `Uncategorized`.
//! - Save a snapshot after every successful mutation.
//!
//! # Invariants
//! - In-memory state is updated before the save and is never rolled back
//!   when the save fails.
//! - A failed save is logged and kept in `last_persist_error` until the next
//!   successful save.
//! - Log events carry ids and counts, never titles, content or category names.

use crate::model::category::CategorySet;
use crate::model::note::{Note, NoteDraft, NoteId, NotePatch};
use crate::persist::{PersistError, SnapshotStore};
use crate::search::filter::NoteFilter;
use crate::store::clock::{Clock, SystemClock};
use crate::store::note_store::{CategoryRemoval, NoteStore};
use crate::store::StoreError;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for note use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Title is blank after trim.
    EmptyTitle,
    /// Category name is blank after trim.
    InvalidCategoryName(String),
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Loaded snapshot violates store invariants.
    Store(StoreError),
    /// Persistence failure while opening or flushing.
    Persist(PersistError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be blank"),
            Self::InvalidCategoryName(value) => write!(f, "invalid category name: `{value}`"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Persist(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Persist(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NoteNotFound(id) => Self::NoteNotFound(id),
            other => Self::Store(other),
        }
    }
}

impl From<PersistError> for ServiceError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

/// Category name with the number of notes filed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    pub note_count: usize,
}

/// Note service facade over one store and one persistence backend.
pub struct NoteService<P: SnapshotStore, C: Clock = SystemClock> {
    store: NoteStore<C>,
    persistence: P,
    last_persist_error: Option<String>,
}

impl<P: SnapshotStore> NoteService<P, SystemClock> {
    /// Opens the service on the wall clock. See [`NoteService::open_with_clock`].
    pub fn open(persistence: P, seed: CategorySet) -> Result<Self, ServiceError> {
        Self::open_with_clock(persistence, SystemClock, seed)
    }
}

impl<P: SnapshotStore, C: Clock> NoteService<P, C> {
    /// Loads the saved snapshot, or starts a fresh store seeded with `seed`.
    ///
    /// A fresh store is saved immediately; failure of that first save is
    /// recorded like any other save failure and does not abort opening.
    ///
    /// # Errors
    /// - `Persist` when the backend cannot be read.
    /// - `Store` when the loaded snapshot is inconsistent.
    pub fn open_with_clock(
        mut persistence: P,
        clock: C,
        seed: CategorySet,
    ) -> Result<Self, ServiceError> {
        let started_at = Instant::now();
        let backend = persistence.describe();

        let loaded = persistence.load().map_err(|err| {
            error!(
                "event=store_open module=service status=error backend={backend} duration_ms={} error_code=snapshot_load_failed error={err}",
                started_at.elapsed().as_millis()
            );
            err
        })?;

        let (store, fresh) = match loaded {
            Some(snapshot) => (NoteStore::from_snapshot(clock, snapshot)?, false),
            None => (NoteStore::with_clock(clock, seed), true),
        };

        let mut service = Self {
            store,
            persistence,
            last_persist_error: None,
        };
        if fresh {
            service.persist("store_seed");
        }

        info!(
            "event=store_open module=service status=ok backend={backend} fresh={fresh} notes={} categories={} duration_ms={}",
            service.store.note_count(),
            service.store.categories().len(),
            started_at.elapsed().as_millis()
        );
        Ok(service)
    }

    pub fn store(&self) -> &NoteStore<C> {
        &self.store
    }

    pub fn notes(&self) -> &[Note] {
        self.store.notes()
    }

    pub fn categories(&self) -> &[String] {
        self.store.categories()
    }

    pub fn get_note(&self, id: &NoteId) -> Option<&Note> {
        self.store.get_note(id)
    }

    pub fn filter_notes(&self, filter: &NoteFilter) -> Vec<&Note> {
        self.store.filter_notes(filter)
    }

    /// Categories in set order with their note counts.
    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        self.store
            .categories()
            .iter()
            .map(|name| CategorySummary {
                name: name.clone(),
                note_count: self.store.count_in_category(name),
            })
            .collect()
    }

    /// Message of the last failed save, cleared by the next successful one.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    /// Creates one note.
    ///
    /// # Errors
    /// - `EmptyTitle` when the title is blank.
    pub fn create_note(&mut self, mut draft: NoteDraft) -> Result<Note, ServiceError> {
        if draft.title.trim().is_empty() {
            return Err(ServiceError::EmptyTitle);
        }
        trim_category(&mut draft.category);

        let note = self.store.add_note(draft).clone();
        info!(
            "event=note_add module=service status=ok note_id={} notes={}",
            note.id,
            self.store.note_count()
        );
        self.persist("note_add");
        Ok(note)
    }

    /// Merges the supplied fields into an existing note.
    ///
    /// # Errors
    /// - `EmptyTitle` when the patch carries a blank title.
    /// - `NoteNotFound` when `id` is unknown; nothing changes.
    pub fn update_note(
        &mut self,
        id: &NoteId,
        mut patch: NotePatch,
    ) -> Result<Note, ServiceError> {
        if patch.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
            return Err(ServiceError::EmptyTitle);
        }
        trim_category(&mut patch.category);

        let note = match self.store.update_note(id, patch) {
            Ok(note) => note.clone(),
            Err(err) => {
                warn!("event=note_update module=service status=not_found note_id={id}");
                return Err(err.into());
            }
        };
        info!("event=note_update module=service status=ok note_id={id}");
        self.persist("note_update");
        Ok(note)
    }

    /// Removes one note.
    ///
    /// # Errors
    /// - `NoteNotFound` when `id` is unknown; nothing changes.
    pub fn delete_note(&mut self, id: &NoteId) -> Result<Note, ServiceError> {
        let removed = match self.store.delete_note(id) {
            Ok(note) => note,
            Err(err) => {
                warn!("event=note_delete module=service status=not_found note_id={id}");
                return Err(err.into());
            }
        };
        info!(
            "event=note_delete module=service status=ok note_id={id} notes={}",
            self.store.note_count()
        );
        self.persist("note_delete");
        Ok(removed)
    }

    /// Adds a trimmed category name. Returns `Ok(false)` for duplicates.
    ///
    /// # Errors
    /// - `InvalidCategoryName` when the name is blank.
    pub fn add_category(&mut self, name: &str) -> Result<bool, ServiceError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::InvalidCategoryName(name.to_string()));
        }

        let added = self.store.add_category(trimmed);
        info!(
            "event=category_add module=service status=ok added={added} categories={}",
            self.store.categories().len()
        );
        if added {
            self.persist("category_add");
        }
        Ok(added)
    }

    /// Deletes a category and reassigns its notes to `Uncategorized`.
    pub fn delete_category(&mut self, name: &str) -> CategoryRemoval {
        let removal = self.store.delete_category(name);
        info!(
            "event=category_delete module=service status=ok removed={} reassigned={}",
            removal.removed, removal.reassigned
        );
        if removal.removed {
            self.persist("category_delete");
        }
        removal
    }

    /// Saves the current state and reports failure to the caller.
    pub fn flush(&mut self) -> Result<(), ServiceError> {
        let snapshot = self.store.snapshot();
        match self.persistence.save(&snapshot) {
            Ok(()) => {
                self.last_persist_error = None;
                Ok(())
            }
            Err(err) => {
                self.last_persist_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    fn persist(&mut self, event: &'static str) {
        let started_at = Instant::now();
        let snapshot = self.store.snapshot();
        match self.persistence.save(&snapshot) {
            Ok(()) => {
                self.last_persist_error = None;
            }
            Err(err) => {
                error!(
                    "event=snapshot_save module=service status=error trigger={event} backend={} duration_ms={} error={err}",
                    self.persistence.describe(),
                    started_at.elapsed().as_millis()
                );
                self.last_persist_error = Some(err.to_string());
            }
        }
    }
}

/// An empty result is kept as `Some("")`, which the store resolves to
/// `Uncategorized`.
fn trim_category(category: &mut Option<String>) {
    if let Some(name) = category {
        let trimmed = name.trim();
        if trimmed.len() != name.len() {
            *name = trimmed.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteService, ServiceError};
    use crate::model::category::CategorySet;
    use crate::model::note::NoteDraft;
    use crate::persist::MemorySnapshotStore;

    #[test]
    fn blank_title_is_rejected_before_the_store() {
        let mut service =
            NoteService::open(MemorySnapshotStore::new(), CategorySet::default()).unwrap();
        let err = service.create_note(NoteDraft::new("   ", "body")).unwrap_err();
        assert!(matches!(err, ServiceError::EmptyTitle));
        assert!(service.notes().is_empty());
    }

    #[test]
    fn blank_category_name_is_rejected() {
        let mut service =
            NoteService::open(MemorySnapshotStore::new(), CategorySet::default()).unwrap();
        let err = service.add_category("  ").unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCategoryName(_)));
    }
}
