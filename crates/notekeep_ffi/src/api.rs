//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose note/category operations to Dart via FRB.
//! - Hand the UI an explicit store handle instead of a process-global store.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Operation failures are reported in response envelopes, never thrown.
//! - Timestamps cross the boundary as ISO-8601 strings.

use log::warn;
use notekeep_core::model::timestamp::format_timestamp;
use notekeep_core::{
    build_cards, core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, CardLayout, CategoryPalette, CoreConfig, Note, NoteCard,
    NoteDraft, NoteFilter, NoteId, NotePatch, NoteService, ServiceError, SnapshotStore,
    StorageConfig,
};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

const DEFAULT_SNAPSHOT_FILE_NAME: &str = "notekeep_snapshot.json";
const DATA_PATH_ENV: &str = "NOTEKEEP_DATA_PATH";

type BoxedService = NoteService<Box<dyn SnapshotStore + Send>>;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Note record as seen by Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Note> for NoteItem {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.to_string(),
            title: note.title.clone(),
            content: note.content.clone(),
            category: note.category.clone(),
            created_at: format_timestamp(&note.created_at),
            updated_at: format_timestamp(&note.updated_at),
        }
    }
}

/// Result envelope for note mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    /// Note state after the mutation (removed note for deletes).
    pub note: Option<NoteItem>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
    /// Set when the change is applied in memory but could not be saved.
    pub persist_error: Option<String>,
}

/// Result envelope for category mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryActionResponse {
    pub ok: bool,
    /// Whether the category set changed.
    pub changed: bool,
    /// Notes moved to `Uncategorized` by a delete.
    pub reassigned: u32,
    pub message: String,
    pub persist_error: Option<String>,
}

/// Category row for the categories screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryItem {
    pub name: String,
    pub note_count: u32,
    pub color: String,
}

/// Card row for list/grid note views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCardItem {
    pub id: String,
    pub title: String,
    pub preview: Option<String>,
    pub category: String,
    pub color: String,
    pub updated_label: String,
}

impl From<NoteCard> for NoteCardItem {
    fn from(card: NoteCard) -> Self {
        Self {
            id: card.id.to_string(),
            title: card.title,
            preview: card.preview,
            category: card.category,
            color: card.color,
            updated_label: card.updated_label,
        }
    }
}

/// Opened note store owned by the Dart side.
///
/// Every screen receives this handle explicitly; there is no shared global.
#[flutter_rust_bridge::frb(opaque)]
pub struct NoteStoreHandle {
    service: Mutex<BoxedService>,
    palette: CategoryPalette,
}

/// Opens a store from a JSON config document (see `CoreConfig`).
///
/// Logging is initialized first when the config names a `log_dir`.
pub fn open_note_store(config_json: String) -> Result<NoteStoreHandle, String> {
    let config = CoreConfig::from_json(&config_json).map_err(|err| err.to_string())?;
    open_with_config(&config)
}

/// Opens a JSON-file store at `NOTEKEEP_DATA_PATH`, or in the temp directory.
pub fn open_default_note_store() -> Result<NoteStoreHandle, String> {
    let config = CoreConfig {
        storage: StorageConfig::JsonFile {
            path: resolve_default_data_path(),
        },
        ..CoreConfig::default()
    };
    open_with_config(&config)
}

fn open_with_config(config: &CoreConfig) -> Result<NoteStoreHandle, String> {
    config.validate().map_err(|err| err.to_string())?;

    if let Some(log_dir) = &config.log_dir {
        init_logging_inner(&config.log_level, &log_dir.to_string_lossy())
            .map_err(|err| format!("logging init failed: {err}"))?;
    }

    let persistence = config
        .open_persistence()
        .map_err(|err| format!("storage open failed: {err}"))?;
    let service = NoteService::open(persistence, config.seed_category_set())
        .map_err(|err| format!("store open failed: {err}"))?;

    Ok(NoteStoreHandle {
        service: Mutex::new(service),
        palette: CategoryPalette::default(),
    })
}

impl NoteStoreHandle {
    /// Wraps an already opened service.
    #[flutter_rust_bridge::frb(ignore)]
    pub fn from_service(service: BoxedService) -> Self {
        Self {
            service: Mutex::new(service),
            palette: CategoryPalette::default(),
        }
    }

    /// Lists all notes in collection order.
    #[flutter_rust_bridge::frb(sync)]
    pub fn notes_list(&self) -> Vec<NoteItem> {
        self.with_service(|service| service.notes().iter().map(NoteItem::from).collect())
    }

    /// Filters notes by text query and optional exact category.
    #[flutter_rust_bridge::frb(sync)]
    pub fn notes_filter(&self, query: String, category: Option<String>) -> Vec<NoteItem> {
        let filter = NoteFilter { query, category };
        self.with_service(|service| {
            service
                .filter_notes(&filter)
                .into_iter()
                .map(NoteItem::from)
                .collect()
        })
    }

    /// Builds list or grid cards for filtered notes. Unknown layouts fall back to list.
    #[flutter_rust_bridge::frb(sync)]
    pub fn note_cards(
        &self,
        query: String,
        category: Option<String>,
        layout: String,
    ) -> Vec<NoteCardItem> {
        let layout = CardLayout::parse(&layout).unwrap_or_default();
        let filter = NoteFilter { query, category };
        self.with_service(|service| {
            build_cards(service.filter_notes(&filter), layout, &self.palette)
                .into_iter()
                .map(NoteCardItem::from)
                .collect()
        })
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn note_get(&self, id: String) -> Option<NoteItem> {
        let id = NoteId::from(id);
        self.with_service(|service| service.get_note(&id).map(NoteItem::from))
    }

    /// Creates a note. `category=None` files it under `Uncategorized`.
    #[flutter_rust_bridge::frb(sync)]
    pub fn note_add(
        &self,
        title: String,
        content: String,
        category: Option<String>,
    ) -> NoteActionResponse {
        let draft = NoteDraft {
            title,
            content,
            category,
        };
        self.note_action("Note created.", |service| service.create_note(draft))
    }

    /// Merges supplied fields into a note.
    #[flutter_rust_bridge::frb(sync)]
    pub fn note_update(
        &self,
        id: String,
        title: Option<String>,
        content: Option<String>,
        category: Option<String>,
    ) -> NoteActionResponse {
        let id = NoteId::from(id);
        let patch = NotePatch {
            title,
            content,
            category,
        };
        self.note_action("Note updated.", |service| service.update_note(&id, patch))
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn note_delete(&self, id: String) -> NoteActionResponse {
        let id = NoteId::from(id);
        self.note_action("Note deleted.", |service| service.delete_note(&id))
    }

    /// Lists categories with counts and display colors.
    #[flutter_rust_bridge::frb(sync)]
    pub fn categories_list(&self) -> Vec<CategoryItem> {
        self.with_service(|service| {
            service
                .category_summaries()
                .into_iter()
                .map(|summary| CategoryItem {
                    color: self.palette.color_for(&summary.name).to_string(),
                    note_count: saturating_u32(summary.note_count),
                    name: summary.name,
                })
                .collect()
        })
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn category_add(&self, name: String) -> CategoryActionResponse {
        let result = self.try_with_service(|service| {
            service
                .add_category(&name)
                .map(|added| (added, service.last_persist_error().map(str::to_string)))
        });
        match result {
            Ok(Ok((added, persist_error))) => CategoryActionResponse {
                ok: true,
                changed: added,
                reassigned: 0,
                message: if added {
                    "Category added.".to_string()
                } else {
                    "Category already exists.".to_string()
                },
                persist_error,
            },
            Ok(Err(err)) => category_failure(format!("category_add failed: {err}")),
            Err(message) => category_failure(message),
        }
    }

    /// Deletes a category and moves its notes to `Uncategorized`.
    #[flutter_rust_bridge::frb(sync)]
    pub fn category_delete(&self, name: String) -> CategoryActionResponse {
        let result = self.try_with_service(|service| {
            let removal = service.delete_category(&name);
            (removal, service.last_persist_error().map(str::to_string))
        });
        match result {
            Ok((removal, persist_error)) => CategoryActionResponse {
                ok: true,
                changed: removal.removed,
                reassigned: saturating_u32(removal.reassigned),
                message: if removal.removed {
                    format!("Category deleted; {} note(s) moved.", removal.reassigned)
                } else {
                    "Category not found.".to_string()
                },
                persist_error,
            },
            Err(message) => category_failure(message),
        }
    }

    /// Last snapshot save failure, if the most recent save failed.
    #[flutter_rust_bridge::frb(sync)]
    pub fn persist_status(&self) -> Option<String> {
        self.with_service(|service| service.last_persist_error().map(str::to_string))
    }

    fn note_action(
        &self,
        success_message: &str,
        action: impl FnOnce(&mut BoxedService) -> Result<Note, ServiceError>,
    ) -> NoteActionResponse {
        let result = self.try_with_service(|service| {
            action(service).map(|note| {
                (
                    NoteItem::from(&note),
                    service.last_persist_error().map(str::to_string),
                )
            })
        });
        match result {
            Ok(Ok((note, persist_error))) => NoteActionResponse {
                ok: true,
                note: Some(note),
                message: success_message.to_string(),
                persist_error,
            },
            Ok(Err(err)) => NoteActionResponse {
                ok: false,
                note: None,
                message: err.to_string(),
                persist_error: None,
            },
            Err(message) => NoteActionResponse {
                ok: false,
                note: None,
                message,
                persist_error: None,
            },
        }
    }

    fn try_with_service<T>(&self, f: impl FnOnce(&mut BoxedService) -> T) -> Result<T, String> {
        match self.service.lock() {
            Ok(mut guard) => Ok(f(&mut guard)),
            Err(poisoned) => {
                warn!("event=store_lock module=ffi status=poisoned");
                Err(format!("note store unavailable: {poisoned}"))
            }
        }
    }

    /// Read paths tolerate a poisoned lock; the store itself is never left half-updated.
    fn with_service<T>(&self, f: impl FnOnce(&mut BoxedService) -> T) -> T {
        let mut guard = self.service.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

fn category_failure(message: String) -> CategoryActionResponse {
    CategoryActionResponse {
        ok: false,
        changed: false,
        reassigned: 0,
        message,
        persist_error: None,
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn resolve_default_data_path() -> PathBuf {
    if let Ok(raw) = std::env::var(DATA_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DEFAULT_SNAPSHOT_FILE_NAME)
}
