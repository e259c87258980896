use chrono::{TimeZone, Utc};
use notekeep_core::{
    CategorySet, JsonFileSnapshotStore, ManualClock, MemorySnapshotStore, NoteDraft, NoteFilter,
    NoteId, NotePatch, NoteService, PersistError, PersistResult, ServiceError, Snapshot,
    SnapshotStore, DEFAULT_CATEGORIES, UNCATEGORIZED,
};
use std::cell::Cell;
use std::rc::Rc;

/// Backend whose saves fail while `failing` is set.
struct FlakyStore {
    failing: Rc<Cell<bool>>,
    saved: Option<Snapshot>,
}

impl SnapshotStore for FlakyStore {
    fn load(&mut self) -> PersistResult<Option<Snapshot>> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> PersistResult<()> {
        if self.failing.get() {
            return Err(PersistError::Corrupt("disk full".to_string()));
        }
        self.saved = Some(snapshot.clone());
        Ok(())
    }

    fn describe(&self) -> &'static str {
        "flaky"
    }
}

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
}

#[test]
fn fresh_store_is_seeded_and_saved() {
    let service = NoteService::open(MemorySnapshotStore::new(), CategorySet::default()).unwrap();
    assert_eq!(service.categories(), DEFAULT_CATEGORIES);
    assert!(service.notes().is_empty());
    assert!(service.last_persist_error().is_none());
}

#[test]
fn reopening_json_backend_restores_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");

    let note_id = {
        let mut service = NoteService::open_with_clock(
            JsonFileSnapshotStore::new(&path),
            clock(),
            CategorySet::default(),
        )
        .unwrap();
        let note = service
            .create_note(NoteDraft::new("A", "x").with_category("Work"))
            .unwrap();
        service.add_category("Travel").unwrap();
        service.delete_category("Ideas");
        note.id
    };

    let reopened = NoteService::open_with_clock(
        JsonFileSnapshotStore::new(&path),
        clock(),
        CategorySet::empty(),
    )
    .unwrap();
    assert_eq!(reopened.get_note(&note_id).unwrap().category, "Work");
    assert_eq!(reopened.categories(), ["Personal", "Work", "To-Do", "Travel"]);
}

#[test]
fn save_failure_keeps_in_memory_state_and_is_reported() {
    let failing = Rc::new(Cell::new(false));
    let backend = FlakyStore {
        failing: Rc::clone(&failing),
        saved: None,
    };
    let mut service =
        NoteService::open_with_clock(backend, clock(), CategorySet::default()).unwrap();

    failing.set(true);
    let note = service.create_note(NoteDraft::new("A", "x")).unwrap();
    assert_eq!(service.notes().len(), 1);
    assert!(service
        .last_persist_error()
        .unwrap_or_default()
        .contains("disk full"));
    assert!(service.flush().is_err());

    failing.set(false);
    service
        .update_note(&note.id, NotePatch::default().title("B"))
        .unwrap();
    assert!(service.last_persist_error().is_none());
    assert_eq!(service.get_note(&note.id).unwrap().title, "B");
}

#[test]
fn not_found_is_reported_without_changing_state() {
    let mut service = NoteService::open(MemorySnapshotStore::new(), CategorySet::default()).unwrap();
    service.create_note(NoteDraft::new("keep", "")).unwrap();

    let missing = NoteId::from("missing");
    let err = service
        .update_note(&missing, NotePatch::default().content("x"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::NoteNotFound(_)));
    let err = service.delete_note(&missing).unwrap_err();
    assert!(matches!(err, ServiceError::NoteNotFound(_)));
    assert_eq!(service.notes().len(), 1);
}

#[test]
fn update_rejects_blank_title_patch() {
    let mut service = NoteService::open(MemorySnapshotStore::new(), CategorySet::default()).unwrap();
    let note = service.create_note(NoteDraft::new("keep", "")).unwrap();
    let err = service
        .update_note(&note.id, NotePatch::default().title(" "))
        .unwrap_err();
    assert!(matches!(err, ServiceError::EmptyTitle));
    assert_eq!(service.get_note(&note.id).unwrap().title, "keep");
}

#[test]
fn add_category_trims_and_reports_duplicates() {
    let mut service = NoteService::open(MemorySnapshotStore::new(), CategorySet::empty()).unwrap();
    assert!(service.add_category("  Work ").unwrap());
    assert!(!service.add_category("Work").unwrap());
    assert_eq!(service.categories(), ["Work"]);
}

#[test]
fn note_categories_are_trimmed_and_blank_means_uncategorized() {
    let mut service = NoteService::open(MemorySnapshotStore::new(), CategorySet::empty()).unwrap();
    assert!(service.add_category("   ").is_err());
    assert!(service.add_category(" Work ").unwrap());

    let note = service
        .create_note(NoteDraft::new("A", "x").with_category("   "))
        .unwrap();
    assert_eq!(note.category, UNCATEGORIZED);

    let note = service
        .update_note(&note.id, NotePatch::default().category(" Work "))
        .unwrap();
    assert_eq!(note.category, "Work");

    let note = service
        .update_note(&note.id, NotePatch::default().category(" Ideas\t"))
        .unwrap();
    assert_eq!(note.category, "Ideas");
    assert_eq!(service.categories(), ["Work", "Ideas"]);
}

#[test]
fn delete_category_scenario_moves_note_to_uncategorized() {
    let mut service = NoteService::open_with_clock(
        MemorySnapshotStore::new(),
        clock(),
        CategorySet::from_names(["Work", "Personal"]),
    )
    .unwrap();
    let note = service
        .create_note(NoteDraft::new("A", "x").with_category("Work"))
        .unwrap();

    let removal = service.delete_category("Work");
    assert!(removal.removed);
    assert_eq!(service.get_note(&note.id).unwrap().category, UNCATEGORIZED);
    assert_eq!(service.categories(), ["Personal"]);
}

#[test]
fn category_summaries_count_notes_per_category() {
    let mut service = NoteService::open(
        MemorySnapshotStore::new(),
        CategorySet::from_names(["Work", "Personal"]),
    )
    .unwrap();
    service
        .create_note(NoteDraft::new("A", "").with_category("Work"))
        .unwrap();
    service
        .create_note(NoteDraft::new("B", "").with_category("Work"))
        .unwrap();

    let summaries = service.category_summaries();
    assert_eq!(summaries[0].name, "Work");
    assert_eq!(summaries[0].note_count, 2);
    assert_eq!(summaries[1].note_count, 0);
}

#[test]
fn filter_reads_through_service() {
    let mut service = NoteService::open(MemorySnapshotStore::new(), CategorySet::default()).unwrap();
    service
        .create_note(NoteDraft::new("Buy milk", "").with_category("Personal"))
        .unwrap();
    service
        .create_note(NoteDraft::new("Write report", "").with_category("Work"))
        .unwrap();

    let hits = service.filter_notes(&NoteFilter::new("REPORT"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Write report");
}
