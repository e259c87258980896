use chrono::{Duration, TimeZone, Utc};
use notekeep_core::{
    CategorySet, ManualClock, NoteDraft, NoteFilter, NoteId, NotePatch, NoteStore, StoreError,
    UNCATEGORIZED,
};
use std::collections::HashSet;

fn store_with(categories: &[&str]) -> (NoteStore<ManualClock>, ManualClock) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
    let store = NoteStore::with_clock(
        clock.clone(),
        CategorySet::from_names(categories.iter().copied()),
    );
    (store, clock)
}

#[test]
fn add_grows_collection_by_one_with_unique_ids() {
    let (mut store, _) = store_with(&["Work"]);
    let mut ids = HashSet::new();
    for idx in 0..50 {
        let before = store.note_count();
        let id = store
            .add_note(NoteDraft::new(format!("n{idx}"), "body"))
            .id
            .clone();
        assert_eq!(store.note_count(), before + 1);
        assert!(ids.insert(id));
    }
}

#[test]
fn add_preserves_insertion_order() {
    let (mut store, _) = store_with(&[]);
    store.add_note(NoteDraft::new("first", ""));
    store.add_note(NoteDraft::new("second", ""));
    store.add_note(NoteDraft::new("third", ""));
    let titles = store
        .notes()
        .iter()
        .map(|note| note.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, ["first", "second", "third"]);
}

#[test]
fn deleted_ids_are_not_reused() {
    let (mut store, _) = store_with(&[]);
    let deleted = store.add_note(NoteDraft::new("gone", "")).id.clone();
    store.delete_note(&deleted).unwrap();

    for _ in 0..20 {
        let fresh = store.add_note(NoteDraft::new("new", "")).id.clone();
        assert_ne!(fresh, deleted);
    }
    assert!(store.get_note(&deleted).is_none());
}

#[test]
fn update_merges_only_supplied_fields_and_refreshes_updated_at() {
    let (mut store, clock) = store_with(&["Work", "Personal"]);
    let original = store
        .add_note(NoteDraft::new("Title", "Body").with_category("Work"))
        .clone();

    clock.advance(Duration::seconds(30));
    let updated = store
        .update_note(&original.id, NotePatch::default().content("New body"))
        .unwrap()
        .clone();

    assert_eq!(updated.title, "Title");
    assert_eq!(updated.category, "Work");
    assert_eq!(updated.content, "New body");
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.updated_at, original.updated_at + Duration::seconds(30));
}

#[test]
fn empty_patch_still_refreshes_updated_at() {
    let (mut store, clock) = store_with(&[]);
    let id = store.add_note(NoteDraft::new("t", "c")).id.clone();
    clock.advance(Duration::milliseconds(5));
    let before = store.get_note(&id).unwrap().updated_at;
    let after = store
        .update_note(&id, NotePatch::default())
        .unwrap()
        .updated_at;
    assert!(after > before);
}

#[test]
fn update_and_delete_of_unknown_id_leave_state_untouched() {
    let (mut store, _) = store_with(&["Work"]);
    store.add_note(NoteDraft::new("keep", "me"));
    let before = store.snapshot();

    let missing = NoteId::from("does-not-exist");
    let err = store
        .update_note(&missing, NotePatch::default().title("x"))
        .unwrap_err();
    assert_eq!(err, StoreError::NoteNotFound(missing.clone()));
    assert_eq!(
        store.delete_note(&missing).unwrap_err(),
        StoreError::NoteNotFound(missing)
    );
    assert_eq!(store.snapshot(), before);
}

#[test]
fn add_category_is_idempotent() {
    let (mut store, _) = store_with(&["Work"]);
    assert!(store.add_category("Ideas"));
    let once = store.categories().to_vec();
    assert!(!store.add_category("Ideas"));
    assert_eq!(store.categories(), once.as_slice());
}

#[test]
fn delete_category_reassigns_notes_to_uncategorized() {
    let (mut store, _) = store_with(&["Work", "Personal"]);
    let a = store
        .add_note(NoteDraft::new("A", "x").with_category("Work"))
        .id
        .clone();
    let b = store
        .add_note(NoteDraft::new("B", "y").with_category("Personal"))
        .id
        .clone();

    let removal = store.delete_category("Work");
    assert!(removal.removed);
    assert_eq!(removal.reassigned, 1);

    assert_eq!(store.get_note(&a).unwrap().category, UNCATEGORIZED);
    assert_eq!(store.get_note(&b).unwrap().category, "Personal");
    assert_eq!(store.categories(), ["Personal"]);
    assert!(store.notes().iter().all(|note| note.category != "Work"));
}

#[test]
fn update_with_unknown_category_registers_it() {
    let (mut store, _) = store_with(&["Work"]);
    let id = store
        .add_note(NoteDraft::new("A", "x").with_category("Work"))
        .id
        .clone();

    let note = store
        .update_note(&id, NotePatch::default().category("Travel"))
        .unwrap();
    assert_eq!(note.category, "Travel");
    assert_eq!(store.categories(), ["Work", "Travel"]);
}

#[test]
fn deleting_uncategorized_keeps_note_categories() {
    let (mut store, clock) = store_with(&["Work", UNCATEGORIZED]);
    let loose = store.add_note(NoteDraft::new("A", "x")).id.clone();
    let filed = store
        .add_note(NoteDraft::new("B", "y").with_category("Work"))
        .id
        .clone();
    let before = store.snapshot().notes;
    clock.advance(Duration::seconds(5));

    let removal = store.delete_category(UNCATEGORIZED);
    assert!(removal.removed);
    assert_eq!(removal.reassigned, 0);
    assert_eq!(store.categories(), ["Work"]);
    assert_eq!(store.get_note(&loose).unwrap().category, UNCATEGORIZED);
    assert_eq!(store.get_note(&filed).unwrap().category, "Work");
    assert_eq!(store.snapshot().notes, before);
}

#[test]
fn delete_absent_category_is_a_no_op() {
    let (mut store, _) = store_with(&["Work"]);
    store.add_note(NoteDraft::new("A", "x").with_category("Work"));
    let before = store.snapshot();

    let removal = store.delete_category("Nope");
    assert!(!removal.removed);
    assert_eq!(removal.reassigned, 0);
    assert_eq!(store.snapshot(), before);
}

#[test]
fn filter_examples_from_two_note_fixture() {
    let (mut store, _) = store_with(&["Personal", "Work"]);
    let first = store
        .add_note(NoteDraft::new("Buy milk", "").with_category("Personal"))
        .id
        .clone();
    let second = store
        .add_note(NoteDraft::new("Write report", "").with_category("Work"))
        .id
        .clone();

    let milk = store.filter_notes(&NoteFilter::new("milk"));
    assert_eq!(milk.len(), 1);
    assert_eq!(milk[0].id, first);

    let work = store.filter_notes(&NoteFilter::new("").in_category("Work"));
    assert_eq!(work.len(), 1);
    assert_eq!(work[0].id, second);

    let all = store.filter_notes(&NoteFilter::default());
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first);
    assert_eq!(all[1].id, second);
}

#[test]
fn count_in_category_tracks_reassignment() {
    let (mut store, _) = store_with(&["Work"]);
    store.add_note(NoteDraft::new("A", "").with_category("Work"));
    store.add_note(NoteDraft::new("B", "").with_category("Work"));
    store.add_note(NoteDraft::new("C", ""));
    assert_eq!(store.count_in_category("Work"), 2);
    assert_eq!(store.count_in_category(UNCATEGORIZED), 1);

    store.delete_category("Work");
    assert_eq!(store.count_in_category("Work"), 0);
    assert_eq!(store.count_in_category(UNCATEGORIZED), 3);
}
