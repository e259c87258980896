//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `notekeep_core` linkage.
//! - Optionally summarize a saved snapshot (`.json` or SQLite) without
//!   modifying it. SQLite files are opened read-only and must already carry
//!   the current schema.

use notekeep_core::{
    JsonFileSnapshotStore, NoteStore, PersistResult, Snapshot, SnapshotStore, SqliteSnapshotStore,
    SystemClock, UNCATEGORIZED,
};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("notekeep_core ping={}", notekeep_core::ping());
    println!("notekeep_core version={}", notekeep_core::core_version());

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match load_snapshot(Path::new(&path)) {
        Ok(Some(snapshot)) => summarize(snapshot),
        Ok(None) => {
            println!("snapshot={path} status=empty");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("snapshot={path} status=error error={err}");
            ExitCode::FAILURE
        }
    }
}

fn load_snapshot(path: &Path) -> PersistResult<Option<Snapshot>> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        JsonFileSnapshotStore::new(path).load()
    } else if !path.exists() {
        Ok(None)
    } else {
        SqliteSnapshotStore::open_read_only(path)?.load()
    }
}

fn summarize(snapshot: Snapshot) -> ExitCode {
    let store = match NoteStore::from_snapshot(SystemClock, snapshot) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("status=error error={err}");
            return ExitCode::FAILURE;
        }
    };

    println!("notes={}", store.note_count());
    for category in store.categories() {
        println!(
            "category={category} notes={}",
            store.count_in_category(category)
        );
    }
    if !store.categories().iter().any(|name| name == UNCATEGORIZED) {
        println!(
            "category={UNCATEGORIZED} notes={}",
            store.count_in_category(UNCATEGORIZED)
        );
    }
    ExitCode::SUCCESS
}
