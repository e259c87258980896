//! Note and category domain model.
//!
//! # Responsibility
//! - Define the records owned exclusively by the note store.
//! - Own timestamp formatting used by snapshots and SQLite rows.
//!
//! # Invariants
//! - Every note is identified by a `NoteId` that is never reused.
//! - `Uncategorized` is a valid category even when absent from the set.

pub mod category;
pub mod note;
pub mod timestamp;
