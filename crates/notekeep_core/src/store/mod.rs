//! In-memory note store.
//!
//! # Responsibility
//! - Own the ordered note collection and the category set.
//! - Apply add/update/delete transitions atomically per call.
//!
//! # Invariants
//! - No note references a category outside the set, except `Uncategorized`.
//! - Deleting a category reassigns its notes within the same call.

pub mod clock;
pub mod note_store;

use crate::model::note::NoteId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error.
///
/// A failed operation leaves the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No note with this id exists.
    NoteNotFound(NoteId),
    /// Snapshot violates store invariants and cannot be adopted.
    InvalidSnapshot(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidSnapshot(message) => write!(f, "invalid snapshot: {message}"),
        }
    }
}

impl Error for StoreError {}
