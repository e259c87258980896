//! Snapshot persistence backends.
//!
//! # Responsibility
//! - Load and save whole-store snapshots to local storage.
//! - Keep storage details out of the in-memory store.
//!
//! # Invariants
//! - `load` returns `None` until the first successful `save`.
//! - A loaded snapshot has passed `Snapshot::validate`.
//! - `save` replaces the previous snapshot entirely or not at all.

pub mod json_file;
pub mod memory;
pub mod snapshot;
pub mod sqlite;

use crate::db::DbError;
use snapshot::Snapshot;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub use json_file::JsonFileSnapshotStore;
pub use memory::MemorySnapshotStore;
pub use sqlite::SqliteSnapshotStore;

pub type PersistResult<T> = Result<T, PersistError>;

/// Persistence-layer failure.
#[derive(Debug)]
pub enum PersistError {
    /// Filesystem failure at `path`.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// SQLite failure.
    Db(DbError),
    /// Snapshot could not be encoded.
    Encode(serde_json::Error),
    /// Stored data is unreadable or violates store invariants.
    Corrupt(String),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "snapshot io failed at `{}`: {source}", path.display())
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "snapshot encode failed: {err}"),
            Self::Corrupt(message) => write!(f, "corrupt snapshot: {message}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Corrupt(_) => None,
        }
    }
}

impl From<DbError> for PersistError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage backend for whole-store snapshots.
pub trait SnapshotStore {
    /// Reads the last saved snapshot, or `None` when nothing was saved yet.
    fn load(&mut self) -> PersistResult<Option<Snapshot>>;
    /// Replaces the stored snapshot.
    fn save(&mut self, snapshot: &Snapshot) -> PersistResult<()>;
    /// Short backend label for diagnostics (`memory`, `json_file`, `sqlite`).
    fn describe(&self) -> &'static str;
}

impl<T: SnapshotStore + ?Sized> SnapshotStore for Box<T> {
    fn load(&mut self) -> PersistResult<Option<Snapshot>> {
        (**self).load()
    }

    fn save(&mut self, snapshot: &Snapshot) -> PersistResult<()> {
        (**self).save(snapshot)
    }

    fn describe(&self) -> &'static str {
        (**self).describe()
    }
}

pub(crate) fn checked(snapshot: Snapshot) -> PersistResult<Snapshot> {
    snapshot.validate().map_err(PersistError::Corrupt)?;
    Ok(snapshot)
}
