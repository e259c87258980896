//! SQLite layer behind [`crate::persist::SqliteSnapshotStore`].
//!
//! # Responsibility
//! - Open notes databases, writable (migrated on open) or read-only
//!   (checked, never changed).
//! - Own the schema version, stored in `PRAGMA user_version`.
//!
//! # Invariants
//! - Snapshot rows are read or written only on a connection whose schema
//!   matches [`migrations::latest_version`].

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, open_db_read_only};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating a notes database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// A read-only open found an older or foreign schema.
    SchemaNotCurrent { db_version: u32, expected: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "notes database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::SchemaNotCurrent {
                db_version,
                expected,
            } => write!(
                f,
                "not a current notes database: schema version {db_version}, expected {expected}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
