//! SQLite snapshot backend.
//!
//! # Responsibility
//! - Persist notes and categories as rows, preserving collection order.
//!
//! # Invariants
//! - `save` rewrites both tables inside one immediate transaction.
//! - `store_meta.snapshot_saved_at` distinguishes "never saved" from an
//!   intentionally empty store.
//! - Read paths reject unparsable timestamps instead of masking them.

use super::snapshot::Snapshot;
use super::{PersistError, PersistResult, SnapshotStore};
use crate::db::{open_db, open_db_in_memory, open_db_read_only};
use crate::model::note::{Note, NoteId};
use crate::model::timestamp::{format_timestamp, parse_timestamp, Timestamp};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::path::Path;

const SAVED_AT_KEY: &str = "snapshot_saved_at";

pub struct SqliteSnapshotStore {
    conn: Connection,
}

impl SqliteSnapshotStore {
    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens an existing, current database file for inspection.
    ///
    /// `save` fails on the returned store; `load` never touches the file.
    pub fn open_read_only(path: impl AsRef<Path>) -> PersistResult<Self> {
        Ok(Self {
            conn: open_db_read_only(path)?,
        })
    }

    pub fn open_in_memory() -> PersistResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn has_saved_snapshot(&self) -> PersistResult<bool> {
        let saved_at: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM store_meta WHERE key = ?1;",
                [SAVED_AT_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(saved_at.is_some())
    }

    fn load_notes(&self) -> PersistResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, content, category, created_at, updated_at
             FROM notes
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn load_categories(&self) -> PersistResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM categories ORDER BY position ASC;")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn load(&mut self) -> PersistResult<Option<Snapshot>> {
        if !self.has_saved_snapshot()? {
            return Ok(None);
        }

        let snapshot = Snapshot {
            notes: self.load_notes()?,
            categories: self.load_categories()?,
        };
        super::checked(snapshot).map(Some)
    }

    fn save(&mut self, snapshot: &Snapshot) -> PersistResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM notes;", [])?;
        tx.execute("DELETE FROM categories;", [])?;

        {
            let mut insert_note = tx.prepare(
                "INSERT INTO notes (id, title, content, category, created_at, updated_at, position)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            )?;
            for (position, note) in snapshot.notes.iter().enumerate() {
                insert_note.execute(params![
                    note.id.as_str(),
                    note.title.as_str(),
                    note.content.as_str(),
                    note.category.as_str(),
                    format_timestamp(&note.created_at),
                    format_timestamp(&note.updated_at),
                    position_value(position)?,
                ])?;
            }

            let mut insert_category =
                tx.prepare("INSERT INTO categories (name, position) VALUES (?1, ?2);")?;
            for (position, name) in snapshot.categories.iter().enumerate() {
                insert_category.execute(params![name.as_str(), position_value(position)?])?;
            }
        }

        tx.execute(
            "INSERT INTO store_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![SAVED_AT_KEY, format_timestamp(&Utc::now())],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn describe(&self) -> &'static str {
        "sqlite"
    }
}

fn parse_note_row(row: &Row<'_>) -> PersistResult<Note> {
    let id: String = row.get("id")?;
    Ok(Note {
        created_at: parse_column(row, "created_at", &id)?,
        updated_at: parse_column(row, "updated_at", &id)?,
        title: row.get("title")?,
        content: row.get("content")?,
        category: row.get("category")?,
        id: NoteId::from(id),
    })
}

fn parse_column(row: &Row<'_>, column: &str, id: &str) -> PersistResult<Timestamp> {
    let raw: String = row.get(column)?;
    parse_timestamp(&raw).map_err(|err| {
        PersistError::Corrupt(format!(
            "invalid {column} `{raw}` for note `{id}`: {err}"
        ))
    })
}

fn position_value(position: usize) -> PersistResult<i64> {
    i64::try_from(position)
        .map_err(|_| PersistError::Corrupt(format!("position {position} exceeds i64")))
}
