//! Connection bootstrap utilities for SQLite.
//!
//! # Invariants
//! - Writable connections have migrations fully applied.
//! - Read-only connections never change the file and are rejected unless
//!   the schema is exactly the latest version.

use super::migrations::{apply_migrations, ensure_current_schema};
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a notes database file and applies all pending migrations.
///
/// # Side effects
/// - Creates the file when missing.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens an in-memory notes database and applies all pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

/// Opens an existing notes database without creating or migrating it.
///
/// # Errors
/// - `Sqlite` when the file is missing or unreadable.
/// - `SchemaNotCurrent` when the file was never migrated to this schema.
/// - `UnsupportedSchemaVersion` when the file is newer than this binary.
pub fn open_db_read_only(path: impl AsRef<Path>) -> DbResult<Connection> {
    let started_at = Instant::now();
    let opened: DbResult<Connection> =
        Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(DbError::from)
            .and_then(|conn| {
                conn.busy_timeout(BUSY_TIMEOUT)?;
                ensure_current_schema(&conn)?;
                Ok(conn)
            });

    match &opened {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode=read_only duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode=read_only duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }
    opened
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = connect().map_err(|err| {
        error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={err}",
            started_at.elapsed().as_millis()
        );
        err
    })?;

    if let Err(err) = bootstrap_connection(&mut conn) {
        error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={err}",
            started_at.elapsed().as_millis()
        );
        return Err(err);
    }

    info!(
        "event=db_open module=db status=ok mode={mode} duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}
