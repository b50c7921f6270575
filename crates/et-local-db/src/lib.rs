// Copyright 2025 LNU IT Services Office
// SPDX-License-Identifier: AGPL-3.0-only

//! SQLite database management for EquipTrack
//!
//! Owns the relational schema (accounts, catalog, equipment, history,
//! password-reset requests) and exposes typed store methods over it. All
//! constraint failures are translated into [`Error`] variants so callers can
//! map them onto HTTP semantics without inspecting SQLite error codes.

pub mod accounts;
pub mod catalog;
pub mod equipment;
mod error;
pub mod records;
mod schema;

pub use error::{Error, Result};

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Handle to the EquipTrack SQLite database
///
/// The connection is guarded by a mutex; every store method takes the lock
/// for the duration of one statement or transaction.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (and migrate) a database file at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database; used by tests and the default dev config.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        schema::init(&conn)?;
        tracing::debug!("database schema initialized");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        // A poisoned lock means another store method panicked mid-statement;
        // the connection itself is still usable.
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Read an RFC 3339 timestamp column inside a row mapper.
pub(crate) fn ts_column(
    row: &rusqlite::Row<'_>,
    column: &str,
) -> rusqlite::Result<chrono::DateTime<chrono::Utc>> {
    let raw: String = row.get(column)?;
    chrono::DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&chrono::Utc))
        .map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
        })
}

/// Nullable variant of [`ts_column`].
pub(crate) fn opt_ts_column(
    row: &rusqlite::Row<'_>,
    column: &str,
) -> rusqlite::Result<Option<chrono::DateTime<chrono::Utc>>> {
    let raw: Option<String> = row.get(column)?;
    raw.map(|raw| {
        chrono::DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&chrono::Utc))
            .map_err(|err| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(err),
                )
            })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_in_memory_initializes_schema() {
        let db = Database::open_in_memory().unwrap();
        // All tables are queryable immediately after open.
        assert!(db.list_categories().unwrap().is_empty());
        assert!(db.list_rooms().unwrap().is_empty());
        assert!(db.list_users().unwrap().is_empty());
        assert!(db.list_faculty().unwrap().is_empty());
        assert!(db.list_equipment().unwrap().is_empty());
    }

    #[test]
    fn open_creates_file_and_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("equiptrack.db");

        {
            let db = Database::open(&path).unwrap();
            db.insert_category("Projector", Some("LCD and LED projectors"))
                .unwrap();
        }

        let db = Database::open(&path).unwrap();
        let categories = db.list_categories().unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Projector");
    }
}
