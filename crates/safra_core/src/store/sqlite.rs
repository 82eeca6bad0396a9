//! SQLite-backed slot storage.
//!
//! # Invariants
//! - Connections must carry the latest slot schema before use.
//! - One row per key in `store_slots`; writes replace the row.

use super::{SlotBackend, StoreError, StoreResult};
use crate::db::migrations::{latest_version, schema_version};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct SqliteSlotBackend {
    conn: Mutex<Connection>,
}

impl SqliteSlotBackend {
    /// Wraps a connection that already went through [`open_db`].
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        let actual_version = schema_version(&conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens or creates the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::try_new(open_db(path)?)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SlotBackend for SqliteSlotBackend {
    fn read_slot(&self, key: &str) -> StoreResult<Option<String>> {
        let payload = self
            .conn()
            .query_row(
                "SELECT payload FROM store_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write_slot(&self, key: &str, payload: &str) -> StoreResult<()> {
        self.conn().execute(
            "INSERT INTO store_slots (key, payload, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![key, payload],
        )?;
        Ok(())
    }

    fn slot_keys(&self) -> StoreResult<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT key FROM store_slots ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}
