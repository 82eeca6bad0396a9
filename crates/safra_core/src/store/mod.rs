//! Named whole-list slots holding serialized records.
//!
//! # Responsibility
//! - Define the slot backend contract shared by SQLite and in-memory storage.
//! - Provide typed [`Store`] handles that read/write one record list per key.
//! - Hand out per-key locks so load-mutate-persist sequences never interleave.
//!
//! # Invariants
//! - One slot key holds at most one list; reads and writes are whole-list.
//! - [`Store::read`] never fails: missing, unreadable or unparseable slots
//!   read as an empty list.
//! - [`Store::write`] never fails: errors are logged and reported as `false`.

mod backend;
mod locks;
mod sqlite;

pub use backend::{MemorySlotBackend, SharedBackend, SlotBackend};
pub use locks::SlotLocks;
pub use sqlite::SqliteSlotBackend;

use crate::db::DbError;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

pub type StoreResult<T> = Result<T, StoreError>;

/// Slot storage error.
#[derive(Debug)]
pub enum StoreError {
    /// SQLite transport failure.
    Db(DbError),
    /// Connection was not bootstrapped with the slot schema.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Record list could not be encoded.
    Serialization { key: String, message: String },
    /// Persisted payload could not be decoded.
    Corrupt { key: String, message: String },
    /// Payload exceeds the backend size limit.
    QuotaExceeded {
        key: String,
        size: usize,
        limit: usize,
    },
    /// Backend refused the operation.
    Unavailable { key: String, message: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "slot connection is not initialized: expected schema version {expected_version}, found {actual_version}"
            ),
            Self::Serialization { key, message } => {
                write!(f, "failed to serialize slot `{key}`: {message}")
            }
            Self::Corrupt { key, message } => write!(f, "slot `{key}` is corrupt: {message}"),
            Self::QuotaExceeded { key, size, limit } => write!(
                f,
                "slot `{key}` payload of {size} bytes exceeds quota of {limit} bytes"
            ),
            Self::Unavailable { key, message } => {
                write!(f, "slot `{key}` is unavailable: {message}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Typed handle over one named slot.
///
/// Cloning a store clones the handle, not the data: every clone (and every
/// other store built from the same [`SharedBackend`] and key) sees the same
/// list.
pub struct Store<T> {
    backend: SharedBackend,
    key: String,
    _records: PhantomData<fn() -> T>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            key: self.key.clone(),
            _records: PhantomData,
        }
    }
}

impl<T> Store<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(backend: SharedBackend, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            _records: PhantomData,
        }
    }

    /// Slot key this store reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Lock guarding load-mutate-persist sequences on this key.
    pub fn slot_lock(&self) -> Arc<Mutex<()>> {
        self.backend.locks().slot(&self.key)
    }

    /// Reads the full list, or an empty list when the slot is missing or
    /// cannot be decoded.
    pub fn read(&self) -> Vec<T> {
        match self.try_read() {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    "event=store_read module=store status=error key={} error={}",
                    self.key, err
                );
                Vec::new()
            }
        }
    }

    /// Strict read that reports backend and decode errors.
    pub fn try_read(&self) -> StoreResult<Vec<T>> {
        let Some(payload) = self.backend.backend().read_slot(&self.key)? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&payload).map_err(|err| StoreError::Corrupt {
            key: self.key.clone(),
            message: err.to_string(),
        })
    }

    /// Replaces the slot contents. Returns `false` when persistence failed;
    /// the failure is logged and otherwise swallowed.
    pub fn write(&self, records: &[T]) -> bool {
        match self.try_write(records) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=store_write module=store status=error key={} records={} error={}",
                    self.key,
                    records.len(),
                    err
                );
                false
            }
        }
    }

    /// Strict write that surfaces serialization and backend errors.
    pub fn try_write(&self, records: &[T]) -> StoreResult<()> {
        let payload =
            serde_json::to_string(records).map_err(|err| StoreError::Serialization {
                key: self.key.clone(),
                message: err.to_string(),
            })?;
        self.backend.backend().write_slot(&self.key, &payload)?;
        debug!(
            "event=store_write module=store status=ok key={} records={} bytes={}",
            self.key,
            records.len(),
            payload.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySlotBackend, SharedBackend, Store, StoreError};

    fn memory_store(key: &str) -> (MemorySlotBackend, Store<Vec<u32>>) {
        let memory = MemorySlotBackend::new();
        let store = Store::new(SharedBackend::new(memory.clone()), key);
        (memory, store)
    }

    #[test]
    fn missing_slot_reads_as_empty_list() {
        let (_, store) = memory_store("numbers");
        assert!(store.read().is_empty());
    }

    #[test]
    fn corrupt_slot_reads_as_empty_list_but_strict_read_reports_it() {
        let (memory, store) = memory_store("numbers");
        memory.set_raw("numbers", "{not json");

        assert!(store.read().is_empty());
        assert!(matches!(store.try_read(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn failed_write_is_swallowed_and_keeps_previous_value() {
        let (memory, store) = memory_store("numbers");
        assert!(store.write(&[vec![1, 2]]));

        memory.fail_writes(true);
        assert!(!store.write(&[vec![3]]));
        assert_eq!(store.read(), vec![vec![1, 2]]);
    }

    #[test]
    fn clones_share_the_same_slot() {
        let (_, store) = memory_store("numbers");
        let other = store.clone();
        store.write(&[vec![7]]);
        assert_eq!(other.read(), vec![vec![7]]);
    }
}
