//! Slot backend contract and the in-process implementation.

use super::{SlotLocks, StoreError, StoreResult};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Durable key -> payload storage with whole-value semantics.
pub trait SlotBackend: Send + Sync {
    /// Returns the payload last written under `key`, if any.
    fn read_slot(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces the payload stored under `key`.
    fn write_slot(&self, key: &str, payload: &str) -> StoreResult<()>;
    /// Returns all written keys, sorted.
    fn slot_keys(&self) -> StoreResult<Vec<String>>;
}

/// Cloneable backend handle paired with its per-key lock registry.
///
/// Every store built from clones of one handle shares both the data and the
/// locks, so managers of the same kind serialize their writes.
#[derive(Clone)]
pub struct SharedBackend {
    backend: Arc<dyn SlotBackend>,
    locks: Arc<SlotLocks>,
}

impl SharedBackend {
    pub fn new(backend: impl SlotBackend + 'static) -> Self {
        Self::from_arc(Arc::new(backend))
    }

    pub fn from_arc(backend: Arc<dyn SlotBackend>) -> Self {
        Self {
            backend,
            locks: Arc::new(SlotLocks::new()),
        }
    }

    /// Fresh in-memory backend, mostly useful for tests and scratch sessions.
    pub fn in_memory() -> Self {
        Self::new(MemorySlotBackend::new())
    }

    pub fn backend(&self) -> &dyn SlotBackend {
        self.backend.as_ref()
    }

    pub fn locks(&self) -> &SlotLocks {
        &self.locks
    }
}

/// In-memory slot backend.
///
/// Clones share state. Write failures can be simulated with
/// [`MemorySlotBackend::fail_writes`] and [`MemorySlotBackend::with_quota`].
#[derive(Clone, Default)]
pub struct MemorySlotBackend {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    slots: Mutex<BTreeMap<String, String>>,
    fail_writes: AtomicBool,
    quota_bytes: Option<usize>,
}

impl MemorySlotBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that rejects payloads larger than `limit` bytes.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                quota_bytes: Some(limit),
                ..MemoryInner::default()
            }),
        }
    }

    /// Makes every subsequent write fail until switched off again.
    pub fn fail_writes(&self, enabled: bool) {
        self.inner.fail_writes.store(enabled, Ordering::SeqCst);
    }

    /// Stores a raw payload without any encoding, bypassing failure switches.
    pub fn set_raw(&self, key: &str, payload: &str) {
        self.slots().insert(key.to_string(), payload.to_string());
    }

    /// Returns the raw payload stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots().get(key).cloned()
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.inner
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl SlotBackend for MemorySlotBackend {
    fn read_slot(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.slots().get(key).cloned())
    }

    fn write_slot(&self, key: &str, payload: &str) -> StoreResult<()> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                key: key.to_string(),
                message: "writes are disabled".to_string(),
            });
        }
        if let Some(limit) = self.inner.quota_bytes {
            if payload.len() > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    size: payload.len(),
                    limit,
                });
            }
        }

        self.slots().insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn slot_keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.slots().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySlotBackend, SlotBackend};
    use crate::store::StoreError;

    #[test]
    fn quota_rejects_oversized_payloads() {
        let backend = MemorySlotBackend::with_quota(4);
        backend.write_slot("a", "1234").unwrap();

        let err = backend.write_slot("a", "12345").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { size: 5, limit: 4, .. }));
        assert_eq!(backend.raw("a").as_deref(), Some("1234"));
    }

    #[test]
    fn slot_keys_are_sorted() {
        let backend = MemorySlotBackend::new();
        backend.write_slot("b", "[]").unwrap();
        backend.write_slot("a", "[]").unwrap();
        assert_eq!(backend.slot_keys().unwrap(), vec!["a", "b"]);
    }
}
