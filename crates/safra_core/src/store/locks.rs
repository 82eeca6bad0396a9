//! Per-key mutual exclusion for read-modify-write sequences.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Registry handing out one lock per slot key.
#[derive(Debug, Default)]
pub struct SlotLocks {
    slots: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SlotLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for `key`, creating it on first use.
    pub fn slot(&self, key: &str) -> Arc<Mutex<()>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::SlotLocks;
    use std::sync::Arc;

    #[test]
    fn same_key_yields_same_lock() {
        let locks = SlotLocks::new();
        assert!(Arc::ptr_eq(&locks.slot("a"), &locks.slot("a")));
        assert!(!Arc::ptr_eq(&locks.slot("a"), &locks.slot("b")));
    }
}
