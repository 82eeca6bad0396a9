//! Record contract shared by every persisted entity kind.
//!
//! # Invariants
//! - `id` is generated by the collection manager, unique for the lifetime of
//!   a store, and never reassigned.
//! - `created_at` is stamped once at creation and never changes.
//! - `Draft` and `Patch` types carry neither field, so callers cannot set or
//!   overwrite them.
//! - Kinds exposing a [`Record::retirement_flag`] are never physically
//!   deleted.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Stable identifier of one record. Serialized as a plain string.
pub type RecordId = String;

/// Generates a new record id.
///
/// UUIDv7: millisecond timestamp prefix plus random bits, monotonic within
/// the process, so back-to-back calls never collide.
pub fn new_record_id() -> RecordId {
    Uuid::now_v7().to_string()
}

/// Storage order applied by `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Insertion order.
    Storage,
    /// By [`Record::record_date`], oldest first.
    DateAscending,
    /// By [`Record::record_date`], newest first.
    DateDescending,
}

/// One persisted entity kind.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Create input: every domain field, no identity.
    type Draft;
    /// Partial update input: every domain field optional, no identity.
    type Patch;

    /// Short human-readable kind name used in logs and errors.
    const KIND: &'static str;
    /// Stable slot key. Changing it orphans previously persisted data.
    const STORE_KEY: &'static str;
    const LIST_ORDER: ListOrder = ListOrder::Storage;

    fn from_draft(id: RecordId, created_at: String, draft: Self::Draft) -> Self;

    fn id(&self) -> &str;

    fn created_at(&self) -> &str;

    /// Shallow merge: fields absent from `patch` are left untouched.
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Free-text fields matched by word search.
    fn search_text(&self) -> Vec<&str>;

    /// Structured code fields matched by code search.
    fn search_codes(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Date used by range filters and date ordering.
    fn record_date(&self) -> &str {
        self.created_at()
    }

    /// Flag that `delete` clears instead of removing the record. `None`
    /// means the kind is physically removed.
    fn retirement_flag(&mut self) -> Option<&mut bool> {
        None
    }
}

/// Kinds with an active flag toggled by `set_active`.
///
/// Suppliers, resources and employees also retire through the flag on
/// `delete` (see [`Record::retirement_flag`]); they are never physically
/// removed. Inventory items are the one exception: they are removed for
/// real so their stock movements can outlive them and render as dangling
/// references.
pub trait Activatable: Record {
    fn is_active(&self) -> bool;

    fn set_active_flag(&mut self, active: bool);
}

#[cfg(test)]
mod tests {
    use super::new_record_id;
    use std::collections::HashSet;

    #[test]
    fn rapid_ids_are_unique() {
        let ids: HashSet<_> = (0..1_000).map(|_| new_record_id()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn ids_sort_in_creation_order() {
        let first = new_record_id();
        let second = new_record_id();
        assert!(first < second);
    }
}
