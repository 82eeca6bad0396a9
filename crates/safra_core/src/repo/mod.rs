//! Collection managers over slot stores.
//!
//! # Responsibility
//! - Provide create/list/get/update/delete/search over one record kind.
//! - Own id and `created_at` assignment.
//! - Keep every load-mutate-persist sequence under the slot's lock.
//!
//! # Invariants
//! - Managers hold no record state; everything lives in the store.
//! - "Not found" is an ordinary outcome: `Option` for lookups,
//!   [`RepoError::NotFound`] for updates, a no-op for deletes.

pub mod collection;

pub use collection::{CollectionManager, PersistencePolicy, RepoError, RepoResult};
