//! Persisted farm-management records.
//!
//! # Responsibility
//! - Define the record shape of every entity kind kept in a slot store.
//! - Define typed drafts (create input) and patches (partial update input).
//!
//! # Invariants
//! - Every record has a manager-assigned `id` and `created_at`.
//! - Cross-kind references (`item_id`, `supplier_id`, ...) are plain ids and
//!   may dangle.

pub mod account;
pub mod activity;
pub mod clock;
pub mod dates;
pub mod employee;
pub mod inventory;
pub mod purchase_order;
pub mod record;
pub mod resource;
pub mod sale;
pub mod supplier;
