//! Pure filters and aggregates over record lists.
//!
//! Nothing here touches a store: callers pass lists obtained from a
//! collection manager.

pub mod aggregate;
pub mod filter;
