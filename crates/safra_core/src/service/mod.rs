//! Use-case services composed from collection managers.
//!
//! # Responsibility
//! - Keep multi-record operations (stock posting, settlement, order codes)
//!   out of the generic managers.
//! - Stay storage-agnostic: services only talk to managers.

pub mod account_service;
pub mod inventory_service;
pub mod purchase_order_service;
