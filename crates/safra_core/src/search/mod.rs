//! In-memory record search.
//!
//! # Responsibility
//! - Match free-text and structured-code terms against record fields.
//!
//! # Invariants
//! - Matching is case-insensitive; terms are trimmed.
//! - A blank term never filters anything out.

pub mod text;
