//! Domain model for memos and their tag vocabulary.
//!
//! # Responsibility
//! - Define canonical records used by repositories and services.
//! - Keep soft-delete lifecycle helpers next to the data they mutate.
//!
//! # Invariants
//! - Deletion is represented by the `is_deleted` flag, never hard delete.
//! - A memo's `created_at` is fixed by its first persistence.

pub mod memo;
pub mod tag;
