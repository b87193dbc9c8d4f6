//! Core use-case services.
//!
//! # Responsibility
//! - Apply memo/tag business rules on top of repository contracts.
//! - Keep callers decoupled from storage details.

pub mod memo_service;
pub mod tag_service;
