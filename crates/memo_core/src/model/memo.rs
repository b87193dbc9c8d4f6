//! Memo domain model.
//!
//! # Responsibility
//! - Define the memo record and its soft-delete lifecycle helpers.
//! - Offer input-limit checks for callers that accept user-entered fields.
//!
//! # Invariants
//! - `id` is `None` only for records that were never persisted.
//! - `created_at` is set once at first persistence and never overwritten.
//! - `is_deleted` is the source of truth for tombstone state.

use super::tag::Tag;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned numeric memo identifier.
pub type MemoId = i64;

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 60;
/// Maximum detail length in characters.
pub const MAX_DETAIL_CHARS: usize = 10_000;

/// Validation failure for user-entered memo fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Title exceeds [`MAX_TITLE_CHARS`].
    TitleTooLong { chars: usize },
    /// Detail exceeds [`MAX_DETAIL_CHARS`].
    DetailTooLong { chars: usize },
}

impl Display for MemoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "memo title must not be blank"),
            Self::TitleTooLong { chars } => write!(
                f,
                "memo title has {chars} characters; at most {MAX_TITLE_CHARS} allowed"
            ),
            Self::DetailTooLong { chars } => write!(
                f,
                "memo detail has {chars} characters; at most {MAX_DETAIL_CHARS} allowed"
            ),
        }
    }
}

impl Error for MemoValidationError {}

/// A user note.
///
/// `created_at` is local wall-clock time, stored at full precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    /// `None` until the memo is persisted.
    pub id: Option<MemoId>,
    pub title: String,
    /// Body text.
    pub detail: Option<String>,
    pub created_at: NaiveDateTime,
    /// Soft delete tombstone.
    pub is_deleted: bool,
    /// Linked tags. Memos do not own tag lifecycle.
    pub tags: Vec<Tag>,
}

impl Memo {
    /// Creates an unsaved, active memo stamped with the current local time.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_created_at(title, Local::now().naive_local())
    }

    /// Creates an unsaved, active memo with a caller-provided creation time.
    pub fn with_created_at(title: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            id: None,
            title: title.into(),
            detail: None,
            created_at,
            is_deleted: false,
            tags: Vec::new(),
        }
    }

    /// Marks this memo as softly deleted.
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Clears the soft delete flag.
    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    /// Returns whether default read paths may expose this memo.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }

    /// Checks user-entered fields against input limits.
    ///
    /// Storage does not call this; request-handling callers decide whether
    /// to reject input before saving.
    ///
    /// # Errors
    /// - [`MemoValidationError::EmptyTitle`] for blank titles.
    /// - [`MemoValidationError::TitleTooLong`] / [`MemoValidationError::DetailTooLong`]
    ///   when a field exceeds its character limit.
    pub fn validate(&self) -> Result<(), MemoValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(MemoValidationError::EmptyTitle);
        }

        let title_chars = title.chars().count();
        if title_chars > MAX_TITLE_CHARS {
            return Err(MemoValidationError::TitleTooLong { chars: title_chars });
        }

        if let Some(detail) = self.detail.as_deref() {
            let detail_chars = detail.trim().chars().count();
            if detail_chars > MAX_DETAIL_CHARS {
                return Err(MemoValidationError::DetailTooLong {
                    chars: detail_chars,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Memo, MemoValidationError, MAX_DETAIL_CHARS, MAX_TITLE_CHARS};

    #[test]
    fn new_memo_is_active_and_unsaved() {
        let memo = Memo::new("買い物リスト");
        assert_eq!(memo.id, None);
        assert!(memo.is_active());
        assert!(memo.tags.is_empty());
    }

    #[test]
    fn soft_delete_and_restore_toggle_flag() {
        let mut memo = Memo::new("仕事メモ");
        memo.soft_delete();
        assert!(!memo.is_active());
        memo.restore();
        assert!(memo.is_active());
    }

    #[test]
    fn validate_rejects_blank_title() {
        let memo = Memo::new("   ");
        assert_eq!(memo.validate(), Err(MemoValidationError::EmptyTitle));
    }

    #[test]
    fn validate_counts_characters_not_bytes() {
        let memo = Memo::new("あ".repeat(MAX_TITLE_CHARS));
        assert!(memo.validate().is_ok());

        let memo = Memo::new("あ".repeat(MAX_TITLE_CHARS + 1));
        assert_eq!(
            memo.validate(),
            Err(MemoValidationError::TitleTooLong {
                chars: MAX_TITLE_CHARS + 1
            })
        );
    }

    #[test]
    fn validate_rejects_oversized_detail() {
        let mut memo = Memo::new("長文");
        memo.detail = Some("x".repeat(MAX_DETAIL_CHARS + 1));
        assert!(matches!(
            memo.validate(),
            Err(MemoValidationError::DetailTooLong { .. })
        ));
    }
}
