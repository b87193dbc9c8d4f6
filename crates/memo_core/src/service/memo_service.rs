//! Memo use-case service.
//!
//! # Responsibility
//! - Enforce memo lifecycle rules: creation time pinning and soft delete.
//! - Translate caller filter/sort parameters into repository queries.
//!
//! # Invariants
//! - Updating an existing memo never changes its `created_at`.
//! - Default read paths never return soft-deleted memos.
//! - Repository failures reach the caller unchanged; nothing is retried.
//!
//! Updates are read-then-write without locking: two concurrent updates of the
//! same memo resolve as last write wins.

use crate::model::memo::{Memo, MemoId};
use crate::repo::memo_repo::MemoRepository;
use crate::repo::query::{MemoClause, MemoFilter, MemoSort, SortDirection};
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for memo use-cases that carry semantic failures.
#[derive(Debug)]
pub enum MemoServiceError {
    /// No active memo has this id.
    NotFound(MemoId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for MemoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "memo not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MemoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<RepoError> for MemoServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Memo service facade over repository implementations.
pub struct MemoService<R: MemoRepository> {
    repo: R,
}

impl<R: MemoRepository> MemoService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates or updates one memo.
    ///
    /// # Contract
    /// - No id: persisted as-is, without any existing-record lookup.
    /// - Id of a stored memo (deleted or not): the stored `created_at` replaces
    ///   whatever the caller sent.
    /// - Id with no stored memo: persisted unchanged under that id.
    pub fn save(&self, mut memo: Memo) -> RepoResult<Memo> {
        let Some(id) = memo.id else {
            let saved = self.repo.save(&memo)?;
            info!(
                "event=memo_save module=service status=ok mode=create memo_id={}",
                saved.id.unwrap_or_default()
            );
            return Ok(saved);
        };

        let mode = match self.repo.find_by_id(id)? {
            Some(existing) => {
                memo.created_at = existing.created_at;
                "update"
            }
            None => "upsert",
        };

        let saved = self.repo.save(&memo)?;
        info!("event=memo_save module=service status=ok mode={mode} memo_id={id}");
        Ok(saved)
    }

    /// Soft-deletes one active memo and returns the stored tombstone.
    ///
    /// # Errors
    /// - [`MemoServiceError::NotFound`] when no active memo has `id`; nothing
    ///   is written in that case.
    pub fn delete(&self, id: MemoId) -> Result<Memo, MemoServiceError> {
        let Some(mut memo) = self.repo.find_by_id_active(id)? else {
            warn!("event=memo_delete module=service status=error error_code=not_found memo_id={id}");
            return Err(MemoServiceError::NotFound(id));
        };

        memo.soft_delete();
        let saved = self.repo.save(&memo)?;
        info!("event=memo_delete module=service status=ok memo_id={id}");
        Ok(saved)
    }

    /// Lists all active memos in storage order.
    pub fn find_all(&self) -> RepoResult<Vec<Memo>> {
        self.repo.find_all(&MemoFilter::active())
    }

    /// Gets one active memo. Missing and deleted memos both yield `None`.
    pub fn find_by_id(&self, id: MemoId) -> RepoResult<Option<Memo>> {
        self.repo.find_by_id_active(id)
    }

    /// Lists active memos whose title or detail contains `keyword`.
    ///
    /// Matching is case-sensitive. An empty keyword matches nothing.
    pub fn search_by_keyword(&self, keyword: &str) -> RepoResult<Vec<Memo>> {
        if keyword.is_empty() {
            return Ok(Vec::new());
        }

        let filter =
            MemoFilter::active().and(MemoClause::TitleOrDetailContains(keyword.to_string()));
        self.repo.find_all(&filter)
    }

    /// Lists active memos matching every supplied constraint.
    ///
    /// `from`/`to` bound `created_at` inclusively. `tag_names` keeps memos
    /// linked to at least one listed tag; `None` or an empty list disables it.
    pub fn filter_memos(
        &self,
        from: Option<NaiveDateTime>,
        to: Option<NaiveDateTime>,
        tag_names: Option<Vec<String>>,
    ) -> RepoResult<Vec<Memo>> {
        let filter = MemoFilter::active()
            .and_if(from, MemoClause::CreatedFrom)
            .and_if(to, MemoClause::CreatedTo)
            .and_if(
                tag_names.filter(|names| !names.is_empty()),
                MemoClause::HasAnyTag,
            );
        debug!(
            "event=memo_filter module=service clauses={}",
            filter.clause_names()
        );
        self.repo.find_all(&filter)
    }

    /// Lists all active memos ordered by `created_at`.
    ///
    /// Only the exact value `"desc"` sorts newest first; anything else,
    /// including `None`, sorts oldest first.
    pub fn find_all_sorted_by_date(&self, direction: Option<&str>) -> RepoResult<Vec<Memo>> {
        let sort = MemoSort::by_created_at(SortDirection::from_param(direction));
        self.repo.find_all_sorted(&MemoFilter::active(), sort)
    }
}
