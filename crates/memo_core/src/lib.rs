//! Core domain logic for the memo backend.
//! This crate is the single source of truth for memo and tag business rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::memo::{Memo, MemoId, MemoValidationError};
pub use model::tag::{Tag, TagId};
pub use repo::memo_repo::{MemoRepository, SqliteMemoRepository};
pub use repo::query::{MemoClause, MemoFilter, MemoSort, SortDirection};
pub use repo::tag_repo::{SqliteTagRepository, TagRepository};
pub use repo::{RepoError, RepoResult};
pub use seed::{seed_master_tags, MASTER_TAG_NAMES};
pub use service::memo_service::{MemoService, MemoServiceError};
pub use service::tag_service::TagService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
