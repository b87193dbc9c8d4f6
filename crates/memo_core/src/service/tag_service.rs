//! Tag use-case service.

use crate::model::tag::Tag;
use crate::repo::tag_repo::TagRepository;
use crate::repo::RepoResult;

/// Read-only facade over tag storage.
pub struct TagService<R: TagRepository> {
    repo: R,
}

impl<R: TagRepository> TagService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every stored tag, deleted or not. Repository errors pass through.
    pub fn find_all(&self) -> RepoResult<Vec<Tag>> {
        self.repo.find_all()
    }
}
