//! Tag domain model.

use serde::{Deserialize, Serialize};

/// Storage-assigned numeric tag identifier.
pub type TagId = i64;

/// Named label that memos can reference.
///
/// Names are unique in storage. `is_deleted` is carried for completeness but
/// tag reads do not filter on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// `None` until the tag is persisted.
    pub id: Option<TagId>,
    pub name: String,
    pub is_deleted: bool,
}

impl Tag {
    /// Creates an unsaved, active tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            is_deleted: false,
        }
    }
}
