//! Tag repository contract and SQLite implementation.
//!
//! # Invariants
//! - Tag names are unique (enforced by the `tags.name` constraint).
//! - Tag reads do not filter on `is_deleted`.

use crate::model::tag::{Tag, TagId};
use crate::repo::{bool_to_int, ensure_tables_ready, parse_deleted_flag, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[("tags", &["id", "name", "is_deleted"])];

/// Persistence capability for tags.
pub trait TagRepository {
    /// Lists every stored tag in storage order.
    fn find_all(&self) -> RepoResult<Vec<Tag>>;
    /// Returns whether a tag with exactly this name exists.
    fn exists_by_name(&self, name: &str) -> RepoResult<bool>;
    /// Inserts (no id) or inserts-or-updates (id present) one tag.
    fn save(&self, tag: &Tag) -> RepoResult<Tag>;
}

/// SQLite-backed tag repository.
pub struct SqliteTagRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTagRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables_ready(conn, REQUIRED_COLUMNS)?;
        Ok(Self { conn })
    }

    fn load_tag(&self, id: TagId) -> RepoResult<Option<Tag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, is_deleted FROM tags WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_tag_row(row)?));
        }
        Ok(None)
    }
}

impl TagRepository for SqliteTagRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Tag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, is_deleted FROM tags ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(parse_tag_row(row)?);
        }
        Ok(tags)
    }

    fn exists_by_name(&self, name: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM tags WHERE name = ?1);",
            [name],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn save(&self, tag: &Tag) -> RepoResult<Tag> {
        let id = match tag.id {
            None => {
                self.conn.execute(
                    "INSERT INTO tags (name, is_deleted) VALUES (?1, ?2);",
                    params![tag.name.as_str(), bool_to_int(tag.is_deleted)],
                )?;
                self.conn.last_insert_rowid()
            }
            Some(id) => {
                self.conn.execute(
                    "INSERT INTO tags (id, name, is_deleted)
                     VALUES (?1, ?2, ?3)
                     ON CONFLICT (id) DO UPDATE SET
                        name = excluded.name,
                        is_deleted = excluded.is_deleted;",
                    params![id, tag.name.as_str(), bool_to_int(tag.is_deleted)],
                )?;
                id
            }
        };

        self.load_tag(id)?
            .ok_or_else(|| RepoError::InvalidData(format!("tag {id} missing after save")))
    }
}

fn parse_tag_row(row: &Row<'_>) -> RepoResult<Tag> {
    Ok(Tag {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        is_deleted: parse_deleted_flag(row.get("is_deleted")?, "tags.is_deleted")?,
    })
}
