//! Memo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the memo persistence capability used by `MemoService`.
//! - Translate `MemoFilter` clauses and `MemoSort` into SQL.
//! - Own memo/tag link replacement on save.
//!
//! # Invariants
//! - One `memos` table serves both access patterns: active-only lookups add
//!   `is_deleted = 0`, unrestricted lookups do not.
//! - `save` writes the memo row and its tag links in one transaction.
//! - `created_at` is stored as fixed-width text with nanosecond digits, so
//!   text comparison orders it chronologically for years 0000-9999.

use crate::model::memo::{Memo, MemoId};
use crate::model::tag::Tag;
use crate::repo::query::{MemoClause, MemoFilter, MemoSort};
use crate::repo::{bool_to_int, ensure_tables_ready, parse_deleted_flag, RepoError, RepoResult};
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const MEMO_SELECT_SQL: &str = "SELECT
    memos.id,
    memos.title,
    memos.detail,
    memos.created_at,
    memos.is_deleted
FROM memos";

const CREATED_AT_WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9f";
const CREATED_AT_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    (
        "memos",
        &["id", "title", "detail", "created_at", "is_deleted"],
    ),
    ("tags", &["id", "name"]),
    ("memo_tags", &["memo_id", "tag_id"]),
];

/// Persistence capability for memos.
pub trait MemoRepository {
    /// Finds one memo by id regardless of its deleted flag.
    fn find_by_id(&self, id: MemoId) -> RepoResult<Option<Memo>>;
    /// Finds one memo by id only when it is active.
    fn find_by_id_active(&self, id: MemoId) -> RepoResult<Option<Memo>>;
    /// Inserts (no id) or inserts-or-updates (id present) one memo.
    ///
    /// Returns the stored record, including the assigned id.
    fn save(&self, memo: &Memo) -> RepoResult<Memo>;
    /// Lists memos matching `filter` in storage order.
    fn find_all(&self, filter: &MemoFilter) -> RepoResult<Vec<Memo>>;
    /// Lists memos matching `filter` ordered by `sort`.
    fn find_all_sorted(&self, filter: &MemoFilter, sort: MemoSort) -> RepoResult<Vec<Memo>>;
}

/// SQLite-backed memo repository.
pub struct SqliteMemoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemoRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables_ready(conn, REQUIRED_COLUMNS)?;
        Ok(Self { conn })
    }

    fn load_memo(&self, id: MemoId, include_deleted: bool) -> RepoResult<Option<Memo>> {
        let mut stmt = self.conn.prepare(&format!(
            "{MEMO_SELECT_SQL}
             WHERE memos.id = ?1
               AND (?2 = 1 OR memos.is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id, bool_to_int(include_deleted)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_memo_row(self.conn, row)?));
        }

        Ok(None)
    }

    fn query_memos(&self, filter: &MemoFilter, order_by: &str) -> RepoResult<Vec<Memo>> {
        let mut sql = format!("{MEMO_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();
        for clause in filter.clauses() {
            push_clause_sql(clause, &mut sql, &mut bind_values);
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(order_by);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut memos = Vec::new();
        while let Some(row) = rows.next()? {
            memos.push(parse_memo_row(self.conn, row)?);
        }

        Ok(memos)
    }
}

impl MemoRepository for SqliteMemoRepository<'_> {
    fn find_by_id(&self, id: MemoId) -> RepoResult<Option<Memo>> {
        self.load_memo(id, true)
    }

    fn find_by_id_active(&self, id: MemoId) -> RepoResult<Option<Memo>> {
        self.load_memo(id, false)
    }

    fn save(&self, memo: &Memo) -> RepoResult<Memo> {
        let tx = self.conn.unchecked_transaction()?;
        let created_at = format_created_at(memo.created_at);
        let id = match memo.id {
            None => {
                tx.execute(
                    "INSERT INTO memos (title, detail, created_at, is_deleted)
                     VALUES (?1, ?2, ?3, ?4);",
                    params![
                        memo.title.as_str(),
                        memo.detail.as_deref(),
                        created_at,
                        bool_to_int(memo.is_deleted),
                    ],
                )?;
                tx.last_insert_rowid()
            }
            Some(id) => {
                tx.execute(
                    "INSERT INTO memos (id, title, detail, created_at, is_deleted)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT (id) DO UPDATE SET
                        title = excluded.title,
                        detail = excluded.detail,
                        created_at = excluded.created_at,
                        is_deleted = excluded.is_deleted;",
                    params![
                        id,
                        memo.title.as_str(),
                        memo.detail.as_deref(),
                        created_at,
                        bool_to_int(memo.is_deleted),
                    ],
                )?;
                id
            }
        };

        replace_tag_links(&tx, id, &memo.tags)?;
        tx.commit()?;

        self.load_memo(id, true)?
            .ok_or_else(|| RepoError::InvalidData(format!("memo {id} missing after save")))
    }

    fn find_all(&self, filter: &MemoFilter) -> RepoResult<Vec<Memo>> {
        self.query_memos(filter, "memos.id ASC")
    }

    fn find_all_sorted(&self, filter: &MemoFilter, sort: MemoSort) -> RepoResult<Vec<Memo>> {
        self.query_memos(
            filter,
            &format!(
                "memos.created_at {}, memos.id ASC",
                sort.direction.as_sql()
            ),
        )
    }
}

fn push_clause_sql(clause: &MemoClause, sql: &mut String, bind_values: &mut Vec<Value>) {
    match clause {
        MemoClause::Active => sql.push_str(" AND memos.is_deleted = 0"),
        MemoClause::TitleOrDetailContains(keyword) => {
            // instr() is a plain substring test; LIKE would treat % and _ as wildcards.
            sql.push_str(
                " AND (instr(memos.title, ?) > 0 OR instr(COALESCE(memos.detail, ''), ?) > 0)",
            );
            bind_values.push(Value::Text(keyword.clone()));
            bind_values.push(Value::Text(keyword.clone()));
        }
        MemoClause::CreatedFrom(from) => {
            sql.push_str(" AND memos.created_at >= ?");
            bind_values.push(Value::Text(format_created_at(*from)));
        }
        MemoClause::CreatedTo(to) => {
            sql.push_str(" AND memos.created_at <= ?");
            bind_values.push(Value::Text(format_created_at(*to)));
        }
        MemoClause::HasAnyTag(names) if names.is_empty() => sql.push_str(" AND 0"),
        MemoClause::HasAnyTag(names) => {
            let placeholders = vec!["?"; names.len()].join(", ");
            sql.push_str(&format!(
                " AND EXISTS (
                    SELECT 1
                    FROM memo_tags mt
                    INNER JOIN tags t ON t.id = mt.tag_id
                    WHERE mt.memo_id = memos.id
                      AND t.name IN ({placeholders})
                )"
            ));
            bind_values.extend(names.iter().cloned().map(Value::Text));
        }
    }
}

fn replace_tag_links(conn: &Connection, memo_id: MemoId, tags: &[Tag]) -> RepoResult<()> {
    conn.execute("DELETE FROM memo_tags WHERE memo_id = ?1;", [memo_id])?;

    for tag in tags {
        // Unknown tags are skipped: memos link to the vocabulary, they never extend it.
        match tag.id {
            Some(tag_id) => conn.execute(
                "INSERT OR IGNORE INTO memo_tags (memo_id, tag_id)
                 SELECT ?1, id FROM tags WHERE id = ?2;",
                params![memo_id, tag_id],
            )?,
            None => conn.execute(
                "INSERT OR IGNORE INTO memo_tags (memo_id, tag_id)
                 SELECT ?1, id FROM tags WHERE name = ?2;",
                params![memo_id, tag.name.as_str()],
            )?,
        };
    }

    Ok(())
}

fn load_tags_for_memo(conn: &Connection, memo_id: MemoId) -> RepoResult<Vec<Tag>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.name, t.is_deleted
         FROM memo_tags mt
         INNER JOIN tags t ON t.id = mt.tag_id
         WHERE mt.memo_id = ?1
         ORDER BY t.id ASC;",
    )?;
    let mut rows = stmt.query([memo_id])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(Tag {
            id: Some(row.get("id")?),
            name: row.get("name")?,
            is_deleted: parse_deleted_flag(row.get("is_deleted")?, "tags.is_deleted")?,
        });
    }
    Ok(tags)
}

fn parse_memo_row(conn: &Connection, row: &Row<'_>) -> RepoResult<Memo> {
    let id: MemoId = row.get("id")?;
    let created_at_text: String = row.get("created_at")?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_text, CREATED_AT_PARSE_FORMAT)
        .map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid created_at value `{created_at_text}` in memos.created_at"
            ))
        })?;

    Ok(Memo {
        id: Some(id),
        title: row.get("title")?,
        detail: row.get("detail")?,
        created_at,
        is_deleted: parse_deleted_flag(row.get("is_deleted")?, "memos.is_deleted")?,
        tags: load_tags_for_memo(conn, id)?,
    })
}

fn format_created_at(value: NaiveDateTime) -> String {
    value.format(CREATED_AT_WRITE_FORMAT).to_string()
}
