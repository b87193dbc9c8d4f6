//! Memo query predicates and sort options.
//!
//! # Responsibility
//! - Express optional filter combinations as an ordered list of named
//!   clauses, AND-combined.
//! - Keep the predicate storage-agnostic; repositories translate clauses
//!   into their own query language.
//!
//! # Invariants
//! - Clause order is insertion order; evaluation result does not depend on it.
//! - An empty filter matches every memo, including deleted ones.

use crate::model::memo::Memo;
use chrono::NaiveDateTime;

/// One named predicate over a memo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoClause {
    /// `is_deleted = false`.
    Active,
    /// Title or detail contains the text as a case-sensitive substring.
    TitleOrDetailContains(String),
    /// `created_at >= from`.
    CreatedFrom(NaiveDateTime),
    /// `created_at <= to`.
    CreatedTo(NaiveDateTime),
    /// At least one linked tag name is in the list.
    HasAnyTag(Vec<String>),
}

impl MemoClause {
    /// Stable clause name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::TitleOrDetailContains(_) => "title_or_detail_contains",
            Self::CreatedFrom(_) => "created_from",
            Self::CreatedTo(_) => "created_to",
            Self::HasAnyTag(_) => "has_any_tag",
        }
    }

    /// Evaluates this clause against an in-memory memo.
    pub fn matches(&self, memo: &Memo) -> bool {
        match self {
            Self::Active => memo.is_active(),
            Self::TitleOrDetailContains(keyword) => {
                memo.title.contains(keyword.as_str())
                    || memo
                        .detail
                        .as_deref()
                        .is_some_and(|detail| detail.contains(keyword.as_str()))
            }
            Self::CreatedFrom(from) => memo.created_at >= *from,
            Self::CreatedTo(to) => memo.created_at <= *to,
            Self::HasAnyTag(names) => memo
                .tags
                .iter()
                .any(|tag| names.iter().any(|name| *name == tag.name)),
        }
    }
}

/// AND-combination of [`MemoClause`] values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoFilter {
    clauses: Vec<MemoClause>,
}

impl MemoFilter {
    /// Creates a filter with no clauses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter restricted to active memos.
    pub fn active() -> Self {
        Self::new().and(MemoClause::Active)
    }

    /// Appends one clause.
    pub fn and(mut self, clause: MemoClause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Appends a clause built from `value` only when it is present.
    pub fn and_if<T>(self, value: Option<T>, clause: impl FnOnce(T) -> MemoClause) -> Self {
        match value {
            Some(value) => self.and(clause(value)),
            None => self,
        }
    }

    pub fn clauses(&self) -> &[MemoClause] {
        &self.clauses
    }

    /// Clause names in insertion order, joined by `,` for log lines.
    pub fn clause_names(&self) -> String {
        self.clauses
            .iter()
            .map(MemoClause::name)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Returns whether every clause holds for `memo`.
    pub fn matches(&self, memo: &Memo) -> bool {
        self.clauses.iter().all(|clause| clause.matches(memo))
    }
}

/// Ordering direction for sorted memo reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parses a caller-supplied direction parameter.
    ///
    /// Only the exact literal `"desc"` selects [`SortDirection::Desc`]; any
    /// other input, including `None` and `"DESC"`, falls back to ascending.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sort specification for memo reads. Only `created_at` is sortable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoSort {
    pub direction: SortDirection,
}

impl MemoSort {
    pub fn by_created_at(direction: SortDirection) -> Self {
        Self { direction }
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoClause, MemoFilter, SortDirection};
    use crate::model::memo::Memo;
    use crate::model::tag::Tag;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn and_if_skips_absent_values() {
        let filter = MemoFilter::active()
            .and_if(Some(at(2025, 2, 1)), MemoClause::CreatedFrom)
            .and_if(None, MemoClause::CreatedTo);
        assert_eq!(filter.clause_names(), "active,created_from");
    }

    #[test]
    fn empty_filter_matches_deleted_memo() {
        let mut memo = Memo::new("今日のできごと");
        memo.soft_delete();
        assert!(MemoFilter::new().matches(&memo));
        assert!(!MemoFilter::active().matches(&memo));
    }

    #[test]
    fn keyword_clause_checks_title_and_detail() {
        let mut memo = Memo::new("果物");
        memo.detail = Some("バナナ".to_string());
        assert!(MemoClause::TitleOrDetailContains("バナナ".to_string()).matches(&memo));
        assert!(MemoClause::TitleOrDetailContains("果".to_string()).matches(&memo));
        assert!(!MemoClause::TitleOrDetailContains("りんご".to_string()).matches(&memo));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let memo = Memo::with_created_at("3月の仕事", at(2025, 3, 31));
        let filter = MemoFilter::active()
            .and(MemoClause::CreatedFrom(at(2025, 3, 31)))
            .and(MemoClause::CreatedTo(at(2025, 3, 31)));
        assert!(filter.matches(&memo));
    }

    #[test]
    fn tag_clause_matches_any_listed_name() {
        let mut memo = Memo::new("3月の仕事");
        memo.tags.push(Tag::new("仕事"));
        let clause = MemoClause::HasAnyTag(vec!["旅行".to_string(), "仕事".to_string()]);
        assert!(clause.matches(&memo));
        assert!(!MemoClause::HasAnyTag(vec!["旅行".to_string()]).matches(&memo));
    }

    #[test]
    fn only_exact_desc_sorts_descending() {
        assert_eq!(SortDirection::from_param(Some("desc")), SortDirection::Desc);
        assert_eq!(SortDirection::from_param(Some("DESC")), SortDirection::Asc);
        assert_eq!(SortDirection::from_param(Some("asc")), SortDirection::Asc);
        assert_eq!(SortDirection::from_param(Some("")), SortDirection::Asc);
        assert_eq!(SortDirection::from_param(None), SortDirection::Asc);
    }
}
