#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use memo_core::{
    Memo, MemoFilter, MemoId, MemoRepository, MemoSort, RepoResult, SqliteMemoRepository,
};
use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Stores a memo directly, bypassing the service rules.
pub fn insert_memo(conn: &Connection, title: &str, created_at: NaiveDateTime, deleted: bool) -> Memo {
    let repo = SqliteMemoRepository::try_new(conn).unwrap();
    let mut memo = Memo::with_created_at(title, created_at);
    memo.is_deleted = deleted;
    repo.save(&memo).unwrap()
}

/// Ordered record of repository method names invoked.
#[derive(Debug, Default)]
pub struct CallLog {
    calls: RefCell<Vec<&'static str>>,
}

impl CallLog {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|call| **call == name).count()
    }

    fn record(&self, name: &'static str) {
        self.calls.borrow_mut().push(name);
    }
}

/// Delegating repository that records every call for later assertions.
pub struct RecordingMemoRepository<R> {
    inner: R,
    log: Rc<CallLog>,
}

impl<R: MemoRepository> RecordingMemoRepository<R> {
    pub fn new(inner: R) -> (Self, Rc<CallLog>) {
        let log = Rc::new(CallLog::default());
        (
            Self {
                inner,
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl<R: MemoRepository> MemoRepository for RecordingMemoRepository<R> {
    fn find_by_id(&self, id: MemoId) -> RepoResult<Option<Memo>> {
        self.log.record("find_by_id");
        self.inner.find_by_id(id)
    }

    fn find_by_id_active(&self, id: MemoId) -> RepoResult<Option<Memo>> {
        self.log.record("find_by_id_active");
        self.inner.find_by_id_active(id)
    }

    fn save(&self, memo: &Memo) -> RepoResult<Memo> {
        self.log.record("save");
        self.inner.save(memo)
    }

    fn find_all(&self, filter: &MemoFilter) -> RepoResult<Vec<Memo>> {
        self.log.record("find_all");
        self.inner.find_all(filter)
    }

    fn find_all_sorted(&self, filter: &MemoFilter, sort: MemoSort) -> RepoResult<Vec<Memo>> {
        self.log.record("find_all_sorted");
        self.inner.find_all_sorted(filter, sort)
    }
}
