//! Startup seeding of the master tag vocabulary.
//!
//! Runs once at process start, outside request handling. Safe to re-run:
//! names that already exist are skipped.

use crate::model::tag::Tag;
use crate::repo::tag_repo::TagRepository;
use crate::repo::RepoResult;
use log::info;

/// Tag names every installation starts with.
pub const MASTER_TAG_NAMES: &[&str] = &[
    "仕事",
    "タスク",
    "報告書",
    "勉強法",
    "買い物",
    "趣味",
    "レシピ",
    "健康",
    "旅行",
    "映画",
    "音楽",
    "読書",
    "スポーツ",
    "その他",
];

/// Inserts every missing master tag and returns how many were inserted.
pub fn seed_master_tags<R: TagRepository>(repo: &R) -> RepoResult<usize> {
    let mut inserted = 0;
    for name in MASTER_TAG_NAMES {
        if repo.exists_by_name(name)? {
            continue;
        }
        repo.save(&Tag::new(*name))?;
        inserted += 1;
    }

    info!(
        "event=tag_seed module=seed status=ok inserted={} total_master={}",
        inserted,
        MASTER_TAG_NAMES.len()
    );
    Ok(inserted)
}
