//! Startup entry point for the memo store.
//!
//! # Responsibility
//! - Open (and migrate) the database file.
//! - Seed the master tag vocabulary.
//! - Print a short deterministic summary for local sanity checks.
//!
//! Usage: `memo_cli [DB_PATH]`. `DB_PATH` falls back to `MEMO_DB_PATH`, then
//! `memo.db`. Setting `MEMO_LOG_DIR` (absolute) enables file logging at
//! `MEMO_LOG_LEVEL`, or the build-mode default level.

use log::error;
use memo_core::db::open_db;
use memo_core::{
    core_version, default_log_level, init_logging, seed_master_tags, SqliteTagRepository,
    TagService,
};
use std::error::Error;
use std::process::ExitCode;

const DEFAULT_DB_PATH: &str = "memo.db";

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var("MEMO_LOG_DIR") {
        let level =
            std::env::var("MEMO_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let db_path = resolve_db_path(std::env::args().nth(1), std::env::var("MEMO_DB_PATH").ok());

    match run(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("memo_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Picks the database path: command-line argument, then `MEMO_DB_PATH`, then `memo.db`.
fn resolve_db_path(arg: Option<String>, env: Option<String>) -> String {
    arg.or(env).unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
}

fn run(db_path: &str) -> Result<(), Box<dyn Error>> {
    let conn = open_db(db_path)?;
    let repo = SqliteTagRepository::try_new(&conn)?;
    let inserted = seed_master_tags(&repo)?;
    let tags = TagService::new(repo).find_all()?;

    println!("memo_core version={}", core_version());
    println!("db={db_path} tags_seeded={inserted} tags_total={}", tags.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::resolve_db_path;

    #[test]
    fn argument_wins_over_env_and_default() {
        let path = resolve_db_path(Some("arg.db".to_string()), Some("env.db".to_string()));
        assert_eq!(path, "arg.db");
    }

    #[test]
    fn env_is_used_without_argument() {
        assert_eq!(resolve_db_path(None, Some("env.db".to_string())), "env.db");
    }

    #[test]
    fn falls_back_to_memo_db() {
        assert_eq!(resolve_db_path(None, None), "memo.db");
    }
}
