//! CLI smoke entry point.
//!
//! Usage: `lazyplan_cli [db_path]`. The path falls back to
//! `LAZYPLAN_DB_PATH`, then `<temp_dir>/lazyplan.sqlite3`.
//!
//! Prints core linkage info followed by plan counts for the database.

use lazyplan_core::{
    open_db, PlanOutcome, PlanService, SqliteProjectRepository, SqliteSettingsRepository,
    SqliteTodoRepository, SystemClock,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("lazyplan_core ping={}", lazyplan_core::ping());
    println!("lazyplan_core version={}", lazyplan_core::core_version());

    let db_path = resolve_db_path(std::env::args().nth(1));
    match print_plan(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("plan error db={} error={err}", db_path.display());
            ExitCode::FAILURE
        }
    }
}

fn resolve_db_path(arg: Option<String>) -> PathBuf {
    arg.or_else(|| std::env::var("LAZYPLAN_DB_PATH").ok())
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("lazyplan.sqlite3"))
}

fn print_plan(db_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(db_path)?;
    let service = PlanService::new(
        SqliteTodoRepository::try_new(&conn)?,
        SqliteProjectRepository::try_new(&conn)?,
        SqliteSettingsRepository::try_new(&conn)?,
        SystemClock,
    );

    match service.load()? {
        PlanOutcome::Holiday => println!("plan holiday=true"),
        PlanOutcome::Sections(sections) => {
            let summary = sections.summary();
            println!(
                "plan missed={} today={} later={} badge={}",
                summary.total_missed,
                summary.total_today,
                summary.total_later,
                summary.badge_count()
            );
        }
    }
    Ok(())
}
