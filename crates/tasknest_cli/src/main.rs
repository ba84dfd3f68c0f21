//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `tasknest_core` linkage and the configured snapshot store.
//! - Print a short, deterministic summary of the stored state.

use std::process::ExitCode;
use tasknest_core::{init_logging, CoreConfig, Session, SqliteStore};

fn main() -> ExitCode {
    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("tasknest: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = init_logging(config.log_level, log_dir) {
            eprintln!("tasknest: logging disabled: {err}");
        }
    }

    let store = match SqliteStore::open(&config.db_path) {
        Ok(store) => store,
        Err(err) => {
            log::error!("event=cli_start module=cli status=error error={err}");
            eprintln!(
                "tasknest: cannot open `{}`: {err}",
                config.db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };

    let session = Session::open(store, &config.ambient_preference());
    let state = session.state();
    let todo_count: usize = state
        .categories()
        .iter()
        .map(|category| category.todos.len())
        .sum();

    println!("tasknest_core version={}", tasknest_core::core_version());
    println!("db_path={}", config.db_path.display());
    println!(
        "categories={} todos={} dark_mode={}",
        state.categories().len(),
        todo_count,
        state.dark_mode()
    );
    for notice in session.notices() {
        println!("notice key={} message={}", notice.key, notice.message);
    }

    ExitCode::SUCCESS
}
