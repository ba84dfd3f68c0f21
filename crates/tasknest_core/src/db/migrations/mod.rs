//! Versioned schema scripts for the `kv_entries` table.
//!
//! Pending scripts run inside one transaction; the outcome is returned as a
//! [`MigrationReport`] and logged as a `db_migrate` event.

use crate::db::{DbError, DbResult};
use log::{debug, error, info};
use rusqlite::Connection;

/// Ordered `(version, sql)` pairs; versions strictly increase.
const SCRIPTS: &[(u32, &str)] = &[(1, include_str!("0001_kv_entries.sql"))];

/// What one migration run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub from_version: u32,
    pub to_version: u32,
    /// Versions applied by this run, ascending. Empty when already current.
    pub applied: Vec<u32>,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Highest schema version this build can write.
pub fn latest_version() -> u32 {
    SCRIPTS.last().map_or(0, |(version, _)| *version)
}

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Brings `conn` up to [`latest_version`].
pub fn apply_migrations(conn: &mut Connection) -> DbResult<MigrationReport> {
    run_scripts(conn, SCRIPTS)
}

fn run_scripts(conn: &mut Connection, scripts: &[(u32, &str)]) -> DbResult<MigrationReport> {
    let from_version = schema_version(conn)?;
    let supported = scripts.last().map_or(0, |(version, _)| *version);

    if from_version > supported {
        error!(
            "event=db_migrate module=db status=error error_code=schema_too_new found={from_version} supported={supported}"
        );
        return Err(DbError::SchemaTooNew {
            found: from_version,
            supported,
        });
    }

    let pending: Vec<(u32, &str)> = scripts
        .iter()
        .copied()
        .filter(|(version, _)| *version > from_version)
        .collect();
    if pending.is_empty() {
        debug!("event=db_migrate module=db status=current version={from_version}");
        return Ok(MigrationReport {
            from_version,
            to_version: from_version,
            applied: Vec::new(),
        });
    }

    let tx = conn.transaction()?;
    for (version, sql) in &pending {
        let step = tx
            .execute_batch(sql)
            .and_then(|()| tx.execute_batch(&format!("PRAGMA user_version = {version};")));
        if let Err(source) = step {
            error!(
                "event=db_migrate module=db status=error error_code=script_failed version={version} error={source}"
            );
            return Err(DbError::Migration {
                version: *version,
                source,
            });
        }
    }
    tx.commit()?;

    let applied: Vec<u32> = pending.iter().map(|(version, _)| *version).collect();
    let to_version = supported;
    info!(
        "event=db_migrate module=db status=ok from={from_version} to={to_version} applied={applied:?}"
    );
    Ok(MigrationReport {
        from_version,
        to_version,
        applied,
    })
}
