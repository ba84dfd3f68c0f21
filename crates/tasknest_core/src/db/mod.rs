//! SQLite file backing the key-value snapshot store.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`.
//! - A file written by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use migrations::{schema_version, MigrationReport};
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or upgrading the snapshot database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file carries a schema this build does not know.
    SchemaTooNew { found: u32, supported: u32 },
    /// One migration script failed; nothing from the batch was committed.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "snapshot database error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "snapshot database has schema {found}, this build supports up to {supported}"
            ),
            Self::Migration { version, source } => {
                write!(f, "snapshot schema migration {version} failed: {source}")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
