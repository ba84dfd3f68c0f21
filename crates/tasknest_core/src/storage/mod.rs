//! Key-value storage contracts and backends.
//!
//! # Responsibility
//! - Define the string-keyed, string-valued store the snapshot lives in.
//! - Provide an in-memory backend and a SQLite-backed backend.
//!
//! # Invariants
//! - `set` fully replaces any previous value for the key.
//! - Backends hold no business logic; values are opaque strings.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Backend failure while reading or writing one entry.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Backend refused the write (for example quota or read-only media).
    Rejected { key: String, reason: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Rejected { key, reason } => {
                write!(f, "store rejected write for key `{key}`: {reason}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Rejected { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed persistent store.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}
