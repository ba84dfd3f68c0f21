//! SQLite-backed key-value store.
//!
//! # Invariants
//! - Entries live in the `kv_entries` table created by migration 1.
//! - Writes are upserts; `updated_at` tracks the last write in epoch millis.

use super::{KeyValueStore, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Persistent store over a migrated SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Lists stored keys in ascending order.
    pub fn keys(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_entries ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
