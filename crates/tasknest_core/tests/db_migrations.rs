use rusqlite::Connection;
use tasknest_core::db::migrations::{apply_migrations, latest_version};
use tasknest_core::db::{open_db, open_db_in_memory, schema_version, DbError};
use tasknest_core::{KeyValueStore, SqliteStore, StoreError};

#[test]
fn fresh_database_reports_every_migration() {
    let mut conn = Connection::open_in_memory().unwrap();

    let report = apply_migrations(&mut conn).unwrap();
    assert_eq!(report.from_version, 0);
    assert_eq!(report.to_version, latest_version());
    assert_eq!(report.applied, (1..=latest_version()).collect::<Vec<_>>());

    let kv_table: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(kv_table, 1);
}

#[test]
fn opened_connection_is_already_current() {
    let mut conn = open_db_in_memory().unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert!(apply_migrations(&mut conn).unwrap().is_noop());
}

#[test]
fn reopening_a_snapshot_file_keeps_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasknest.sqlite3");

    let mut store = SqliteStore::open(&path).unwrap();
    store.set("categories", "[]").unwrap();
    store.set("darkMode", "true").unwrap();
    drop(store);

    let store = SqliteStore::from_connection(open_db(&path).unwrap());
    assert_eq!(store.keys().unwrap(), vec!["categories", "darkMode"]);
    assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("true"));
}

#[test]
fn snapshot_file_from_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 999;")
        .unwrap();

    let err = open_db(&path).unwrap_err();
    assert!(matches!(
        err,
        DbError::SchemaTooNew { found: 999, supported } if supported == latest_version()
    ));
    assert!(err.to_string().contains("999"));

    let store_err = SqliteStore::open(&path).err().expect("store open must fail");
    assert!(matches!(
        store_err,
        StoreError::Db(DbError::SchemaTooNew { .. })
    ));
}
