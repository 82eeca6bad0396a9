use chrono::NaiveDate;
use safra_core::db::migrations::latest_version;
use safra_core::db::{open_db, open_db_in_memory, DbError};
use safra_core::{
    Account, AccountDraft, AccountKind, CollectionManager, CoreConfig, FarmStores, FixedClock,
    PersistencePolicy, SharedBackend, SlotBackend, SqliteSlotBackend, StoreError,
};
use rusqlite::Connection;
use std::sync::Arc;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "store_slots");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("safra.sqlite3");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "store_slots");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn slot_backend_rejects_unmigrated_connections() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteSlotBackend::try_new(conn).err().unwrap();
    match err {
        StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        } => {
            assert_eq!(expected_version, latest_version());
            assert_eq!(actual_version, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn slot_writes_replace_the_previous_payload() {
    let backend = SqliteSlotBackend::open_in_memory().unwrap();
    backend.write_slot("safra.items", "[1]").unwrap();
    backend.write_slot("safra.items", "[1,2]").unwrap();
    backend.write_slot("safra.accounts", "[]").unwrap();

    assert_eq!(
        backend.read_slot("safra.items").unwrap().as_deref(),
        Some("[1,2]")
    );
    assert_eq!(backend.read_slot("safra.sales").unwrap(), None);
    assert_eq!(
        backend.slot_keys().unwrap(),
        vec!["safra.accounts", "safra.items"]
    );
}

#[test]
fn records_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("safra.sqlite3");
    let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));

    let created = {
        let backend = SharedBackend::new(SqliteSlotBackend::open(&path).unwrap());
        let accounts: CollectionManager<Account> = CollectionManager::new(&backend)
            .with_clock(clock)
            .with_policy(PersistencePolicy::Strict);
        accounts
            .create(AccountDraft::new(
                AccountKind::Receivable,
                "Venda de soja",
                5000.0,
                "2024-04-01",
            ))
            .unwrap()
    };

    let config = CoreConfig {
        db_path: path,
        ..CoreConfig::default()
    };
    let reopened = FarmStores::open(&config).unwrap();
    assert_eq!(reopened.accounts.list(), vec![created]);
    assert!(reopened.slot_counts().contains(&("safra.accounts", 1)));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
