use std::path::Path;

use pushkind_closet::init_repository;
use pushkind_closet::models::config::StoreConfig;

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new("test_pool_connection.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
    assert!(Path::new(&test_db.config().database_url).exists());
}

#[test]
fn test_init_repository_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig {
        database_url: dir.path().join("init.db").to_string_lossy().into_owned(),
        enable_wal: false,
        busy_timeout_ms: 0,
    };

    assert!(init_repository(&config).is_ok());
    // Second start finds no pending migrations.
    assert!(init_repository(&config).is_ok());
}
