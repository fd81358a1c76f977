#![allow(dead_code)]

use pushkind_closet::db::{DbPool, establish_connection_pool, run_migrations};
use pushkind_closet::models::config::StoreConfig;
use pushkind_closet::repository::DieselRepository;
use tempfile::TempDir;

/// SQLite database in a temporary directory, removed on drop.
pub struct TestDb {
    _dir: TempDir,
    config: StoreConfig,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = StoreConfig {
            database_url: dir.path().join(name).to_string_lossy().into_owned(),
            enable_wal: true,
            busy_timeout_ms: 5_000,
        };
        let pool = establish_connection_pool(&config).expect("build pool");
        run_migrations(&pool).expect("apply migrations");

        Self {
            _dir: dir,
            config,
            pool,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}
