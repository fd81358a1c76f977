//! Database connection helpers.
//!
//! This module owns the Diesel connection pool for the SQLite file backing the
//! client store, the per-connection pragmas the store relies on (foreign keys
//! are required for embedded items to follow their client), and the embedded
//! schema migrations.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use log::{error, info};
use thiserror::Error;

use crate::models::config::StoreConfig;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Schema migrations compiled into the crate from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug, Error)]
pub enum DbInitError {
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),

    #[error("failed to apply migrations: {0}")]
    Migration(String),
}

#[derive(Debug)]
/// Options that are applied each time a connection is acquired from the pool.
pub struct ConnectionOptions {
    /// Enable Write Ahead Logging mode for SQLite.
    pub enable_wal: bool,
    /// Timeout to wait for a locked database.
    pub busy_timeout: Option<Duration>,
}

impl From<&StoreConfig> for ConnectionOptions {
    fn from(config: &StoreConfig) -> Self {
        Self {
            enable_wal: config.enable_wal,
            busy_timeout: (config.busy_timeout_ms > 0)
                .then(|| Duration::from_millis(config.busy_timeout_ms)),
        }
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        (|| {
            // Item rows cascade with their client.
            conn.batch_execute("PRAGMA foreign_keys = ON;")?;
            if self.enable_wal {
                conn.batch_execute("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
            }
            if let Some(d) = self.busy_timeout {
                conn.batch_execute(&format!("PRAGMA busy_timeout = {};", d.as_millis()))?;
            }
            Ok(())
        })()
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a Diesel connection pool for the configured database.
pub fn establish_connection_pool(config: &StoreConfig) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(&config.database_url);
    Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions::from(config)))
        .build(manager)
}

/// Retrieve a connection from the pool
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    match pool.get() {
        Ok(conn) => Ok(conn),
        Err(e) => {
            error!("Failed to get connection from pool: {e}");
            Err(e)
        }
    }
}

/// Apply every pending embedded migration.
pub fn run_migrations(pool: &DbPool) -> Result<(), DbInitError> {
    let mut pooled = get_connection(pool)?;
    let conn: &mut SqliteConnection = &mut pooled;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DbInitError::Migration(e.to_string()))?;
    info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}
