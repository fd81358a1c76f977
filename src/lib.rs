//! Client store: customers with their purchased items.
//!
//! Every write recomputes the `brands` and `sizes` summaries of a client from
//! its embedded items before the record reaches the database.

use crate::db::{DbInitError, establish_connection_pool, run_migrations};
use crate::models::config::StoreConfig;
use crate::repository::DieselRepository;

pub mod db;
pub mod domain;
mod error_conversions;
pub mod forms;
pub mod models;
pub mod repository;
pub mod schema;
pub mod services;

/// Opens the store described by `config`, applies pending migrations and
/// returns the repository callers should share.
pub fn init_repository(config: &StoreConfig) -> Result<DieselRepository, DbInitError> {
    let pool = establish_connection_pool(config).map_err(|e| {
        log::error!("Failed to establish database connection: {e}");
        DbInitError::from(e)
    })?;

    run_migrations(&pool)?;

    log::info!("Client store ready at {}", config.database_url);
    Ok(DieselRepository::new(pool))
}
