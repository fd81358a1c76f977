//! Persistence ports for client records and their Diesel implementation.

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::{ClientEmail, ClientId};
use crate::repository::errors::RepositoryResult;

pub mod client;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Diesel-backed repository shared by every caller of the store.
///
/// Construct it once at startup and pass it by reference; clones share the
/// same connection pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    fn get_client_by_email(&self, email: &ClientEmail) -> RepositoryResult<Option<Client>>;
}

/// Write access to clients.
///
/// Implementations recompute `brands` and `sizes` from `items` before every
/// create or update and never store the caller's values for those fields.
pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(&self, client_id: ClientId, updates: &UpdateClient)
    -> RepositoryResult<Client>;
    fn delete_client(&self, client_id: ClientId) -> RepositoryResult<()>;
}
