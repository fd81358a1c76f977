//! Configuration model loaded from external sources.

use std::env;

use config::{Config, ConfigError, Environment, File};
use dotenvy::dotenv;
use serde::Deserialize;

fn default_enable_wal() -> bool {
    true
}

fn default_busy_timeout_ms() -> u64 {
    30_000
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
/// Storage settings needed to open the client store.
pub struct StoreConfig {
    pub database_url: String,
    /// Enable SQLite Write Ahead Logging.
    #[serde(default = "default_enable_wal")]
    pub enable_wal: bool,
    /// How long a connection waits on a locked database.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

/// Loads [`StoreConfig`] from `config/default`, the `APP_ENV` profile
/// (defaults to `local`) and `APP_*` environment variables, in that order.
pub fn load_config() -> Result<StoreConfig, ConfigError> {
    dotenv().ok(); // Load .env file

    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        .add_source(File::with_name("config/default"))
        .add_source(File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(Environment::with_prefix("APP"))
        .build()?
        .try_deserialize::<StoreConfig>()
}
