use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::config::DatabaseConfig;
use crate::Result;

mod filter;
mod properties;
mod schema;
mod stats;

/// Column list shared by every query that materializes a [`crate::models::Property`]
pub(crate) const PROPERTY_COLUMNS: &str = "unique_property_id, project_name, location, price, \
                                           area, property_type, pincode, landmark, amenities";

/// Read-mostly handle over the SQLite property store
#[derive(Debug, Clone)]
pub struct PropertyStore {
    pool: SqlitePool,
}

impl PropertyStore {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open an existing property database.
    ///
    /// A missing file is an error: the store is produced by the offline
    /// data-preparation step, never by the server.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        Self::open(config, false).await
    }

    /// Open the property database, creating the file when missing
    pub async fn create(config: &DatabaseConfig) -> Result<Self> {
        Self::open(config, true).await
    }

    async fn open(config: &DatabaseConfig, create_if_missing: bool) -> Result<Self> {
        let options =
            SqliteConnectOptions::from_str(&config.url)?.create_if_missing(create_if_missing);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Property store opened: url={}, max_connections={}",
            config.url,
            config.max_connections
        );

        Ok(Self::new(pool))
    }

    /// Private in-memory database with the schema applied.
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool is
    /// pinned to a single connection that never expires.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let store = Self::new(pool);
        store.init_schema().await?;
        Ok(store)
    }

    /// Get a reference to the database pool for raw queries
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
