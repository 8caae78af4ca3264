//! Async database connection using sqlx
//!
//! Provides async database operations using sqlx with SQLite.
//! Migrations are managed via sqlx's `migrate!()` macro using SQL
//! files in the workspace `migrations/` directory.

use std::{path::Path, str::FromStr};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::{debug, info, instrument};

use crate::config::DatabaseConfig;

/// Error type for async database operations
#[derive(Debug, thiserror::Error)]
pub enum AsyncDatabaseError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Configuration for async database connection
#[derive(Debug, Clone)]
pub struct AsyncDatabaseConfig {
    /// Database URL (e.g., "sqlite:data.db" or "sqlite::memory:")
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to keep open
    pub min_connections: u32,
    /// Enable WAL mode for better concurrency
    pub wal_mode: bool,
    /// Enable foreign keys
    pub foreign_keys: bool,
}

impl Default for AsyncDatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:wadesk.db".to_string(),
            max_connections: 5,
            min_connections: 1,
            wal_mode: true,
            foreign_keys: true,
        }
    }
}

impl AsyncDatabaseConfig {
    /// Create an in-memory database configuration for testing
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1, // Single connection for in-memory
            min_connections: 1,
            wal_mode: false, // Not supported for in-memory
            foreign_keys: true,
        }
    }

    /// Build from application configuration
    ///
    /// A path of `:memory:` selects an in-memory database.
    #[must_use]
    pub fn from_app_config(config: &DatabaseConfig) -> Self {
        if config.is_in_memory() {
            return Self::in_memory();
        }
        Self {
            max_connections: config.max_connections.max(1),
            ..Self::file(&config.path)
        }
    }

    /// Create a file-based database configuration
    #[must_use]
    pub fn file(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().display().to_string();
        Self {
            url: format!("sqlite:{path_str}"),
            ..Default::default()
        }
    }
}

/// Async database connection pool
#[derive(Debug, Clone)]
pub struct AsyncDatabase {
    pool: SqlitePool,
}

impl AsyncDatabase {
    /// Create a new async database connection pool
    #[instrument(skip_all, fields(url = %config.url))]
    pub async fn new(config: &AsyncDatabaseConfig) -> Result<Self, AsyncDatabaseError> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(config.foreign_keys);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_with(options)
            .await?;

        // Enable WAL mode if configured
        if config.wal_mode && !config.url.contains(":memory:") {
            sqlx::query("PRAGMA journal_mode=WAL")
                .execute(&pool)
                .await?;
            debug!("WAL mode enabled");
        }

        // Set busy timeout for concurrent access
        sqlx::query("PRAGMA busy_timeout=5000")
            .execute(&pool)
            .await?;

        // Set synchronous mode to NORMAL for WAL mode (good balance of safety and speed)
        if config.wal_mode && !config.url.contains(":memory:") {
            sqlx::query("PRAGMA synchronous=NORMAL")
                .execute(&pool)
                .await?;
        }

        info!(
            max_connections = config.max_connections,
            "Async database pool created"
        );

        Ok(Self { pool })
    }

    /// Create an in-memory database for testing
    pub async fn in_memory() -> Result<Self, AsyncDatabaseError> {
        Self::new(&AsyncDatabaseConfig::in_memory()).await
    }

    /// Get the underlying pool for raw queries
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations from the workspace `migrations/` directory
    #[instrument(skip(self))]
    pub async fn migrate(&self) -> Result<(), AsyncDatabaseError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;

        info!("Database migrations completed");
        Ok(())
    }

    /// Check that the pool can still serve queries
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Close all connections in the pool
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Database pool closed");
    }
}
