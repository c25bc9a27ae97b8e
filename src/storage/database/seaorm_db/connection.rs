use crate::config::DatabaseConfig;
use crate::utils::error::Result;
use sea_orm::*;
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::super::migration::Migrator;
use super::types::{DatabaseBackendType, SeaOrmDatabase};

impl SeaOrmDatabase {
    /// Create a new database connection
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let backend_type = if config.url.starts_with("sqlite") {
            DatabaseBackendType::SQLite
        } else {
            DatabaseBackendType::PostgreSQL
        };

        if backend_type == DatabaseBackendType::SQLite {
            ensure_sqlite_dir(&config.url).await?;
        }

        let mut opt = ConnectOptions::new(config.url.clone());
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(3600))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        let db = Database::connect(opt).await?;

        info!("Database connection established ({:?})", backend_type);
        Ok(Self { db, backend_type })
    }

    /// Wrap an existing connection
    pub fn from_connection(db: DatabaseConnection) -> Self {
        let backend_type = match db.get_database_backend() {
            DbBackend::Sqlite => DatabaseBackendType::SQLite,
            _ => DatabaseBackendType::PostgreSQL,
        };
        Self { db, backend_type }
    }

    /// Get the current backend type
    pub fn backend_type(&self) -> DatabaseBackendType {
        self.backend_type
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations...");
        Migrator::up(&self.db, None).await.map_err(|e| {
            warn!("Migration failed: {}", e);
            e
        })?;
        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get the underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        debug!("Performing database health check");
        self.db.ping().await?;
        debug!("Database health check passed");
        Ok(())
    }
}

/// SQLite creates the file on `mode=rwc` but not its directory
async fn ensure_sqlite_dir(url: &str) -> Result<()> {
    let path = url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }

    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !tokio::fs::try_exists(parent).await? {
            debug!("Creating database directory {:?}", parent);
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}
