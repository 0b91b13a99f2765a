use std::sync::Arc;
use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use super::postgres::{PgProductRepository, PgPvzRepository, PgReceptionRepository, PgUserRepository};
use super::repository::Repositories;
use crate::config::DatabaseConfig;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Owns the connection pool and wires the Postgres adapters onto it.
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Self::ACQUIRE_TIMEOUT)
            .connect(&config.url)
            .await?;

        info!(max_connections = config.max_connections, "Created database pool");
        Ok(Self { pool })
    }

    /// Applies `migrations/` in order; already applied files are skipped.
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            pvz: Arc::new(PgPvzRepository::new(self.pool.clone())),
            receptions: Arc::new(PgReceptionRepository::new(self.pool.clone())),
            products: Arc::new(PgProductRepository::new(self.pool.clone())),
            users: Arc::new(PgUserRepository::new(self.pool.clone())),
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
