use std::time::Duration;

use sqlx::{
    PgPool, Postgres, Transaction,
    postgres::PgPoolOptions,
};

pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

use error::Result;

/// Connection pool settings for [`Database::connect`].
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Upper bound for lock waits and statements inside a write transaction.
    pub transaction_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
            transaction_timeout: Duration::from_millis(5000),
        }
    }
}

/// Shared handle to the relational store.
///
/// Cloning is cheap; all clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
    transaction_timeout: Duration,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::connect(database_url, PoolSettings::default()).await
    }

    pub async fn connect(database_url: &str, settings: PoolSettings) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect(database_url)
            .await?;

        Ok(Self {
            pool,
            transaction_timeout: settings.transaction_timeout,
        })
    }

    /// Wrap an existing pool, e.g. one handed out by `#[sqlx::test]`.
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool,
            transaction_timeout: PoolSettings::default().transaction_timeout,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Open a write transaction whose lock waits and statements are bounded
    /// by the configured transaction timeout.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await?;

        let timeout_ms = self.transaction_timeout.as_millis();
        sqlx::query(&format!("SET LOCAL lock_timeout = {timeout_ms}"))
            .execute(&mut *tx)
            .await?;
        sqlx::query(&format!("SET LOCAL statement_timeout = {timeout_ms}"))
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }
}
