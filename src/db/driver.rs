//! Postgres execution driver: pool ownership, passthrough reads and writes,
//! and transaction-scoped execution.

use super::statement::Statement;
use super::tx::{self, TransactionControl, TxExecutor, TxFn};
use crate::config::DatabaseConfig;
use crate::error::StoreError;
use async_trait::async_trait;
use futures::future::BoxFuture;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::PgPool;
use std::time::Duration;
use tracing::debug;

/// Execution boundary consumed by the repositories. Production code uses
/// [`Postgres`]; tests substitute recording fakes.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Executes a single write statement and returns the affected-row count.
    async fn execute(&self, stmt: &Statement) -> Result<u64, sqlx::Error>;

    /// Begins a transaction, runs `op` against it, commits on success and
    /// rolls back on failure.
    async fn transaction(&self, op: TxFn) -> Result<(), StoreError>;
}

/// Owns the connection pool. The pool handles its own internal locking, so a
/// `Postgres` is cheap to clone and safe to share across tasks.
#[derive(Debug, Clone)]
pub struct Postgres {
    pool: PgPool,
}

impl Postgres {
    /// Connects with the given settings and verifies connectivity lazily via
    /// the pool. Returns an error instead of terminating so callers decide
    /// their own retry policy.
    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(cfg.pool.max_connections)
            .min_connections(cfg.pool.min_connections)
            .acquire_timeout(Duration::from_secs(cfg.connect_timeout_seconds))
            .max_lifetime(Duration::from_secs(cfg.pool.max_lifetime_minutes * 60))
            .connect(&cfg.url())
            .await
            .map_err(StoreError::Connect)?;
        Ok(Self { pool })
    }

    /// Wraps a pool the host application already configured.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies the bundled schema migrations.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Passthrough read.
    pub async fn query(&self, stmt: &Statement) -> Result<Vec<PgRow>, sqlx::Error> {
        stmt.to_query().fetch_all(&self.pool).await
    }

    /// Passthrough write; returns the affected-row count.
    pub async fn execute(&self, stmt: &Statement) -> Result<u64, sqlx::Error> {
        debug!(sql = stmt.sql(), "executing statement");
        let result = stmt.to_query().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Transaction-scoped execution; see [`tx::run`] for the exact commit and
    /// rollback semantics.
    pub async fn do_transaction<F>(&self, op: F) -> Result<(), StoreError>
    where
        F: for<'t> FnOnce(&'t mut dyn TxExecutor) -> BoxFuture<'t, Result<(), StoreError>> + Send,
    {
        let tx = PgTx {
            inner: self.pool.begin().await.map_err(StoreError::Begin)?,
        };
        tx::run(tx, op).await
    }
}

#[async_trait]
impl Driver for Postgres {
    async fn execute(&self, stmt: &Statement) -> Result<u64, sqlx::Error> {
        Postgres::execute(self, stmt).await
    }

    async fn transaction(&self, op: TxFn) -> Result<(), StoreError> {
        self.do_transaction(op).await
    }
}

/// Live transaction handle. Exclusive to one task; ends exactly once through
/// commit or rollback.
pub struct PgTx {
    inner: sqlx::Transaction<'static, sqlx::Postgres>,
}

#[async_trait]
impl TxExecutor for PgTx {
    async fn execute(&mut self, stmt: &Statement) -> Result<u64, sqlx::Error> {
        debug!(sql = stmt.sql(), "executing statement in transaction");
        let result = stmt.to_query().execute(&mut *self.inner).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl TransactionControl for PgTx {
    async fn commit(self) -> Result<(), StoreError> {
        self.inner.commit().await.map_err(StoreError::Commit)
    }

    async fn rollback(self) -> Result<(), StoreError> {
        self.inner.rollback().await.map_err(StoreError::Rollback)
    }
}
