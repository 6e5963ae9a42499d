//! Error taxonomy for the persistence layer.

use thiserror::Error;

/// Errors returned by statement builders, the driver, and the repositories.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Statement builders refuse empty batches instead of emitting
    /// syntactically invalid SQL.
    #[error("cannot build a statement for an empty {0} batch")]
    EmptyBatch(&'static str),

    #[error("failed to connect to postgres: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A statement failed to execute. `op` identifies the repository
    /// operation that issued it.
    #[error("{op} failed: {source}")]
    Execute {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to begin transaction: {0}")]
    Begin(#[source] sqlx::Error),

    #[error("failed to commit transaction: {0}")]
    Commit(#[source] sqlx::Error),

    #[error("failed to roll back transaction: {0}")]
    Rollback(#[source] sqlx::Error),

    /// Rollback itself failed after the transaction body errored. The
    /// rollback error leads; the error that triggered the rollback is kept
    /// alongside it.
    #[error("{rollback}; original error: {original}")]
    RollbackFailed {
        rollback: Box<StoreError>,
        original: Box<StoreError>,
    },
}
