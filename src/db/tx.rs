//! Transaction scoping: run a closure against a live transaction, commit on
//! success, roll back on failure.
//!
//! The helper is generic over the transaction handle so its semantics are
//! testable without a running database.

use super::statement::Statement;
use crate::error::StoreError;
use async_trait::async_trait;
use futures::future::BoxFuture;

/// Statement execution against a live transaction. A handle is exclusive to
/// one task; it must not be shared.
#[async_trait]
pub trait TxExecutor: Send {
    async fn execute(&mut self, stmt: &Statement) -> Result<u64, sqlx::Error>;
}

/// Commit/rollback control. Consuming: a transaction ends exactly once.
#[async_trait]
pub trait TransactionControl: Send {
    async fn commit(self) -> Result<(), StoreError>;
    async fn rollback(self) -> Result<(), StoreError>;
}

/// Closure form accepted by [`crate::db::Driver::transaction`].
pub type TxFn = Box<
    dyn for<'t> FnOnce(&'t mut dyn TxExecutor) -> BoxFuture<'t, Result<(), StoreError>> + Send,
>;

/// Runs `op` against an already-begun transaction.
///
/// Commits exactly once when `op` succeeds and never rolls back; rolls back
/// exactly once when `op` fails and never commits. A commit failure surfaces
/// verbatim. A rollback failure surfaces as
/// [`StoreError::RollbackFailed`], led by the rollback error with the error
/// from `op` kept alongside it. Single pass; retry policy belongs to callers.
pub async fn run<T, F>(mut tx: T, op: F) -> Result<(), StoreError>
where
    T: TransactionControl + TxExecutor,
    F: for<'t> FnOnce(&'t mut dyn TxExecutor) -> BoxFuture<'t, Result<(), StoreError>> + Send,
{
    match op(&mut tx).await {
        Ok(()) => tx.commit().await,
        Err(original) => match tx.rollback().await {
            Ok(()) => Err(original),
            Err(rollback) => Err(StoreError::RollbackFailed {
                rollback: Box::new(rollback),
                original: Box::new(original),
            }),
        },
    }
}
