//! Database layer: statement construction and Postgres execution.
//!
//! This module is split into focused submodules:
//! - `statement`: the parameterized [`Statement`] type and its legacy literal
//!   rendering.
//! - `query`: pure statement builders, one per table and operation.
//! - `tx`: transaction scoping traits and the generic commit/rollback helper.
//! - `driver`: the pooled [`Postgres`] driver and the [`Driver`] abstraction.
//! - `repo`: repository implementations over a [`Driver`].
//!
//! External modules should import from `habit_store::db`; the commonly used
//! types are re-exported here.

pub mod driver;
pub mod query;
pub mod repo;
pub mod statement;
pub mod tx;

pub use driver::{Driver, PgTx, Postgres};
pub use repo::{EventRepo, GoalRepo, HabitRepo, TagRepo};
pub use statement::{Statement, Value};
pub use tx::{TransactionControl, TxExecutor, TxFn};
