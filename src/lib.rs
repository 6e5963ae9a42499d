//! Postgres persistence layer for a personal habit tracker.
//!
//! The crate is organized leaf to root: plain entity records in [`model`],
//! pure SQL statement builders in [`db::query`], the pooled execution driver
//! and transaction helper in [`db`], and per-entity-family repositories in
//! [`db::repo`] implementing the traits from [`repo`].
//!
//! Callers construct entities, pick a repository, and hand it an ordered
//! batch together with a single `now` timestamp that is applied uniformly to
//! the whole batch. All SQL goes out parameterized; batch inserts are one
//! multi-row statement, batch updates run row-by-row inside one transaction.

pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod repo;

pub use config::{Config, DatabaseConfig};
pub use db::{Driver, EventRepo, GoalRepo, HabitRepo, Postgres, TagRepo};
pub use error::StoreError;
pub use model::{Event, Goal, Habit, HabitCategory, HabitRecord, Tag};
pub use repo::{EventRepository, GoalRepository, HabitRepository, TagRepository};
