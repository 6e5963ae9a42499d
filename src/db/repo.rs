//! Postgres-backed repository implementations.
//!
//! Each repository pairs the pure builders in [`super::query`] with a
//! [`Driver`]. Inserts go out as one multi-row statement, atomic at the
//! statement level, outside any explicit transaction. Updates are single-row
//! statements iterated inside one transaction so a batch stays
//! all-or-nothing. Execution failures are wrapped with the name of the
//! failing operation; affected-row counts are not validated.

use super::driver::Driver;
use super::query;
use super::statement::Statement;
use super::tx::TxExecutor;
use crate::error::StoreError;
use crate::model::{Event, Goal, Habit, HabitCategory, HabitRecord, Tag};
use crate::repo::{EventRepository, GoalRepository, HabitRepository, TagRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;

async fn execute<D: Driver>(db: &D, op: &'static str, stmt: Statement) -> Result<(), StoreError> {
    db.execute(&stmt)
        .await
        .map_err(|source| StoreError::Execute { op, source })?;
    Ok(())
}

async fn update_batch<D: Driver>(
    db: &D,
    op: &'static str,
    table: &'static str,
    stmts: Vec<Statement>,
) -> Result<(), StoreError> {
    if stmts.is_empty() {
        return Err(StoreError::EmptyBatch(table));
    }
    db.transaction(Box::new(move |tx: &mut dyn TxExecutor| {
        Box::pin(async move {
            for stmt in &stmts {
                tx.execute(stmt)
                    .await
                    .map_err(|source| StoreError::Execute { op, source })?;
            }
            Ok(())
        })
    }))
    .await
}

pub struct EventRepo<D> {
    db: D,
}

impl<D> EventRepo<D> {
    pub fn new(db: D) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<D: Driver> EventRepository for EventRepo<D> {
    #[instrument(skip_all)]
    async fn insert_events(&self, events: &[Event], now: DateTime<Utc>) -> Result<(), StoreError> {
        let stmt = query::insert_events(events, now)?;
        execute(&self.db, "insert events", stmt).await
    }

    #[instrument(skip_all)]
    async fn update_events(&self, events: &[Event], now: DateTime<Utc>) -> Result<(), StoreError> {
        let stmts = events
            .iter()
            .map(|event| query::update_event(event, now))
            .collect();
        update_batch(&self.db, "update events", "events", stmts).await
    }
}

pub struct GoalRepo<D> {
    db: D,
}

impl<D> GoalRepo<D> {
    pub fn new(db: D) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<D: Driver> GoalRepository for GoalRepo<D> {
    #[instrument(skip_all)]
    async fn insert_goals(&self, goals: &[Goal], now: DateTime<Utc>) -> Result<(), StoreError> {
        let stmt = query::insert_goals(goals, now)?;
        execute(&self.db, "insert goals", stmt).await
    }

    #[instrument(skip_all)]
    async fn update_goals(&self, goals: &[Goal], now: DateTime<Utc>) -> Result<(), StoreError> {
        let stmts = goals
            .iter()
            .map(|goal| query::update_goal(goal, now))
            .collect();
        update_batch(&self.db, "update goals", "goals", stmts).await
    }
}

pub struct TagRepo<D> {
    db: D,
}

impl<D> TagRepo<D> {
    pub fn new(db: D) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<D: Driver> TagRepository for TagRepo<D> {
    #[instrument(skip_all)]
    async fn insert_tags(&self, tags: &[Tag], now: DateTime<Utc>) -> Result<(), StoreError> {
        let stmt = query::insert_tags(tags, now)?;
        execute(&self.db, "insert tags", stmt).await
    }

    #[instrument(skip_all)]
    async fn update_tags(&self, tags: &[Tag], now: DateTime<Utc>) -> Result<(), StoreError> {
        let stmts = tags.iter().map(|tag| query::update_tag(tag, now)).collect();
        update_batch(&self.db, "update tags", "tags", stmts).await
    }
}

pub struct HabitRepo<D> {
    db: D,
}

impl<D> HabitRepo<D> {
    pub fn new(db: D) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<D: Driver> HabitRepository for HabitRepo<D> {
    #[instrument(skip_all)]
    async fn insert_habits(&self, habits: &[Habit], now: DateTime<Utc>) -> Result<(), StoreError> {
        let stmt = query::insert_habits(habits, now)?;
        execute(&self.db, "insert habits", stmt).await
    }

    #[instrument(skip_all)]
    async fn insert_habit_categories(
        &self,
        categories: &[HabitCategory],
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let stmt = query::insert_habit_categories(categories, now)?;
        execute(&self.db, "insert habit categories", stmt).await
    }

    #[instrument(skip_all)]
    async fn insert_habit_records(
        &self,
        records: &[HabitRecord],
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let stmt = query::insert_habit_records(records, now)?;
        execute(&self.db, "insert habit records", stmt).await
    }

    #[instrument(skip_all)]
    async fn update_habits(&self, habits: &[Habit], now: DateTime<Utc>) -> Result<(), StoreError> {
        let stmts = habits
            .iter()
            .map(|habit| query::update_habit(habit, now))
            .collect();
        update_batch(&self.db, "update habits", "habits", stmts).await
    }

    #[instrument(skip_all)]
    async fn update_habit_categories(
        &self,
        categories: &[HabitCategory],
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let stmts = categories
            .iter()
            .map(|category| query::update_habit_category(category, now))
            .collect();
        update_batch(
            &self.db,
            "update habit categories",
            "habit_categories",
            stmts,
        )
        .await
    }

    #[instrument(skip_all)]
    async fn update_habit_records(
        &self,
        records: &[HabitRecord],
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let stmts = records
            .iter()
            .map(|record| query::update_habit_record(record, now))
            .collect();
        update_batch(&self.db, "update habit records", "habit_records", stmts).await
    }
}
