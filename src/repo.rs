//! Repository traits, one per entity family.
//!
//! The persistence layer stays swappable behind these traits: production code
//! wires the Postgres-backed implementations from [`crate::db::repo`], tests
//! substitute recording fakes. Batches are ordered slices; `now` is applied
//! uniformly to the whole batch as both `created_at` and `updated_at` on
//! insert, and as `updated_at` on update.

use crate::error::StoreError;
use crate::model::{Event, Goal, Habit, HabitCategory, HabitRecord, Tag};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn insert_events(&self, events: &[Event], now: DateTime<Utc>) -> Result<(), StoreError>;
    async fn update_events(&self, events: &[Event], now: DateTime<Utc>) -> Result<(), StoreError>;
}

#[async_trait]
pub trait GoalRepository: Send + Sync {
    async fn insert_goals(&self, goals: &[Goal], now: DateTime<Utc>) -> Result<(), StoreError>;
    async fn update_goals(&self, goals: &[Goal], now: DateTime<Utc>) -> Result<(), StoreError>;
}

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn insert_tags(&self, tags: &[Tag], now: DateTime<Utc>) -> Result<(), StoreError>;
    async fn update_tags(&self, tags: &[Tag], now: DateTime<Utc>) -> Result<(), StoreError>;
}

/// Habits and their two sub-resources share one repository.
#[async_trait]
pub trait HabitRepository: Send + Sync {
    async fn insert_habits(&self, habits: &[Habit], now: DateTime<Utc>) -> Result<(), StoreError>;
    async fn insert_habit_categories(
        &self,
        categories: &[HabitCategory],
        now: DateTime<Utc>,
    ) -> Result<(), StoreError>;
    async fn insert_habit_records(
        &self,
        records: &[HabitRecord],
        now: DateTime<Utc>,
    ) -> Result<(), StoreError>;
    async fn update_habits(&self, habits: &[Habit], now: DateTime<Utc>) -> Result<(), StoreError>;
    async fn update_habit_categories(
        &self,
        categories: &[HabitCategory],
        now: DateTime<Utc>,
    ) -> Result<(), StoreError>;
    async fn update_habit_records(
        &self,
        records: &[HabitRecord],
        now: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}
