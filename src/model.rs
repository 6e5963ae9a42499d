//! Domain entities persisted by the store.
//!
//! These are plain records with no behavior. An `id` of zero means the row
//! has not been persisted yet. `created_at`/`updated_at` are not carried on
//! the entities: the caller supplies a single `now` per batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitCategory {
    pub id: i64,
    pub category_name: String,
}

/// One observation of a habit on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitRecord {
    pub id: i64,
    pub habit_id: i64,
    pub record_date: DateTime<Utc>,
    pub result: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// A scheduled occurrence of a habit. `start_at` is expected to be at or
/// before `end_at`; the store does not enforce this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub habit_id: i64,
    pub subject: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}
