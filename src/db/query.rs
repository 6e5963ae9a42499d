//! Pure statement builders for the habit tracker tables.
//!
//! Each builder takes an ordered batch plus the caller-supplied `now` and
//! returns a parameterized [`Statement`]. Insert builders emit one multi-row
//! statement with a placeholder tuple per entity, in input order. Update
//! builders target a single row by `id`; the repositories iterate batches.
//! Column order matches the deployed schema and must not change.

use super::statement::{Statement, Value};
use crate::error::StoreError;
use crate::model::{Event, Goal, Habit, HabitCategory, HabitRecord, Tag};
use chrono::{DateTime, Utc};

/// Appends one `($n, $n+1, ...)` tuple of `width` placeholders starting at
/// the one-based index `start`.
fn push_tuple(sql: &mut String, start: usize, width: usize) {
    sql.push('(');
    for i in 0..width {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push('$');
        sql.push_str(&(start + i).to_string());
    }
    sql.push(')');
}

fn insert_sql(table: &str, columns: &str, rows: usize, width: usize) -> String {
    let mut sql = format!("INSERT INTO {table} ({columns}) VALUES ");
    for row in 0..rows {
        if row > 0 {
            sql.push_str(", ");
        }
        push_tuple(&mut sql, row * width + 1, width);
    }
    sql.push(';');
    sql
}

pub fn insert_events(events: &[Event], now: DateTime<Utc>) -> Result<Statement, StoreError> {
    if events.is_empty() {
        return Err(StoreError::EmptyBatch("events"));
    }
    let sql = insert_sql(
        "events",
        "habit_id, subject, start_at, end_at, created_at, updated_at",
        events.len(),
        6,
    );
    let mut params = Vec::with_capacity(events.len() * 6);
    for event in events {
        params.push(Value::Int(event.habit_id));
        params.push(Value::Text(event.subject.clone()));
        params.push(Value::Timestamp(event.start_at));
        params.push(Value::Timestamp(event.end_at));
        params.push(Value::Timestamp(now));
        params.push(Value::Timestamp(now));
    }
    Ok(Statement::new(sql, params))
}

pub fn insert_goals(goals: &[Goal], now: DateTime<Utc>) -> Result<Statement, StoreError> {
    if goals.is_empty() {
        return Err(StoreError::EmptyBatch("goals"));
    }
    let sql = insert_sql("goals", "description, created_at, updated_at", goals.len(), 3);
    let mut params = Vec::with_capacity(goals.len() * 3);
    for goal in goals {
        params.push(Value::Text(goal.description.clone()));
        params.push(Value::Timestamp(now));
        params.push(Value::Timestamp(now));
    }
    Ok(Statement::new(sql, params))
}

pub fn insert_tags(tags: &[Tag], now: DateTime<Utc>) -> Result<Statement, StoreError> {
    if tags.is_empty() {
        return Err(StoreError::EmptyBatch("tags"));
    }
    let sql = insert_sql(
        "tags",
        "name, description, created_at, updated_at",
        tags.len(),
        4,
    );
    let mut params = Vec::with_capacity(tags.len() * 4);
    for tag in tags {
        params.push(Value::Text(tag.name.clone()));
        params.push(Value::Text(tag.description.clone()));
        params.push(Value::Timestamp(now));
        params.push(Value::Timestamp(now));
    }
    Ok(Statement::new(sql, params))
}

pub fn insert_habits(habits: &[Habit], now: DateTime<Utc>) -> Result<Statement, StoreError> {
    if habits.is_empty() {
        return Err(StoreError::EmptyBatch("habits"));
    }
    let sql = insert_sql(
        "habits",
        "category_id, name, description, created_at, updated_at",
        habits.len(),
        5,
    );
    let mut params = Vec::with_capacity(habits.len() * 5);
    for habit in habits {
        params.push(Value::Int(habit.category_id));
        params.push(Value::Text(habit.name.clone()));
        params.push(Value::Text(habit.description.clone()));
        params.push(Value::Timestamp(now));
        params.push(Value::Timestamp(now));
    }
    Ok(Statement::new(sql, params))
}

pub fn insert_habit_categories(
    categories: &[HabitCategory],
    now: DateTime<Utc>,
) -> Result<Statement, StoreError> {
    if categories.is_empty() {
        return Err(StoreError::EmptyBatch("habit_categories"));
    }
    let sql = insert_sql(
        "habit_categories",
        "category_name, created_at, updated_at",
        categories.len(),
        3,
    );
    let mut params = Vec::with_capacity(categories.len() * 3);
    for category in categories {
        params.push(Value::Text(category.category_name.clone()));
        params.push(Value::Timestamp(now));
        params.push(Value::Timestamp(now));
    }
    Ok(Statement::new(sql, params))
}

pub fn insert_habit_records(
    records: &[HabitRecord],
    now: DateTime<Utc>,
) -> Result<Statement, StoreError> {
    if records.is_empty() {
        return Err(StoreError::EmptyBatch("habit_records"));
    }
    let sql = insert_sql(
        "habit_records",
        "habit_id, record_date, result, description, created_at, updated_at",
        records.len(),
        6,
    );
    let mut params = Vec::with_capacity(records.len() * 6);
    for record in records {
        params.push(Value::Int(record.habit_id));
        params.push(Value::Timestamp(record.record_date));
        params.push(Value::Text(record.result.clone()));
        params.push(Value::Text(record.description.clone()));
        params.push(Value::Timestamp(now));
        params.push(Value::Timestamp(now));
    }
    Ok(Statement::new(sql, params))
}

pub fn update_event(event: &Event, now: DateTime<Utc>) -> Statement {
    Statement::new(
        "UPDATE events SET habit_id = $1, subject = $2, start_at = $3, end_at = $4, \
         updated_at = $5 WHERE id = $6;"
            .to_string(),
        vec![
            Value::Int(event.habit_id),
            Value::Text(event.subject.clone()),
            Value::Timestamp(event.start_at),
            Value::Timestamp(event.end_at),
            Value::Timestamp(now),
            Value::Int(event.id),
        ],
    )
}

pub fn update_goal(goal: &Goal, now: DateTime<Utc>) -> Statement {
    Statement::new(
        "UPDATE goals SET description = $1, updated_at = $2 WHERE id = $3;".to_string(),
        vec![
            Value::Text(goal.description.clone()),
            Value::Timestamp(now),
            Value::Int(goal.id),
        ],
    )
}

pub fn update_tag(tag: &Tag, now: DateTime<Utc>) -> Statement {
    Statement::new(
        "UPDATE tags SET name = $1, description = $2, updated_at = $3 WHERE id = $4;".to_string(),
        vec![
            Value::Text(tag.name.clone()),
            Value::Text(tag.description.clone()),
            Value::Timestamp(now),
            Value::Int(tag.id),
        ],
    )
}

pub fn update_habit(habit: &Habit, now: DateTime<Utc>) -> Statement {
    Statement::new(
        "UPDATE habits SET category_id = $1, name = $2, description = $3, updated_at = $4 \
         WHERE id = $5;"
            .to_string(),
        vec![
            Value::Int(habit.category_id),
            Value::Text(habit.name.clone()),
            Value::Text(habit.description.clone()),
            Value::Timestamp(now),
            Value::Int(habit.id),
        ],
    )
}

pub fn update_habit_category(category: &HabitCategory, now: DateTime<Utc>) -> Statement {
    Statement::new(
        "UPDATE habit_categories SET category_name = $1, updated_at = $2 WHERE id = $3;"
            .to_string(),
        vec![
            Value::Text(category.category_name.clone()),
            Value::Timestamp(now),
            Value::Int(category.id),
        ],
    )
}

pub fn update_habit_record(record: &HabitRecord, now: DateTime<Utc>) -> Statement {
    Statement::new(
        "UPDATE habit_records SET habit_id = $1, record_date = $2, result = $3, \
         description = $4, updated_at = $5 WHERE id = $6;"
            .to_string(),
        vec![
            Value::Int(record.habit_id),
            Value::Timestamp(record.record_date),
            Value::Text(record.result.clone()),
            Value::Text(record.description.clone()),
            Value::Timestamp(now),
            Value::Int(record.id),
        ],
    )
}
