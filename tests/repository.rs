//! Drives the repository layer through the public API against a recording
//! fake driver, the way a host application would wire its own substitute.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use habit_store::db::statement::Statement;
use habit_store::db::tx::{TxExecutor, TxFn};
use habit_store::db::{Driver, EventRepo, GoalRepo, HabitRepo, TagRepo};
use habit_store::repo::{EventRepository, GoalRepository, HabitRepository, TagRepository};
use habit_store::{Event, Goal, Habit, HabitCategory, HabitRecord, StoreError, Tag};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct RecordingDriver {
    executed: Arc<Mutex<Vec<Statement>>>,
    tx_executed: Arc<Mutex<Vec<Statement>>>,
    commits: Arc<AtomicUsize>,
    rollbacks: Arc<AtomicUsize>,
    fail_execute: bool,
}

impl RecordingDriver {
    fn failing() -> Self {
        Self {
            fail_execute: true,
            ..Default::default()
        }
    }

    async fn executed_literals(&self) -> Vec<String> {
        self.executed
            .lock()
            .await
            .iter()
            .map(Statement::literal)
            .collect()
    }

    async fn tx_literals(&self) -> Vec<String> {
        self.tx_executed
            .lock()
            .await
            .iter()
            .map(Statement::literal)
            .collect()
    }
}

struct RecordingTx {
    executed: Arc<Mutex<Vec<Statement>>>,
    fail_execute: bool,
}

#[async_trait]
impl TxExecutor for RecordingTx {
    async fn execute(&mut self, stmt: &Statement) -> Result<u64, sqlx::Error> {
        if self.fail_execute {
            return Err(sqlx::Error::Protocol("tx exec failed".into()));
        }
        self.executed.lock().await.push(stmt.clone());
        Ok(1)
    }
}

#[async_trait]
impl Driver for RecordingDriver {
    async fn execute(&self, stmt: &Statement) -> Result<u64, sqlx::Error> {
        if self.fail_execute {
            return Err(sqlx::Error::Protocol("exec failed".into()));
        }
        self.executed.lock().await.push(stmt.clone());
        Ok(1)
    }

    async fn transaction(&self, op: TxFn) -> Result<(), StoreError> {
        let mut tx = RecordingTx {
            executed: self.tx_executed.clone(),
            fail_execute: self.fail_execute,
        };
        match op(&mut tx).await {
            Ok(()) => {
                self.commits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            Err(err) => {
                self.rollbacks.fetch_add(1, Ordering::SeqCst);
                Err(err)
            }
        }
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 7, 20, 15, 32, 0).unwrap()
}

#[tokio::test]
async fn event_batch_insert_keeps_input_order() {
    let driver = RecordingDriver::default();
    let repo = EventRepo::new(driver.clone());

    let events = vec![
        Event {
            id: 0,
            habit_id: 2,
            subject: "Go to gym".into(),
            start_at: Utc.with_ymd_and_hms(2023, 7, 27, 12, 0, 0).unwrap(),
            end_at: Utc.with_ymd_and_hms(2023, 7, 27, 14, 0, 0).unwrap(),
        },
        Event {
            id: 0,
            habit_id: 3,
            subject: "Painting class".into(),
            start_at: Utc.with_ymd_and_hms(2023, 7, 27, 14, 0, 0).unwrap(),
            end_at: Utc.with_ymd_and_hms(2023, 7, 27, 16, 0, 0).unwrap(),
        },
    ];
    repo.insert_events(&events, now()).await.unwrap();

    let literals = driver.executed_literals().await;
    assert_eq!(literals.len(), 1);
    assert_eq!(
        literals[0],
        "INSERT INTO events (habit_id, subject, start_at, end_at, created_at, updated_at) \
         VALUES (2, 'Go to gym', '2023-07-27T12:00:00Z', '2023-07-27T14:00:00Z', \
         '2023-07-20T15:32:00Z', '2023-07-20T15:32:00Z'), \
         (3, 'Painting class', '2023-07-27T14:00:00Z', '2023-07-27T16:00:00Z', \
         '2023-07-20T15:32:00Z', '2023-07-20T15:32:00Z');"
    );
}

#[tokio::test]
async fn habit_family_inserts_target_their_tables() {
    let driver = RecordingDriver::default();
    let repo = HabitRepo::new(driver.clone());
    let ts = now();

    repo.insert_habit_categories(
        &[HabitCategory {
            id: 0,
            category_name: "Health".into(),
        }],
        ts,
    )
    .await
    .unwrap();
    repo.insert_habits(
        &[Habit {
            id: 0,
            category_id: 1,
            name: "Run".into(),
            description: "5k three times a week".into(),
        }],
        ts,
    )
    .await
    .unwrap();
    repo.insert_habit_records(
        &[HabitRecord {
            id: 0,
            habit_id: 1,
            record_date: Utc.with_ymd_and_hms(2023, 7, 19, 0, 0, 0).unwrap(),
            result: "done".into(),
            description: "".into(),
        }],
        ts,
    )
    .await
    .unwrap();

    let literals = driver.executed_literals().await;
    assert_eq!(literals.len(), 3);
    assert!(literals[0].starts_with("INSERT INTO habit_categories (category_name,"));
    assert!(literals[1].starts_with("INSERT INTO habits (category_id, name, description,"));
    assert!(literals[2].starts_with("INSERT INTO habit_records (habit_id, record_date, result,"));
}

#[tokio::test]
async fn tag_insert_escapes_untrusted_text_in_literal_rendering() {
    let driver = RecordingDriver::default();
    let repo = TagRepo::new(driver.clone());

    repo.insert_tags(
        &[Tag {
            id: 0,
            name: "o'clock".into(),
            description: "'; DROP TABLE tags; --".into(),
        }],
        now(),
    )
    .await
    .unwrap();

    let executed = driver.executed.lock().await;
    // Execution binds parameters; the hostile text never appears in the SQL.
    assert!(!executed[0].sql().contains("DROP TABLE"));
    assert!(executed[0]
        .literal()
        .contains("'o''clock', '''; DROP TABLE tags; --'"));
}

#[tokio::test]
async fn goal_update_batch_is_transactional() {
    let driver = RecordingDriver::default();
    let repo = GoalRepo::new(driver.clone());

    repo.update_goals(
        &[
            Goal {
                id: 1,
                description: "New goal".into(),
            },
            Goal {
                id: 2,
                description: "Second".into(),
            },
        ],
        now(),
    )
    .await
    .unwrap();

    let literals = driver.tx_literals().await;
    assert_eq!(
        literals,
        vec![
            "UPDATE goals SET description = 'New goal', \
             updated_at = '2023-07-20T15:32:00Z' WHERE id = 1;"
                .to_string(),
            "UPDATE goals SET description = 'Second', \
             updated_at = '2023-07-20T15:32:00Z' WHERE id = 2;"
                .to_string(),
        ]
    );
    assert_eq!(driver.commits.load(Ordering::SeqCst), 1);
    assert_eq!(driver.rollbacks.load(Ordering::SeqCst), 0);
    // Nothing outside the transaction.
    assert!(driver.executed.lock().await.is_empty());
}

#[tokio::test]
async fn event_update_rolls_back_on_failure() {
    let driver = RecordingDriver::failing();
    let repo = EventRepo::new(driver.clone());

    let err = repo
        .update_events(
            &[Event {
                id: 4,
                habit_id: 2,
                subject: "Go to gym".into(),
                start_at: now(),
                end_at: now(),
            }],
            now(),
        )
        .await
        .unwrap_err();

    match err {
        StoreError::Execute { op, .. } => assert_eq!(op, "update events"),
        other => panic!("expected Execute, got {other}"),
    }
    assert_eq!(driver.commits.load(Ordering::SeqCst), 0);
    assert_eq!(driver.rollbacks.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_batches_are_typed_errors_for_every_family() {
    let driver = RecordingDriver::default();
    let ts = now();

    let events = EventRepo::new(driver.clone());
    let goals = GoalRepo::new(driver.clone());
    let tags = TagRepo::new(driver.clone());
    let habits = HabitRepo::new(driver.clone());

    assert!(matches!(
        events.insert_events(&[], ts).await.unwrap_err(),
        StoreError::EmptyBatch("events")
    ));
    assert!(matches!(
        events.update_events(&[], ts).await.unwrap_err(),
        StoreError::EmptyBatch("events")
    ));
    assert!(matches!(
        goals.insert_goals(&[], ts).await.unwrap_err(),
        StoreError::EmptyBatch("goals")
    ));
    assert!(matches!(
        goals.update_goals(&[], ts).await.unwrap_err(),
        StoreError::EmptyBatch("goals")
    ));
    assert!(matches!(
        tags.insert_tags(&[], ts).await.unwrap_err(),
        StoreError::EmptyBatch("tags")
    ));
    assert!(matches!(
        tags.update_tags(&[], ts).await.unwrap_err(),
        StoreError::EmptyBatch("tags")
    ));
    assert!(matches!(
        habits.insert_habits(&[], ts).await.unwrap_err(),
        StoreError::EmptyBatch("habits")
    ));
    assert!(matches!(
        habits.update_habit_categories(&[], ts).await.unwrap_err(),
        StoreError::EmptyBatch("habit_categories")
    ));
    assert!(matches!(
        habits.update_habit_records(&[], ts).await.unwrap_err(),
        StoreError::EmptyBatch("habit_records")
    ));

    assert!(driver.executed.lock().await.is_empty());
    assert!(driver.tx_executed.lock().await.is_empty());
}
