use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A task entity as stored in the database and returned by the API.
///
/// `user_id` is a weak reference to the owning user and never changes after
/// creation. A set `deleted_at` marks the task soft-deleted: it stays in
/// storage but is excluded from every user-facing query.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i32,
    pub content: String,
    pub is_done: bool,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Completion statistics for a user's tasks: two independent counts, both
/// excluding soft-deleted tasks.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskCount {
    pub completed_count: i64,
    pub total_count: i64,
}

/// Payload for creating a task. No content validation beyond presence.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub content: String,
}

/// Payload for a content-only update of an existing task.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub content: String,
}
