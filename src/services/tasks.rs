//!
//! # Task Service
//!
//! Ownership-checked task CRUD and completion-state transitions over the task
//! store. Every operation takes the `user_id` resolved by the request
//! authenticator; a caller-supplied id is never trusted for ownership.
//!
//! Task lifecycle: active-incomplete and active-complete convert into each
//! other through `complete_task` / `uncomplete_task`; `delete_task` moves
//! either active state into the absorbing deleted state.

use crate::db::TaskStore;
use crate::error::AppError;
use crate::models::{Task, TaskCount};

/// One message for "does not exist" and "owned by someone else", so callers
/// cannot probe for other users' task ids.
const TASK_NOT_FOUND: &str = "task not found or not owned by user";

#[derive(Clone)]
pub struct TaskService {
    store: TaskStore,
}

impl TaskService {
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    /// All non-deleted tasks owned by `user_id`, most recent id first.
    ///
    /// An empty result set is reported as `NotFound` rather than an empty
    /// list; see DESIGN.md for the reasoning behind keeping this behavior.
    pub async fn get_tasks(&self, user_id: i32) -> Result<Vec<Task>, AppError> {
        let tasks = self.store.list_by_user(user_id).await?;
        if tasks.is_empty() {
            return Err(AppError::NotFound("no tasks found".into()));
        }
        Ok(tasks)
    }

    /// Completion statistics: two independent counts, not a derived pair.
    pub async fn get_task_count(&self, user_id: i32) -> Result<TaskCount, AppError> {
        let completed_count = self.store.count_by_user(user_id, Some(true)).await?;
        let total_count = self.store.count_by_user(user_id, None).await?;

        Ok(TaskCount {
            completed_count,
            total_count,
        })
    }

    /// The ownership gate: fetches the task scoped to `user_id`, failing with
    /// `NotFound` whether the task is absent or owned by another user.
    pub async fn find_task(&self, id: i32, user_id: i32) -> Result<Task, AppError> {
        self.store
            .find_by_id_and_user(id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(TASK_NOT_FOUND.into()))
    }

    pub async fn create_task(&self, content: &str, user_id: i32) -> Result<Task, AppError> {
        self.store.create(content, user_id).await
    }

    /// Content-only update, gated on ownership.
    pub async fn update_task(
        &self,
        id: i32,
        content: &str,
        user_id: i32,
    ) -> Result<Task, AppError> {
        self.find_task(id, user_id).await?;
        self.store.update_content(id, content).await
    }

    /// Soft-deletes the task. The id stays unusable for every further
    /// operation; there is no undelete.
    pub async fn delete_task(&self, id: i32, user_id: i32) -> Result<Task, AppError> {
        self.find_task(id, user_id).await?;
        self.store.soft_delete(id).await
    }

    /// Marks the task complete. Idempotent.
    pub async fn complete_task(&self, id: i32, user_id: i32) -> Result<Task, AppError> {
        self.find_task(id, user_id).await?;
        self.store.set_done(id, true).await
    }

    /// Marks the task incomplete. Idempotent.
    pub async fn uncomplete_task(&self, id: i32, user_id: i32) -> Result<Task, AppError> {
        self.find_task(id, user_id).await?;
        self.store.set_done(id, false).await
    }
}
