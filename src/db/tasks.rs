use crate::error::AppError;
use crate::models::Task;
use sqlx::PgPool;

const TASK_COLUMNS: &str = "id, content, is_done, user_id, created_at, updated_at, deleted_at";

/// Owns the durable state of task records, always scoped by owning user.
///
/// Soft-deleted rows (`deleted_at` set) are retained in storage but excluded
/// from every read this store exposes.
#[derive(Clone)]
pub struct TaskStore {
    pool: PgPool,
}

impl TaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All non-deleted tasks owned by `user_id`, most recently inserted first.
    pub async fn list_by_user(&self, user_id: i32) -> Result<Vec<Task>, AppError> {
        let sql = format!(
            "SELECT {} FROM tasks \
             WHERE user_id = $1 AND deleted_at IS NULL \
             ORDER BY id DESC",
            TASK_COLUMNS
        );

        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    /// Number of non-deleted tasks owned by `user_id`, optionally filtered by
    /// completion state.
    pub async fn count_by_user(
        &self,
        user_id: i32,
        completed: Option<bool>,
    ) -> Result<i64, AppError> {
        let count: (i64,) = match completed {
            Some(is_done) => {
                sqlx::query_as(
                    "SELECT COUNT(*) FROM tasks \
                     WHERE user_id = $1 AND is_done = $2 AND deleted_at IS NULL",
                )
                .bind(user_id)
                .bind(is_done)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(
                    "SELECT COUNT(*) FROM tasks WHERE user_id = $1 AND deleted_at IS NULL",
                )
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?
            }
        };
        Ok(count.0)
    }

    /// Fetches a single non-deleted task only if `user_id` owns it.
    pub async fn find_by_id_and_user(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<Option<Task>, AppError> {
        let sql = format!(
            "SELECT {} FROM tasks \
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL",
            TASK_COLUMNS
        );

        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    pub async fn create(&self, content: &str, user_id: i32) -> Result<Task, AppError> {
        let sql = format!(
            "INSERT INTO tasks (content, user_id) VALUES ($1, $2) RETURNING {}",
            TASK_COLUMNS
        );

        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(content)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(task)
    }

    pub async fn update_content(&self, id: i32, content: &str) -> Result<Task, AppError> {
        let sql = format!(
            "UPDATE tasks SET content = $1, updated_at = now() \
             WHERE id = $2 \
             RETURNING {}",
            TASK_COLUMNS
        );

        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(content)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(task)
    }

    /// Sets the completion flag. Writing the current value again is fine.
    pub async fn set_done(&self, id: i32, is_done: bool) -> Result<Task, AppError> {
        let sql = format!(
            "UPDATE tasks SET is_done = $1, updated_at = now() \
             WHERE id = $2 \
             RETURNING {}",
            TASK_COLUMNS
        );

        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(is_done)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(task)
    }

    /// Marks the task deleted. The row stays in storage; no undelete exists.
    pub async fn soft_delete(&self, id: i32) -> Result<Task, AppError> {
        let sql = format!(
            "UPDATE tasks SET deleted_at = now(), updated_at = now() \
             WHERE id = $1 \
             RETURNING {}",
            TASK_COLUMNS
        );

        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(task)
    }
}
