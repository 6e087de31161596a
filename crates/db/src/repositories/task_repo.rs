//! Repository for the `tasks` table.

use labelflow_core::status::TaskStatus;
use labelflow_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::task::{CreateTask, Task};

const COLUMNS: &str = "id, project_id, status, assigned_to, priority, created_at, updated_at";

pub struct TaskRepo;

impl TaskRepo {
    pub async fn create<'e, E>(executor: E, input: &CreateTask) -> Result<Task, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO tasks (project_id, status, assigned_to, priority)
             VALUES ($1, COALESCE($2, 'unassigned'), $3, COALESCE($4, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.project_id)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.assigned_to)
            .bind(input.priority)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Task>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Fetch and row-lock a task until the surrounding transaction ends.
    pub async fn find_by_id_for_update<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Set a task's status. Only the review workflow calls this.
    pub async fn update_status<'e, E>(
        executor: E,
        id: DbId,
        status: TaskStatus,
    ) -> Result<Task, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("UPDATE tasks SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_one(executor)
            .await
    }
}
