//! Task entity model and DTOs.

use labelflow_core::status::TaskStatus;
use labelflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    pub assigned_to: Option<DbId>,
    pub priority: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a task. Status defaults to `unassigned`, priority to 0.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub project_id: DbId,
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<DbId>,
    pub priority: Option<i32>,
}
