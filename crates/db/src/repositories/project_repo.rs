//! Repository for the `projects` table, including its review policy columns.

use labelflow_core::review_settings::ReviewSettings;
use labelflow_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::project::{CreateProject, Project};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, review_mode, allow_self_review, auto_assign_reviewer, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// Review columns left as `None` fall back to the table defaults
    /// (`auto`, no self-review, auto-assign on).
    pub async fn create<'e, E>(executor: E, input: &CreateProject) -> Result<Project, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO projects (name, review_mode, allow_self_review, auto_assign_reviewer)
             VALUES ($1, COALESCE($2, 'auto'), COALESCE($3, FALSE), COALESCE($4, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(input.review_mode.map(|m| m.as_str()))
            .bind(input.allow_self_review)
            .bind(input.auto_assign_reviewer)
            .fetch_one(executor)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Project>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Like [`find_by_id`](Self::find_by_id) but takes a row lock for the
    /// remainder of the transaction.
    pub async fn find_by_id_for_update<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Overwrite the review policy columns.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_review_settings<'e, E>(
        executor: E,
        id: DbId,
        settings: &ReviewSettings,
    ) -> Result<Option<Project>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE projects SET
                review_mode = $2,
                allow_self_review = $3,
                auto_assign_reviewer = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(settings.review_mode.as_str())
            .bind(settings.allow_self_review)
            .bind(settings.auto_assign_reviewer)
            .fetch_optional(executor)
            .await
    }
}
