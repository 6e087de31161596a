//! Repository for the `annotations` table.

use labelflow_core::status::AnnotationReviewStatus;
use labelflow_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::annotation::{Annotation, CreateAnnotation};

const COLUMNS: &str = "id, task_id, project_id, user_id, annotation_data, is_ground_truth, \
    review_status, assigned_reviewer_id, created_at, updated_at";

pub struct AnnotationRepo;

impl AnnotationRepo {
    /// Insert a new annotation in `pending` review status.
    ///
    /// `project_id` is copied from the task; fails with `RowNotFound` if the
    /// task does not exist.
    pub async fn create<'e, E>(
        executor: E,
        input: &CreateAnnotation,
    ) -> Result<Annotation, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO annotations (task_id, project_id, user_id, annotation_data, is_ground_truth)
             SELECT t.id, t.project_id, $2, $3, $4 FROM tasks t WHERE t.id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(input.task_id)
            .bind(input.user_id)
            .bind(&input.annotation_data)
            .bind(input.is_ground_truth)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Annotation>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM annotations WHERE id = $1");
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Fetch and row-lock an annotation until the surrounding transaction ends.
    ///
    /// Every workflow transition takes this lock first, which serializes
    /// concurrent transitions on the same annotation.
    pub async fn find_by_id_for_update<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Annotation>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM annotations WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Set review status and assigned reviewer together.
    pub async fn update_review_state<'e, E>(
        executor: E,
        id: DbId,
        review_status: AnnotationReviewStatus,
        assigned_reviewer_id: Option<DbId>,
    ) -> Result<Annotation, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE annotations SET review_status = $2, assigned_reviewer_id = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .bind(review_status.as_str())
            .bind(assigned_reviewer_id)
            .fetch_one(executor)
            .await
    }
}
