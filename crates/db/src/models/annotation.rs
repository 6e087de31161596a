//! Annotation entity model and DTOs.

use labelflow_core::status::AnnotationReviewStatus;
use labelflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `annotations` table.
///
/// `assigned_reviewer_id` is who *should* act next; who actually reviewed
/// is recorded on each review row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Annotation {
    pub id: DbId,
    pub task_id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub annotation_data: serde_json::Value,
    pub is_ground_truth: bool,
    #[sqlx(try_from = "String")]
    pub review_status: AnnotationReviewStatus,
    pub assigned_reviewer_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an annotation. The project is taken from the task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnotation {
    pub task_id: DbId,
    pub user_id: DbId,
    pub annotation_data: serde_json::Value,
    pub is_ground_truth: bool,
}
