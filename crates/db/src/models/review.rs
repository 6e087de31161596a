//! Review round model, insert DTO and queue projection.

use labelflow_core::review::ReviewStatus;
use labelflow_core::types::{DbId, ReviewId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: ReviewId,
    pub annotation_id: DbId,
    pub task_id: DbId,
    pub project_id: DbId,
    pub reviewer_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: ReviewStatus,
    pub message: Option<String>,
    pub is_auto_approved: bool,
    pub review_round: i32,
    pub decided_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert DTO for a review round. Built by the workflow engine only.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub annotation_id: DbId,
    pub task_id: DbId,
    pub project_id: DbId,
    pub reviewer_id: DbId,
    pub status: ReviewStatus,
    pub message: Option<String>,
    pub is_auto_approved: bool,
    pub review_round: i32,
}

/// A pending review in a reviewer's queue.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewQueueItem {
    pub review_id: ReviewId,
    pub annotation_id: DbId,
    pub task_id: DbId,
    pub annotator_id: DbId,
    pub task_priority: i32,
    pub review_round: i32,
    pub created_at: Timestamp,
}
