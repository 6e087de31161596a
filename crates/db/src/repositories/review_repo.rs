//! Repository for the `reviews` table.
//!
//! Two storage constraints back the workflow invariants:
//! `uq_reviews_pending_annotation` (at most one pending review per
//! annotation) and `uq_reviews_annotation_round` (no duplicate rounds).

use labelflow_core::review::ReviewStatus;
use labelflow_core::types::{DbId, ReviewId};
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::review::{NewReview, Review, ReviewQueueItem};

/// Column list for reviews queries.
const COLUMNS: &str = "id, annotation_id, task_id, project_id, reviewer_id, status, message, \
    is_auto_approved, review_round, decided_at, created_at, updated_at";

/// Partial unique index enforcing one pending review per annotation.
pub const PENDING_REVIEW_INDEX: &str = "uq_reviews_pending_annotation";

/// Unique constraint on `(annotation_id, review_round)`.
pub const REVIEW_ROUND_CONSTRAINT: &str = "uq_reviews_annotation_round";

pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review round with a freshly generated UUID v7 id.
    ///
    /// Decided statuses get `decided_at = NOW()`.
    pub async fn insert<'e, E>(executor: E, input: &NewReview) -> Result<Review, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO reviews
                (id, annotation_id, task_id, project_id, reviewer_id, status, message,
                 is_auto_approved, review_round, decided_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9,
                     CASE WHEN $6 = 'pending' THEN NULL ELSE NOW() END)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(Uuid::now_v7())
            .bind(input.annotation_id)
            .bind(input.task_id)
            .bind(input.project_id)
            .bind(input.reviewer_id)
            .bind(input.status.as_str())
            .bind(&input.message)
            .bind(input.is_auto_approved)
            .bind(input.review_round)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: ReviewId) -> Result<Option<Review>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Fetch and row-lock a review until the surrounding transaction ends.
    pub async fn find_by_id_for_update<'e, E>(
        executor: E,
        id: ReviewId,
    ) -> Result<Option<Review>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// The pending review for an annotation, if any.
    pub async fn find_pending_for_annotation<'e, E>(
        executor: E,
        annotation_id: DbId,
    ) -> Result<Option<Review>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews WHERE annotation_id = $1 AND status = 'pending'"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(annotation_id)
            .fetch_optional(executor)
            .await
    }

    /// Highest review round recorded for an annotation, or `None` if there are none.
    ///
    /// Call inside the transaction that inserts the next round, after the
    /// annotation row has been locked.
    pub async fn max_round<'e, E>(executor: E, annotation_id: DbId) -> Result<Option<i32>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let row: (Option<i32>,) =
            sqlx::query_as("SELECT MAX(review_round) FROM reviews WHERE annotation_id = $1")
                .bind(annotation_id)
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    /// Set status and message on an existing review.
    ///
    /// `decided_at` is stamped the first time the status leaves `pending`.
    pub async fn update_decision<'e, E>(
        executor: E,
        id: ReviewId,
        status: ReviewStatus,
        message: Option<&str>,
    ) -> Result<Review, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE reviews SET
                status = $2,
                message = $3,
                decided_at = CASE WHEN $2 = 'pending' THEN NULL ELSE COALESCE(decided_at, NOW()) END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(message)
            .fetch_one(executor)
            .await
    }

    /// All review rounds for an annotation, oldest round first.
    pub async fn list_for_annotation<'e, E>(
        executor: E,
        annotation_id: DbId,
    ) -> Result<Vec<Review>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews WHERE annotation_id = $1 ORDER BY review_round ASC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(annotation_id)
            .fetch_all(executor)
            .await
    }

    /// Pending reviews held by a reviewer within a project.
    ///
    /// Highest task priority first, then oldest first.
    pub async fn reviewer_queue<'e, E>(
        executor: E,
        project_id: DbId,
        reviewer_id: DbId,
    ) -> Result<Vec<ReviewQueueItem>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, ReviewQueueItem>(
            "SELECT
                r.id AS review_id,
                r.annotation_id,
                r.task_id,
                a.user_id AS annotator_id,
                t.priority AS task_priority,
                r.review_round,
                r.created_at
             FROM reviews r
             JOIN annotations a ON a.id = r.annotation_id
             JOIN tasks t ON t.id = r.task_id
             WHERE r.project_id = $1
               AND r.reviewer_id = $2
               AND r.status = 'pending'
             ORDER BY t.priority DESC, r.created_at ASC",
        )
        .bind(project_id)
        .bind(reviewer_id)
        .fetch_all(executor)
        .await
    }
}
