//! Decision processor: creating and amending reviews.

use labelflow_core::error::{CoreError, StateConflict};
use labelflow_core::guards;
use labelflow_core::permissions::{require_permission, Capability};
use labelflow_core::review::{next_review_round, normalize_review_message, ReviewStatus};
use labelflow_core::types::{DbId, ReviewId};
use labelflow_db::models::review::{NewReview, Review};
use labelflow_db::repositories::{AnnotationRepo, ProjectRepo, ReviewRepo, TaskRepo};
use serde::Deserialize;

use crate::context::WorkflowContext;
use crate::error::WorkflowResult;
use crate::writes::{apply_decision_effect, insert_review};

/// Body of a review submission.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewSubmission {
    pub status: ReviewStatus,
    pub message: Option<String>,
}

/// Partial amendment of a pending review. At least one field must be set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewPatch {
    pub status: Option<ReviewStatus>,
    pub message: Option<String>,
}

/// Record a review on an annotation awaiting review.
///
/// * `pending` claims the annotation: a new round is opened for the caller
///   and the caller becomes the assigned reviewer. Only possible while the
///   task is `in_review`.
/// * A decided status from the reviewer holding the open round decides that
///   round in place.
/// * A decided status with no open round opens and decides a new round.
///
/// Decided statuses then update the annotation and task per the decision
/// table. The whole operation is one transaction.
pub async fn create_review(
    ctx: &WorkflowContext<'_>,
    project_id: DbId,
    annotation_id: DbId,
    reviewer_id: DbId,
    submission: ReviewSubmission,
) -> WorkflowResult<Review> {
    let status = submission.status;
    let message = normalize_review_message(status, submission.message)?;
    require_permission(
        ctx.permissions,
        project_id,
        reviewer_id,
        Capability::ReviewAnnotations,
    )
    .await?;

    let mut tx = ctx.pool.begin().await?;

    let annotation = AnnotationRepo::find_by_id_for_update(&mut *tx, annotation_id)
        .await?
        .filter(|a| a.project_id == project_id)
        .ok_or_else(|| CoreError::not_found("Annotation", annotation_id))?;
    guards::ensure_annotation_not_finalized(annotation.review_status)?;

    let task = TaskRepo::find_by_id_for_update(&mut *tx, annotation.task_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", annotation.task_id))?;
    guards::ensure_task_reviewable(task.status)?;
    if !status.is_decided() {
        guards::ensure_task_claimable(task.status)?;
    }

    let open_round = ReviewRepo::find_pending_for_annotation(&mut *tx, annotation.id).await?;
    let decides_own_round = matches!(
        &open_round,
        Some(open) if open.reviewer_id == reviewer_id && status.is_decided()
    );
    if open_round.is_some() && !decides_own_round {
        return Err(StateConflict::ReviewInProgress { annotation_id }.into());
    }

    guards::ensure_assigned_reviewer(annotation.assigned_reviewer_id, reviewer_id)?;

    let project = ProjectRepo::find_by_id(&mut *tx, project_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", project_id))?;
    guards::ensure_self_review_allowed(
        annotation.user_id,
        reviewer_id,
        project.allow_self_review,
    )?;

    let review = match open_round {
        Some(open) => {
            ReviewRepo::update_decision(&mut *tx, open.id, status, message.as_deref()).await?
        }
        None => {
            let review_round =
                next_review_round(ReviewRepo::max_round(&mut *tx, annotation.id).await?);
            insert_review(
                &mut tx,
                &NewReview {
                    annotation_id: annotation.id,
                    task_id: task.id,
                    project_id,
                    reviewer_id,
                    status,
                    message,
                    is_auto_approved: false,
                    review_round,
                },
            )
            .await?
        }
    };

    if status.is_decided() {
        apply_decision_effect(&mut tx, &annotation, &task, status).await?;
    } else {
        AnnotationRepo::update_review_state(
            &mut *tx,
            annotation.id,
            annotation.review_status,
            Some(reviewer_id),
        )
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        review_id = %review.id,
        annotation_id,
        project_id,
        reviewer_id,
        status = %status,
        review_round = review.review_round,
        "Review recorded"
    );

    Ok(review)
}

/// Amend a pending review owned by `reviewer_id`.
///
/// Decided reviews are immutable. Moving to a decided status applies the
/// decision table in the same transaction.
pub async fn update_review(
    ctx: &WorkflowContext<'_>,
    review_id: ReviewId,
    reviewer_id: DbId,
    patch: ReviewPatch,
) -> WorkflowResult<Review> {
    if patch.status.is_none() && patch.message.is_none() {
        return Err(CoreError::Validation(
            "Review update must change the status or the message".to_string(),
        )
        .into());
    }

    let existing = ReviewRepo::find_by_id(ctx.pool, review_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Review", review_id))?;
    guards::ensure_review_owner(existing.reviewer_id, reviewer_id)?;
    require_permission(
        ctx.permissions,
        existing.project_id,
        reviewer_id,
        Capability::ReviewAnnotations,
    )
    .await?;

    let mut tx = ctx.pool.begin().await?;

    let annotation = AnnotationRepo::find_by_id_for_update(&mut *tx, existing.annotation_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Annotation", existing.annotation_id))?;
    let review = ReviewRepo::find_by_id_for_update(&mut *tx, review_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Review", review_id))?;
    guards::ensure_review_pending(review.status)?;

    let status = patch.status.unwrap_or(review.status);
    let message = normalize_review_message(status, patch.message.or(review.message))?;

    let task = if status.is_decided() {
        guards::ensure_annotation_not_finalized(annotation.review_status)?;
        let task = TaskRepo::find_by_id_for_update(&mut *tx, annotation.task_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Task", annotation.task_id))?;
        guards::ensure_task_reviewable(task.status)?;
        Some(task)
    } else {
        None
    };

    let updated =
        ReviewRepo::update_decision(&mut *tx, review.id, status, message.as_deref()).await?;
    if let Some(task) = &task {
        apply_decision_effect(&mut tx, &annotation, task, status).await?;
    }

    tx.commit().await?;

    tracing::info!(
        %review_id,
        annotation_id = annotation.id,
        reviewer_id,
        status = %status,
        "Review updated"
    );

    Ok(updated)
}
