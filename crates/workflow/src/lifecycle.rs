//! Lifecycle coordinator: annotation completion.

use labelflow_core::error::{CoreError, StateConflict};
use labelflow_core::guards;
use labelflow_core::review::{next_review_round, ReviewStatus};
use labelflow_core::status::{AnnotationReviewStatus, TaskStatus};
use labelflow_core::types::DbId;
use labelflow_db::models::review::{NewReview, Review};
use labelflow_db::repositories::{AnnotationRepo, ReviewRepo, TaskRepo};
use serde::Serialize;

use crate::context::WorkflowContext;
use crate::error::WorkflowResult;
use crate::policy;
use crate::writes::insert_review;

/// Result of [`complete_annotation`].
#[derive(Debug, Clone, Serialize)]
pub struct CompletionOutcome {
    pub requires_review: bool,
    pub assigned_reviewer: Option<DbId>,
    /// The auto-approval record, or the pending review of the assigned reviewer.
    pub review: Option<Review>,
}

/// Submit an annotation for review, or auto-approve it.
///
/// Runs in one transaction holding row locks on the annotation and its task.
/// An open pending round blocks completion with `ReviewInProgress`.
/// Any error leaves annotation, task and reviews untouched.
pub async fn complete_annotation(
    ctx: &WorkflowContext<'_>,
    annotation_id: DbId,
    user_id: DbId,
) -> WorkflowResult<CompletionOutcome> {
    let mut tx = ctx.pool.begin().await?;

    let annotation = AnnotationRepo::find_by_id_for_update(&mut *tx, annotation_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Annotation", annotation_id))?;
    guards::ensure_annotation_owner(annotation.id, annotation.user_id, user_id)?;
    guards::ensure_annotation_completable(annotation.review_status)?;

    let task = TaskRepo::find_by_id_for_update(&mut *tx, annotation.task_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", annotation.task_id))?;
    guards::ensure_task_accepts_submission(task.status)?;
    if ReviewRepo::find_pending_for_annotation(&mut *tx, annotation.id)
        .await?
        .is_some()
    {
        return Err(StateConflict::ReviewInProgress { annotation_id }.into());
    }

    let decision = policy::determine_workflow_mode(&mut tx, annotation.project_id, user_id).await?;
    let review_round = next_review_round(ReviewRepo::max_round(&mut *tx, annotation.id).await?);

    let outcome = if decision.requires_review() {
        guards::ensure_task_transition(task.status, TaskStatus::InReview)?;
        TaskRepo::update_status(&mut *tx, task.id, TaskStatus::InReview).await?;
        AnnotationRepo::update_review_state(
            &mut *tx,
            annotation.id,
            AnnotationReviewStatus::Pending,
            decision.assigned_reviewer,
        )
        .await?;

        let review = match decision.assigned_reviewer {
            Some(reviewer_id) => Some(
                insert_review(
                    &mut tx,
                    &NewReview {
                        annotation_id: annotation.id,
                        task_id: task.id,
                        project_id: annotation.project_id,
                        reviewer_id,
                        status: ReviewStatus::Pending,
                        message: None,
                        is_auto_approved: false,
                        review_round,
                    },
                )
                .await?,
            ),
            None => None,
        };

        CompletionOutcome {
            requires_review: true,
            assigned_reviewer: decision.assigned_reviewer,
            review,
        }
    } else {
        guards::ensure_task_transition(task.status, TaskStatus::Completed)?;
        TaskRepo::update_status(&mut *tx, task.id, TaskStatus::Completed).await?;
        AnnotationRepo::update_review_state(
            &mut *tx,
            annotation.id,
            AnnotationReviewStatus::Approved,
            None,
        )
        .await?;

        let review = insert_review(
            &mut tx,
            &NewReview {
                annotation_id: annotation.id,
                task_id: task.id,
                project_id: annotation.project_id,
                reviewer_id: user_id,
                status: ReviewStatus::Approved,
                message: None,
                is_auto_approved: true,
                review_round,
            },
        )
        .await?;

        CompletionOutcome {
            requires_review: false,
            assigned_reviewer: None,
            review: Some(review),
        }
    };

    tx.commit().await?;

    tracing::info!(
        annotation_id,
        task_id = task.id,
        user_id,
        mode = %decision.mode,
        assigned_reviewer = ?outcome.assigned_reviewer,
        review_round,
        "Annotation completed"
    );

    Ok(outcome)
}
