//! Manual reviewer assignment for annotations left unassigned at completion.

use labelflow_core::error::{CoreError, StateConflict};
use labelflow_core::guards;
use labelflow_core::permissions::{require_permission, Capability};
use labelflow_core::review::{next_review_round, ReviewStatus};
use labelflow_core::status::TaskStatus;
use labelflow_core::types::DbId;
use labelflow_db::models::review::{NewReview, Review};
use labelflow_db::repositories::{AnnotationRepo, ProjectRepo, ReviewRepo, TaskRepo};

use crate::context::WorkflowContext;
use crate::error::WorkflowResult;
use crate::writes::insert_review;

/// Open a pending review round for `reviewer_id` on behalf of `actor_id`.
///
/// The actor needs `editProject`; the target must be able to review and
/// must pass the project's self-review rule.
pub async fn assign_reviewer(
    ctx: &WorkflowContext<'_>,
    annotation_id: DbId,
    reviewer_id: DbId,
    actor_id: DbId,
) -> WorkflowResult<Review> {
    let annotation = AnnotationRepo::find_by_id(ctx.pool, annotation_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Annotation", annotation_id))?;
    let project_id = annotation.project_id;

    require_permission(ctx.permissions, project_id, actor_id, Capability::EditProject).await?;
    if !ctx
        .permissions
        .has_permission(project_id, reviewer_id, Capability::ReviewAnnotations)
        .await?
    {
        return Err(CoreError::Validation(format!(
            "User {reviewer_id} cannot review annotations in project {project_id}"
        ))
        .into());
    }

    let mut tx = ctx.pool.begin().await?;

    let annotation = AnnotationRepo::find_by_id_for_update(&mut *tx, annotation_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Annotation", annotation_id))?;
    guards::ensure_annotation_not_finalized(annotation.review_status)?;

    let task = TaskRepo::find_by_id_for_update(&mut *tx, annotation.task_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", annotation.task_id))?;
    if task.status != TaskStatus::InReview {
        return Err(StateConflict::NotReadyForReview(task.status).into());
    }

    if ReviewRepo::find_pending_for_annotation(&mut *tx, annotation.id)
        .await?
        .is_some()
    {
        return Err(StateConflict::ReviewInProgress { annotation_id }.into());
    }

    let project = ProjectRepo::find_by_id(&mut *tx, project_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", project_id))?;
    guards::ensure_self_review_allowed(
        annotation.user_id,
        reviewer_id,
        project.allow_self_review,
    )?;

    let review_round = next_review_round(ReviewRepo::max_round(&mut *tx, annotation.id).await?);
    let review = insert_review(
        &mut tx,
        &NewReview {
            annotation_id: annotation.id,
            task_id: task.id,
            project_id,
            reviewer_id,
            status: ReviewStatus::Pending,
            message: None,
            is_auto_approved: false,
            review_round,
        },
    )
    .await?;
    AnnotationRepo::update_review_state(
        &mut *tx,
        annotation.id,
        annotation.review_status,
        Some(reviewer_id),
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        annotation_id,
        reviewer_id,
        actor_id,
        review_round,
        "Reviewer assigned"
    );

    Ok(review)
}
