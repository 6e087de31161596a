//! Read-side queries over review rounds.

use labelflow_core::error::CoreError;
use labelflow_core::permissions::{require_any_permission, require_permission, Capability};
use labelflow_core::types::{DbId, ReviewId};
use labelflow_db::models::annotation::Annotation;
use labelflow_db::models::review::{Review, ReviewQueueItem};
use labelflow_db::repositories::{AnnotationRepo, ReviewRepo};

use crate::context::WorkflowContext;
use crate::error::WorkflowResult;

/// The annotator sees their own history; others need `viewReviews` or
/// `reviewAnnotations`.
async fn ensure_can_view(
    ctx: &WorkflowContext<'_>,
    annotation: &Annotation,
    user_id: DbId,
) -> WorkflowResult<()> {
    if annotation.user_id == user_id {
        return Ok(());
    }
    require_any_permission(
        ctx.permissions,
        annotation.project_id,
        user_id,
        &[Capability::ViewReviews, Capability::ReviewAnnotations],
    )
    .await?;
    Ok(())
}

/// Every review round of an annotation, oldest first.
pub async fn list_annotation_reviews(
    ctx: &WorkflowContext<'_>,
    annotation_id: DbId,
    user_id: DbId,
) -> WorkflowResult<Vec<Review>> {
    let annotation = AnnotationRepo::find_by_id(ctx.pool, annotation_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Annotation", annotation_id))?;
    ensure_can_view(ctx, &annotation, user_id).await?;

    Ok(ReviewRepo::list_for_annotation(ctx.pool, annotation_id).await?)
}

pub async fn get_review(
    ctx: &WorkflowContext<'_>,
    review_id: ReviewId,
    user_id: DbId,
) -> WorkflowResult<Review> {
    let review = ReviewRepo::find_by_id(ctx.pool, review_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Review", review_id))?;
    let annotation = AnnotationRepo::find_by_id(ctx.pool, review.annotation_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Annotation", review.annotation_id))?;
    ensure_can_view(ctx, &annotation, user_id).await?;

    Ok(review)
}

/// Pending reviews the caller holds in a project, highest task priority first.
pub async fn reviewer_queue(
    ctx: &WorkflowContext<'_>,
    project_id: DbId,
    reviewer_id: DbId,
) -> WorkflowResult<Vec<ReviewQueueItem>> {
    require_permission(
        ctx.permissions,
        project_id,
        reviewer_id,
        Capability::ReviewAnnotations,
    )
    .await?;

    Ok(ReviewRepo::reviewer_queue(ctx.pool, project_id, reviewer_id).await?)
}
