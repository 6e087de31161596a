//! Row writes shared by the coordinator, decision processor and assignment.
//!
//! All helpers run on the caller's transaction connection.

use labelflow_core::guards;
use labelflow_core::review::ReviewStatus;
use labelflow_db::models::annotation::Annotation;
use labelflow_db::models::review::{NewReview, Review};
use labelflow_db::models::task::Task;
use labelflow_db::repositories::{AnnotationRepo, ReviewRepo, TaskRepo};
use sqlx::PgConnection;

use crate::error::{review_insert_error, WorkflowResult};

pub(crate) async fn insert_review(
    conn: &mut PgConnection,
    input: &NewReview,
) -> WorkflowResult<Review> {
    ReviewRepo::insert(conn, input)
        .await
        .map_err(|err| review_insert_error(err, input.annotation_id))
}

/// Apply the decision mapping table to the annotation and task.
///
/// `pending` has no effect. The assigned reviewer is left in place.
pub(crate) async fn apply_decision_effect(
    conn: &mut PgConnection,
    annotation: &Annotation,
    task: &Task,
    status: ReviewStatus,
) -> WorkflowResult<()> {
    let Some(effect) = status.effect() else {
        return Ok(());
    };

    guards::ensure_task_transition(task.status, effect.task_status)?;
    TaskRepo::update_status(&mut *conn, task.id, effect.task_status).await?;
    AnnotationRepo::update_review_state(
        &mut *conn,
        annotation.id,
        effect.annotation_status,
        annotation.assigned_reviewer_id,
    )
    .await?;
    Ok(())
}
