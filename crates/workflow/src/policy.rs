//! Policy resolver: settings plus the live reviewer pool give a workflow mode.

use labelflow_core::error::CoreError;
use labelflow_core::review_settings::{resolve_workflow_mode, WorkflowDecision};
use labelflow_core::types::DbId;
use labelflow_db::repositories::ProjectRepo;
use sqlx::PgConnection;

use crate::allocator;
use crate::error::WorkflowResult;

/// Resolve the workflow mode for a submission by `annotator_id`.
///
/// `always-skip` returns without touching the reviewer pool.
pub async fn determine_workflow_mode(
    conn: &mut PgConnection,
    project_id: DbId,
    annotator_id: DbId,
) -> WorkflowResult<WorkflowDecision> {
    let project = ProjectRepo::find_by_id(&mut *conn, project_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", project_id))?;
    let settings = project.review_settings();

    if !settings.needs_reviewer_lookup() {
        return Ok(WorkflowDecision::auto_approve());
    }

    let eligible = allocator::eligible_reviewers(
        conn,
        project_id,
        settings.reviewer_exclusion(annotator_id),
    )
    .await?;

    Ok(resolve_workflow_mode(project_id, &settings, &eligible)?)
}
