//! Reviewer pool lookups.

use labelflow_core::error::CoreError;
use labelflow_core::reviewer_allocation::ReviewerCandidate;
use labelflow_core::types::DbId;
use labelflow_db::repositories::{ProjectRepo, ReviewerRepo};
use sqlx::PgConnection;

use crate::context::WorkflowContext;
use crate::error::WorkflowResult;

/// Members able to review in `project_id`, least loaded first.
pub(crate) async fn eligible_reviewers(
    conn: &mut PgConnection,
    project_id: DbId,
    exclude_user_id: Option<DbId>,
) -> WorkflowResult<Vec<ReviewerCandidate>> {
    Ok(ReviewerRepo::eligible_reviewers(conn, project_id, exclude_user_id).await?)
}

/// List every eligible reviewer of a project with their pending workload.
///
/// Visible to any project member. Nobody is excluded.
pub async fn get_eligible_reviewers(
    ctx: &WorkflowContext<'_>,
    project_id: DbId,
    caller_id: DbId,
) -> WorkflowResult<Vec<ReviewerCandidate>> {
    ProjectRepo::find_by_id(ctx.pool, project_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", project_id))?;

    if !ctx.permissions.is_project_member(project_id, caller_id).await? {
        return Err(CoreError::Forbidden(format!(
            "User {caller_id} is not a member of project {project_id}"
        ))
        .into());
    }

    Ok(ReviewerRepo::eligible_reviewers(ctx.pool, project_id, None).await?)
}
