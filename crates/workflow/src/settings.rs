//! Project review settings: read with the resolved display mode, and update.

use labelflow_core::error::CoreError;
use labelflow_core::permissions::{require_permission, Capability};
use labelflow_core::review_settings::{
    display_workflow_mode, DisplayWorkflowMode, ReviewMode, ReviewSettings, ReviewSettingsPatch,
};
use labelflow_core::types::DbId;
use labelflow_db::repositories::ProjectRepo;
use serde::Serialize;

use crate::context::WorkflowContext;
use crate::error::{WorkflowError, WorkflowResult};
use crate::policy;

/// Review settings of a project plus the mode a submission by the caller
/// would currently resolve to.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectReviewSettingsView {
    pub project_id: DbId,
    pub review_mode: ReviewMode,
    pub allow_self_review: bool,
    pub auto_assign_reviewer: bool,
    pub current_workflow_mode: DisplayWorkflowMode,
}

/// Read a project's review settings. Any project member may call this.
///
/// An `always-required` project with no eligible reviewer reports the
/// `no-eligible-reviewers` display mode instead of failing.
pub async fn get_project_review_settings(
    ctx: &WorkflowContext<'_>,
    project_id: DbId,
    user_id: DbId,
) -> WorkflowResult<ProjectReviewSettingsView> {
    let mut conn = ctx.pool.acquire().await?;

    let project = ProjectRepo::find_by_id(&mut *conn, project_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", project_id))?;

    if !ctx.permissions.is_project_member(project_id, user_id).await? {
        return Err(CoreError::Forbidden(format!(
            "User {user_id} is not a member of project {project_id}"
        ))
        .into());
    }

    let resolved = match policy::determine_workflow_mode(&mut conn, project_id, user_id).await {
        Ok(decision) => Ok(decision),
        Err(WorkflowError::Core(err)) => Err(err),
        Err(err) => return Err(err),
    };
    let current_workflow_mode = display_workflow_mode(resolved)?;

    Ok(ProjectReviewSettingsView {
        project_id,
        review_mode: project.review_mode,
        allow_self_review: project.allow_self_review,
        auto_assign_reviewer: project.auto_assign_reviewer,
        current_workflow_mode,
    })
}

/// Apply a partial settings update. Requires `editProject`.
///
/// Affects future submissions only.
pub async fn update_project_review_settings(
    ctx: &WorkflowContext<'_>,
    project_id: DbId,
    actor_id: DbId,
    patch: ReviewSettingsPatch,
) -> WorkflowResult<ReviewSettings> {
    if patch.is_empty() {
        return Err(CoreError::Validation(
            "At least one review setting must be provided".to_string(),
        )
        .into());
    }

    require_permission(ctx.permissions, project_id, actor_id, Capability::EditProject).await?;

    let mut tx = ctx.pool.begin().await?;

    let project = ProjectRepo::find_by_id_for_update(&mut *tx, project_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", project_id))?;
    let settings = patch.apply_to(project.review_settings());

    let updated = ProjectRepo::update_review_settings(&mut *tx, project_id, &settings)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", project_id))?;

    tx.commit().await?;

    tracing::info!(
        project_id,
        actor_id,
        review_mode = %settings.review_mode,
        allow_self_review = settings.allow_self_review,
        auto_assign_reviewer = settings.auto_assign_reviewer,
        "Project review settings updated"
    );

    Ok(updated.review_settings())
}
