//! Handlers for project-level review configuration and reviewer views.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use labelflow_core::review_settings::{ReviewMode, ReviewSettingsPatch};
use labelflow_core::types::DbId;
use labelflow_workflow::{allocator, history, settings};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `PATCH /projects/{id}/review-settings`. Absent fields are kept.
#[derive(Debug, Deserialize)]
pub struct UpdateReviewSettingsRequest {
    pub review_mode: Option<String>,
    pub allow_self_review: Option<bool>,
    pub auto_assign_reviewer: Option<bool>,
}

/// GET /projects/{id}/eligible-reviewers
pub async fn list_eligible_reviewers(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reviewers =
        allocator::get_eligible_reviewers(&state.workflow(), project_id, auth.user_id).await?;
    Ok(Json(DataResponse { data: reviewers }))
}

/// GET /projects/{id}/review-settings
pub async fn get_review_settings(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let view =
        settings::get_project_review_settings(&state.workflow(), project_id, auth.user_id)
            .await?;
    Ok(Json(DataResponse { data: view }))
}

/// PATCH /projects/{id}/review-settings
pub async fn update_review_settings(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<UpdateReviewSettingsRequest>,
) -> AppResult<impl IntoResponse> {
    let patch = ReviewSettingsPatch {
        review_mode: input
            .review_mode
            .as_deref()
            .map(str::parse::<ReviewMode>)
            .transpose()?,
        allow_self_review: input.allow_self_review,
        auto_assign_reviewer: input.auto_assign_reviewer,
    };

    let updated = settings::update_project_review_settings(
        &state.workflow(),
        project_id,
        auth.user_id,
        patch,
    )
    .await?;
    Ok(Json(DataResponse { data: updated }))
}

/// GET /projects/{id}/review-queue
///
/// The caller's pending reviews in the project.
pub async fn review_queue(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let queue = history::reviewer_queue(&state.workflow(), project_id, auth.user_id).await?;
    Ok(Json(DataResponse { data: queue }))
}
