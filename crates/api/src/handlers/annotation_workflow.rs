//! Handlers for annotation completion, review history and manual assignment.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use labelflow_core::types::DbId;
use labelflow_workflow::{assignment, history, lifecycle};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `POST /annotations/{id}/assign-reviewer`.
#[derive(Debug, Deserialize)]
pub struct AssignReviewerRequest {
    pub reviewer_id: DbId,
}

/// POST /annotations/{id}/complete
///
/// Submit the caller's annotation for review, or auto-approve it.
pub async fn complete_annotation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(annotation_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let outcome =
        lifecycle::complete_annotation(&state.workflow(), annotation_id, auth.user_id).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /annotations/{id}/reviews
pub async fn list_annotation_reviews(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(annotation_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reviews =
        history::list_annotation_reviews(&state.workflow(), annotation_id, auth.user_id).await?;
    Ok(Json(DataResponse { data: reviews }))
}

/// POST /annotations/{id}/assign-reviewer
///
/// Open a pending round for the given reviewer. Requires `editProject`.
pub async fn assign_reviewer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(annotation_id): Path<DbId>,
    Json(input): Json<AssignReviewerRequest>,
) -> AppResult<impl IntoResponse> {
    let review = assignment::assign_reviewer(
        &state.workflow(),
        annotation_id,
        input.reviewer_id,
        auth.user_id,
    )
    .await?;
    Ok(Json(DataResponse { data: review }))
}
