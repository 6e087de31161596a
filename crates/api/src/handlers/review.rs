//! Handlers for recording, reading and amending reviews.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use labelflow_core::review::ReviewStatus;
use labelflow_core::types::{DbId, ReviewId};
use labelflow_workflow::decisions::{self, ReviewPatch, ReviewSubmission};
use labelflow_workflow::history;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
   Request bodies
   -------------------------------------------------------------------------- */

// Statuses arrive as plain strings so an unknown value is reported as a
// validation error rather than a body rejection.

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub status: String,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub status: Option<String>,
    pub message: Option<String>,
}

/* --------------------------------------------------------------------------
   Handlers
   -------------------------------------------------------------------------- */

/// POST /projects/{project_id}/annotations/{annotation_id}/reviews
pub async fn create_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, annotation_id)): Path<(DbId, DbId)>,
    Json(input): Json<CreateReviewRequest>,
) -> AppResult<impl IntoResponse> {
    let submission = ReviewSubmission {
        status: input.status.parse::<ReviewStatus>()?,
        message: input.message,
    };

    let review = decisions::create_review(
        &state.workflow(),
        project_id,
        annotation_id,
        auth.user_id,
        submission,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

/// GET /reviews/{id}
pub async fn get_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(review_id): Path<ReviewId>,
) -> AppResult<impl IntoResponse> {
    let review = history::get_review(&state.workflow(), review_id, auth.user_id).await?;
    Ok(Json(DataResponse { data: review }))
}

/// PATCH /reviews/{id}
///
/// Amend the caller's own pending review.
pub async fn update_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(review_id): Path<ReviewId>,
    Json(input): Json<UpdateReviewRequest>,
) -> AppResult<impl IntoResponse> {
    let patch = ReviewPatch {
        status: input
            .status
            .as_deref()
            .map(str::parse::<ReviewStatus>)
            .transpose()?,
        message: input.message,
    };

    let review =
        decisions::update_review(&state.workflow(), review_id, auth.user_id, patch).await?;
    Ok(Json(DataResponse { data: review }))
}
