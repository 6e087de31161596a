//! Route definitions for project-scoped review endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{project_review, review};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// POST   /{id}/annotations/{annotation_id}/reviews  -> create_review
/// GET    /{id}/eligible-reviewers                   -> list_eligible_reviewers
/// GET    /{id}/review-settings                      -> get_review_settings
/// PATCH  /{id}/review-settings                      -> update_review_settings
/// GET    /{id}/review-queue                         -> review_queue
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/annotations/{annotation_id}/reviews",
            post(review::create_review),
        )
        .route(
            "/{id}/eligible-reviewers",
            get(project_review::list_eligible_reviewers),
        )
        .route(
            "/{id}/review-settings",
            get(project_review::get_review_settings)
                .patch(project_review::update_review_settings),
        )
        .route("/{id}/review-queue", get(project_review::review_queue))
}
