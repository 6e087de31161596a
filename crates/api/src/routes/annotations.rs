//! Route definitions for the `/annotations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::annotation_workflow;
use crate::state::AppState;

/// Routes mounted at `/annotations`.
///
/// ```text
/// POST   /{id}/complete          -> complete_annotation
/// GET    /{id}/reviews           -> list_annotation_reviews
/// POST   /{id}/assign-reviewer   -> assign_reviewer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/complete",
            post(annotation_workflow::complete_annotation),
        )
        .route(
            "/{id}/reviews",
            get(annotation_workflow::list_annotation_reviews),
        )
        .route(
            "/{id}/assign-reviewer",
            post(annotation_workflow::assign_reviewer),
        )
}
