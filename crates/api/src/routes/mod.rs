pub mod annotations;
pub mod health;
pub mod projects;
pub mod reviews;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /annotations/{id}/complete                          complete (POST)
/// /annotations/{id}/reviews                           review history (GET)
/// /annotations/{id}/assign-reviewer                   manual assignment (POST)
///
/// /reviews/{id}                                       get, amend (PATCH)
///
/// /projects/{id}/annotations/{annotation_id}/reviews  create review (POST)
/// /projects/{id}/eligible-reviewers                   reviewer pool (GET)
/// /projects/{id}/review-settings                      get, update (PATCH)
/// /projects/{id}/review-queue                         caller's pending reviews (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/annotations", annotations::router())
        .nest("/reviews", reviews::router())
        .nest("/projects", projects::router())
}
