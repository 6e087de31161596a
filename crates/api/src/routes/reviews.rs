//! Route definitions for the `/reviews` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// GET    /{id}   -> get_review
/// PATCH  /{id}   -> update_review
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(review::get_review).patch(review::update_review))
}
