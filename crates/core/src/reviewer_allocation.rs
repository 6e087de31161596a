//! Least-loaded reviewer selection.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// A project member who may review, with their current project-scoped workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerCandidate {
    pub user_id: DbId,
    /// Number of `pending` reviews this user holds within the project.
    pub pending_review_count: i64,
}

/// Pick the candidate with the fewest pending reviews.
///
/// Ties are broken by the lowest `user_id`, independent of input order.
pub fn select_reviewer_by_workload(
    project_id: DbId,
    candidates: &[ReviewerCandidate],
) -> Result<DbId, CoreError> {
    candidates
        .iter()
        .min_by_key(|c| (c.pending_review_count, c.user_id))
        .map(|c| c.user_id)
        .ok_or(CoreError::NoEligibleReviewers { project_id })
}
