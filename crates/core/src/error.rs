use std::fmt::Display;

use crate::review::ReviewStatus;
use crate::status::{AnnotationReviewStatus, TaskStatus};
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("State conflict: {0}")]
    StateConflict(#[from] StateConflict),

    #[error("No eligible reviewers available for project {project_id}")]
    NoEligibleReviewers { project_id: DbId },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl Display) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// An operation that is well-formed but invalid for the current lifecycle state.
///
/// These are expected outcomes reported to the caller; the engine never
/// retries them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateConflict {
    #[error("annotation has already been completed (review status: {0})")]
    AlreadyCompleted(AnnotationReviewStatus),

    #[error("annotation review is already final (review status: {0})")]
    AlreadyFinalized(AnnotationReviewStatus),

    #[error("task cannot be submitted while in status '{0}'")]
    InvalidTaskState(TaskStatus),

    #[error("task is not ready for review (status: '{0}')")]
    NotReadyForReview(TaskStatus),

    #[error("a pending review already exists for annotation {annotation_id}")]
    ReviewInProgress { annotation_id: DbId },

    #[error("review has already been decided (status: {0}); start a new round instead")]
    ReviewAlreadyDecided(ReviewStatus),
}

impl StateConflict {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            StateConflict::AlreadyCompleted(_) => "ALREADY_COMPLETED",
            StateConflict::AlreadyFinalized(_) => "ALREADY_FINALIZED",
            StateConflict::InvalidTaskState(_) => "INVALID_TASK_STATE",
            StateConflict::NotReadyForReview(_) => "NOT_READY_FOR_REVIEW",
            StateConflict::ReviewInProgress { .. } => "REVIEW_IN_PROGRESS",
            StateConflict::ReviewAlreadyDecided(_) => "REVIEW_ALREADY_DECIDED",
        }
    }
}
