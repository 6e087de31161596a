//! State preconditions gating every workflow transition.
//!
//! The workflow layer calls these after locking the rows they inspect, so a
//! passing guard holds until the surrounding transaction commits. The
//! pending-review uniqueness rule is enforced by the database as well.

use crate::error::{CoreError, StateConflict};
use crate::review::ReviewStatus;
use crate::status::{AnnotationReviewStatus, TaskStatus};
use crate::types::DbId;

/// Only the annotator who owns an annotation may complete it.
pub fn ensure_annotation_owner(
    annotation_id: DbId,
    owner_id: DbId,
    caller_id: DbId,
) -> Result<(), CoreError> {
    if owner_id == caller_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "User {caller_id} does not own annotation {annotation_id}"
        )))
    }
}

/// Completion is only possible while the annotation is still pending.
pub fn ensure_annotation_completable(status: AnnotationReviewStatus) -> Result<(), CoreError> {
    if status == AnnotationReviewStatus::Pending {
        Ok(())
    } else {
        Err(StateConflict::AlreadyCompleted(status).into())
    }
}

pub fn ensure_task_accepts_submission(status: TaskStatus) -> Result<(), CoreError> {
    if status.accepts_submission() {
        Ok(())
    } else {
        Err(StateConflict::InvalidTaskState(status).into())
    }
}

pub fn ensure_annotation_not_finalized(status: AnnotationReviewStatus) -> Result<(), CoreError> {
    if status.is_finalized() {
        Err(StateConflict::AlreadyFinalized(status).into())
    } else {
        Ok(())
    }
}

pub fn ensure_task_reviewable(status: TaskStatus) -> Result<(), CoreError> {
    if status.accepts_review() {
        Ok(())
    } else {
        Err(StateConflict::NotReadyForReview(status).into())
    }
}

/// A `pending` claim opens a round, so it needs a submission awaiting review.
/// After changes were requested the next round belongs to the resubmission.
pub fn ensure_task_claimable(status: TaskStatus) -> Result<(), CoreError> {
    if status == TaskStatus::InReview {
        Ok(())
    } else {
        Err(StateConflict::NotReadyForReview(status).into())
    }
}

/// When an annotation has an assigned reviewer, nobody else may act on it.
pub fn ensure_assigned_reviewer(
    assigned_reviewer_id: Option<DbId>,
    reviewer_id: DbId,
) -> Result<(), CoreError> {
    match assigned_reviewer_id {
        Some(assigned) if assigned != reviewer_id => Err(CoreError::Forbidden(format!(
            "Annotation is assigned to reviewer {assigned}"
        ))),
        _ => Ok(()),
    }
}

pub fn ensure_self_review_allowed(
    annotator_id: DbId,
    reviewer_id: DbId,
    allow_self_review: bool,
) -> Result<(), CoreError> {
    if annotator_id == reviewer_id && !allow_self_review {
        Err(CoreError::Forbidden(
            "Self-review is not allowed in this project".to_string(),
        ))
    } else {
        Ok(())
    }
}

pub fn ensure_review_owner(review_reviewer_id: DbId, caller_id: DbId) -> Result<(), CoreError> {
    if review_reviewer_id == caller_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only the reviewer of a review may amend it".to_string(),
        ))
    }
}

/// Decided reviews are immutable.
pub fn ensure_review_pending(status: ReviewStatus) -> Result<(), CoreError> {
    if status.is_decided() {
        Err(StateConflict::ReviewAlreadyDecided(status).into())
    } else {
        Ok(())
    }
}

/// Last line of defence before a task status write.
pub fn ensure_task_transition(from: TaskStatus, to: TaskStatus) -> Result<(), CoreError> {
    if from == to || from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreError::Internal(format!(
            "Illegal task transition '{from}' -> '{to}'"
        )))
    }
}
