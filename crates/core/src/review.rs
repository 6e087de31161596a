//! Review decision vocabulary, the decision → entity mapping table, and
//! validation helpers shared by the workflow and API layers.

use crate::error::CoreError;
use crate::status::{AnnotationReviewStatus, TaskStatus};
use crate::text_enum::define_text_enum;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Maximum length for a review message.
pub const MAX_REVIEW_MESSAGE_LENGTH: usize = 10_000;

/// Review rounds for an annotation start at 1.
pub const FIRST_REVIEW_ROUND: i32 = 1;

define_text_enum! {
    /// Status of a single review round.
    ReviewStatus {
        Pending = "pending",
        Approved = "approved",
        Rejected = "rejected",
        ChangesRequested = "changes_requested",
    }
}

/// The statuses a decided review imposes on its annotation and task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionEffect {
    pub annotation_status: AnnotationReviewStatus,
    pub task_status: TaskStatus,
}

impl ReviewStatus {
    /// A decided review is immutable; only `pending` may be amended.
    pub fn is_decided(self) -> bool {
        self != ReviewStatus::Pending
    }

    /// Rejections and change requests must explain themselves.
    pub fn requires_message(self) -> bool {
        matches!(self, ReviewStatus::Rejected | ReviewStatus::ChangesRequested)
    }

    /// The mapping applied to annotation and task when a review is decided.
    ///
    /// | decision          | annotation | task           |
    /// |-------------------|------------|----------------|
    /// | approved          | approved   | completed      |
    /// | rejected          | rejected   | changes_needed |
    /// | changes_requested | pending    | changes_needed |
    ///
    /// `pending` has no effect.
    pub fn effect(self) -> Option<DecisionEffect> {
        let (annotation_status, task_status) = match self {
            ReviewStatus::Pending => return None,
            ReviewStatus::Approved => (AnnotationReviewStatus::Approved, TaskStatus::Completed),
            ReviewStatus::Rejected => (AnnotationReviewStatus::Rejected, TaskStatus::ChangesNeeded),
            ReviewStatus::ChangesRequested => {
                (AnnotationReviewStatus::Pending, TaskStatus::ChangesNeeded)
            }
        };
        Some(DecisionEffect {
            annotation_status,
            task_status,
        })
    }
}

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Trim a review message and enforce the per-status rules.
///
/// Blank messages collapse to `None`. Rejections and change requests must
/// carry a non-blank message.
pub fn normalize_review_message(
    status: ReviewStatus,
    message: Option<String>,
) -> Result<Option<String>, CoreError> {
    let message = message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty());

    if let Some(m) = &message {
        if m.chars().count() > MAX_REVIEW_MESSAGE_LENGTH {
            return Err(CoreError::Validation(format!(
                "Review message exceeds maximum length of {MAX_REVIEW_MESSAGE_LENGTH} characters"
            )));
        }
    }

    if status.requires_message() && message.is_none() {
        return Err(CoreError::Validation(format!(
            "A message is required when the review status is '{status}'"
        )));
    }

    Ok(message)
}

/// Round number for the next review of an annotation, given the highest
/// existing round (if any).
pub fn next_review_round(max_existing: Option<i32>) -> i32 {
    max_existing.map_or(FIRST_REVIEW_ROUND, |round| round + 1)
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_mapping_table() {
        assert_eq!(ReviewStatus::Pending.effect(), None);
        assert_eq!(
            ReviewStatus::Approved.effect(),
            Some(DecisionEffect {
                annotation_status: AnnotationReviewStatus::Approved,
                task_status: TaskStatus::Completed,
            })
        );
        assert_eq!(
            ReviewStatus::Rejected.effect(),
            Some(DecisionEffect {
                annotation_status: AnnotationReviewStatus::Rejected,
                task_status: TaskStatus::ChangesNeeded,
            })
        );
        assert_eq!(
            ReviewStatus::ChangesRequested.effect(),
            Some(DecisionEffect {
                annotation_status: AnnotationReviewStatus::Pending,
                task_status: TaskStatus::ChangesNeeded,
            })
        );
    }

    #[test]
    fn test_only_pending_is_undecided() {
        assert!(!ReviewStatus::Pending.is_decided());
        assert!(ReviewStatus::Approved.is_decided());
        assert!(ReviewStatus::Rejected.is_decided());
        assert!(ReviewStatus::ChangesRequested.is_decided());
    }

    #[test]
    fn test_message_required_for_rejection() {
        let result = normalize_review_message(ReviewStatus::Rejected, None);
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("rejected"));
    }

    #[test]
    fn test_blank_message_counts_as_missing() {
        let result =
            normalize_review_message(ReviewStatus::ChangesRequested, Some("   ".to_string()));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_message_optional_for_approval() {
        assert_eq!(
            normalize_review_message(ReviewStatus::Approved, None).unwrap(),
            None
        );
        assert_eq!(
            normalize_review_message(ReviewStatus::Approved, Some("  nice ".into())).unwrap(),
            Some("nice".to_string())
        );
    }

    #[test]
    fn test_message_too_long_rejected() {
        let long = "x".repeat(MAX_REVIEW_MESSAGE_LENGTH + 1);
        let result = normalize_review_message(ReviewStatus::Rejected, Some(long));
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("maximum length"));
    }

    #[test]
    fn test_next_round_starts_at_one() {
        assert_eq!(next_review_round(None), 1);
        assert_eq!(next_review_round(Some(1)), 2);
        assert_eq!(next_review_round(Some(7)), 8);
    }
}
