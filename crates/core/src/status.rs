//! Lifecycle vocabularies for tasks and annotations.
//!
//! Values match the CHECK constraints in the `tasks` and `annotations`
//! migrations.

use crate::text_enum::define_text_enum;

define_text_enum! {
    /// Lifecycle status of a task (a unit of annotation work).
    TaskStatus {
        Unassigned = "unassigned",
        Annotating = "annotating",
        Completed = "completed",
        InReview = "in_review",
        ChangesNeeded = "changes_needed",
    }
}

define_text_enum! {
    /// Review status carried on an annotation.
    ///
    /// `Pending` covers both "not yet reviewed" and "changes requested";
    /// the task status tells the two apart.
    AnnotationReviewStatus {
        Pending = "pending",
        Approved = "approved",
        Rejected = "rejected",
    }
}

impl TaskStatus {
    /// Whether the annotator may submit (complete) work from this status.
    pub fn accepts_submission(self) -> bool {
        matches!(self, TaskStatus::Annotating | TaskStatus::ChangesNeeded)
    }

    /// Whether a reviewer may record a decision while the task is in this status.
    pub fn accepts_review(self) -> bool {
        matches!(self, TaskStatus::InReview | TaskStatus::ChangesNeeded)
    }

    /// Transitions the review workflow is allowed to perform.
    ///
    /// `in_review` is only reachable from `annotating` / `changes_needed`
    /// (or is kept as-is), and `completed` is only reachable from states in
    /// which an approval can be recorded.
    pub fn can_transition_to(self, next: TaskStatus) -> bool {
        use TaskStatus::*;
        match (self, next) {
            (Annotating | ChangesNeeded | InReview, InReview) => true,
            (Annotating | ChangesNeeded | InReview, Completed) => true,
            (InReview | ChangesNeeded, ChangesNeeded) => true,
            _ => false,
        }
    }
}

impl AnnotationReviewStatus {
    /// Approved and rejected annotations are final; no further review rounds.
    pub fn is_finalized(self) -> bool {
        matches!(
            self,
            AnnotationReviewStatus::Approved | AnnotationReviewStatus::Rejected
        )
    }
}
