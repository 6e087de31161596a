//! Per-project review policy and workflow-mode resolution.
//!
//! [`resolve_workflow_mode`] is the decision half of the policy resolver: it
//! works on settings and an already-loaded eligible reviewer list, so the
//! storage layer decides *how* candidates are fetched and this module
//! decides *what* they mean.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::reviewer_allocation::{select_reviewer_by_workload, ReviewerCandidate};
use crate::text_enum::define_text_enum;
use crate::types::DbId;

define_text_enum! {
    /// How a project treats submitted annotations.
    ReviewMode {
        /// Review when somebody can review, otherwise auto-approve.
        Auto = "auto",
        /// Every submission needs a human reviewer; fail if none exists.
        AlwaysRequired = "always-required",
        /// Every submission is auto-approved.
        AlwaysSkip = "always-skip",
    }
}

define_text_enum! {
    /// Resolved outcome for one submission.
    WorkflowMode {
        AutoApprove = "auto-approve",
        ReviewRequired = "review-required",
    }
}

define_text_enum! {
    /// Informational mode shown alongside project settings.
    ///
    /// Never used to drive an actual completion.
    DisplayWorkflowMode {
        AutoApprove = "auto-approve",
        ReviewRequired = "review-required",
        NoEligibleReviewers = "no-eligible-reviewers",
    }
}

/// The review columns of a project record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSettings {
    pub review_mode: ReviewMode,
    pub allow_self_review: bool,
    pub auto_assign_reviewer: bool,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            review_mode: ReviewMode::Auto,
            allow_self_review: false,
            auto_assign_reviewer: true,
        }
    }
}

/// Partial update for [`ReviewSettings`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSettingsPatch {
    pub review_mode: Option<ReviewMode>,
    pub allow_self_review: Option<bool>,
    pub auto_assign_reviewer: Option<bool>,
}

impl ReviewSettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.review_mode.is_none()
            && self.allow_self_review.is_none()
            && self.auto_assign_reviewer.is_none()
    }

    pub fn apply_to(&self, settings: ReviewSettings) -> ReviewSettings {
        ReviewSettings {
            review_mode: self.review_mode.unwrap_or(settings.review_mode),
            allow_self_review: self.allow_self_review.unwrap_or(settings.allow_self_review),
            auto_assign_reviewer: self
                .auto_assign_reviewer
                .unwrap_or(settings.auto_assign_reviewer),
        }
    }
}

impl ReviewSettings {
    /// `always-skip` never consults the reviewer pool.
    pub fn needs_reviewer_lookup(&self) -> bool {
        self.review_mode != ReviewMode::AlwaysSkip
    }

    /// The user to leave out of the eligible set for a given annotator.
    pub fn reviewer_exclusion(&self, annotator_id: DbId) -> Option<DbId> {
        if self.allow_self_review {
            None
        } else {
            Some(annotator_id)
        }
    }
}

/// Outcome of the policy resolver for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDecision {
    pub mode: WorkflowMode,
    pub assigned_reviewer: Option<DbId>,
}

impl WorkflowDecision {
    pub fn auto_approve() -> Self {
        Self {
            mode: WorkflowMode::AutoApprove,
            assigned_reviewer: None,
        }
    }

    pub fn requires_review(&self) -> bool {
        self.mode == WorkflowMode::ReviewRequired
    }
}

/// Decide between auto-approval and human review.
///
/// `eligible` must already exclude the annotator when self-review is off.
/// Only `always-required` with an empty pool is an error; `auto` degrades
/// to auto-approval.
pub fn resolve_workflow_mode(
    project_id: DbId,
    settings: &ReviewSettings,
    eligible: &[ReviewerCandidate],
) -> Result<WorkflowDecision, CoreError> {
    match settings.review_mode {
        ReviewMode::AlwaysSkip => Ok(WorkflowDecision::auto_approve()),
        ReviewMode::AlwaysRequired if eligible.is_empty() => {
            Err(CoreError::NoEligibleReviewers { project_id })
        }
        ReviewMode::Auto if eligible.is_empty() => Ok(WorkflowDecision::auto_approve()),
        ReviewMode::AlwaysRequired | ReviewMode::Auto => {
            let assigned_reviewer = if settings.auto_assign_reviewer {
                Some(select_reviewer_by_workload(project_id, eligible)?)
            } else {
                None
            };
            Ok(WorkflowDecision {
                mode: WorkflowMode::ReviewRequired,
                assigned_reviewer,
            })
        }
    }
}

/// Collapse a resolution result into the informational display mode.
///
/// `NoEligibleReviewers` becomes a sentinel; every other error propagates.
pub fn display_workflow_mode(
    resolved: Result<WorkflowDecision, CoreError>,
) -> Result<DisplayWorkflowMode, CoreError> {
    match resolved {
        Ok(decision) => Ok(match decision.mode {
            WorkflowMode::AutoApprove => DisplayWorkflowMode::AutoApprove,
            WorkflowMode::ReviewRequired => DisplayWorkflowMode::ReviewRequired,
        }),
        Err(CoreError::NoEligibleReviewers { .. }) => Ok(DisplayWorkflowMode::NoEligibleReviewers),
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn settings(review_mode: ReviewMode, auto_assign_reviewer: bool) -> ReviewSettings {
        ReviewSettings {
            review_mode,
            allow_self_review: false,
            auto_assign_reviewer,
        }
    }

    fn pool() -> Vec<ReviewerCandidate> {
        vec![
            ReviewerCandidate {
                user_id: 10,
                pending_review_count: 3,
            },
            ReviewerCandidate {
                user_id: 11,
                pending_review_count: 1,
            },
        ]
    }

    #[test]
    fn test_always_skip_auto_approves_even_with_reviewers() {
        let decision =
            resolve_workflow_mode(1, &settings(ReviewMode::AlwaysSkip, true), &pool()).unwrap();
        assert_eq!(decision, WorkflowDecision::auto_approve());
        assert!(!settings(ReviewMode::AlwaysSkip, true).needs_reviewer_lookup());
    }

    #[test]
    fn test_always_required_without_reviewers_fails() {
        let result = resolve_workflow_mode(3, &settings(ReviewMode::AlwaysRequired, true), &[]);
        assert_matches!(result, Err(CoreError::NoEligibleReviewers { project_id: 3 }));
    }

    #[test]
    fn test_auto_without_reviewers_degrades_to_auto_approve() {
        let decision = resolve_workflow_mode(1, &settings(ReviewMode::Auto, true), &[]).unwrap();
        assert_eq!(decision.mode, WorkflowMode::AutoApprove);
        assert_eq!(decision.assigned_reviewer, None);
    }

    #[test]
    fn test_auto_with_reviewers_assigns_least_loaded() {
        let decision =
            resolve_workflow_mode(1, &settings(ReviewMode::Auto, true), &pool()).unwrap();
        assert!(decision.requires_review());
        assert_eq!(decision.assigned_reviewer, Some(11));
    }

    #[test]
    fn test_review_required_without_auto_assign_leaves_unassigned() {
        let decision =
            resolve_workflow_mode(1, &settings(ReviewMode::AlwaysRequired, false), &pool())
                .unwrap();
        assert!(decision.requires_review());
        assert_eq!(decision.assigned_reviewer, None);
    }

    #[test]
    fn test_reviewer_exclusion_follows_self_review_flag() {
        let mut s = settings(ReviewMode::Auto, true);
        assert_eq!(s.reviewer_exclusion(42), Some(42));
        s.allow_self_review = true;
        assert_eq!(s.reviewer_exclusion(42), None);
    }

    #[test]
    fn test_display_mode_swallows_only_missing_reviewers() {
        let sentinel = display_workflow_mode(Err(CoreError::NoEligibleReviewers { project_id: 1 }));
        assert_eq!(sentinel.unwrap(), DisplayWorkflowMode::NoEligibleReviewers);

        let other = display_workflow_mode(Err(CoreError::Internal("db down".into())));
        assert_matches!(other, Err(CoreError::Internal(_)));

        let ok = display_workflow_mode(Ok(WorkflowDecision::auto_approve()));
        assert_eq!(ok.unwrap(), DisplayWorkflowMode::AutoApprove);
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let base = ReviewSettings::default();
        let patch = ReviewSettingsPatch {
            review_mode: Some(ReviewMode::AlwaysRequired),
            ..ReviewSettingsPatch::default()
        };
        let updated = patch.apply_to(base);
        assert_eq!(updated.review_mode, ReviewMode::AlwaysRequired);
        assert_eq!(updated.allow_self_review, base.allow_self_review);
        assert_eq!(updated.auto_assign_reviewer, base.auto_assign_reviewer);
        assert!(ReviewSettingsPatch::default().is_empty());
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_review_mode_wire_names() {
        assert_eq!(ReviewMode::AlwaysRequired.as_str(), "always-required");
        assert_eq!(
            "always-skip".parse::<ReviewMode>().unwrap(),
            ReviewMode::AlwaysSkip
        );
    }
}
