use labelflow_core::error::{CoreError, StateConflict};
use labelflow_core::types::DbId;
use labelflow_db::repositories::review_repo::{PENDING_REVIEW_INDEX, REVIEW_ROUND_CONSTRAINT};

/// Error returned by every workflow operation.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Domain outcome: validation, permission, not-found or state conflict.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage failure. The enclosing transaction has been rolled back.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

impl WorkflowError {
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            WorkflowError::Core(core) => Some(core),
            WorkflowError::Database(_) => None,
        }
    }

    /// The state conflict carried by this error, if it is one.
    pub fn state_conflict(&self) -> Option<&StateConflict> {
        match self.as_core() {
            Some(CoreError::StateConflict(conflict)) => Some(conflict),
            _ => None,
        }
    }
}

impl From<StateConflict> for WorkflowError {
    fn from(conflict: StateConflict) -> Self {
        WorkflowError::Core(CoreError::StateConflict(conflict))
    }
}

/// Translate a review insert failure.
///
/// Losing a race on the pending-review index or on the round constraint
/// means another transition on the same annotation committed first.
pub(crate) fn review_insert_error(err: sqlx::Error, annotation_id: DbId) -> WorkflowError {
    match labelflow_db::unique_violation_constraint(&err) {
        Some(PENDING_REVIEW_INDEX) | Some(REVIEW_ROUND_CONSTRAINT) => {
            tracing::debug!(annotation_id, "Concurrent review insert lost the race");
            StateConflict::ReviewInProgress { annotation_id }.into()
        }
        _ => WorkflowError::Database(err),
    }
}
