//! Project entity model and DTOs.

use labelflow_core::review_settings::{ReviewMode, ReviewSettings};
use labelflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub review_mode: ReviewMode,
    pub allow_self_review: bool,
    pub auto_assign_reviewer: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// The review policy columns as a domain value.
    pub fn review_settings(&self) -> ReviewSettings {
        ReviewSettings {
            review_mode: self.review_mode,
            allow_self_review: self.allow_self_review,
            auto_assign_reviewer: self.auto_assign_reviewer,
        }
    }
}

/// DTO for creating a new project. Omitted review columns use the table defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub review_mode: Option<ReviewMode>,
    pub allow_self_review: Option<bool>,
    pub auto_assign_reviewer: Option<bool>,
}
