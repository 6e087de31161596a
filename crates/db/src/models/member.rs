//! Project roles (capability sets) and memberships.

use labelflow_core::permissions::PermissionSet;
use labelflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `project_roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectRole {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub admin: bool,
    pub edit_project: bool,
    pub edit_members: bool,
    pub edit_roles: bool,
    pub upload_files: bool,
    pub review_annotations: bool,
    pub view_reviews: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProjectRole {
    pub fn permissions(&self) -> PermissionSet {
        PermissionSet {
            admin: self.admin,
            edit_project: self.edit_project,
            edit_members: self.edit_members,
            edit_roles: self.edit_roles,
            upload_files: self.upload_files,
            review_annotations: self.review_annotations,
            view_reviews: self.view_reviews,
        }
    }
}

/// DTO for creating a project role.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRole {
    pub project_id: DbId,
    pub name: String,
    pub permissions: PermissionSet,
}

/// A row from the `project_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMember {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub role_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a user to a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectMember {
    pub project_id: DbId,
    pub user_id: DbId,
    pub role_id: DbId,
}
