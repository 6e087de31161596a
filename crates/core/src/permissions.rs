//! Typed project capabilities and the permission oracle seam.
//!
//! Role and membership storage is owned elsewhere; the workflow engine only
//! asks yes/no questions about a fixed set of capabilities.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::text_enum::define_text_enum;
use crate::types::DbId;

define_text_enum! {
    /// A single named project capability.
    Capability {
        Admin = "admin",
        EditProject = "editProject",
        EditMembers = "editMembers",
        EditRoles = "editRoles",
        UploadFiles = "uploadFiles",
        ReviewAnnotations = "reviewAnnotations",
        ViewReviews = "viewReviews",
    }
}

/// The full capability set granted by a project role.
///
/// One field per [`Capability`]; there is no open-ended flag map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    pub admin: bool,
    pub edit_project: bool,
    pub edit_members: bool,
    pub edit_roles: bool,
    pub upload_files: bool,
    pub review_annotations: bool,
    pub view_reviews: bool,
}

impl PermissionSet {
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::Admin => self.admin,
            Capability::EditProject => self.edit_project,
            Capability::EditMembers => self.edit_members,
            Capability::EditRoles => self.edit_roles,
            Capability::UploadFiles => self.upload_files,
            Capability::ReviewAnnotations => self.review_annotations,
            Capability::ViewReviews => self.view_reviews,
        }
    }
}

/// Answers permission and membership questions for the engine.
#[async_trait]
pub trait PermissionOracle: Send + Sync {
    async fn has_permission(
        &self,
        project_id: DbId,
        user_id: DbId,
        capability: Capability,
    ) -> Result<bool, CoreError>;

    async fn is_project_member(&self, project_id: DbId, user_id: DbId) -> Result<bool, CoreError>;
}

/// Fail with [`CoreError::Forbidden`] unless the user holds `capability`.
pub async fn require_permission(
    oracle: &dyn PermissionOracle,
    project_id: DbId,
    user_id: DbId,
    capability: Capability,
) -> Result<(), CoreError> {
    if oracle.has_permission(project_id, user_id, capability).await? {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "User {user_id} lacks the '{capability}' permission on project {project_id}"
        )))
    }
}

/// Fail with [`CoreError::Forbidden`] unless the user holds at least one of `capabilities`.
pub async fn require_any_permission(
    oracle: &dyn PermissionOracle,
    project_id: DbId,
    user_id: DbId,
    capabilities: &[Capability],
) -> Result<(), CoreError> {
    for capability in capabilities {
        if oracle.has_permission(project_id, user_id, *capability).await? {
            return Ok(());
        }
    }
    let names: Vec<&str> = capabilities.iter().map(|c| c.as_str()).collect();
    Err(CoreError::Forbidden(format!(
        "User {user_id} needs one of [{}] on project {project_id}",
        names.join(", ")
    )))
}
