//! PostgreSQL-backed [`PermissionOracle`] reading project roles.

use async_trait::async_trait;
use labelflow_core::error::CoreError;
use labelflow_core::permissions::{Capability, PermissionOracle};
use labelflow_core::types::DbId;

use crate::repositories::ProjectMemberRepo;
use crate::DbPool;

/// Answers capability questions from `project_members` / `project_roles`.
#[derive(Clone)]
pub struct PgPermissionOracle {
    pool: DbPool,
}

impl PgPermissionOracle {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn storage_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Permission lookup failed");
    CoreError::Internal(format!("permission lookup failed: {err}"))
}

#[async_trait]
impl PermissionOracle for PgPermissionOracle {
    async fn has_permission(
        &self,
        project_id: DbId,
        user_id: DbId,
        capability: Capability,
    ) -> Result<bool, CoreError> {
        let permissions = ProjectMemberRepo::find_permissions(&self.pool, project_id, user_id)
            .await
            .map_err(storage_error)?;
        Ok(permissions.is_some_and(|p| p.allows(capability)))
    }

    async fn is_project_member(&self, project_id: DbId, user_id: DbId) -> Result<bool, CoreError> {
        let permissions = ProjectMemberRepo::find_permissions(&self.pool, project_id, user_id)
            .await
            .map_err(storage_error)?;
        Ok(permissions.is_some())
    }
}
