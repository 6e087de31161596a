use std::sync::Arc;

use labelflow_core::permissions::PermissionOracle;
use labelflow_workflow::WorkflowContext;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: labelflow_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Capability lookups for the workflow engine.
    pub permissions: Arc<dyn PermissionOracle>,
}

impl AppState {
    /// Per-request engine context borrowing this state.
    pub fn workflow(&self) -> WorkflowContext<'_> {
        WorkflowContext::new(&self.pool, self.permissions.as_ref())
    }
}
