use labelflow_core::permissions::PermissionOracle;
use labelflow_db::DbPool;

/// Per-request handles the engine needs: the store and the permission oracle.
#[derive(Clone, Copy)]
pub struct WorkflowContext<'a> {
    pub pool: &'a DbPool,
    pub permissions: &'a dyn PermissionOracle,
}

impl<'a> WorkflowContext<'a> {
    pub fn new(pool: &'a DbPool, permissions: &'a dyn PermissionOracle) -> Self {
        Self { pool, permissions }
    }
}
