//! Repository for the `project_roles` and `project_members` tables.

use labelflow_core::permissions::PermissionSet;
use labelflow_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::member::{CreateProjectMember, CreateProjectRole, ProjectMember, ProjectRole};

const ROLE_COLUMNS: &str = "id, project_id, name, admin, edit_project, edit_members, edit_roles, \
    upload_files, review_annotations, view_reviews, created_at, updated_at";

const MEMBER_COLUMNS: &str = "id, project_id, user_id, role_id, created_at, updated_at";

pub struct ProjectRoleRepo;

impl ProjectRoleRepo {
    pub async fn create<'e, E>(
        executor: E,
        input: &CreateProjectRole,
    ) -> Result<ProjectRole, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let p = &input.permissions;
        let query = format!(
            "INSERT INTO project_roles
                (project_id, name, admin, edit_project, edit_members, edit_roles,
                 upload_files, review_annotations, view_reviews)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {ROLE_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRole>(&query)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(p.admin)
            .bind(p.edit_project)
            .bind(p.edit_members)
            .bind(p.edit_roles)
            .bind(p.upload_files)
            .bind(p.review_annotations)
            .bind(p.view_reviews)
            .fetch_one(executor)
            .await
    }
}

pub struct ProjectMemberRepo;

impl ProjectMemberRepo {
    /// Add a user to a project with the given role.
    pub async fn add<'e, E>(
        executor: E,
        input: &CreateProjectMember,
    ) -> Result<ProjectMember, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO project_members (project_id, user_id, role_id)
             VALUES ($1, $2, $3)
             RETURNING {MEMBER_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectMember>(&query)
            .bind(input.project_id)
            .bind(input.user_id)
            .bind(input.role_id)
            .fetch_one(executor)
            .await
    }

    /// The capability set a user holds on a project, or `None` for non-members.
    pub async fn find_permissions<'e, E>(
        executor: E,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Option<PermissionSet>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let row: Option<(bool, bool, bool, bool, bool, bool, bool)> = sqlx::query_as(
            "SELECT r.admin, r.edit_project, r.edit_members, r.edit_roles,
                    r.upload_files, r.review_annotations, r.view_reviews
             FROM project_members m
             JOIN project_roles r ON r.id = m.role_id
             WHERE m.project_id = $1 AND m.user_id = $2",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(executor)
        .await?;

        Ok(row.map(
            |(
                admin,
                edit_project,
                edit_members,
                edit_roles,
                upload_files,
                review_annotations,
                view_reviews,
            )| PermissionSet {
                admin,
                edit_project,
                edit_members,
                edit_roles,
                upload_files,
                review_annotations,
                view_reviews,
            },
        ))
    }
}
