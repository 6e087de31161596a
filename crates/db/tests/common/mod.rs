//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use labelflow_core::permissions::PermissionSet;
use labelflow_core::review::ReviewStatus;
use labelflow_core::review_settings::ReviewMode;
use labelflow_core::status::TaskStatus;
use labelflow_core::types::DbId;
use labelflow_db::models::annotation::{Annotation, CreateAnnotation};
use labelflow_db::models::member::{CreateProjectMember, CreateProjectRole, ProjectRole};
use labelflow_db::models::project::{CreateProject, Project};
use labelflow_db::models::review::{NewReview, Review};
use labelflow_db::models::task::{CreateTask, Task};
use labelflow_db::models::user::{CreateUser, User};
use labelflow_db::repositories::{
    AnnotationRepo, ProjectMemberRepo, ProjectRepo, ProjectRoleRepo, ReviewRepo, TaskRepo,
    UserRepo,
};
use sqlx::PgPool;

pub fn reviewer_permissions() -> PermissionSet {
    PermissionSet {
        review_annotations: true,
        view_reviews: true,
        ..PermissionSet::default()
    }
}

pub fn annotator_permissions() -> PermissionSet {
    PermissionSet {
        upload_files: true,
        ..PermissionSet::default()
    }
}

pub async fn create_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn create_project(pool: &PgPool, name: &str, mode: ReviewMode) -> Project {
    ProjectRepo::create(
        pool,
        &CreateProject {
            name: name.to_string(),
            review_mode: Some(mode),
            ..CreateProject::default()
        },
    )
    .await
    .unwrap()
}

pub async fn create_role(
    pool: &PgPool,
    project_id: DbId,
    name: &str,
    permissions: PermissionSet,
) -> ProjectRole {
    ProjectRoleRepo::create(
        pool,
        &CreateProjectRole {
            project_id,
            name: name.to_string(),
            permissions,
        },
    )
    .await
    .unwrap()
}

pub async fn add_member(pool: &PgPool, project_id: DbId, user_id: DbId, role_id: DbId) {
    ProjectMemberRepo::add(
        pool,
        &CreateProjectMember {
            project_id,
            user_id,
            role_id,
        },
    )
    .await
    .unwrap();
}

pub async fn create_task(pool: &PgPool, project_id: DbId, status: TaskStatus) -> Task {
    TaskRepo::create(
        pool,
        &CreateTask {
            project_id,
            status: Some(status),
            assigned_to: None,
            priority: None,
        },
    )
    .await
    .unwrap()
}

pub async fn create_annotation(pool: &PgPool, task_id: DbId, user_id: DbId) -> Annotation {
    AnnotationRepo::create(
        pool,
        &CreateAnnotation {
            task_id,
            user_id,
            annotation_data: serde_json::json!({ "labels": ["cat"] }),
            is_ground_truth: false,
        },
    )
    .await
    .unwrap()
}

pub fn new_review(
    annotation: &Annotation,
    reviewer_id: DbId,
    status: ReviewStatus,
    review_round: i32,
) -> NewReview {
    NewReview {
        annotation_id: annotation.id,
        task_id: annotation.task_id,
        project_id: annotation.project_id,
        reviewer_id,
        status,
        message: status.requires_message().then(|| "needs work".to_string()),
        is_auto_approved: false,
        review_round,
    }
}

pub async fn insert_review(
    pool: &PgPool,
    annotation: &Annotation,
    reviewer_id: DbId,
    status: ReviewStatus,
    review_round: i32,
) -> Review {
    ReviewRepo::insert(pool, &new_review(annotation, reviewer_id, status, review_round))
        .await
        .unwrap()
}
