//! Shared fixtures for workflow engine integration tests.

#![allow(dead_code)]

use labelflow_core::permissions::PermissionSet;
use labelflow_core::review::ReviewStatus;
use labelflow_core::review_settings::{ReviewMode, ReviewSettings};
use labelflow_core::status::{AnnotationReviewStatus, TaskStatus};
use labelflow_core::types::DbId;
use labelflow_db::models::annotation::{Annotation, CreateAnnotation};
use labelflow_db::models::member::{CreateProjectMember, CreateProjectRole, ProjectRole};
use labelflow_db::models::project::{CreateProject, Project};
use labelflow_db::models::review::{NewReview, Review};
use labelflow_db::models::task::{CreateTask, Task};
use labelflow_db::models::user::{CreateUser, User};
use labelflow_db::permissions::PgPermissionOracle;
use labelflow_db::repositories::{
    AnnotationRepo, ProjectMemberRepo, ProjectRepo, ProjectRoleRepo, ReviewRepo, TaskRepo,
    UserRepo,
};
use labelflow_workflow::WorkflowContext;
use sqlx::PgPool;

/// Owns the pool and the oracle so tests can borrow a [`WorkflowContext`].
pub struct Harness {
    pub pool: PgPool,
    pub oracle: PgPermissionOracle,
}

impl Harness {
    pub fn new(pool: PgPool) -> Self {
        let oracle = PgPermissionOracle::new(pool.clone());
        Self { pool, oracle }
    }

    pub fn ctx(&self) -> WorkflowContext<'_> {
        WorkflowContext::new(&self.pool, &self.oracle)
    }
}

/// A project with annotator, reviewer and manager roles and one annotator.
pub struct ProjectFixture {
    pub project: Project,
    pub annotator: User,
    pub annotator_role: ProjectRole,
    pub reviewer_role: ProjectRole,
    pub manager_role: ProjectRole,
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

async fn create_role(
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

pub async fn project_fixture(pool: &PgPool, mode: ReviewMode) -> ProjectFixture {
    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            name: format!("Project {mode}"),
            review_mode: Some(mode),
            ..CreateProject::default()
        },
    )
    .await
    .unwrap();

    let annotator_role = create_role(
        pool,
        project.id,
        "annotator",
        PermissionSet {
            upload_files: true,
            ..PermissionSet::default()
        },
    )
    .await;
    let reviewer_role = create_role(
        pool,
        project.id,
        "reviewer",
        PermissionSet {
            review_annotations: true,
            view_reviews: true,
            ..PermissionSet::default()
        },
    )
    .await;
    let manager_role = create_role(
        pool,
        project.id,
        "manager",
        PermissionSet {
            edit_project: true,
            view_reviews: true,
            ..PermissionSet::default()
        },
    )
    .await;

    let annotator = create_user(pool, &format!("annotator-{}", project.id)).await;
    add_member(pool, project.id, annotator.id, annotator_role.id).await;

    ProjectFixture {
        project,
        annotator,
        annotator_role,
        reviewer_role,
        manager_role,
    }
}

impl ProjectFixture {
    pub fn project_id(&self) -> DbId {
        self.project.id
    }

    pub async fn add_reviewer(&self, pool: &PgPool, username: &str) -> User {
        let user = create_user(pool, username).await;
        add_member(pool, self.project.id, user.id, self.reviewer_role.id).await;
        user
    }

    pub async fn add_manager(&self, pool: &PgPool, username: &str) -> User {
        let user = create_user(pool, username).await;
        add_member(pool, self.project.id, user.id, self.manager_role.id).await;
        user
    }

    /// A task in `status` with one annotation by the fixture annotator.
    pub async fn annotation(&self, pool: &PgPool, status: TaskStatus) -> (Task, Annotation) {
        self.annotation_by(pool, status, self.annotator.id).await
    }

    pub async fn annotation_by(
        &self,
        pool: &PgPool,
        status: TaskStatus,
        user_id: DbId,
    ) -> (Task, Annotation) {
        let task = TaskRepo::create(
            pool,
            &CreateTask {
                project_id: self.project.id,
                status: Some(status),
                assigned_to: Some(user_id),
                priority: None,
            },
        )
        .await
        .unwrap();
        let annotation = AnnotationRepo::create(
            pool,
            &CreateAnnotation {
                task_id: task.id,
                user_id,
                annotation_data: serde_json::json!({ "boxes": [[0, 0, 10, 10]] }),
                is_ground_truth: false,
            },
        )
        .await
        .unwrap();
        (task, annotation)
    }

    /// Give `reviewer_id` `count` pending reviews in this project.
    pub async fn seed_workload(&self, pool: &PgPool, reviewer_id: DbId, count: usize) {
        for _ in 0..count {
            let (task, annotation) = self.annotation(pool, TaskStatus::InReview).await;
            ReviewRepo::insert(
                pool,
                &NewReview {
                    annotation_id: annotation.id,
                    task_id: task.id,
                    project_id: self.project.id,
                    reviewer_id,
                    status: ReviewStatus::Pending,
                    message: None,
                    is_auto_approved: false,
                    review_round: 1,
                },
            )
            .await
            .unwrap();
        }
    }

    pub async fn set_settings(&self, pool: &PgPool, settings: ReviewSettings) {
        ProjectRepo::update_review_settings(pool, self.project.id, &settings)
            .await
            .unwrap()
            .unwrap();
    }
}

pub async fn task_status(pool: &PgPool, task_id: DbId) -> TaskStatus {
    TaskRepo::find_by_id(pool, task_id).await.unwrap().unwrap().status
}

pub async fn reload_annotation(pool: &PgPool, annotation_id: DbId) -> Annotation {
    AnnotationRepo::find_by_id(pool, annotation_id)
        .await
        .unwrap()
        .unwrap()
}

pub async fn review_status_of(pool: &PgPool, annotation_id: DbId) -> AnnotationReviewStatus {
    reload_annotation(pool, annotation_id).await.review_status
}

pub async fn reviews_of(pool: &PgPool, annotation_id: DbId) -> Vec<Review> {
    ReviewRepo::list_for_annotation(pool, annotation_id)
        .await
        .unwrap()
}
