//! Shared helpers for HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use labelflow_api::auth::jwt::{generate_access_token, JwtConfig};
use labelflow_api::config::{LogFormat, ServerConfig};
use labelflow_api::router::build_app_router;
use labelflow_api::state::AppState;
use labelflow_core::permissions::PermissionSet;
use labelflow_core::review_settings::ReviewMode;
use labelflow_core::status::TaskStatus;
use labelflow_core::types::DbId;
use labelflow_db::models::annotation::{Annotation, CreateAnnotation};
use labelflow_db::models::member::{CreateProjectMember, CreateProjectRole};
use labelflow_db::models::project::{CreateProject, Project};
use labelflow_db::models::task::{CreateTask, Task};
use labelflow_db::models::user::{CreateUser, User};
use labelflow_db::permissions::PgPermissionOracle;
use labelflow_db::repositories::{
    AnnotationRepo, ProjectMemberRepo, ProjectRepo, ProjectRoleRepo, TaskRepo, UserRepo,
};
use sqlx::PgPool;
use tower::ServiceExt;

const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        database_max_connections: 5,
        log_format: LogFormat::Text,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over the given pool, with the same
/// middleware stack production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        permissions: Arc::new(PgPermissionOracle::new(pool)),
    };
    build_app_router(state, &config)
}

/// A bearer token for `user_id`, signed with the test secret.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).unwrap()
}

/* --------------------------------------------------------------------------
   Request helpers
   -------------------------------------------------------------------------- */

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    json_request(app, Method::POST, uri, body, token).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    json_request(app, Method::PATCH, uri, body, token).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/* --------------------------------------------------------------------------
   Fixtures
   -------------------------------------------------------------------------- */

/// Project with one annotator and one reviewer.
pub struct ReviewSetup {
    pub project: Project,
    pub annotator: User,
    pub reviewer: User,
    pub manager: User,
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

async fn add_member_with(
    pool: &PgPool,
    project_id: DbId,
    user_id: DbId,
    role: &str,
    permissions: PermissionSet,
) {
    let role = ProjectRoleRepo::create(
        pool,
        &CreateProjectRole {
            project_id,
            name: role.to_string(),
            permissions,
        },
    )
    .await
    .unwrap();
    ProjectMemberRepo::add(
        pool,
        &CreateProjectMember {
            project_id,
            user_id,
            role_id: role.id,
        },
    )
    .await
    .unwrap();
}

pub async fn review_setup(pool: &PgPool, mode: ReviewMode) -> ReviewSetup {
    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            name: "HTTP review project".to_string(),
            review_mode: Some(mode),
            ..CreateProject::default()
        },
    )
    .await
    .unwrap();

    let annotator = create_user(pool, "annotator").await;
    let reviewer = create_user(pool, "reviewer").await;
    let manager = create_user(pool, "manager").await;

    add_member_with(
        pool,
        project.id,
        annotator.id,
        "annotator",
        PermissionSet {
            upload_files: true,
            ..PermissionSet::default()
        },
    )
    .await;
    add_member_with(
        pool,
        project.id,
        reviewer.id,
        "reviewer",
        PermissionSet {
            review_annotations: true,
            view_reviews: true,
            ..PermissionSet::default()
        },
    )
    .await;
    add_member_with(
        pool,
        project.id,
        manager.id,
        "manager",
        PermissionSet {
            edit_project: true,
            ..PermissionSet::default()
        },
    )
    .await;

    ReviewSetup {
        project,
        annotator,
        reviewer,
        manager,
    }
}

/// An `annotating` task with one annotation by the setup's annotator.
pub async fn annotating_task(pool: &PgPool, setup: &ReviewSetup) -> (Task, Annotation) {
    let task = TaskRepo::create(
        pool,
        &CreateTask {
            project_id: setup.project.id,
            status: Some(TaskStatus::Annotating),
            assigned_to: Some(setup.annotator.id),
            priority: None,
        },
    )
    .await
    .unwrap();
    let annotation = AnnotationRepo::create(
        pool,
        &CreateAnnotation {
            task_id: task.id,
            user_id: setup.annotator.id,
            annotation_data: serde_json::json!({ "labels": ["dog"] }),
            is_ground_truth: false,
        },
    )
    .await
    .unwrap();
    (task, annotation)
}
