//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept any `PgExecutor` (a `&PgPool` or `&mut *tx`) as the first argument.

pub mod annotation_repo;
pub mod project_member_repo;
pub mod project_repo;
pub mod review_repo;
pub mod reviewer_repo;
pub mod task_repo;
pub mod user_repo;

pub use annotation_repo::AnnotationRepo;
pub use project_member_repo::{ProjectMemberRepo, ProjectRoleRepo};
pub use project_repo::ProjectRepo;
pub use review_repo::ReviewRepo;
pub use reviewer_repo::ReviewerRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
