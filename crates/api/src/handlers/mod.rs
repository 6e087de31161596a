pub mod annotation_workflow;
pub mod project_review;
pub mod review;
