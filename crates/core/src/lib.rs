//! Domain logic for the annotation review workflow.
//!
//! Everything in this crate is pure: status vocabularies, the decision
//! mapping table, reviewer selection, workflow-mode resolution and the
//! precondition guards. Storage and transport live in `labelflow-db`,
//! `labelflow-workflow` and `labelflow-api`.

pub mod error;
pub mod guards;
pub mod permissions;
pub mod review;
pub mod review_settings;
pub mod reviewer_allocation;
pub mod status;
pub mod types;

mod text_enum;
