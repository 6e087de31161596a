//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod annotation;
pub mod member;
pub mod project;
pub mod review;
pub mod task;
pub mod user;
