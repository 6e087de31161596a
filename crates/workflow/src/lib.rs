//! Annotation review workflow engine.
//!
//! Every operation takes an explicit [`WorkflowContext`]; the engine keeps no
//! process-wide state. Transitions that touch more than one row run inside a
//! single database transaction which locks the annotation row first and the
//! task row second, so concurrent transitions on one annotation serialize
//! and a failed transition leaves nothing behind.

pub mod allocator;
pub mod assignment;
pub mod context;
pub mod decisions;
pub mod error;
pub mod history;
pub mod lifecycle;
pub mod policy;
pub mod settings;

mod writes;

pub use context::WorkflowContext;
pub use error::{WorkflowError, WorkflowResult};
