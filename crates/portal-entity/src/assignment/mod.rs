//! Asset assignment (asignación) domain entities.

pub mod model;

pub use model::{Assignment, AssignmentState, AssignmentView, CreateAssignment};
