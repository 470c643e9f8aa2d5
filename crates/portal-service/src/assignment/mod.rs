//! Asset assignments.

pub mod service;

pub use service::AssignmentService;
