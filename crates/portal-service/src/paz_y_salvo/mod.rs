//! Employee clearance (paz y salvo) workflow.

pub mod service;
pub mod workflow;

pub use service::{CreateClearanceRequest, PazYSalvoService, UpdateDraftRequest};
pub use workflow::{SignOutcome, SignerAssignment};
