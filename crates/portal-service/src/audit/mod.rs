//! Audit logging and search.

pub mod service;

pub use service::AuditService;
