//! User profile and administration.

pub mod service;

pub use service::UserService;
