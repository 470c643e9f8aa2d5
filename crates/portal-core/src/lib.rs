//! # portal-core
//!
//! Core crate for Portal TI. Contains configuration schemas, the unified
//! error system, pagination types, and the file storage trait.
//!
//! This crate has **no** internal dependencies on other Portal TI crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
