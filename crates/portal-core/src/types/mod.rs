//! Core type definitions used across the Portal TI workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
