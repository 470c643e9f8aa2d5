//! # portal-storage
//!
//! File storage for Portal TI: signed acta documents and clearance
//! attachments. Only a local filesystem backend is provided; it implements
//! [`portal_core::traits::FileStore`].

pub mod paths;
pub mod providers;

pub use providers::local::LocalStorage;
