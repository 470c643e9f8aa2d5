//! Hardware inventory.

pub mod service;

pub use service::AssetService;
