//! # portal-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all Portal TI entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::VersionedUpdate;
