//! File store trait for acta files and clearance attachments.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for file storage backends.
///
/// Defined here in `portal-core` and implemented in `portal-storage`.
/// Paths are relative to the backend's root.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Read a whole file into memory.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Write bytes to a file, creating parent directories as needed.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Delete a file. Deleting a missing file is not an error.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Check whether a file exists.
    async fn exists(&self, path: &str) -> AppResult<bool>;
}
