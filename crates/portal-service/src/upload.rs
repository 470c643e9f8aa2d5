//! Uploaded file handling shared by actas and clearance attachments.

use bytes::Bytes;

use portal_core::config::StorageConfig;
use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_storage::paths::mime_from_path;

/// A file received from a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name.
    pub file_name: String,
    /// Client-supplied content type.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

impl UploadedFile {
    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Check size and type against the storage policy and return the
    /// effective MIME type.
    ///
    /// A missing or generic content type falls back to the file extension.
    pub fn validate(&self, config: &StorageConfig) -> AppResult<String> {
        if self.data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if self.size() > config.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds the maximum upload size of {} bytes",
                config.max_upload_size_bytes
            )));
        }

        let declared = self
            .content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream");

        let mime = match declared {
            Some(ct) => ct.split(';').next().unwrap_or(ct).trim().to_string(),
            None => mime_from_path(&self.file_name)
                .map(str::to_string)
                .ok_or_else(|| AppError::validation("Cannot determine the file type"))?,
        };

        if !config.is_mime_allowed(&mime) {
            return Err(AppError::validation(format!(
                "File type '{mime}' is not allowed"
            )));
        }
        Ok(mime)
    }
}
