//! Multipart file reading shared by upload endpoints.

use axum::extract::Multipart;

use portal_core::error::AppError;
use portal_service::UploadedFile;

/// Read the `file` part of a multipart body. Other parts are ignored.
pub async fn read_file_part(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(String::from)
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::validation("file name is required"))?;
        let content_type = field.content_type().map(String::from);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Read error: {e}")))?;

        return Ok(UploadedFile {
            file_name,
            content_type,
            data,
        });
    }

    Err(AppError::validation("file is required"))
}
