//! Storage configuration.

use serde::{Deserialize, Serialize};

/// Local file storage configuration for acta files and clearance attachments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for all runtime data.
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// Maximum upload size in bytes (default 20 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// MIME types accepted for uploads.
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            max_upload_size_bytes: default_max_upload(),
            allowed_mime_types: default_allowed_mime_types(),
        }
    }
}

impl StorageConfig {
    /// Check whether a MIME type may be uploaded.
    pub fn is_mime_allowed(&self, mime: &str) -> bool {
        self.allowed_mime_types.iter().any(|m| m.eq_ignore_ascii_case(mime))
    }
}

fn default_data_root() -> String {
    "./data".to_string()
}

fn default_max_upload() -> u64 {
    20_971_520 // 20 MB
}

fn default_allowed_mime_types() -> Vec<String> {
    vec![
        "application/pdf".to_string(),
        "image/png".to_string(),
        "image/jpeg".to_string(),
    ]
}
