//! Storage key layout and file name handling.

use uuid::Uuid;

/// Key for the signed document of an acta.
pub fn acta_file_path(acta_id: Uuid, file_name: &str) -> String {
    format!("actas/{acta_id}/{}", sanitize_file_name(file_name))
}

/// Key for a clearance attachment. The upload id keeps same-named files apart.
pub fn clearance_attachment_path(clearance_id: Uuid, upload_id: Uuid, file_name: &str) -> String {
    format!(
        "paz-y-salvo/{clearance_id}/{upload_id}-{}",
        sanitize_file_name(file_name)
    )
}

/// Reduce a client-supplied file name to a safe single path segment.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "archivo".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Guess MIME type from a file extension.
pub fn mime_from_path(path: &str) -> Option<&'static str> {
    let (_, ext) = path.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "txt" => "text/plain",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_file_name("acta firmada.pdf"), "acta_firmada.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\docs\\acta.pdf"), "acta.pdf");
        assert_eq!(sanitize_file_name(".."), "archivo");
        assert_eq!(sanitize_file_name(""), "archivo");
    }

    #[test]
    fn test_layout() {
        let id = Uuid::nil();
        assert_eq!(
            acta_file_path(id, "acta.pdf"),
            "actas/00000000-0000-0000-0000-000000000000/acta.pdf"
        );
        let path = clearance_attachment_path(id, id, "carta renuncia.pdf");
        assert!(path.starts_with("paz-y-salvo/"));
        assert!(path.ends_with("-carta_renuncia.pdf"));
    }

    #[test]
    fn test_mime_detection() {
        assert_eq!(mime_from_path("acta.pdf"), Some("application/pdf"));
        assert_eq!(mime_from_path("foto.JPG"), Some("image/jpeg"));
        assert_eq!(mime_from_path("noext"), None);
    }
}
