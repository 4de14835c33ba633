//! Upload text extraction: PDF via `pdf-extract`, plain text as-is.

use crate::errors::AppError;

/// Uploads above this size are rejected before any extraction work.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadKind {
    Pdf,
    Text,
    Unsupported,
}

/// Browsers often send `application/octet-stream`, so the filename extension
/// breaks ties when the declared content type is unhelpful.
fn classify(filename: &str, content_type: &str) -> UploadKind {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    match content_type {
        "application/pdf" => UploadKind::Pdf,
        "text/plain" | "text/markdown" => UploadKind::Text,
        _ => match ext.as_str() {
            "pdf" => UploadKind::Pdf,
            "txt" | "md" | "text" => UploadKind::Text,
            _ => UploadKind::Unsupported,
        },
    }
}

pub fn extract_text(filename: &str, content_type: &str, data: &[u8]) -> Result<String, AppError> {
    if data.is_empty() {
        return Err(AppError::Upload("uploaded file is empty".to_string()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Upload(format!(
            "uploaded file exceeds {} bytes",
            MAX_UPLOAD_BYTES
        )));
    }

    match classify(filename, content_type) {
        UploadKind::Pdf => pdf_extract::extract_text_from_mem(data)
            .map_err(|e| AppError::Upload(format!("could not extract text from PDF: {e}"))),
        UploadKind::Text => String::from_utf8(data.to_vec())
            .map_err(|_| AppError::Upload("text upload is not valid UTF-8".to_string())),
        UploadKind::Unsupported => Err(AppError::UnsupportedMediaType(format!(
            "'{content_type}' — upload a PDF or plain-text resume"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_classified_by_content_type() {
        assert_eq!(classify("resume.bin", "application/pdf"), UploadKind::Pdf);
    }

    #[test]
    fn test_extension_breaks_octet_stream_tie() {
        assert_eq!(
            classify("resume.pdf", "application/octet-stream"),
            UploadKind::Pdf
        );
        assert_eq!(
            classify("resume.txt", "application/octet-stream"),
            UploadKind::Text
        );
    }

    #[test]
    fn test_unknown_type_is_unsupported() {
        assert_eq!(
            classify("resume.docx", "application/vnd.openxmlformats"),
            UploadKind::Unsupported
        );
    }

    #[test]
    fn test_plain_text_passes_through() {
        let text = extract_text("resume.txt", "text/plain", b"Education\nB.S. in CS").unwrap();
        assert!(text.starts_with("Education"));
    }

    #[test]
    fn test_empty_upload_rejected() {
        assert!(matches!(
            extract_text("resume.txt", "text/plain", b""),
            Err(AppError::Upload(_))
        ));
    }

    #[test]
    fn test_oversized_upload_rejected() {
        let big = vec![b'a'; MAX_UPLOAD_BYTES + 1];
        assert!(matches!(
            extract_text("resume.txt", "text/plain", &big),
            Err(AppError::Upload(_))
        ));
    }

    #[test]
    fn test_unsupported_type_is_415() {
        assert!(matches!(
            extract_text("resume.docx", "application/msword", b"data"),
            Err(AppError::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn test_invalid_utf8_text_rejected() {
        assert!(matches!(
            extract_text("resume.txt", "text/plain", &[0xff, 0xfe, 0x00]),
            Err(AppError::Upload(_))
        ));
    }
}
