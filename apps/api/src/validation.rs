//! Validation Gate — pre-checks an upload before it reaches a document reader.
//!
//! Three rejections, all caller-input errors: the declared filename must not
//! escape a storage directory after normalization, the byte length must stay
//! within the configured cap, and the *content signature* (never the
//! extension, which can be spoofed) must be on the configured allow-list.
//! The gate only reads; nothing is ever written to a path derived from
//! client input.

use tracing::{debug, warn};

use crate::errors::AppError;
use crate::parsing::DetectedType;

/// Validates an upload and returns the detected content type for routing.
///
/// An allow-listed MIME type the pipeline has no reader mapping for is
/// registry drift — a configuration fault, not a caller error.
pub fn validate_upload(
    bytes: &[u8],
    declared_name: &str,
    max_file_size: usize,
    allowed_content_types: &[String],
) -> Result<DetectedType, AppError> {
    if is_unsafe_filename(declared_name) {
        warn!("Rejected unsafe filename: {declared_name:?}");
        return Err(AppError::UnsafePath(declared_name.to_string()));
    }

    if bytes.len() > max_file_size {
        return Err(AppError::FileTooLarge {
            size: bytes.len(),
            max: max_file_size,
        });
    }

    let mime = infer::get(bytes)
        .map(|t| t.mime_type().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    if !allowed_content_types.iter().any(|m| m == &mime) {
        return Err(AppError::UnsupportedType(mime));
    }

    match DetectedType::from_mime(&mime) {
        Some(detected) => {
            debug!("Upload validated: {declared_name} detected as {detected}");
            Ok(detected)
        }
        None => Err(AppError::UnsupportedFormat(mime)),
    }
}

/// Whether a declared filename, after normalization, could escape the
/// intended directory: empty names, embedded separators, NULs, absolute
/// paths, and traversal components are all unsafe.
fn is_unsafe_filename(name: &str) -> bool {
    if name.trim().is_empty() || name.contains('\0') {
        return true;
    }
    if name.contains('/') || name.contains('\\') {
        return true;
    }
    // With separators excluded, the only remaining escapes are the relative
    // traversal components themselves.
    name == "." || name == ".."
}

/// Sanitizes a filename for use as a log or response label. Never used to
/// build a filesystem path.
pub fn sanitize_filename(filename: &str) -> String {
    let safe: String = filename
        .replace(['/', '\\'], "_")
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let safe = safe.trim_matches(['.', '_']).to_string();

    if safe.is_empty() {
        "unnamed_file".to_string()
    } else {
        safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 1024;

    fn allowed() -> Vec<String> {
        vec![
            "application/pdf".to_string(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string(),
        ]
    }

    // %PDF magic followed by filler; infer only needs the signature.
    fn pdf_bytes(len: usize) -> Vec<u8> {
        let mut bytes = b"%PDF-1.4\n".to_vec();
        bytes.resize(len, b' ');
        bytes
    }

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    #[test]
    fn test_exactly_max_size_passes() {
        let result = validate_upload(&pdf_bytes(MAX), "resume.pdf", MAX, &allowed());
        assert_eq!(result.unwrap(), DetectedType::Pdf);
    }

    #[test]
    fn test_one_byte_over_max_fails() {
        let result = validate_upload(&pdf_bytes(MAX + 1), "resume.pdf", MAX, &allowed());
        assert!(matches!(result, Err(AppError::FileTooLarge { .. })));
    }

    #[test]
    fn test_pdf_extension_with_png_signature_fails() {
        let result = validate_upload(PNG_MAGIC, "resume.pdf", MAX, &allowed());
        assert!(matches!(result, Err(AppError::UnsupportedType(_))));
    }

    #[test]
    fn test_unrecognizable_content_fails() {
        let result = validate_upload(b"plain text resume", "resume.pdf", MAX, &allowed());
        assert!(matches!(result, Err(AppError::UnsupportedType(_))));
    }

    #[test]
    fn test_type_outside_configured_allow_list_fails() {
        let only_docx = vec![
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string(),
        ];
        let result = validate_upload(&pdf_bytes(64), "resume.pdf", MAX, &only_docx);
        assert!(matches!(result, Err(AppError::UnsupportedType(_))));
    }

    #[test]
    fn test_allowed_type_without_reader_mapping_is_drift() {
        let misconfigured = vec!["image/png".to_string()];
        let result = validate_upload(PNG_MAGIC, "diagram.png", MAX, &misconfigured);
        assert!(matches!(result, Err(AppError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_traversal_filenames_are_unsafe() {
        for name in ["../../etc/passwd", "/etc/passwd", "a/b.pdf", "a\\b.pdf", "..", "", "  "] {
            let result = validate_upload(&pdf_bytes(64), name, MAX, &allowed());
            assert!(
                matches!(result, Err(AppError::UnsafePath(_))),
                "expected UnsafePath for {name:?}"
            );
        }
    }

    #[test]
    fn test_plain_filename_is_safe() {
        assert!(validate_upload(&pdf_bytes(64), "my resume.pdf", MAX, &allowed()).is_ok());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("my resume.pdf"), "my_resume.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("???"), "unnamed_file");
        assert_eq!(sanitize_filename("r\u{00e9}sum\u{00e9}.docx"), "r\u{00e9}sum\u{00e9}.docx");
    }
}
