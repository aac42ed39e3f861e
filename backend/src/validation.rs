use std::path::Path;

use crate::config::{ALLOWED_CONTENT_TYPES, ALLOWED_EXTENSIONS, MAX_FILE_SIZE};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Uploaded file must have a filename")]
    MissingFilename,
    #[error(
        "File type '{extension}' is not allowed. Allowed types: {}",
        ALLOWED_EXTENSIONS.join(", ")
    )]
    InvalidFileType { extension: String },
    #[error(
        "Content type '{content_type}' is not allowed. Allowed types: {}",
        ALLOWED_CONTENT_TYPES.join(", ")
    )]
    InvalidContentType { content_type: String },
    #[error("Uploaded file is empty")]
    EmptyFile,
    #[error(
        "File size ({:.2}MB) exceeds maximum allowed size ({}MB)",
        (*.size as f64) / (1024.0 * 1024.0),
        MAX_FILE_SIZE as f64 / (1024.0 * 1024.0)
    )]
    FileTooLarge { size: usize },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingFilename => "missing_filename",
            ValidationError::InvalidFileType { .. } => "invalid_file_type",
            ValidationError::InvalidContentType { .. } => "invalid_content_type",
            ValidationError::EmptyFile => "empty_file",
            ValidationError::FileTooLarge { .. } => "file_too_large",
        }
    }
}

/// Checks an upload against the fixed policy, in order: filename, extension,
/// declared content type, emptiness, size cap. The first failing rule wins.
/// Returns the normalized (lowercase, dot-prefixed) extension.
///
/// Only the filename suffix and the declared header are consulted; file
/// contents are never sniffed.
pub fn validate_upload(
    filename: &str,
    content_type: Option<&str>,
    size: usize,
) -> Result<String, ValidationError> {
    if filename.is_empty() {
        return Err(ValidationError::MissingFilename);
    }

    let extension = file_extension(filename);
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ValidationError::InvalidFileType { extension });
    }

    let declared = content_type.unwrap_or_default();
    if !ALLOWED_CONTENT_TYPES.contains(&declared) {
        return Err(ValidationError::InvalidContentType {
            content_type: declared.to_string(),
        });
    }

    if size == 0 {
        return Err(ValidationError::EmptyFile);
    }
    if size > MAX_FILE_SIZE {
        return Err(ValidationError::FileTooLarge { size });
    }

    Ok(extension)
}

fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_jpeg() {
        let extension = validate_upload("face.jpg", Some("image/jpeg"), 1024).unwrap();
        assert_eq!(extension, ".jpg");
    }

    #[test]
    fn normalizes_uppercase_extension() {
        let extension = validate_upload("FACE.JPG", Some("image/jpeg"), 1024).unwrap();
        assert_eq!(extension, ".jpg");
    }

    #[test]
    fn rejects_missing_filename() {
        let rejection = validate_upload("", Some("image/jpeg"), 1024).unwrap_err();
        assert_eq!(rejection, ValidationError::MissingFilename);
    }

    #[test]
    fn rejects_disallowed_extension() {
        let rejection = validate_upload("photo.gif", Some("image/jpeg"), 1024).unwrap_err();
        assert_eq!(
            rejection,
            ValidationError::InvalidFileType {
                extension: ".gif".to_string()
            }
        );
        assert_eq!(rejection.error_code(), "invalid_file_type");
        assert!(rejection.to_string().contains(".jpg, .jpeg, .png"));
    }

    #[test]
    fn rejects_filename_without_extension() {
        let rejection = validate_upload("photo", Some("image/jpeg"), 1024).unwrap_err();
        assert!(matches!(rejection, ValidationError::InvalidFileType { .. }));
    }

    #[test]
    fn rejects_disallowed_content_type() {
        let rejection = validate_upload("photo.jpg", Some("text/plain"), 1024).unwrap_err();
        assert_eq!(
            rejection,
            ValidationError::InvalidContentType {
                content_type: "text/plain".to_string()
            }
        );
    }

    #[test]
    fn rejects_absent_content_type() {
        let rejection = validate_upload("photo.jpg", None, 1024).unwrap_err();
        assert!(matches!(
            rejection,
            ValidationError::InvalidContentType { .. }
        ));
    }

    #[test]
    fn rejects_empty_file() {
        let rejection = validate_upload("photo.png", Some("image/png"), 0).unwrap_err();
        assert_eq!(rejection, ValidationError::EmptyFile);
    }

    #[test]
    fn rejects_oversized_file() {
        let size = 6 * 1024 * 1024;
        let rejection = validate_upload("photo.jpg", Some("image/jpeg"), size).unwrap_err();
        assert_eq!(rejection, ValidationError::FileTooLarge { size });
        assert!(rejection.to_string().contains("6.00MB"));
        assert_eq!(rejection.error_code(), "file_too_large");
    }

    #[test]
    fn extension_is_checked_before_content_type() {
        let rejection = validate_upload("photo.gif", Some("text/plain"), 0).unwrap_err();
        assert!(matches!(rejection, ValidationError::InvalidFileType { .. }));
    }
}
