//! Upload acceptance rules.

use crate::error::CoreError;

/// Maximum accepted upload size in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];
const IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// Lowercased extension of a file name, if any.
pub fn extension_of(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Accept only JPEG/PNG/GIF by both extension and declared MIME type.
///
/// Returns the normalized extension to store the file under.
pub fn validate_image_upload(file_name: &str, mime_type: &str) -> Result<String, CoreError> {
    let ext = extension_of(file_name)
        .filter(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
        .ok_or_else(|| {
            CoreError::Validation("Only image files are allowed (jpeg, jpg, png, gif)".to_string())
        })?;
    let mime = mime_type.trim().to_ascii_lowercase();
    if !IMAGE_MIME_TYPES.contains(&mime.as_str()) {
        return Err(CoreError::Validation(format!(
            "Only image files are allowed, got content type '{mime_type}'"
        )));
    }
    Ok(ext)
}

/// Reject payloads over `limit` bytes.
pub fn validate_upload_size(size: usize, limit: usize) -> Result<(), CoreError> {
    if size > limit {
        return Err(CoreError::Validation(format!(
            "File too large: {size} bytes exceeds the {limit} byte limit"
        )));
    }
    Ok(())
}
