//! Multipart form handling for image endpoints.
//!
//! Every image endpoint receives one file field plus plain text parameters.
//! [`UploadForm::read`] validates and stores the file under the upload
//! directory as `<uuid>.<ext>` and keeps the text fields for lookup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use medvision_core::uploads::{validate_image_upload, validate_upload_size};
use medvision_imaging::engine::UPLOADS_URL_PREFIX;

use crate::error::{AppError, AppResult};

/// File field used by the image endpoints.
pub const IMAGE_FIELD: &str = "image";
/// File field used by consultation file shares.
pub const SHARE_FIELD: &str = "file";

/// A file written to the upload directory.
#[derive(Debug, Clone)]
pub struct SavedUpload {
    pub path: PathBuf,
    /// Stored name, `<uuid>.<ext>`.
    pub file_name: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: u64,
}

impl SavedUpload {
    pub fn url(&self) -> String {
        format!("{UPLOADS_URL_PREFIX}/{}", self.file_name)
    }
}

/// Parsed multipart body.
#[derive(Debug, Default)]
pub struct UploadForm {
    file: Option<SavedUpload>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Drain `multipart`, saving the part named `file_field` into `dir`.
    ///
    /// The file must be a JPEG, PNG or GIF no larger than `max_bytes`.
    /// Unknown parts are kept as text fields; a second file part replaces
    /// nothing and is ignored.
    pub async fn read(
        mut multipart: Multipart,
        file_field: &str,
        dir: &Path,
        max_bytes: usize,
    ) -> AppResult<Self> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == file_field && form.file.is_none() {
                let original_name = field.file_name().unwrap_or("upload").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let ext = validate_image_upload(&original_name, &mime_type)?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                validate_upload_size(data.len(), max_bytes)?;

                tokio::fs::create_dir_all(dir)
                    .await
                    .map_err(|e| AppError::InternalError(e.to_string()))?;
                let file_name = format!("{}.{ext}", uuid::Uuid::new_v4());
                let path = dir.join(&file_name);
                tokio::fs::write(&path, &data)
                    .await
                    .map_err(|e| AppError::InternalError(e.to_string()))?;

                tracing::debug!(file = %file_name, bytes = data.len(), "Stored upload");
                form.file = Some(SavedUpload {
                    path,
                    file_name,
                    original_name,
                    mime_type,
                    size: data.len() as u64,
                });
            } else if field.file_name().is_none() {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// A text field, if present and not blank.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// The stored file, or a 400 with `message`.
    pub fn require_file(&mut self, message: &str) -> AppResult<SavedUpload> {
        self.file
            .take()
            .ok_or_else(|| AppError::BadRequest(message.to_string()))
    }

    /// Parse an optional JSON text field; absent means `default`.
    pub fn json_or<T: serde::de::DeserializeOwned>(&self, name: &str, default: T) -> AppResult<T> {
        match self.text(name) {
            None => Ok(default),
            Some(raw) => serde_json::from_str(raw)
                .map_err(|e| AppError::BadRequest(format!("Invalid '{name}' JSON: {e}"))),
        }
    }
}
