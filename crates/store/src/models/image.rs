use medvision_core::types::{EntityId, Timestamp};
use serde::Serialize;

/// Metadata of an uploaded source image. Written once, never mutated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub id: EntityId,
    /// Stored name under the uploads directory.
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: u64,
    pub url: String,
    pub uploaded_at: Timestamp,
}
