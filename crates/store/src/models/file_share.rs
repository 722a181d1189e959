use medvision_core::types::{EntityId, Timestamp};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileShare {
    pub id: EntityId,
    pub consultation_id: String,
    pub uploaded_by: String,
    pub file_name: String,
    pub file_type: String,
    pub file_url: String,
    pub file_size: u64,
    pub description: Option<String>,
    pub uploaded_at: Timestamp,
}

/// Built by the upload handler from multipart fields.
#[derive(Debug, Clone)]
pub struct NewFileShare {
    pub consultation_id: String,
    pub uploaded_by: String,
    pub file_name: String,
    pub file_type: String,
    pub file_url: String,
    pub file_size: u64,
    pub description: Option<String>,
}
