//! Visualization consultation: a patient's before/after session.

use medvision_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    pub id: EntityId,
    pub patient_id: Option<EntityId>,
    pub procedure_type: String,
    pub before_image_url: Option<String>,
    pub after_image_url: Option<String>,
    pub notes: Option<String>,
    pub is_processing: bool,
    pub ai_metadata: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateConsultation {
    pub patient_id: Option<EntityId>,
    #[serde(default)]
    #[validate(length(min = 1, message = "procedureType is required"))]
    pub procedure_type: String,
    pub before_image_url: Option<String>,
    pub after_image_url: Option<String>,
    pub notes: Option<String>,
    pub is_processing: Option<bool>,
    pub ai_metadata: Option<serde_json::Value>,
}

/// DTO for updating a consultation. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConsultation {
    pub after_image_url: Option<String>,
    pub notes: Option<String>,
    pub is_processing: Option<bool>,
    pub ai_metadata: Option<serde_json::Value>,
}
