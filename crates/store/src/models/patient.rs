//! Patient record and DTOs.

use medvision_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: EntityId,
    pub name: String,
    pub age: Option<String>,
    pub medical_history: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a patient.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatient {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub age: Option<String>,
    pub medical_history: Option<String>,
}
