use medvision_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCall {
    pub id: EntityId,
    pub consultation_id: String,
    pub doctor_id: String,
    pub patient_id: String,
    pub scheduled_time: Timestamp,
    pub duration: i32,
    pub status: String,
    pub meeting_url: String,
    pub recording_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleVideoCall {
    #[serde(default)]
    #[validate(length(min = 1, message = "consultationId is required"))]
    pub consultation_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "doctorId is required"))]
    pub doctor_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "patientId is required"))]
    pub patient_id: String,
    #[validate(required(message = "scheduledTime is required"))]
    pub scheduled_time: Option<Timestamp>,
    #[validate(range(min = 1, max = 480))]
    pub duration: Option<i32>,
    pub notes: Option<String>,
}
