//! Doctor appointment ("booking consultation").

use medvision_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::doctor::Doctor;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConsultation {
    pub id: EntityId,
    pub user_id: String,
    pub doctor_id: EntityId,
    pub appointment_date: Timestamp,
    /// Minutes.
    pub duration: i32,
    pub status: String,
    pub consultation_type: String,
    pub notes: String,
    pub meeting_link: String,
    /// In cents, copied from the doctor's hourly rate at booking time.
    pub price: i64,
    pub patient_name: String,
    pub patient_phone: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// `POST /api/appointments` body. Missing fields deserialize as empty and
/// are rejected by validation.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    #[validate(required(message = "doctorId is required"))]
    pub doctor_id: Option<EntityId>,
    #[validate(required(message = "appointmentDate is required"))]
    pub appointment_date: Option<Timestamp>,
    #[serde(default)]
    #[validate(length(min = 1, message = "consultationType is required"))]
    pub consultation_type: String,
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "patientName is required"))]
    pub patient_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "patientPhone is required"))]
    pub patient_phone: String,
    #[validate(range(min = 1, max = 480))]
    pub duration: Option<i32>,
}

/// Validated insert with the doctor resolved.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub doctor_id: EntityId,
    pub appointment_date: Timestamp,
    pub consultation_type: String,
    pub notes: Option<String>,
    pub patient_name: String,
    pub patient_phone: String,
    pub duration: Option<i32>,
    /// In cents.
    pub price: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBookingStatus {
    pub status: String,
}

/// Optional filters for listing bookings; unset fields match everything.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
    pub doctor_id: Option<EntityId>,
    pub phone: Option<String>,
}

/// A booking joined with its doctor (if the doctor still exists).
#[derive(Debug, Clone, Serialize)]
pub struct BookingWithDoctor {
    pub consultation: BookingConsultation,
    pub doctor: Option<Doctor>,
}
