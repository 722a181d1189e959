//! Consultation portal constants and validators.
//!
//! Covers booking statuses, chat message/sender kinds, shared-file kinds,
//! the doctor specialty keyword map and meeting-link construction.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Booking statuses
-------------------------------------------------------------------------- */

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

pub const VALID_BOOKING_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_CONFIRMED,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
];

/// Default appointment length in minutes.
pub const DEFAULT_BOOKING_DURATION_MINS: i32 = 30;

/// Bookings made without an account are attributed to this user id.
pub const GUEST_USER_ID: &str = "guest";

/* --------------------------------------------------------------------------
Messaging
-------------------------------------------------------------------------- */

pub const SENDER_DOCTOR: &str = "doctor";
pub const SENDER_PATIENT: &str = "patient";
pub const VALID_SENDER_TYPES: &[&str] = &[SENDER_DOCTOR, SENDER_PATIENT];

pub const MESSAGE_TEXT: &str = "text";
pub const VALID_MESSAGE_TYPES: &[&str] = &[MESSAGE_TEXT, "image", "file", "voice_note"];

pub const FILE_TYPE_DOCUMENT: &str = "document";
pub const VALID_FILE_TYPES: &[&str] = &["image", FILE_TYPE_DOCUMENT, "medical_report", "prescription"];

pub const VIDEO_CALL_SCHEDULED: &str = "scheduled";

/* --------------------------------------------------------------------------
Doctors
-------------------------------------------------------------------------- */

/// Rating assigned to newly registered doctors.
pub const DEFAULT_DOCTOR_RATING: f64 = 4.5;

/// Hourly rate in cents when registration omits one.
pub const DEFAULT_HOURLY_RATE_CENTS: i64 = 40_000;

/// Map a consultation-type keyword to the stored specialty name. Anything
/// else is used verbatim.
pub fn map_specialty(keyword: &str) -> &str {
    match keyword {
        "rhinoplasty" => "جراحة تجميل الأنف",
        "facial" => "طب تجميل الوجه",
        "dental" => "تجميل الأسنان",
        "skincare" => "العناية بالبشرة",
        other => other,
    }
}

/// Bio used when a doctor profile has none.
pub fn default_bio(specialty: &str) -> String {
    format!("Specialist in {specialty}")
}

/// Convert a whole-unit hourly rate to cents, defaulting when absent or not positive.
pub fn hourly_rate_cents(rate: Option<i64>) -> i64 {
    match rate {
        Some(r) if r > 0 => r.saturating_mul(100),
        _ => DEFAULT_HOURLY_RATE_CENTS,
    }
}

/* --------------------------------------------------------------------------
Meeting links
-------------------------------------------------------------------------- */

const BOOKING_MEETING_BASE: &str = "https://meet.medvision.ai/room";
const VIDEO_CALL_MEETING_BASE: &str = "https://meet.medvision.com/room";

/// Meeting link attached to a new booking.
pub fn booking_meeting_link(booking_id: impl std::fmt::Display) -> String {
    format!("{BOOKING_MEETING_BASE}/{booking_id}")
}

/// Room URL for a scheduled video call.
pub fn video_call_url(consultation_id: &str, millis: i64) -> String {
    format!("{VIDEO_CALL_MEETING_BASE}/{consultation_id}_{millis}")
}

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

fn validate_one_of(kind: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {kind} '{value}'. Must be one of: {}",
            allowed.join(", ")
        )))
    }
}

pub fn validate_booking_status(status: &str) -> Result<(), CoreError> {
    validate_one_of("status", status, VALID_BOOKING_STATUSES)
}

pub fn validate_sender_type(sender: &str) -> Result<(), CoreError> {
    validate_one_of("sender type", sender, VALID_SENDER_TYPES)
}

pub fn validate_message_type(kind: &str) -> Result<(), CoreError> {
    validate_one_of("message type", kind, VALID_MESSAGE_TYPES)
}

pub fn validate_file_type(kind: &str) -> Result<(), CoreError> {
    validate_one_of("file type", kind, VALID_FILE_TYPES)
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
