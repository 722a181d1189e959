//! Confirmation messages returned in successful response bodies.
//!
//! Error texts stay next to the code that raises them.

pub const IMAGE_UPLOADED: &str = "Image uploaded successfully";
pub const NOSE_BEAUTIFIED: &str = "Nose beautification applied successfully";
pub const NOSE_ANALYZED: &str = "Nose analysis completed successfully";
pub const COLORS_MATCHED: &str = "Colors matched successfully";

pub const DOCTOR_REGISTERED: &str = "Doctor registered successfully";
pub const BOOKING_CREATED: &str = "Consultation booked successfully";
pub const BOOKING_STATUS_UPDATED: &str = "Consultation status updated successfully";

pub fn makeup_effects_applied(count: usize) -> String {
    match count {
        1 => "Applied 1 makeup effect successfully".to_string(),
        n => format!("Applied {n} makeup effects successfully"),
    }
}
