//! Route definitions for patient records and the doctor booking portal.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::portal;
use crate::state::AppState;

/// ```text
/// GET, POST  /patients                      -> list_patients, create_patient
/// GET        /patients/{id}                 -> get_patient
/// GET, POST  /consultations                 -> list_consultations, create_consultation
/// GET, PATCH /consultations/{id}            -> get_consultation, update_consultation
/// PATCH      /consultations/{id}/status     -> update_booking_status
/// GET        /doctors                       -> list_doctors
/// GET        /doctors/{id}                  -> get_doctor
/// POST       /register-doctor               -> register_doctor
/// POST       /appointments                  -> create_booking
/// GET        /appointments/{id}             -> get_booking
/// PATCH      /appointments/{id}/status      -> update_booking_status
/// GET        /my-consultations              -> my_consultations
/// GET        /booking-consultations/doctor  -> doctor_bookings
/// GET        /booking-consultations/patient -> patient_bookings
/// ```
///
/// `/consultations/{id}/status` addresses a booking, not a visualization
/// consultation; it is the path the booking portal client calls.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/patients",
            get(portal::list_patients).post(portal::create_patient),
        )
        .route("/patients/{id}", get(portal::get_patient))
        .route(
            "/consultations",
            get(portal::list_consultations).post(portal::create_consultation),
        )
        .route(
            "/consultations/{id}",
            get(portal::get_consultation).patch(portal::update_consultation),
        )
        .route("/doctors", get(portal::list_doctors))
        .route("/doctors/{id}", get(portal::get_doctor))
        .route("/register-doctor", post(portal::register_doctor))
        .route("/appointments", post(portal::create_booking))
        .route("/appointments/{id}", get(portal::get_booking))
        .route(
            "/appointments/{id}/status",
            patch(portal::update_booking_status),
        )
        .route(
            "/consultations/{id}/status",
            patch(portal::update_booking_status),
        )
        .route("/my-consultations", get(portal::my_consultations))
        .route(
            "/booking-consultations/doctor",
            get(portal::doctor_bookings),
        )
        .route(
            "/booking-consultations/patient",
            get(portal::patient_bookings),
        )
}
