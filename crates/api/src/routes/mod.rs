pub mod communication;
pub mod health;
pub mod images;
pub mod portal;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /upload-image                          store a photo (multipart)
/// /generate-surgical-preview             procedure preview
/// /apply-makeup                          single makeup effect
/// /apply-multiple-makeup                 effect list, applied in order
/// /apply-area-makeup                     explicit rectangles
/// /color-match                           reference color swatch
/// /nose-beautification                   nose style with before/after strip
/// /analyze-nose                          baseline nose assessment
/// /age-progression                       aged rendition
/// /analyze-image                         quality / skin analysis
/// /apply-face-effect                     named face effect
/// /enhanced-mediapipe-landmarks          468-point mesh and regions
/// /apply-precision-makeup                landmark-guided region makeup
///
/// /patients                              list, create
/// /patients/{id}                         get
/// /consultations                         list (?patientId=), create
/// /consultations/{id}                    get, update (PATCH)
///
/// /doctors                               list (?specialty=)
/// /doctors/{id}                          get
/// /register-doctor                       register (POST)
/// /appointments                          book (POST)
/// /appointments/{id}                     booking with doctor
/// /appointments/{id}/status              update status (PATCH)
/// /consultations/{id}/status             same, booking portal path (PATCH)
/// /my-consultations                      bookings by ?phone=
/// /booking-consultations/doctor          bookings (?doctorId=)
/// /booking-consultations/patient         bookings (?phone=)
///
/// /messages                              send (POST)
/// /messages/{consultation_id}            history
/// /communication/mark-read               mark messages read (POST)
/// /communication/files/{consultation_id} shared files
/// /video-calls                           schedule (POST)
/// /file-shares                           share a file (multipart)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(images::router())
        .merge(portal::router())
        .merge(communication::router())
}
