//! Route definitions for the image effect endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::images;
use crate::state::AppState;

/// Image routes, merged into `/api`. All are multipart POSTs with an
/// `image` part.
///
/// ```text
/// POST /upload-image                  -> upload_image
/// POST /generate-surgical-preview     -> generate_surgical_preview
/// POST /apply-makeup                  -> apply_makeup
/// POST /apply-multiple-makeup         -> apply_multiple_makeup
/// POST /apply-area-makeup             -> apply_area_makeup
/// POST /color-match                   -> color_match
/// POST /nose-beautification           -> nose_beautification
/// POST /analyze-nose                  -> analyze_nose
/// POST /age-progression               -> age_progression
/// POST /analyze-image                 -> analyze_image
/// POST /apply-face-effect             -> apply_face_effect
/// POST /enhanced-mediapipe-landmarks  -> detect_landmarks
/// POST /apply-precision-makeup        -> apply_precision_makeup
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload-image", post(images::upload_image))
        .route(
            "/generate-surgical-preview",
            post(images::generate_surgical_preview),
        )
        .route("/apply-makeup", post(images::apply_makeup))
        .route("/apply-multiple-makeup", post(images::apply_multiple_makeup))
        .route("/apply-area-makeup", post(images::apply_area_makeup))
        .route("/color-match", post(images::color_match))
        .route("/nose-beautification", post(images::nose_beautification))
        .route("/analyze-nose", post(images::analyze_nose))
        .route("/age-progression", post(images::age_progression))
        .route("/analyze-image", post(images::analyze_image))
        .route("/apply-face-effect", post(images::apply_face_effect))
        .route(
            "/enhanced-mediapipe-landmarks",
            post(images::detect_landmarks),
        )
        .route("/apply-precision-makeup", post(images::apply_precision_makeup))
}
