//! HTTP-level tests for the image effect endpoints.
//!
//! The default test app has no API key and no face-mesh executable, so most
//! of these cover the local fallback paths end to end. The landmark tests at
//! the bottom also run against a scripted detector that reports a fixed mesh.

mod common;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{body_json, post_multipart, upload_path, Part};
use medvision_ai::{RemoteError, RemoteGenerator};
use medvision_core::effects::{FaceEffect, Procedure};
use medvision_core::makeup::MakeupType;
use medvision_core::regions::FaceRegion;
use serde_json::{json, Value};

/// Remote generator whose provider is always down.
struct FailingGenerator;

#[async_trait]
impl RemoteGenerator for FailingGenerator {
    async fn surgical_visualization(&self, _: &Path, _: &Procedure, _: u8) -> Result<String, RemoteError> {
        Err(unavailable())
    }

    async fn apply_makeup(&self, _: &Path, _: MakeupType, _: &str, _: u8) -> Result<String, RemoteError> {
        Err(unavailable())
    }

    async fn age_progression(&self, _: &Path, _: u32) -> Result<String, RemoteError> {
        Err(unavailable())
    }

    async fn analyze_image(&self, _: &Path) -> Result<Value, RemoteError> {
        Err(unavailable())
    }

    async fn face_effect(&self, _: &Path, _: &FaceEffect, _: u8) -> Result<Vec<u8>, RemoteError> {
        Err(unavailable())
    }
}

fn unavailable() -> RemoteError {
    RemoteError::Api {
        status: 503,
        body: "service unavailable".into(),
    }
}

/// Remote generator that always answers with a fixed hosted URL.
struct HostedGenerator;

const HOSTED_URL: &str = "https://images.example.test/result.png";

#[async_trait]
impl RemoteGenerator for HostedGenerator {
    async fn surgical_visualization(&self, _: &Path, _: &Procedure, _: u8) -> Result<String, RemoteError> {
        Ok(HOSTED_URL.into())
    }

    async fn apply_makeup(&self, _: &Path, _: MakeupType, _: &str, _: u8) -> Result<String, RemoteError> {
        Ok(HOSTED_URL.into())
    }

    async fn age_progression(&self, _: &Path, _: u32) -> Result<String, RemoteError> {
        Ok(HOSTED_URL.into())
    }

    async fn analyze_image(&self, _: &Path) -> Result<Value, RemoteError> {
        Ok(serde_json::json!({"faceShape": "oval"}))
    }

    async fn face_effect(&self, _: &Path, _: &FaceEffect, _: u8) -> Result<Vec<u8>, RemoteError> {
        Ok(common::sample_png())
    }
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_image_stores_file_and_metadata() {
    let app = common::build_test_app();
    let response = post_multipart(app.app(), "/api/upload-image", vec![Part::png("image")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["imageId"].is_string());

    let url = json["imageUrl"].as_str().unwrap();
    assert!(upload_path(&app, url).exists());
}

#[tokio::test]
async fn upload_without_file_returns_400() {
    let app = common::build_test_app();
    let response = post_multipart(
        app.app(),
        "/api/upload-image",
        vec![Part::Text("note", "no file here")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "No image file provided");
}

#[tokio::test]
async fn upload_rejects_non_image_types() {
    let app = common::build_test_app();
    let response = post_multipart(
        app.app(),
        "/api/upload-image",
        vec![Part::File {
            name: "image",
            file_name: "notes.txt",
            content_type: "text/plain",
            data: b"hello".to_vec(),
        }],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Makeup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn apply_makeup_lipstick_falls_back_to_local() {
    let app = common::build_test_app();
    let response = post_multipart(
        app.app(),
        "/api/apply-makeup",
        vec![
            Part::png("image"),
            Part::Text("makeupType", "lipstick"),
            Part::Text("color", "#FF6B6B"),
            Part::Text("intensity", "70"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["processingMethod"], "local");

    let result = upload_path(&app, json["makeupImageUrl"].as_str().unwrap());
    assert!(result.exists(), "processed image should be written to disk");
    assert_ne!(json["makeupImageUrl"], json["originalImageUrl"]);
}

#[tokio::test]
async fn failing_remote_is_recovered_locally() {
    let app = common::build_test_app_with(Arc::new(FailingGenerator));
    let response = post_multipart(
        app.app(),
        "/api/apply-makeup",
        vec![Part::png("image"), Part::Text("makeupType", "blush")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["processingMethod"], "local");
}

#[tokio::test]
async fn remote_result_is_returned_when_available() {
    let app = common::build_test_app_with(Arc::new(HostedGenerator));
    let response = post_multipart(app.app(), "/api/apply-makeup", vec![Part::png("image")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["processingMethod"], "openai_ai");
    assert_eq!(json["makeupImageUrl"], HOSTED_URL);
}

#[tokio::test]
async fn multiple_makeup_applies_every_effect() {
    let app = common::build_test_app();
    let effects = r##"[{"type":"lipstick","color":"#C2185B","intensity":60},{"type":"eyeshadow","color":"#6A1B9A"}]"##;
    let response = post_multipart(
        app.app(),
        "/api/apply-multiple-makeup",
        vec![Part::png("image"), Part::Text("effects", effects)],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["processingMethod"], "local");
    assert!(json["message"].as_str().unwrap().contains('2'));
    assert!(upload_path(&app, json["makeupImageUrl"].as_str().unwrap()).exists());
}

#[tokio::test]
async fn multiple_makeup_accepts_loose_numbers() {
    let app = common::build_test_app();
    let effects = r##"[
        {"type":"lipstick","color":"#C2185B","intensity":300},
        {"type":"blush","intensity":55.5,"area":{"x":-10,"y":4.8,"width":30,"height":"20"}},
        {"type":"eyeshadow","intensity":"70"}
    ]"##;
    let response = post_multipart(
        app.app(),
        "/api/apply-multiple-makeup",
        vec![Part::png("image"), Part::Text("effects", effects)],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["message"].as_str().unwrap().contains('3'));
    assert!(upload_path(&app, json["makeupImageUrl"].as_str().unwrap()).exists());
}

#[tokio::test]
async fn multiple_makeup_rejects_bad_json_and_empty_lists() {
    let app = common::build_test_app();

    let response = post_multipart(
        app.app(),
        "/api/apply-multiple-makeup",
        vec![Part::png("image"), Part::Text("effects", "not json")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("Invalid effects format"));

    let response = post_multipart(
        app.app(),
        "/api/apply-multiple-makeup",
        vec![Part::png("image"), Part::Text("effects", "[]")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No makeup effects specified");
}

#[tokio::test]
async fn area_makeup_counts_painted_areas() {
    let app = common::build_test_app();
    let areas = r##"[
        {"type":"lips","color":"#C2185B","coordinates":{"x":20,"y":40,"width":24,"height":8}},
        {"type":"cheeks","color":"#F48FB1","coordinates":{"x":10,"y":30,"width":12,"height":10}}
    ]"##;
    let response = post_multipart(
        app.app(),
        "/api/apply-area-makeup",
        vec![Part::png("image"), Part::Text("areas", areas)],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["processingMethod"], "area-specific");
    assert_eq!(json["areasProcessed"], 2);
    assert_eq!(json["intensity"], 70);
}

#[tokio::test]
async fn precision_makeup_requires_region() {
    let app = common::build_test_app();
    let response = post_multipart(app.app(), "/api/apply-precision-makeup", vec![Part::png("image")]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Makeup region not specified");
}

#[tokio::test]
async fn precision_makeup_uses_static_box_without_mesh() {
    let app = common::build_test_app();
    let response = post_multipart(
        app.app(),
        "/api/apply-precision-makeup",
        vec![
            Part::png("image"),
            Part::Text("region", "lips"),
            Part::Text("color", "#B71C1C"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["appliedRegion"], "lips");
    assert_eq!(json["texture"], "gloss");
    assert_eq!(json["intensity"], 70);
    assert_eq!(json["processingMethod"], "precision-landmarks");
    assert!(upload_path(&app, json["processedImageUrl"].as_str().unwrap()).exists());
}

// ---------------------------------------------------------------------------
// Age, analysis, face effects, surgery
// ---------------------------------------------------------------------------

#[tokio::test]
async fn age_progression_branches_by_direction() {
    let app = common::build_test_app();

    let older = post_multipart(
        app.app(),
        "/api/age-progression",
        vec![
            Part::png("image"),
            Part::Text("currentAge", "25"),
            Part::Text("targetAge", "70"),
        ],
    )
    .await;
    assert_eq!(older.status(), StatusCode::OK);
    let older = body_json(older).await;

    let younger = post_multipart(
        app.app(),
        "/api/age-progression",
        vec![
            Part::png("image"),
            Part::Text("currentAge", "50"),
            Part::Text("targetAge", "20"),
        ],
    )
    .await;
    assert_eq!(younger.status(), StatusCode::OK);
    let younger = body_json(younger).await;

    assert_eq!(older["processingMethod"], "local");
    assert_eq!(older["ageBranch"], "aging");
    assert_eq!(younger["ageBranch"], "youth");
    assert_ne!(older["agedImageUrl"], younger["agedImageUrl"]);
}

#[tokio::test]
async fn analyze_image_returns_local_quality_report() {
    let app = common::build_test_app();
    let response = post_multipart(app.app(), "/api/analyze-image", vec![Part::png("image")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["analysis"].is_object());
    assert!(json["imageUrl"].as_str().unwrap().starts_with("/uploads/"));
}

#[tokio::test]
async fn face_effect_falls_back_to_local_filter() {
    let app = common::build_test_app();
    let response = post_multipart(
        app.app(),
        "/api/apply-face-effect",
        vec![
            Part::png("image"),
            Part::Text("effect", "smile"),
            Part::Text("intensity", "80"),
            Part::Text("category", "expression"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["effect"], "smile");
    assert_eq!(json["intensity"], 80);
    assert_eq!(json["category"], "expression");
    assert_eq!(json["processingMethod"], "local");
    assert!(json.get("demo").is_none());
}

#[tokio::test]
async fn face_effect_saves_remote_bytes_locally() {
    let app = common::build_test_app_with(Arc::new(HostedGenerator));
    let response = post_multipart(app.app(), "/api/apply-face-effect", vec![Part::png("image")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["processingMethod"], "ai");
    assert_eq!(json["effect"], "beauty");
    assert!(upload_path(&app, json["processedImageUrl"].as_str().unwrap()).exists());
}

#[tokio::test]
async fn rhinoplasty_preview_uses_nose_fallback() {
    let app = common::build_test_app();
    let response = post_multipart(
        app.app(),
        "/api/generate-surgical-preview",
        vec![
            Part::png("image"),
            Part::Text("procedureType", "rhinoplasty"),
            Part::Text("areas", r#"{"nose": true}"#),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["processingMethod"], "nose_beautification_fallback");
    assert!(upload_path(&app, json["afterImageUrl"].as_str().unwrap()).exists());
}

#[tokio::test]
async fn other_procedures_use_generic_preview() {
    let app = common::build_test_app();
    let response = post_multipart(
        app.app(),
        "/api/generate-surgical-preview",
        vec![Part::png("image"), Part::Text("procedureType", "facelift")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["processingMethod"], "local_fallback");
}

// ---------------------------------------------------------------------------
// Nose and color match
// ---------------------------------------------------------------------------

#[tokio::test]
async fn nose_beautification_defaults_and_comparison_strip() {
    let app = common::build_test_app();
    let response = post_multipart(app.app(), "/api/nose-beautification", vec![Part::png("image")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["type"], "refinement");
    assert_eq!(json["intensity"], 60);
    assert_eq!(json["preserveNaturalLook"], true);
    assert_eq!(json["processingMethod"], "local");

    let beautified = json["beautifiedImageUrl"].as_str().unwrap();
    assert!(beautified.starts_with("/uploads/nose-beautified-refinement_"), "{beautified}");
    assert!(upload_path(&app, beautified).exists());
    assert!(upload_path(&app, json["originalImageUrl"].as_str().unwrap()).exists());

    let strip = upload_path(&app, json["comparisonImageUrl"].as_str().unwrap());
    let strip = image::open(strip).unwrap();
    assert_eq!((strip.width(), strip.height()), (64, 64));
}

#[tokio::test]
async fn nose_beautification_reads_style_and_flags() {
    let app = common::build_test_app();
    let response = post_multipart(
        app.app(),
        "/api/nose-beautification",
        vec![
            Part::png("image"),
            Part::Text("type", "narrowing"),
            Part::Text("intensity", "85"),
            Part::Text("preserveNaturalLook", "false"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["type"], "narrowing");
    assert_eq!(json["intensity"], 85);
    assert_eq!(json["preserveNaturalLook"], false);
}

#[tokio::test]
async fn unknown_nose_style_is_rejected() {
    let app = common::build_test_app();
    let response = post_multipart(
        app.app(),
        "/api/nose-beautification",
        vec![Part::png("image"), Part::Text("type", "button")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("button"));
}

#[tokio::test]
async fn analyze_nose_without_mesh_has_no_box() {
    let app = common::build_test_app();
    let response = post_multipart(app.app(), "/api/analyze-nose", vec![Part::png("image")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["analysis"]["symmetry"], "balanced");
    assert!(json["analysis"].get("noseBox").is_none());
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 4);
    assert!(upload_path(&app, json["imageUrl"].as_str().unwrap()).exists());
}

#[tokio::test]
async fn color_match_writes_swatch_and_echoes_color() {
    let app = common::build_test_app();
    let response = post_multipart(
        app.app(),
        "/api/color-match",
        vec![
            Part::png("image"),
            Part::Text("referenceColor", "#102030"),
            Part::Text("area", "cheeks"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["referenceColor"], "#102030");
    assert_eq!(json["area"], "cheeks");
    assert_eq!(json["processingMethod"], "local");

    let url = json["processedImageUrl"].as_str().unwrap();
    assert!(url.starts_with("/uploads/color-match_"), "{url}");
    assert!(upload_path(&app, url).exists());
}

// ---------------------------------------------------------------------------
// Landmarks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn landmarks_fall_back_to_static_layout() {
    let app = common::build_test_app();
    let response = post_multipart(
        app.app(),
        "/api/enhanced-mediapipe-landmarks",
        vec![Part::png("image")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["fallback"], true);
    assert_eq!(json["totalLandmarks"], 0);
    assert_eq!(json["confidence"], 0.0);
    assert!(json["regions"]["lips"]["boundingBox"].is_object());
    assert!(json["regions"]["eyes"].is_object());
}

/// A 468-point mesh for the 64x64 sample. Lip points alternate between two
/// corners of the box x 25..75%, y 70..80%; everything else sits at
/// (0.5, 0.3).
fn lips_mesh() -> Value {
    let mut points = vec![json!({"x": 0.5, "y": 0.3, "z": 0.0}); 468];
    for (k, index) in FaceRegion::Lips.indices().into_iter().enumerate() {
        points[index] = if k % 2 == 0 {
            json!({"x": 0.25, "y": 0.70, "z": 0.0})
        } else {
            json!({"x": 0.75, "y": 0.80, "z": 0.0})
        };
    }
    json!({
        "success": true,
        "landmarks": points,
        "image_width": 64,
        "image_height": 64,
        "confidence": 0.97
    })
}

fn assert_close(actual: &Value, expected: f64) {
    let actual = actual.as_f64().unwrap();
    assert!((actual - expected).abs() < 1e-6, "{actual} != {expected}");
}

fn channel_sum(img: &image::RgbImage, x: u32, y: u32) -> u32 {
    img.get_pixel(x, y).0.iter().map(|c| u32::from(*c)).sum()
}

#[tokio::test]
async fn landmarks_map_detected_mesh_to_regions() {
    let app = common::build_test_app_with_mesh(&lips_mesh());
    let response = post_multipart(
        app.app(),
        "/api/enhanced-mediapipe-landmarks",
        vec![Part::png("image")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["fallback"], false);
    assert_eq!(json["totalLandmarks"], 468);
    assert_eq!(json["confidence"], 0.97);
    assert_eq!(json["regions"].as_object().unwrap().len(), FaceRegion::ALL.len());

    let lips = &json["regions"]["lips"];
    assert_eq!(lips["points"].as_array().unwrap().len(), FaceRegion::Lips.indices().len());
    assert_close(&lips["boundingBox"]["x"], 25.0);
    assert_close(&lips["boundingBox"]["y"], 70.0);
    assert_close(&lips["boundingBox"]["width"], 50.0);
    assert_close(&lips["boundingBox"]["height"], 10.0);

    let mask = lips["mask"].as_str().unwrap();
    assert!(
        mask.starts_with(r#"<clipPath id="region-lips"><polygon points="16.0,44.8 48.0,51.2"#),
        "{mask}"
    );
}

#[tokio::test]
async fn precision_makeup_paints_inside_detected_box() {
    let app = common::build_test_app_with_mesh(&lips_mesh());
    let response = post_multipart(
        app.app(),
        "/api/apply-precision-makeup",
        vec![
            Part::png("image"),
            Part::Text("region", "lips"),
            Part::Text("color", "#000000"),
            Part::Text("intensity", "100"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["appliedRegion"], "lips");
    assert_eq!(json["processingMethod"], "precision-landmarks");

    let path = upload_path(&app, json["processedImageUrl"].as_str().unwrap());
    let out = image::open(path).unwrap().to_rgb8();

    // Mesh box is pixels x 16..48, y 45..51; the static lips box is
    // x 27..37, y 40..45.
    assert!(channel_sum(&out, 20, 48) < 300, "mesh box not painted");
    assert!(channel_sum(&out, 30, 42) > 400, "static box painted");
    assert!(channel_sum(&out, 5, 5) > 400, "outside painted");
}

#[tokio::test]
async fn analyze_nose_reports_box_from_detected_mesh() {
    let app = common::build_test_app_with_mesh(&lips_mesh());
    let response = post_multipart(app.app(), "/api/analyze-nose", vec![Part::png("image")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let nose_box = &json["analysis"]["noseBox"];
    assert!(nose_box.is_object(), "{json}");
    assert!(nose_box["width"].as_f64().unwrap() >= 0.0);
}
