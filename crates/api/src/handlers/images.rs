//! Handlers for image upload and the visualization effects.
//!
//! Every effect endpoint stores the uploaded photo first, then tries the
//! hosted generator and falls back to the local filter engine (see
//! [`remote_or_local`]). Only a local failure turns into a 500.

use std::collections::BTreeMap;

use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use medvision_ai::RemoteError;
use medvision_core::color::{
    hex_to_rgb_or, parse_intensity, DEFAULT_AREA_COLOR, DEFAULT_REQUEST_COLOR, DEFAULT_REQUEST_RGB,
};
use medvision_core::effects::{
    FaceEffect, NoseAssessment, NoseStyle, ProcessingMethod, Procedure, DEFAULT_CURRENT_AGE,
    DEFAULT_NOSE_STYLE, DEFAULT_TARGET_AGE, NOSE_FALLBACK_INTENSITY,
};
use medvision_core::makeup::{AreaMakeup, MakeupEffect, MakeupType, Rect, DEFAULT_MAKEUP_AREA};
use medvision_core::regions::{fallback_layout, BoundingBox, FaceRegion, Landmark, MakeupRegion};
use medvision_core::types::EntityId;
use medvision_imaging::analysis::QualityReport;
use medvision_store::models::image::ImageMetadata;
use medvision_store::repositories::ImageRepo;

use crate::error::{AppError, AppResult};
use crate::messages;
use crate::orchestrator::remote_or_local;
use crate::response::Success;
use crate::state::AppState;
use crate::upload::{UploadForm, IMAGE_FIELD};

const NO_IMAGE: &str = "No image file provided";

const DEFAULT_INTENSITY: u8 = 50;
const AREA_INTENSITY: u8 = 70;
const PRECISION_INTENSITY: u8 = 70;
const DEFAULT_TEXTURE: &str = "gloss";
const DEFAULT_FACE_EFFECT: &str = "beauty";

/// Reported when the detector gives no confidence of its own.
const DEFAULT_LANDMARK_CONFIDENCE: f64 = 0.9;

async fn read_image_form(state: &AppState, multipart: Multipart) -> AppResult<UploadForm> {
    UploadForm::read(
        multipart,
        IMAGE_FIELD,
        &state.config.upload_dir,
        state.config.max_upload_bytes,
    )
    .await
}

/// Form flag that defaults to on; `false`, `0` and `off` turn it off.
fn parse_flag_default_on(raw: Option<&str>) -> bool {
    raw.map_or(true, |v| !matches!(v.trim(), "false" | "0" | "off"))
}

/// Lenient age field: missing or unparsable yields `default`.
fn parse_age(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

// ---------------------------------------------------------------------------
// POST /api/upload-image
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub image_id: EntityId,
    pub image_url: String,
    pub message: &'static str,
}

/// Store a photo and record its metadata.
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Success<UploadedImage>>> {
    let mut form = read_image_form(&state, multipart).await?;
    let file = form.require_file(NO_IMAGE)?;

    let meta = ImageRepo::insert(
        &state.store,
        ImageMetadata {
            id: Uuid::new_v4(),
            url: file.url(),
            filename: file.file_name,
            original_name: file.original_name,
            mime_type: file.mime_type,
            size: file.size,
            uploaded_at: Utc::now(),
        },
    )
    .await;

    tracing::info!(image_id = %meta.id, size = meta.size, "Image uploaded");

    Ok(Json(Success::new(UploadedImage {
        image_id: meta.id,
        image_url: meta.url,
        message: messages::IMAGE_UPLOADED,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/generate-surgical-preview
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgicalPreview {
    pub after_image_url: String,
    pub original_image_url: String,
    pub processing_method: ProcessingMethod,
}

/// Simulate a procedure. Nose procedures fall back to the nose
/// beautification chain, everything else to the surgical preview chain.
///
/// `areas` and `adjustments` are accepted as JSON and logged; neither the
/// prompts nor the local chains use them.
pub async fn generate_surgical_preview(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Success<SurgicalPreview>>> {
    let mut form = read_image_form(&state, multipart).await?;
    let image = form.require_file(NO_IMAGE)?;

    let procedure = Procedure::parse(form.text("procedureType"));
    let intensity = parse_intensity(form.text("intensity"), DEFAULT_INTENSITY);
    let nose_intensity = parse_intensity(form.text("intensity"), NOSE_FALLBACK_INTENSITY);
    let areas: Value = form.json_or("areas", json!({}))?;
    let adjustments: Value = form.json_or("adjustments", json!({}))?;

    tracing::info!(
        procedure = procedure.as_str(),
        intensity,
        %areas,
        %adjustments,
        "Surgical preview requested",
    );

    let engine = &state.engine;
    let path = image.path.as_path();
    let procedure_ref = &procedure;

    let (after_image_url, processing_method) = remote_or_local(
        "surgical_visualization",
        ProcessingMethod::OpenAiAi,
        state
            .generator
            .surgical_visualization(path, procedure_ref, intensity),
        move || async move {
            if procedure_ref.is_nose() {
                engine
                    .beautify_nose(path, NoseStyle::Refinement, nose_intensity, true)
                    .await
                    .map(|f| (f.url(), ProcessingMethod::NoseBeautificationFallback))
            } else {
                engine
                    .surgical_preview(path, procedure_ref, intensity)
                    .await
                    .map(|f| (f.url(), ProcessingMethod::LocalFallback))
            }
        },
    )
    .await
    .map_err(|e| AppError::processing("Failed to generate surgical preview", e))?;

    Ok(Json(Success::new(SurgicalPreview {
        after_image_url,
        original_image_url: image.url(),
        processing_method,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/nose-beautification
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoseBeautification {
    pub beautified_image_url: String,
    pub comparison_image_url: String,
    pub original_image_url: String,
    #[serde(rename = "type")]
    pub style: NoseStyle,
    pub intensity: u8,
    pub preserve_natural_look: bool,
    pub processing_method: ProcessingMethod,
    pub message: &'static str,
}

/// Apply one nose style (`type`, default `refinement`) locally and build a
/// before/after strip. An unknown style is a 400.
pub async fn nose_beautification(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Success<NoseBeautification>>> {
    let mut form = read_image_form(&state, multipart).await?;
    let image = form.require_file(NO_IMAGE)?;

    let raw_style = form.text("type").unwrap_or(DEFAULT_NOSE_STYLE.as_str());
    let style = NoseStyle::parse(raw_style)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown nose beautification type: {raw_style}")))?;
    let intensity = parse_intensity(form.text("intensity"), NOSE_FALLBACK_INTENSITY);
    let preserve_natural_look = parse_flag_default_on(form.text("preserveNaturalLook"));

    let after = state
        .engine
        .beautify_nose(&image.path, style, intensity, preserve_natural_look)
        .await
        .map_err(|e| AppError::processing("Failed to beautify nose", e))?;
    let comparison = state
        .engine
        .before_after(&image.path, &after.path)
        .await
        .map_err(|e| AppError::processing("Failed to build before/after comparison", e))?;

    tracing::info!(
        style = style.as_str(),
        intensity,
        preserve_natural_look,
        file = %after.file_name,
        "Nose beautified",
    );

    Ok(Json(Success::new(NoseBeautification {
        beautified_image_url: after.url(),
        comparison_image_url: comparison.url(),
        original_image_url: image.url(),
        style,
        intensity,
        preserve_natural_look,
        processing_method: ProcessingMethod::Local,
        message: messages::NOSE_BEAUTIFIED,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/analyze-nose
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoseAnalysis {
    pub analysis: NoseAssessment,
    pub recommendations: Vec<&'static str>,
    pub image_url: String,
    pub message: &'static str,
}

/// Baseline nose assessment, with the nose box attached when a face mesh
/// is found.
pub async fn analyze_nose(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Success<NoseAnalysis>>> {
    let mut form = read_image_form(&state, multipart).await?;
    let image = form.require_file(NO_IMAGE)?;

    let nose_box = match state.landmarks.detect(&image.path).await {
        Ok(mesh) => mesh
            .regions()
            .remove(&FaceRegion::Nose)
            .map(|region| region.bounding_box),
        Err(e) => {
            tracing::debug!(error = %e, "No face mesh for nose analysis");
            None
        }
    };

    Ok(Json(Success::new(NoseAnalysis {
        analysis: NoseAssessment::baseline(nose_box),
        recommendations: NoseAssessment::recommendations(),
        image_url: image.url(),
        message: messages::NOSE_ANALYZED,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/apply-makeup
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeupResult {
    pub makeup_image_url: String,
    pub original_image_url: String,
    pub processing_method: ProcessingMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Apply one makeup product (default lipstick, `#FF6B6B`, intensity 50).
pub async fn apply_makeup(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Success<MakeupResult>>> {
    let mut form = read_image_form(&state, multipart).await?;
    let image = form.require_file(NO_IMAGE)?;

    let kind = MakeupType::parse(form.text("makeupType").unwrap_or("lipstick"));
    let color = form.text("color").unwrap_or(DEFAULT_REQUEST_COLOR).to_string();
    let intensity = parse_intensity(form.text("intensity"), DEFAULT_INTENSITY);
    let area: Rect = form.json_or("area", DEFAULT_MAKEUP_AREA)?;

    tracing::info!(makeup_type = kind.as_str(), %color, intensity, "Makeup requested");

    let engine = &state.engine;
    let path = image.path.as_path();
    let effect = MakeupEffect {
        kind,
        color: color.clone(),
        intensity,
        area,
    };

    let (makeup_image_url, processing_method) = remote_or_local(
        "apply_makeup",
        ProcessingMethod::OpenAiAi,
        state.generator.apply_makeup(path, kind, &color, intensity),
        move || async move {
            engine
                .apply_makeup(path, effect)
                .await
                .map(|f| (f.url(), ProcessingMethod::Local))
        },
    )
    .await
    .map_err(|e| AppError::processing("Failed to apply makeup", e))?;

    Ok(Json(Success::new(MakeupResult {
        makeup_image_url,
        original_image_url: image.url(),
        processing_method,
        message: None,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/apply-multiple-makeup
// ---------------------------------------------------------------------------

/// Apply a JSON array of makeup effects in order. Local only.
pub async fn apply_multiple_makeup(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Success<MakeupResult>>> {
    let mut form = read_image_form(&state, multipart).await?;
    let image = form.require_file(NO_IMAGE)?;

    let raw = form
        .text("effects")
        .ok_or_else(|| AppError::BadRequest("Invalid effects format".into()))?;
    let effects: Vec<MakeupEffect> = serde_json::from_str(raw)
        .map_err(|e| AppError::BadRequest(format!("Invalid effects format: {e}")))?;
    if effects.is_empty() {
        return Err(AppError::BadRequest("No makeup effects specified".into()));
    }

    let count = effects.len();
    let file = state
        .engine
        .apply_multiple_makeup(&image.path, effects)
        .await
        .map_err(|e| AppError::processing("Failed to apply makeup effects", e))?;

    tracing::info!(count, file = %file.file_name, "Multiple makeup applied");

    Ok(Json(Success::new(MakeupResult {
        makeup_image_url: file.url(),
        original_image_url: image.url(),
        processing_method: ProcessingMethod::Local,
        message: Some(messages::makeup_effects_applied(count)),
    })))
}

// ---------------------------------------------------------------------------
// POST /api/color-match
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorMatch {
    pub processed_image_url: String,
    pub original_image_url: String,
    pub reference_color: String,
    /// Echoed label; the swatch position does not depend on it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    pub processing_method: ProcessingMethod,
    pub message: &'static str,
}

/// Multiply a `referenceColor` swatch over the photo. Local only.
pub async fn color_match(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Success<ColorMatch>>> {
    let mut form = read_image_form(&state, multipart).await?;
    let image = form.require_file(NO_IMAGE)?;

    let reference_color = form
        .text("referenceColor")
        .unwrap_or(DEFAULT_REQUEST_COLOR)
        .to_string();
    let area = form.text("area").map(str::to_string);

    let file = state
        .engine
        .color_match(&image.path, hex_to_rgb_or(&reference_color, DEFAULT_AREA_COLOR))
        .await
        .map_err(|e| AppError::processing("Failed to match colors", e))?;

    Ok(Json(Success::new(ColorMatch {
        processed_image_url: file.url(),
        original_image_url: image.url(),
        reference_color,
        area,
        processing_method: ProcessingMethod::Local,
        message: messages::COLORS_MATCHED,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/apply-area-makeup
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaMakeupResult {
    pub makeup_image_url: String,
    pub original_image_url: String,
    /// Areas actually painted; unknown area types are skipped.
    pub areas_processed: usize,
    pub intensity: u8,
    pub processing_method: ProcessingMethod,
}

/// Paint lips/eyes/cheeks/eyebrows shapes from a JSON `areas` array.
pub async fn apply_area_makeup(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Success<AreaMakeupResult>>> {
    let mut form = read_image_form(&state, multipart).await?;
    let image = form.require_file(NO_IMAGE)?;

    let areas: Vec<AreaMakeup> = form.json_or("areas", Vec::new())?;
    if areas.is_empty() {
        return Err(AppError::BadRequest("No makeup areas specified".into()));
    }
    let intensity = parse_intensity(form.text("intensity"), AREA_INTENSITY);

    let (file, areas_processed) = state
        .engine
        .apply_area_makeup(&image.path, areas, intensity)
        .await
        .map_err(|e| AppError::processing("Failed to apply area-specific makeup", e))?;

    Ok(Json(Success::new(AreaMakeupResult {
        makeup_image_url: file.url(),
        original_image_url: image.url(),
        areas_processed,
        intensity,
        processing_method: ProcessingMethod::AreaSpecific,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/age-progression
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeProgression {
    pub aged_image_url: String,
    pub original_image_url: String,
    pub processing_method: ProcessingMethod,
    /// Local branch taken (`aging`, `youth`, `unchanged`); absent for remote results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_branch: Option<&'static str>,
}

/// Age or rejuvenate a face from `currentAge` (25) to `targetAge` (40).
pub async fn age_progression(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Success<AgeProgression>>> {
    let mut form = read_image_form(&state, multipart).await?;
    let image = form.require_file(NO_IMAGE)?;

    let target_age = parse_age(form.text("targetAge"), DEFAULT_TARGET_AGE);
    let current_age = parse_age(form.text("currentAge"), DEFAULT_CURRENT_AGE);

    let engine = &state.engine;
    let generator = &state.generator;
    let path = image.path.as_path();

    let ((aged_image_url, age_branch), processing_method) = remote_or_local(
        "age_progression",
        ProcessingMethod::Ai,
        async move {
            generator
                .age_progression(path, target_age)
                .await
                .map(|url| (url, None))
        },
        move || async move {
            engine
                .age_progression(path, current_age, target_age)
                .await
                .map(|(f, branch)| ((f.url(), Some(branch.name())), ProcessingMethod::Local))
        },
    )
    .await
    .map_err(|e| AppError::processing("Failed to generate age progression", e))?;

    Ok(Json(Success::new(AgeProgression {
        aged_image_url,
        original_image_url: image.url(),
        processing_method,
        age_branch,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/analyze-image
// ---------------------------------------------------------------------------

/// Structured analysis from the chat model, or the local quality report.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ImageAnalysis {
    Remote(Value),
    Local(QualityReport),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub analysis: ImageAnalysis,
    pub image_url: String,
}

pub async fn analyze_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Success<AnalysisResult>>> {
    let mut form = read_image_form(&state, multipart).await?;
    let image = form.require_file(NO_IMAGE)?;

    let engine = &state.engine;
    let generator = &state.generator;
    let path = image.path.as_path();

    let (analysis, _) = remote_or_local(
        "analyze_image",
        ProcessingMethod::Ai,
        async move { generator.analyze_image(path).await.map(ImageAnalysis::Remote) },
        move || async move {
            engine
                .quality_report(path)
                .await
                .map(|report| (ImageAnalysis::Local(report), ProcessingMethod::Local))
        },
    )
    .await
    .map_err(|e| AppError::processing("Failed to analyze image", e))?;

    Ok(Json(Success::new(AnalysisResult {
        analysis,
        image_url: image.url(),
    })))
}

// ---------------------------------------------------------------------------
// POST /api/apply-face-effect
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceEffectResult {
    pub processed_image_url: String,
    pub effect: FaceEffect,
    pub intensity: u8,
    pub category: Option<String>,
    pub processing_method: ProcessingMethod,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub demo: bool,
}

/// FaceApp-style effect. When both paths fail the canned sample image for
/// the effect is returned with `demo: true` instead of an error.
pub async fn apply_face_effect(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Success<FaceEffectResult>>> {
    let mut form = read_image_form(&state, multipart).await?;
    let image = form.require_file(NO_IMAGE)?;

    let effect = FaceEffect::parse(form.text("effect").unwrap_or(DEFAULT_FACE_EFFECT));
    let intensity = parse_intensity(form.text("intensity"), DEFAULT_INTENSITY);
    let category = form.text("category").map(str::to_string);

    tracing::info!(effect = effect.as_str(), intensity, ?category, "Face effect requested");

    let engine = &state.engine;
    let generator = &state.generator;
    let path = image.path.as_path();
    let effect_ref = &effect;

    let outcome = remote_or_local(
        "face_effect",
        ProcessingMethod::Ai,
        async move {
            let bytes = generator.face_effect(path, effect_ref, intensity).await?;
            engine
                .save_remote_image(bytes, "faceapp")
                .await
                .map(|f| f.url())
                .map_err(|e| RemoteError::MalformedResponse(e.to_string()))
        },
        move || async move {
            engine
                .face_effect(path, effect_ref, intensity)
                .await
                .map(|f| (f.url(), ProcessingMethod::Local))
        },
    )
    .await;

    let (processed_image_url, processing_method, demo) = match outcome {
        Ok((url, method)) => (url, method, false),
        Err(e) => {
            tracing::error!(effect = effect.as_str(), error = %e, "Face effect failed, serving demo image");
            (effect.demo_url().to_string(), ProcessingMethod::Demo, true)
        }
    };

    Ok(Json(Success::new(FaceEffectResult {
        processed_image_url,
        effect,
        intensity,
        category,
        processing_method,
        demo,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/enhanced-mediapipe-landmarks
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionView {
    pub points: Vec<Landmark>,
    pub bounding_box: BoundingBox,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkResult {
    pub landmarks: Vec<Landmark>,
    pub regions: BTreeMap<&'static str, RegionView>,
    pub confidence: f64,
    pub image_url: String,
    pub total_landmarks: usize,
    /// True when detection failed and `regions` is the static layout.
    pub fallback: bool,
}

/// Run the face mesh and map it to named regions. Detection failures are
/// not errors: the static layout is returned with `fallback: true`.
pub async fn detect_landmarks(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Success<LandmarkResult>>> {
    let mut form = read_image_form(&state, multipart).await?;
    let image = form.require_file(NO_IMAGE)?;

    let result = match state.landmarks.detect(&image.path).await {
        Ok(mesh) => {
            let regions = mesh
                .regions()
                .into_iter()
                .map(|(region, analysis)| {
                    (
                        region.id(),
                        RegionView {
                            points: analysis.points,
                            bounding_box: analysis.bounding_box,
                            mask: Some(analysis.mask),
                        },
                    )
                })
                .collect();
            LandmarkResult {
                total_landmarks: mesh.landmarks.len(),
                confidence: mesh.confidence.unwrap_or(DEFAULT_LANDMARK_CONFIDENCE),
                landmarks: mesh.landmarks,
                regions,
                image_url: image.url(),
                fallback: false,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Landmark detection failed, using static layout");
            let regions = fallback_layout()
                .into_iter()
                .map(|(region, bounding_box)| {
                    (
                        region.as_str(),
                        RegionView {
                            points: Vec::new(),
                            bounding_box,
                            mask: None,
                        },
                    )
                })
                .collect();
            LandmarkResult {
                landmarks: Vec::new(),
                regions,
                confidence: 0.0,
                image_url: image.url(),
                total_landmarks: 0,
                fallback: true,
            }
        }
    };

    Ok(Json(Success::new(result)))
}

// ---------------------------------------------------------------------------
// POST /api/apply-precision-makeup
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecisionMakeupResult {
    pub processed_image_url: String,
    pub original_image_url: String,
    pub applied_region: String,
    pub color: String,
    pub intensity: u8,
    /// Echoed label; the overlay does not vary with texture.
    pub texture: String,
    pub processing_method: ProcessingMethod,
}

/// Paint the product for `region` inside the region's landmark box, or the
/// static layout box when no mesh is available.
pub async fn apply_precision_makeup(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Success<PrecisionMakeupResult>>> {
    let mut form = read_image_form(&state, multipart).await?;
    let image = form.require_file(NO_IMAGE)?;

    let applied_region = form
        .text("region")
        .ok_or_else(|| AppError::BadRequest("Makeup region not specified".into()))?
        .to_string();
    let region = MakeupRegion::parse(&applied_region);
    let color = form.text("color").unwrap_or(DEFAULT_REQUEST_COLOR).to_string();
    let intensity = parse_intensity(form.text("intensity"), PRECISION_INTENSITY);
    let texture = form.text("texture").unwrap_or(DEFAULT_TEXTURE).to_string();

    let bbox = match state.landmarks.detect(&image.path).await {
        Ok(mesh) => region
            .bounding_box(&mesh.landmarks)
            .unwrap_or_else(|| region.fallback_box()),
        Err(e) => {
            tracing::warn!(error = %e, region = region.as_str(), "No face mesh, using static region box");
            region.fallback_box()
        }
    };

    let file = state
        .engine
        .region_makeup(
            &image.path,
            region,
            bbox,
            hex_to_rgb_or(&color, DEFAULT_REQUEST_RGB),
            intensity,
        )
        .await
        .map_err(|e| AppError::processing("Failed to apply precision makeup", e))?;

    Ok(Json(Success::new(PrecisionMakeupResult {
        processed_image_url: file.url(),
        original_image_url: image.url(),
        applied_region,
        color,
        intensity,
        texture,
        processing_method: ProcessingMethod::PrecisionLandmarks,
    })))
}
