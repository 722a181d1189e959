//! Face-mesh output parsing.
//!
//! Two JSON shapes are accepted:
//!
//! ```text
//! {"landmarks": [...], "image_size": {"width": W, "height": H}, "confidence": C}
//! {"success": true, "landmarks": [...], "image_width": W, "image_height": H, "confidence": C}
//! ```
//!
//! The literal line `No face detected` (or an empty landmark list) means no
//! face; `{"success": false, "error": "..."}` is a detection failure.

use std::collections::BTreeMap;

use medvision_core::regions::{analyze_regions, FaceRegion, Landmark, RegionAnalysis};
use serde::Deserialize;

use crate::error::LandmarkError;

/// Points in a full face mesh; anything beyond is dropped.
pub const MESH_POINTS: usize = 468;

pub const DEFAULT_IMAGE_WIDTH: u32 = 640;
pub const DEFAULT_IMAGE_HEIGHT: u32 = 480;

const NO_FACE_MARKER: &str = "No face detected";

/// Parsed detection result.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshOutput {
    pub landmarks: Vec<Landmark>,
    pub image_width: u32,
    pub image_height: u32,
    /// As reported by the detector; `None` when it did not say.
    pub confidence: Option<f64>,
}

impl MeshOutput {
    /// Per-region points, percent bounding box and clip-path mask.
    pub fn regions(&self) -> BTreeMap<FaceRegion, RegionAnalysis> {
        analyze_regions(&self.landmarks, self.image_width, self.image_height)
    }
}

#[derive(Debug, Deserialize)]
struct RawSize {
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
struct RawOutput {
    success: Option<bool>,
    error: Option<String>,
    #[serde(default)]
    landmarks: Vec<Landmark>,
    image_size: Option<RawSize>,
    image_width: Option<u32>,
    image_height: Option<u32>,
    confidence: Option<f64>,
}

pub fn parse_output(stdout: &str) -> Result<MeshOutput, LandmarkError> {
    let text = stdout.trim();
    if text.is_empty() || text.starts_with(NO_FACE_MARKER) {
        return Err(LandmarkError::NoFace);
    }
    let raw: RawOutput = serde_json::from_str(text).map_err(|e| LandmarkError::Parse(e.to_string()))?;
    if raw.success == Some(false) {
        return Err(LandmarkError::ProcessFailed {
            status: "reported failure".into(),
            stderr: raw.error.unwrap_or_default(),
        });
    }
    if raw.landmarks.is_empty() {
        return Err(LandmarkError::NoFace);
    }

    let (width, height) = match raw.image_size {
        Some(size) => (size.width, size.height),
        None => (
            raw.image_width.unwrap_or(DEFAULT_IMAGE_WIDTH),
            raw.image_height.unwrap_or(DEFAULT_IMAGE_HEIGHT),
        ),
    };
    let mut landmarks = raw.landmarks;
    landmarks.truncate(MESH_POINTS);

    Ok(MeshOutput {
        landmarks,
        image_width: width.max(1),
        image_height: height.max(1),
        confidence: raw.confidence,
    })
}
