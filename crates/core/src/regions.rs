//! Face-mesh region tables.
//!
//! A face-mesh detector returns up to 468 normalized points (plus 10 iris
//! points when refined). Regions are fixed index subsets of that mesh. A
//! region's bounding box is reported in percent of the image; its clip path
//! in pixels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::makeup::{MakeupType, Rect};
use crate::overlay;

/* --------------------------------------------------------------------------
Index tables
-------------------------------------------------------------------------- */

const LIPS_OUTER: &[usize] = &[61, 84, 17, 314, 405, 320, 307, 375, 321, 308, 324, 318];
const LIPS_INNER: &[usize] = &[78, 95, 88, 178, 87, 14, 317, 402, 318, 324, 308, 324];

const LEFT_EYE_UPPER: &[usize] = &[463, 414, 286, 258, 257, 259, 260, 467];
const LEFT_EYE_LOWER: &[usize] = &[362, 398, 384, 385, 386, 387, 388, 466];
const LEFT_IRIS: &[usize] = &[474, 475, 476, 477];

const RIGHT_EYE_UPPER: &[usize] = &[246, 161, 160, 159, 158, 157, 173, 133];
const RIGHT_EYE_LOWER: &[usize] = &[33, 7, 163, 144, 145, 153, 154, 155];
const RIGHT_IRIS: &[usize] = &[468, 469, 470, 471];

const LEFT_CHEEK: &[usize] = &[
    116, 117, 118, 119, 120, 121, 126, 142, 36, 205, 206, 207, 213, 192, 147,
];
const RIGHT_CHEEK: &[usize] = &[
    345, 346, 347, 348, 349, 350, 355, 371, 266, 425, 426, 427, 436, 416, 376,
];
const FOREHEAD: &[usize] = &[
    10, 151, 9, 8, 107, 55, 8, 9, 151, 10, 338, 337, 299, 333, 298, 301,
];
const LEFT_EYEBROW: &[usize] = &[46, 53, 52, 51, 48, 115, 131, 134, 102, 48, 64];
const RIGHT_EYEBROW: &[usize] = &[276, 283, 282, 281, 278, 344, 360, 363, 331, 278, 294];

const NOSE_TIP: &[usize] = &[
    1, 2, 5, 4, 6, 19, 94, 125, 141, 235, 31, 228, 229, 230, 231, 232, 233, 244, 245, 122, 6,
    202, 214, 234,
];
const NOSE_BRIDGE: &[usize] = &[
    6, 51, 48, 115, 131, 134, 102, 49, 220, 305, 307, 375, 321, 308, 324, 318,
];
const NOSTRILS: &[usize] = &[236, 3, 51, 48, 115, 131, 134, 102, 48, 64];

/* --------------------------------------------------------------------------
Types
-------------------------------------------------------------------------- */

/// One normalized mesh point (`x`, `y` in `0.0..=1.0` of the image).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

/// A named face region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FaceRegion {
    Lips,
    LeftEye,
    RightEye,
    LeftCheek,
    RightCheek,
    Forehead,
    LeftEyebrow,
    RightEyebrow,
    Nose,
}

impl FaceRegion {
    pub const ALL: [FaceRegion; 9] = [
        FaceRegion::Lips,
        FaceRegion::LeftEye,
        FaceRegion::RightEye,
        FaceRegion::LeftCheek,
        FaceRegion::RightCheek,
        FaceRegion::Forehead,
        FaceRegion::LeftEyebrow,
        FaceRegion::RightEyebrow,
        FaceRegion::Nose,
    ];

    /// Mesh indices making up the region, sub-parts concatenated in order.
    pub fn indices(self) -> Vec<usize> {
        let parts: &[&[usize]] = match self {
            FaceRegion::Lips => &[LIPS_OUTER, LIPS_INNER],
            FaceRegion::LeftEye => &[LEFT_EYE_UPPER, LEFT_EYE_LOWER, LEFT_IRIS],
            FaceRegion::RightEye => &[RIGHT_EYE_UPPER, RIGHT_EYE_LOWER, RIGHT_IRIS],
            FaceRegion::LeftCheek => &[LEFT_CHEEK],
            FaceRegion::RightCheek => &[RIGHT_CHEEK],
            FaceRegion::Forehead => &[FOREHEAD],
            FaceRegion::LeftEyebrow => &[LEFT_EYEBROW],
            FaceRegion::RightEyebrow => &[RIGHT_EYEBROW],
            FaceRegion::Nose => &[NOSE_TIP, NOSE_BRIDGE, NOSTRILS],
        };
        parts.concat()
    }

    pub fn id(self) -> &'static str {
        match self {
            FaceRegion::Lips => "lips",
            FaceRegion::LeftEye => "leftEye",
            FaceRegion::RightEye => "rightEye",
            FaceRegion::LeftCheek => "leftCheek",
            FaceRegion::RightCheek => "rightCheek",
            FaceRegion::Forehead => "forehead",
            FaceRegion::LeftEyebrow => "leftEyebrow",
            FaceRegion::RightEyebrow => "rightEyebrow",
            FaceRegion::Nose => "nose",
        }
    }
}

/// Box in percent of image width/height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Convert to a pixel rectangle for an image of the given size.
    pub fn to_pixels(&self, width: u32, height: u32) -> Rect {
        let px = |pct: f64, total: u32| ((pct.max(0.0) / 100.0) * f64::from(total)).round() as u32;
        Rect::new(
            px(self.x, width),
            px(self.y, height),
            px(self.width, width).max(1),
            px(self.height, height).max(1),
        )
    }
}

/// Per-region detection output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAnalysis {
    pub points: Vec<Landmark>,
    pub bounding_box: BoundingBox,
    /// `<clipPath>` polygon through the region's points in pixel space.
    pub mask: String,
}

/* --------------------------------------------------------------------------
Region math
-------------------------------------------------------------------------- */

/// Points of a region; indices beyond `landmarks.len()` are skipped.
pub fn region_points(landmarks: &[Landmark], region: FaceRegion) -> Vec<Landmark> {
    region
        .indices()
        .into_iter()
        .filter_map(|i| landmarks.get(i).copied())
        .collect()
}

/// Percent bounding box of a point set, or `None` when empty.
pub fn bounding_box(points: &[Landmark]) -> Option<BoundingBox> {
    let first = points.first()?;
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    Some(BoundingBox::new(
        min_x * 100.0,
        min_y * 100.0,
        (max_x - min_x) * 100.0,
        (max_y - min_y) * 100.0,
    ))
}

/// Polygon vertices in pixel coordinates.
pub fn clip_polygon(points: &[Landmark], width: u32, height: u32) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|p| (p.x * f64::from(width), p.y * f64::from(height)))
        .collect()
}

/// Analyze every region that has at least one point.
pub fn analyze_regions(
    landmarks: &[Landmark],
    width: u32,
    height: u32,
) -> BTreeMap<FaceRegion, RegionAnalysis> {
    FaceRegion::ALL
        .into_iter()
        .filter_map(|region| {
            let points = region_points(landmarks, region);
            let bounding_box = bounding_box(&points)?;
            let mask = overlay::clip_path(
                &format!("region-{}", region.id()),
                &clip_polygon(&points, width, height),
            );
            Some((
                region,
                RegionAnalysis {
                    points,
                    bounding_box,
                    mask,
                },
            ))
        })
        .collect()
}

/* --------------------------------------------------------------------------
Makeup regions and fallback layout
-------------------------------------------------------------------------- */

/// Coarse area a precision-makeup request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MakeupRegion {
    Lips,
    Eyes,
    Cheeks,
    Forehead,
}

impl MakeupRegion {
    pub const ALL: [MakeupRegion; 4] = [
        MakeupRegion::Lips,
        MakeupRegion::Eyes,
        MakeupRegion::Cheeks,
        MakeupRegion::Forehead,
    ];

    /// Unknown region names are treated as forehead (foundation).
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "lips" => MakeupRegion::Lips,
            "eyes" => MakeupRegion::Eyes,
            "cheeks" => MakeupRegion::Cheeks,
            _ => MakeupRegion::Forehead,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MakeupRegion::Lips => "lips",
            MakeupRegion::Eyes => "eyes",
            MakeupRegion::Cheeks => "cheeks",
            MakeupRegion::Forehead => "forehead",
        }
    }

    pub fn makeup_type(self) -> MakeupType {
        match self {
            MakeupRegion::Lips => MakeupType::Lipstick,
            MakeupRegion::Eyes => MakeupType::Eyeshadow,
            MakeupRegion::Cheeks => MakeupType::Blush,
            MakeupRegion::Forehead => MakeupType::Foundation,
        }
    }

    /// Detailed mesh regions whose union forms this area.
    pub fn face_regions(self) -> &'static [FaceRegion] {
        match self {
            MakeupRegion::Lips => &[FaceRegion::Lips],
            MakeupRegion::Eyes => &[FaceRegion::LeftEye, FaceRegion::RightEye],
            MakeupRegion::Cheeks => &[FaceRegion::LeftCheek, FaceRegion::RightCheek],
            MakeupRegion::Forehead => &[FaceRegion::Forehead],
        }
    }

    /// Static percent box used when no face mesh is available.
    pub fn fallback_box(self) -> BoundingBox {
        match self {
            MakeupRegion::Lips => BoundingBox::new(42.0, 62.0, 16.0, 8.0),
            MakeupRegion::Eyes => BoundingBox::new(35.0, 40.0, 30.0, 12.0),
            MakeupRegion::Cheeks => BoundingBox::new(25.0, 50.0, 50.0, 20.0),
            MakeupRegion::Forehead => BoundingBox::new(30.0, 15.0, 40.0, 25.0),
        }
    }

    /// Bounding box of the area from a mesh, or `None` if no point is present.
    pub fn bounding_box(self, landmarks: &[Landmark]) -> Option<BoundingBox> {
        let points: Vec<Landmark> = self
            .face_regions()
            .iter()
            .flat_map(|r| region_points(landmarks, *r))
            .collect();
        bounding_box(&points)
    }
}

/// Static layout of coarse regions, used when detection fails.
pub fn fallback_layout() -> BTreeMap<MakeupRegion, BoundingBox> {
    MakeupRegion::ALL
        .into_iter()
        .map(|r| (r, r.fallback_box()))
        .collect()
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
