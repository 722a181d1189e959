//! Makeup vocabulary: product types, blend modes and request shapes.
//!
//! The per-type tables here are the single source for how strongly each
//! product shows (`base_alpha`) and how it mixes with skin (`blend_for`).

use serde::{Deserialize, Serialize};

use crate::color::DEFAULT_REQUEST_COLOR;
use crate::lenient;

/* --------------------------------------------------------------------------
Makeup types
-------------------------------------------------------------------------- */

/// A makeup product. Unrecognized names map to [`MakeupType::Basic`],
/// which renders a flat fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MakeupType {
    Lipstick,
    Eyeshadow,
    Blush,
    Foundation,
    Eyeliner,
    Mascara,
    #[serde(other)]
    Basic,
}

impl MakeupType {
    pub const ALL: [MakeupType; 6] = [
        MakeupType::Lipstick,
        MakeupType::Eyeshadow,
        MakeupType::Blush,
        MakeupType::Foundation,
        MakeupType::Eyeliner,
        MakeupType::Mascara,
    ];

    /// Case-insensitive lookup; anything unknown is [`MakeupType::Basic`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "lipstick" => MakeupType::Lipstick,
            "eyeshadow" => MakeupType::Eyeshadow,
            "blush" => MakeupType::Blush,
            "foundation" => MakeupType::Foundation,
            "eyeliner" => MakeupType::Eyeliner,
            "mascara" => MakeupType::Mascara,
            _ => MakeupType::Basic,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MakeupType::Lipstick => "lipstick",
            MakeupType::Eyeshadow => "eyeshadow",
            MakeupType::Blush => "blush",
            MakeupType::Foundation => "foundation",
            MakeupType::Eyeliner => "eyeliner",
            MakeupType::Mascara => "mascara",
            MakeupType::Basic => "basic",
        }
    }
}

/// Base opacity of a product at full intensity.
pub fn base_alpha(kind: MakeupType) -> f32 {
    match kind {
        MakeupType::Lipstick => 0.85,
        MakeupType::Eyeshadow => 0.65,
        MakeupType::Blush => 0.45,
        MakeupType::Foundation => 0.35,
        MakeupType::Eyeliner => 0.95,
        MakeupType::Mascara => 0.75,
        MakeupType::Basic => 0.5,
    }
}

/// Blend mode used when compositing a product overlay onto the photo.
pub fn blend_for(kind: MakeupType) -> BlendMode {
    match kind {
        MakeupType::Lipstick | MakeupType::Eyeliner => BlendMode::Multiply,
        MakeupType::Eyeshadow | MakeupType::Blush => BlendMode::SoftLight,
        MakeupType::Foundation => BlendMode::Overlay,
        MakeupType::Mascara => BlendMode::Darken,
        MakeupType::Basic => BlendMode::Normal,
    }
}

/* --------------------------------------------------------------------------
Blend modes
-------------------------------------------------------------------------- */

/// Separable blend modes supported by the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    Normal,
    Multiply,
    Screen,
    Overlay,
    SoftLight,
    Darken,
    Lighten,
}

/* --------------------------------------------------------------------------
Geometry
-------------------------------------------------------------------------- */

/// Axis-aligned pixel rectangle. `x`/`y` are the top-left corner.
///
/// Client fields are read leniently: negatives become 0, fractions truncate,
/// missing or unreadable values are 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default, deserialize_with = "lenient::pixel")]
    pub x: u32,
    #[serde(default, deserialize_with = "lenient::pixel")]
    pub y: u32,
    #[serde(default, deserialize_with = "lenient::pixel")]
    pub width: u32,
    #[serde(default, deserialize_with = "lenient::pixel")]
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersect with an image of `width` x `height` pixels. Returns `None`
    /// when nothing of the rectangle lies inside the image.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<Rect> {
        if self.x >= width || self.y >= height {
            return None;
        }
        let w = self.width.min(width - self.x);
        let h = self.height.min(height - self.y);
        (w > 0 && h > 0).then(|| Rect::new(self.x, self.y, w, h))
    }
}

/// Area used when a makeup request does not name one.
pub const DEFAULT_MAKEUP_AREA: Rect = Rect::new(0, 0, 400, 400);

/* --------------------------------------------------------------------------
Request shapes
-------------------------------------------------------------------------- */

fn default_color() -> String {
    DEFAULT_REQUEST_COLOR.to_string()
}

fn default_intensity() -> u8 {
    lenient::DEFAULT_EFFECT_INTENSITY
}

fn default_kind() -> MakeupType {
    MakeupType::Basic
}

fn default_area() -> Rect {
    DEFAULT_MAKEUP_AREA
}

/// One product application, as sent in `apply-multiple-makeup`'s `effects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakeupEffect {
    #[serde(rename = "type", default = "default_kind")]
    pub kind: MakeupType,
    #[serde(default = "default_color")]
    pub color: String,
    /// Number or numeric string; clamped to `0..=100`, 50 when unreadable.
    #[serde(default = "default_intensity", deserialize_with = "lenient::intensity")]
    pub intensity: u8,
    #[serde(default = "default_area")]
    pub area: Rect,
}

/// Facial area targeted by `apply-area-makeup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaKind {
    Lips,
    Eyes,
    Cheeks,
    Eyebrows,
    #[serde(other)]
    Unknown,
}

impl AreaKind {
    /// Overlay size used when an entry omits `coordinates`.
    pub fn default_size(self) -> (u32, u32) {
        match self {
            AreaKind::Lips => (100, 50),
            AreaKind::Eyes => (80, 30),
            AreaKind::Cheeks => (60, 60),
            AreaKind::Eyebrows => (70, 15),
            AreaKind::Unknown => (0, 0),
        }
    }

    pub fn blend(self) -> BlendMode {
        match self {
            AreaKind::Lips => BlendMode::Multiply,
            AreaKind::Eyes => BlendMode::Overlay,
            AreaKind::Cheeks => BlendMode::SoftLight,
            AreaKind::Eyebrows => BlendMode::Darken,
            AreaKind::Unknown => BlendMode::Normal,
        }
    }

    /// Fill opacity for an intensity: lips i/100, eyes i/150, cheeks i/200,
    /// eyebrows i/120.
    pub fn opacity(self, intensity: u8) -> f32 {
        let i = f32::from(intensity.min(100));
        let divisor = match self {
            AreaKind::Lips => 100.0,
            AreaKind::Eyes => 150.0,
            AreaKind::Cheeks => 200.0,
            AreaKind::Eyebrows => 120.0,
            AreaKind::Unknown => return 0.0,
        };
        i / divisor
    }
}

/// Optional placement for an area entry; missing fields use the area default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaCoordinates {
    #[serde(default, deserialize_with = "lenient::optional_pixel")]
    pub x: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional_pixel")]
    pub y: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional_pixel")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional_pixel")]
    pub height: Option<u32>,
}

/// One entry of `apply-area-makeup`'s `areas` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaMakeup {
    #[serde(rename = "type")]
    pub kind: AreaKind,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub coordinates: AreaCoordinates,
}

impl AreaMakeup {
    /// Resolve the pixel rectangle this entry paints.
    pub fn rect(&self) -> Rect {
        let (dw, dh) = self.kind.default_size();
        let c = self.coordinates;
        Rect::new(
            c.x.unwrap_or(0),
            c.y.unwrap_or(0),
            c.width.filter(|w| *w > 0).unwrap_or(dw),
            c.height.filter(|h| *h > 0).unwrap_or(dh),
        )
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
