//! Hex color parsing and intensity scaling for makeup overlays.
//!
//! All makeup paths accept a `#RRGGBB` string and an integer intensity in
//! `0..=100`. Intensity is turned into an 8-bit alpha relative to a per-type
//! base opacity (see [`crate::makeup::base_alpha`]).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Color used when a request omits `color`.
pub const DEFAULT_REQUEST_COLOR: &str = "#FF6B6B";

/// [`DEFAULT_REQUEST_COLOR`] as RGB, substituted for an unparsable request hex.
pub const DEFAULT_REQUEST_RGB: Rgb = Rgb {
    r: 255,
    g: 107,
    b: 107,
};

/// Color substituted when an area-makeup entry carries an unparsable hex.
pub const DEFAULT_AREA_COLOR: Rgb = Rgb {
    r: 255,
    g: 105,
    b: 157,
};

/// Upper bound of the intensity scale.
pub const MAX_INTENSITY: u8 = 100;

/* --------------------------------------------------------------------------
Rgb
-------------------------------------------------------------------------- */

/// An opaque 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Shift every channel by a signed offset, saturating at 0 and 255.
    pub fn shifted(self, dr: i16, dg: i16, db: i16) -> Self {
        let shift = |c: u8, d: i16| (i16::from(c) + d).clamp(0, 255) as u8;
        Self {
            r: shift(self.r, dr),
            g: shift(self.g, dg),
            b: shift(self.b, db),
        }
    }

    /// Render as an SVG `rgb(r, g, b)` paint value.
    pub fn to_svg(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Channels as normalized floats in `0.0..=1.0`.
    pub fn to_unit(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&rgb_to_hex(*self))
    }
}

/* --------------------------------------------------------------------------
Conversions
-------------------------------------------------------------------------- */

/// Parse `#RRGGBB` (leading `#` optional, case-insensitive) into an [`Rgb`].
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, CoreError> {
    let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CoreError::Validation(format!(
            "Invalid hex color '{hex}': expected #RRGGBB"
        )));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|e| CoreError::Validation(format!("Invalid hex color '{hex}': {e}")))
    };
    Ok(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

/// Parse a hex color, substituting `fallback` when it is malformed.
pub fn hex_to_rgb_or(hex: &str, fallback: Rgb) -> Rgb {
    hex_to_rgb(hex).unwrap_or(fallback)
}

/// Format an [`Rgb`] as uppercase `#RRGGBB`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

/// Convert an intensity (`0..=100`) into an 8-bit alpha: `round(i/100 * base * 255)`.
///
/// `base` is clamped to `0.0..=1.0` and intensity to [`MAX_INTENSITY`], so the
/// result is always a valid channel value.
pub fn intensity_to_alpha(intensity: u8, base: f32) -> u8 {
    let i = f32::from(intensity.min(MAX_INTENSITY)) / 100.0;
    let base = base.clamp(0.0, 1.0);
    (i * base * 255.0).round() as u8
}

/// Lenient intensity parsing: missing or non-numeric input yields `default`,
/// numbers outside `0..=100` are clamped.
pub fn parse_intensity(raw: Option<&str>, default: u8) -> u8 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.round().clamp(0.0, f64::from(MAX_INTENSITY)) as u8)
        .unwrap_or(default.min(MAX_INTENSITY))
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
