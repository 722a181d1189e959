//! Forgiving deserializers for numeric fields in client JSON.
//!
//! Browsers send the same field as a JSON number, a numeric string, a
//! fraction or not at all. These helpers read whatever arrives and never
//! fail on the value itself, so one odd entry cannot reject a whole array.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::color::MAX_INTENSITY;

/// Intensity used when an effect entry carries none (or nothing readable).
pub const DEFAULT_EFFECT_INTENSITY: u8 = 50;

fn finite(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Read an intensity: fractions round, values outside `0..=100` clamp,
/// anything unreadable yields `default`.
pub fn intensity_from(value: &Value, default: u8) -> u8 {
    finite(value)
        .map(|v| v.round().clamp(0.0, f64::from(MAX_INTENSITY)) as u8)
        .unwrap_or(default.min(MAX_INTENSITY))
}

/// Read a pixel coordinate: negatives saturate to 0, fractions truncate.
pub fn pixel_from(value: &Value) -> Option<u32> {
    finite(value).map(|v| v.max(0.0).trunc().min(f64::from(u32::MAX)) as u32)
}

/// `deserialize_with` for intensity fields.
pub fn intensity<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(intensity_from(&value, DEFAULT_EFFECT_INTENSITY))
}

/// `deserialize_with` for required pixel fields; unreadable becomes 0.
pub fn pixel<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(pixel_from(&value).unwrap_or(0))
}

/// `deserialize_with` for optional pixel fields; unreadable becomes `None`.
pub fn optional_pixel<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(pixel_from(&value))
}
