//! Local image quality report, used when the hosted model cannot analyze
//! an upload.

use image::RgbImage;
use serde::Serialize;

/// Pixel count that earns a full resolution score (1920x1080).
const FULL_HD_PIXELS: f64 = 1920.0 * 1080.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// Scores are in `0..=100`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub quality_score: u32,
    pub resolution: Resolution,
    pub resolution_score: f64,
    pub lighting_quality: f64,
    pub blur_score: f64,
    pub recommendations: Vec<String>,
}

pub fn quality_report(img: &RgbImage) -> QualityReport {
    let (width, height) = img.dimensions();
    let pixels = f64::from(width) * f64::from(height);

    let (mean, stdev) = luma_stats(img);
    let resolution_score = (pixels / FULL_HD_PIXELS).min(1.0) * 100.0;
    let lighting_quality = (100.0 - (mean - 128.0).abs()).max(0.0);
    let blur_score = (stdev / 50.0 * 100.0).min(100.0);
    let quality_score = ((resolution_score + lighting_quality + blur_score) / 3.0).round() as u32;

    let mut recommendations = Vec::new();
    if resolution_score < 70.0 {
        recommendations.push("Use a higher resolution photo for better results".to_string());
    }
    if lighting_quality < 60.0 {
        recommendations.push("Improve lighting: the photo is too dark or too bright".to_string());
    }
    if blur_score < 50.0 {
        recommendations.push("Hold the camera steady: the photo looks blurry or flat".to_string());
    }

    QualityReport {
        quality_score,
        resolution: Resolution { width, height },
        resolution_score,
        lighting_quality,
        blur_score,
        recommendations,
    }
}

/// Mean and standard deviation of Rec. 601 luma.
fn luma_stats(img: &RgbImage) -> (f64, f64) {
    let n = f64::from(img.width()) * f64::from(img.height());
    if n == 0.0 {
        return (0.0, 0.0);
    }
    let (mut sum, mut sum_sq) = (0.0f64, 0.0f64);
    for px in img.pixels() {
        let y = 0.299 * f64::from(px[0]) + 0.587 * f64::from(px[1]) + 0.114 * f64::from(px[2]);
        sum += y;
        sum_sq += y * y;
    }
    let mean = sum / n;
    let variance = (sum_sq / n - mean * mean).max(0.0);
    (mean, variance.sqrt())
}
