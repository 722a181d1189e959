//! File-level entry points of the local filter engine.
//!
//! Every operation reads the input from disk, decodes it, runs the CPU work
//! on tokio's blocking pool, encodes a JPEG and writes it into the output
//! directory as `<prefix>_<unix-millis>_<8 hex>.jpg`.

use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use medvision_core::color::Rgb;
use medvision_core::effects::{AgeBranch, FaceEffect, NoseStyle, Procedure};
use medvision_core::makeup::{AreaMakeup, MakeupEffect};
use medvision_core::regions::{BoundingBox, MakeupRegion};
use tracing::debug;

use crate::analysis::{self, QualityReport};
use crate::error::ImagingError;
use crate::{age, compare, face_effects, makeup, nose, surgical};

/// Public URL prefix under which the output directory is served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// JPEG quality for most outputs.
pub const DEFAULT_QUALITY: u8 = 95;
/// JPEG quality for age progression and downloaded remote results.
pub const REMOTE_QUALITY: u8 = 90;

/// A written result image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    pub path: PathBuf,
    pub file_name: String,
}

impl ProcessedFile {
    /// Served URL, e.g. `/uploads/makeup_1700000000000_1a2b3c4d.jpg`.
    pub fn url(&self) -> String {
        format!("{UPLOADS_URL_PREFIX}/{}", self.file_name)
    }
}

#[derive(Debug, Clone)]
pub struct LocalFilterEngine {
    output_dir: PathBuf,
}

impl LocalFilterEngine {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /* ---- Makeup ---- */

    pub async fn apply_makeup(&self, input: &Path, effect: MakeupEffect) -> Result<ProcessedFile, ImagingError> {
        self.transform(input, "makeup", DEFAULT_QUALITY, move |mut img| {
            makeup::apply_makeup(&mut img, &effect)?;
            Ok(img)
        })
        .await
    }

    pub async fn apply_multiple_makeup(
        &self,
        input: &Path,
        effects: Vec<MakeupEffect>,
    ) -> Result<ProcessedFile, ImagingError> {
        self.transform(input, "fullmakeup", DEFAULT_QUALITY, move |mut img| {
            makeup::apply_multiple_makeup(&mut img, &effects)?;
            Ok(img)
        })
        .await
    }

    /// Returns the output and the number of areas actually painted.
    pub async fn apply_area_makeup(
        &self,
        input: &Path,
        areas: Vec<AreaMakeup>,
        intensity: u8,
    ) -> Result<(ProcessedFile, usize), ImagingError> {
        self.run(input, "area_makeup", DEFAULT_QUALITY, move |mut img| {
            let painted = makeup::apply_area_makeup(&mut img, &areas, intensity)?;
            Ok((img, painted))
        })
        .await
    }

    /// Paint the product that belongs to `region` inside a percent box.
    pub async fn region_makeup(
        &self,
        input: &Path,
        region: MakeupRegion,
        bbox: BoundingBox,
        color: Rgb,
        intensity: u8,
    ) -> Result<ProcessedFile, ImagingError> {
        self.transform(input, "precision_makeup", DEFAULT_QUALITY, move |mut img| {
            let rect = bbox.to_pixels(img.width(), img.height());
            makeup::paint_product(&mut img, region.makeup_type(), color, intensity, rect)?;
            Ok(img)
        })
        .await
    }

    /* ---- Filter chains ---- */

    /// Returns the output and the branch that was applied.
    pub async fn age_progression(
        &self,
        input: &Path,
        current_age: u32,
        target_age: u32,
    ) -> Result<(ProcessedFile, AgeBranch), ImagingError> {
        let branch = AgeBranch::select(current_age, target_age);
        let chain = age::chain_for(branch);
        let file = self
            .transform(input, "aged", REMOTE_QUALITY, move |img| Ok(chain.apply(img)))
            .await?;
        Ok((file, branch))
    }

    pub async fn face_effect(
        &self,
        input: &Path,
        effect: &FaceEffect,
        intensity: u8,
    ) -> Result<ProcessedFile, ImagingError> {
        let chain = face_effects::chain_for(effect, intensity);
        self.transform(input, "faceapp_local", DEFAULT_QUALITY, move |img| Ok(chain.apply(img)))
            .await
    }

    pub async fn surgical_preview(
        &self,
        input: &Path,
        procedure: &Procedure,
        intensity: u8,
    ) -> Result<ProcessedFile, ImagingError> {
        let chain = surgical::chain_for(procedure, intensity);
        self.transform(input, "processed", DEFAULT_QUALITY, move |img| Ok(chain.apply(img)))
            .await
    }

    pub async fn beautify_nose(
        &self,
        input: &Path,
        style: NoseStyle,
        intensity: u8,
        preserve_natural: bool,
    ) -> Result<ProcessedFile, ImagingError> {
        let chain = nose::chain_for(style, intensity, preserve_natural);
        let prefix = format!("nose-beautified-{}", style.as_str());
        self.transform(input, &prefix, DEFAULT_QUALITY, move |img| Ok(chain.apply(img)))
            .await
    }

    /// Side-by-side strip of `before` (left) and `after` (right).
    pub async fn before_after(&self, before: &Path, after: &Path) -> Result<ProcessedFile, ImagingError> {
        let (before, after) = tokio::try_join!(tokio::fs::read(before), tokio::fs::read(after))?;
        let encoded = tokio::task::spawn_blocking(move || {
            let before = image::load_from_memory(&before)?.to_rgb8();
            let after = image::load_from_memory(&after)?.to_rgb8();
            encode_jpeg(&compare::side_by_side(&before, &after), DEFAULT_QUALITY)
        })
        .await
        .map_err(|e| ImagingError::Task(e.to_string()))??;
        self.write("nose-comparison", encoded).await
    }

    pub async fn color_match(&self, input: &Path, color: Rgb) -> Result<ProcessedFile, ImagingError> {
        self.transform(input, "color-match", DEFAULT_QUALITY, move |mut img| {
            makeup::color_match(&mut img, color)?;
            Ok(img)
        })
        .await
    }

    /* ---- Other ---- */

    pub async fn quality_report(&self, input: &Path) -> Result<QualityReport, ImagingError> {
        let bytes = tokio::fs::read(input).await?;
        tokio::task::spawn_blocking(move || {
            let img = image::load_from_memory(&bytes)?.to_rgb8();
            Ok::<_, ImagingError>(analysis::quality_report(&img))
        })
        .await
        .map_err(|e| ImagingError::Task(e.to_string()))?
    }

    /// Store an image produced elsewhere (e.g. a downloaded remote result),
    /// re-encoded as JPEG.
    pub async fn save_remote_image(&self, bytes: Vec<u8>, prefix: &str) -> Result<ProcessedFile, ImagingError> {
        let encoded = tokio::task::spawn_blocking(move || {
            let img = image::load_from_memory(&bytes)?.to_rgb8();
            encode_jpeg(&img, REMOTE_QUALITY)
        })
        .await
        .map_err(|e| ImagingError::Task(e.to_string()))??;
        self.write(prefix, encoded).await
    }

    /* ---- Plumbing ---- */

    async fn transform<F>(&self, input: &Path, prefix: &str, quality: u8, op: F) -> Result<ProcessedFile, ImagingError>
    where
        F: FnOnce(RgbImage) -> Result<RgbImage, ImagingError> + Send + 'static,
    {
        let (file, ()) = self
            .run(input, prefix, quality, move |img| Ok((op(img)?, ())))
            .await?;
        Ok(file)
    }

    async fn run<T, F>(
        &self,
        input: &Path,
        prefix: &str,
        quality: u8,
        op: F,
    ) -> Result<(ProcessedFile, T), ImagingError>
    where
        T: Send + 'static,
        F: FnOnce(RgbImage) -> Result<(RgbImage, T), ImagingError> + Send + 'static,
    {
        let bytes = tokio::fs::read(input).await?;
        let (encoded, extra) = tokio::task::spawn_blocking(move || {
            let img = image::load_from_memory(&bytes)?.to_rgb8();
            let (out, extra) = op(img)?;
            Ok::<_, ImagingError>((encode_jpeg(&out, quality)?, extra))
        })
        .await
        .map_err(|e| ImagingError::Task(e.to_string()))??;
        let file = self.write(prefix, encoded).await?;
        Ok((file, extra))
    }

    async fn write(&self, prefix: &str, encoded: Vec<u8>) -> Result<ProcessedFile, ImagingError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let file_name = output_file_name(prefix);
        let path = self.output_dir.join(&file_name);
        tokio::fs::write(&path, &encoded).await?;
        debug!(file = %file_name, bytes = encoded.len(), "wrote processed image");
        Ok(ProcessedFile { path, file_name })
    }
}

/// `<prefix>_<unix-millis>_<8 hex>.jpg`
pub fn output_file_name(prefix: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{prefix}_{}_{}.jpg",
        chrono::Utc::now().timestamp_millis(),
        &suffix[..8]
    )
}

fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>, ImagingError> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    img.write_with_encoder(encoder)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use image::{ImageFormat, Rgb as Px};
    use medvision_core::makeup::{MakeupType, Rect};

    use super::*;

    fn write_sample(dir: &Path) -> PathBuf {
        let path = dir.join("face.png");
        let img = RgbImage::from_fn(120, 90, |x, y| Px([(x * 2) as u8, (y * 2) as u8, 150]));
        img.save_with_format(&path, ImageFormat::Png).unwrap();
        path
    }

    #[test]
    fn output_names_are_unique_and_prefixed() {
        let a = output_file_name("makeup");
        let b = output_file_name("makeup");
        assert!(a.starts_with("makeup_"));
        assert!(a.ends_with(".jpg"));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn lipstick_writes_decodable_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_sample(dir.path());
        let engine = LocalFilterEngine::new(dir.path().join("out"));
        let effect = MakeupEffect {
            kind: MakeupType::Lipstick,
            color: "#FF6B6B".into(),
            intensity: 70,
            area: Rect::new(20, 20, 60, 30),
        };
        let file = engine.apply_makeup(&input, effect).await.unwrap();
        assert!(file.path.exists());
        assert!(file.url().starts_with("/uploads/makeup_"));
        let decoded = image::open(&file.path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (120, 90));
    }

    #[tokio::test]
    async fn age_progression_reports_branch() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_sample(dir.path());
        let engine = LocalFilterEngine::new(dir.path());
        let (older, branch) = engine.age_progression(&input, 25, 60).await.unwrap();
        assert_eq!(branch.name(), "aging");
        assert!(older.file_name.starts_with("aged_"));
        let (_, branch) = engine.age_progression(&input, 40, 20).await.unwrap();
        assert_eq!(branch.name(), "youth");
    }

    #[tokio::test]
    async fn nose_prefix_includes_style() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_sample(dir.path());
        let engine = LocalFilterEngine::new(dir.path());
        let file = engine
            .beautify_nose(&input, NoseStyle::Refinement, 60, true)
            .await
            .unwrap();
        assert!(file.file_name.starts_with("nose-beautified-refinement_"));
    }

    #[tokio::test]
    async fn comparison_keeps_original_size() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_sample(dir.path());
        let engine = LocalFilterEngine::new(dir.path().join("out"));
        let after = engine
            .beautify_nose(&input, NoseStyle::Narrowing, 80, false)
            .await
            .unwrap();
        let strip = engine.before_after(&input, &after.path).await.unwrap();
        assert!(strip.file_name.starts_with("nose-comparison_"));
        let decoded = image::open(&strip.path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (120, 90));
    }

    #[tokio::test]
    async fn missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let engine = LocalFilterEngine::new(dir.path());
        let err = engine
            .face_effect(&dir.path().join("nope.png"), &FaceEffect::Glow, 50)
            .await
            .unwrap_err();
        assert_matches!(err, ImagingError::Io(_));
    }

    #[tokio::test]
    async fn garbage_input_is_codec_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.png");
        std::fs::write(&input, b"definitely not an image").unwrap();
        let engine = LocalFilterEngine::new(dir.path());
        let err = engine
            .surgical_preview(&input, &Procedure::Dental, 50)
            .await
            .unwrap_err();
        assert_matches!(err, ImagingError::Codec(_));
    }

    #[tokio::test]
    async fn quality_report_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_sample(dir.path());
        let engine = LocalFilterEngine::new(dir.path());
        let report = engine.quality_report(&input).await.unwrap();
        assert_eq!(report.resolution.width, 120);
        assert!(report.quality_score <= 100);
    }

    #[tokio::test]
    async fn saves_remote_png_as_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let mut png = Vec::new();
        RgbImage::from_pixel(8, 8, Px([1, 2, 3]))
            .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        let engine = LocalFilterEngine::new(dir.path());
        let file = engine.save_remote_image(png, "faceapp").await.unwrap();
        assert_eq!(image::ImageFormat::from_path(&file.path).unwrap(), ImageFormat::Jpeg);
        assert!(image::open(&file.path).is_ok());
    }
}
