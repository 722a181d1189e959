//! Makeup overlays: render the product SVG for a box and composite it.

use image::RgbImage;
use medvision_core::color::{hex_to_rgb_or, intensity_to_alpha, Rgb, DEFAULT_AREA_COLOR, DEFAULT_REQUEST_RGB};
use medvision_core::makeup::{
    base_alpha, blend_for, AreaKind, AreaMakeup, BlendMode, MakeupEffect, MakeupType, Rect,
};
use medvision_core::overlay;
use tracing::debug;

use crate::blend::composite;
use crate::error::ImagingError;
use crate::raster::render_svg;

/// Paint one product over `effect.area`. Areas entirely outside the image
/// are a no-op.
pub fn apply_makeup(img: &mut RgbImage, effect: &MakeupEffect) -> Result<(), ImagingError> {
    let color = hex_to_rgb_or(&effect.color, DEFAULT_REQUEST_RGB);
    paint_product(img, effect.kind, color, effect.intensity, effect.area)
}

/// Paint `kind` at `intensity` into `area`.
pub fn paint_product(
    img: &mut RgbImage,
    kind: MakeupType,
    color: Rgb,
    intensity: u8,
    area: Rect,
) -> Result<(), ImagingError> {
    let Some(rect) = area.clip_to(img.width(), img.height()) else {
        debug!(?area, "makeup area outside image, skipped");
        return Ok(());
    };
    let alpha = intensity_to_alpha(intensity, base_alpha(kind));
    let svg = overlay::makeup_overlay(kind, rect.width, rect.height, color, alpha);
    let layer = render_svg(&svg)?;
    composite(img, &layer, i64::from(rect.x), i64::from(rect.y), blend_for(kind));
    Ok(())
}

/// Apply every effect in order; later products paint over earlier ones.
pub fn apply_multiple_makeup(img: &mut RgbImage, effects: &[MakeupEffect]) -> Result<(), ImagingError> {
    for effect in effects {
        apply_makeup(img, effect)?;
    }
    Ok(())
}

/// Area makeup. Unknown area types are skipped; returns how many areas
/// were painted.
pub fn apply_area_makeup(img: &mut RgbImage, areas: &[AreaMakeup], intensity: u8) -> Result<usize, ImagingError> {
    let mut painted = 0;
    for area in areas {
        if area.kind == AreaKind::Unknown {
            continue;
        }
        let Some(rect) = area.rect().clip_to(img.width(), img.height()) else {
            continue;
        };
        let color = hex_to_rgb_or(&area.color, DEFAULT_AREA_COLOR);
        let Some(svg) = overlay::area_shape(area.kind, rect.width, rect.height, color, area.kind.opacity(intensity))
        else {
            continue;
        };
        let layer = render_svg(&svg)?;
        composite(img, &layer, i64::from(rect.x), i64::from(rect.y), area.kind.blend());
        painted += 1;
    }
    Ok(painted)
}

/// Side of the square swatch painted by [`color_match`], anchored top-left.
pub const COLOR_MATCH_SIZE: u32 = 100;
/// 40 % opacity.
const COLOR_MATCH_ALPHA: u8 = 102;

/// Multiply a flat `color` swatch over the top-left corner.
pub fn color_match(img: &mut RgbImage, color: Rgb) -> Result<(), ImagingError> {
    let swatch = Rect::new(0, 0, COLOR_MATCH_SIZE, COLOR_MATCH_SIZE);
    let Some(rect) = swatch.clip_to(img.width(), img.height()) else {
        return Ok(());
    };
    let svg = overlay::flat_fill(rect.width, rect.height, color, COLOR_MATCH_ALPHA);
    let layer = render_svg(&svg)?;
    composite(img, &layer, 0, 0, BlendMode::Multiply);
    Ok(())
}
