//! SVG overlay rasterization via `resvg`.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::ImagingError;

/// Render an SVG document to straight-alpha RGBA at its intrinsic size.
pub fn render_svg(svg: &str) -> Result<RgbaImage, ImagingError> {
    let tree = Tree::from_str(svg, &Options::default())
        .map_err(|e| ImagingError::Overlay(format!("invalid SVG: {e}")))?;
    let size = tree.size().to_int_size();
    let mut pixmap = Pixmap::new(size.width(), size.height())
        .ok_or_else(|| ImagingError::Overlay("zero-sized overlay".to_string()))?;
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

    let (width, height) = (pixmap.width(), pixmap.height());
    let mut out = RgbaImage::new(width, height);
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        // tiny-skia stores premultiplied alpha.
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(out)
}
