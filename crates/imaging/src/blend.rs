//! Compositing of RGBA overlays onto an opaque photo.
//!
//! Each blend mode is a per-channel function of the base and overlay colors
//! in `0.0..=1.0`; the result is then mixed with the base by the overlay's
//! alpha, so fully transparent overlay pixels leave the photo untouched.

use image::{Rgb, RgbImage, RgbaImage};
use medvision_core::makeup::BlendMode;

/// Blend one channel pair. `b` is the photo, `o` the overlay.
pub fn blend_channel(mode: BlendMode, b: f32, o: f32) -> f32 {
    match mode {
        BlendMode::Normal => o,
        BlendMode::Multiply => b * o,
        BlendMode::Screen => 1.0 - (1.0 - b) * (1.0 - o),
        BlendMode::Overlay => {
            if b < 0.5 {
                2.0 * b * o
            } else {
                1.0 - 2.0 * (1.0 - b) * (1.0 - o)
            }
        }
        BlendMode::SoftLight => {
            if o <= 0.5 {
                b - (1.0 - 2.0 * o) * b * (1.0 - b)
            } else {
                let d = if b <= 0.25 {
                    ((16.0 * b - 12.0) * b + 4.0) * b
                } else {
                    b.sqrt()
                };
                b + (2.0 * o - 1.0) * (d - b)
            }
        }
        BlendMode::Darken => b.min(o),
        BlendMode::Lighten => b.max(o),
    }
}

/// Composite `overlay` onto `base` with its top-left corner at (`x`, `y`).
///
/// Parts of the overlay outside the base are clipped.
pub fn composite(base: &mut RgbImage, overlay: &RgbaImage, x: i64, y: i64, mode: BlendMode) {
    let (bw, bh) = (i64::from(base.width()), i64::from(base.height()));
    for (ox, oy, src) in overlay.enumerate_pixels() {
        let alpha = f32::from(src[3]) / 255.0;
        if alpha == 0.0 {
            continue;
        }
        let (tx, ty) = (x + i64::from(ox), y + i64::from(oy));
        if tx < 0 || ty < 0 || tx >= bw || ty >= bh {
            continue;
        }
        let dst = base.get_pixel_mut(tx as u32, ty as u32);
        let mut out = [0u8; 3];
        for i in 0..3 {
            let b = f32::from(dst[i]) / 255.0;
            let o = f32::from(src[i]) / 255.0;
            let mixed = blend_channel(mode, b, o) * alpha + b * (1.0 - alpha);
            out[i] = (mixed * 255.0).round().clamp(0.0, 255.0) as u8;
        }
        *dst = Rgb(out);
    }
}
