//! Before/after comparison strips.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

/// Place `before` and `after` side by side, each squeezed to half of
/// `before`'s width, on a white canvas the size of `before`.
pub fn side_by_side(before: &RgbImage, after: &RgbImage) -> RgbImage {
    let half = (before.width() / 2).max(1);
    let height = before.height().max(1);

    let left = imageops::resize(before, half, height, FilterType::Triangle);
    let right = imageops::resize(after, half, height, FilterType::Triangle);

    let mut canvas = RgbImage::from_pixel(half * 2, height, Rgb([255, 255, 255]));
    imageops::replace(&mut canvas, &left, 0, 0);
    imageops::replace(&mut canvas, &right, i64::from(half), 0);
    canvas
}
