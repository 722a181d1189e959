//! Tone and color adjustments, composed into ordered filter chains.
//!
//! Every adjustment maps an `RgbImage` to a new `RgbImage` of the same size.
//! Strength parameters follow the usual conventions: multipliers of `1.0`,
//! zero blur/sharpen sigmas and zero hue rotation are no-ops.

use image::{imageops, Rgb, RgbImage};
use medvision_core::color::Rgb as Color;

/// Rec. 709 luma weights.
const LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Blur sigmas below this are visually indistinguishable and skipped.
const MIN_BLUR_SIGMA: f32 = 0.1;

/// A single filter step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// Multiply brightness, scale saturation around luma, rotate hue (degrees).
    Modulate {
        brightness: f32,
        saturation: f32,
        hue: i32,
    },
    /// Power-law midtone lift: `out = in^(1/gamma)`.
    Gamma(f32),
    /// `out = a * in + b` per channel, in 8-bit units.
    Linear { a: f32, b: f32 },
    /// Stretch the 1st..99th luma percentiles to the full range.
    Normalize,
    Blur(f32),
    Sharpen(f32),
    /// Mix every pixel towards `color` by `amount` (`0.0..=1.0`).
    Tint { color: Color, amount: f32 },
}

impl Adjustment {
    pub fn apply(&self, img: RgbImage) -> RgbImage {
        match *self {
            Adjustment::Modulate {
                brightness,
                saturation,
                hue,
            } => modulate(img, brightness, saturation, hue),
            Adjustment::Gamma(g) => gamma(img, g),
            Adjustment::Linear { a, b } => linear(img, a, b),
            Adjustment::Normalize => normalize(img),
            Adjustment::Blur(sigma) => blur(img, sigma),
            Adjustment::Sharpen(sigma) => sharpen(img, sigma),
            Adjustment::Tint { color, amount } => tint(img, color, amount),
        }
    }
}

/// An ordered list of adjustments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    steps: Vec<Adjustment>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, step: Adjustment) -> Self {
        self.steps.push(step);
        self
    }

    pub fn modulate(self, brightness: f32, saturation: f32) -> Self {
        self.then(Adjustment::Modulate {
            brightness,
            saturation,
            hue: 0,
        })
    }

    pub fn modulate_hue(self, brightness: f32, saturation: f32, hue: i32) -> Self {
        self.then(Adjustment::Modulate {
            brightness,
            saturation,
            hue,
        })
    }

    pub fn gamma(self, g: f32) -> Self {
        self.then(Adjustment::Gamma(g))
    }

    pub fn linear(self, a: f32, b: f32) -> Self {
        self.then(Adjustment::Linear { a, b })
    }

    /// Contrast around mid-grey: `linear(a, -(a - 1) * 128)`.
    pub fn contrast(self, a: f32) -> Self {
        self.linear(a, -(a - 1.0) * 128.0)
    }

    pub fn normalize(self) -> Self {
        self.then(Adjustment::Normalize)
    }

    pub fn blur(self, sigma: f32) -> Self {
        self.then(Adjustment::Blur(sigma))
    }

    pub fn sharpen(self, sigma: f32) -> Self {
        self.then(Adjustment::Sharpen(sigma))
    }

    pub fn tint(self, color: Color, amount: f32) -> Self {
        self.then(Adjustment::Tint { color, amount })
    }

    /// Append every step of `other`.
    pub fn extend(mut self, other: FilterChain) -> Self {
        self.steps.extend(other.steps);
        self
    }

    pub fn steps(&self) -> &[Adjustment] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn apply(&self, img: RgbImage) -> RgbImage {
        self.steps.iter().fold(img, |acc, step| step.apply(acc))
    }
}

/* --------------------------------------------------------------------------
Pixel operations
-------------------------------------------------------------------------- */

fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn map_pixels(mut img: RgbImage, f: impl Fn([f32; 3]) -> [f32; 3]) -> RgbImage {
    for px in img.pixels_mut() {
        let out = f([f32::from(px[0]), f32::from(px[1]), f32::from(px[2])]);
        *px = Rgb([to_u8(out[0]), to_u8(out[1]), to_u8(out[2])]);
    }
    img
}

fn luma_of(c: [f32; 3]) -> f32 {
    c[0] * LUMA[0] + c[1] * LUMA[1] + c[2] * LUMA[2]
}

pub fn modulate(img: RgbImage, brightness: f32, saturation: f32, hue: i32) -> RgbImage {
    let brightness = brightness.max(0.0);
    let saturation = saturation.max(0.0);
    let img = if (brightness - 1.0).abs() < f32::EPSILON && (saturation - 1.0).abs() < f32::EPSILON {
        img
    } else {
        map_pixels(img, |c| {
            let y = luma_of(c);
            c.map(|v| (y + (v - y) * saturation) * brightness)
        })
    };
    if hue % 360 == 0 {
        img
    } else {
        imageops::huerotate(&img, hue)
    }
}

pub fn gamma(img: RgbImage, g: f32) -> RgbImage {
    if g <= 0.0 || (g - 1.0).abs() < f32::EPSILON {
        return img;
    }
    let inv = 1.0 / g;
    let lut: Vec<u8> = (0..=255u16)
        .map(|v| to_u8(255.0 * (f32::from(v) / 255.0).powf(inv)))
        .collect();
    let mut img = img;
    for px in img.pixels_mut() {
        for c in px.0.iter_mut() {
            *c = lut[usize::from(*c)];
        }
    }
    img
}

pub fn linear(img: RgbImage, a: f32, b: f32) -> RgbImage {
    map_pixels(img, |c| c.map(|v| a * v + b))
}

pub fn normalize(img: RgbImage) -> RgbImage {
    let total = u64::from(img.width()) * u64::from(img.height());
    if total == 0 {
        return img;
    }
    let mut hist = [0u64; 256];
    for px in img.pixels() {
        let y = luma_of([f32::from(px[0]), f32::from(px[1]), f32::from(px[2])]);
        hist[usize::from(to_u8(y))] += 1;
    }
    let percentile = |p: f64| -> f32 {
        let target = (total as f64 * p) as u64;
        let mut cumulative = 0u64;
        for (level, count) in hist.iter().enumerate() {
            cumulative += count;
            if cumulative > target {
                return level as f32;
            }
        }
        255.0
    };
    let lo = percentile(0.01);
    let hi = percentile(0.99);
    if hi - lo < 1.0 {
        return img;
    }
    let scale = 255.0 / (hi - lo);
    map_pixels(img, |c| c.map(|v| (v - lo) * scale))
}

pub fn blur(img: RgbImage, sigma: f32) -> RgbImage {
    if sigma < MIN_BLUR_SIGMA {
        return img;
    }
    imageops::blur(&img, sigma)
}

pub fn sharpen(img: RgbImage, sigma: f32) -> RgbImage {
    if sigma <= 0.0 {
        return img;
    }
    imageops::unsharpen(&img, sigma, 0)
}

pub fn tint(img: RgbImage, color: Color, amount: f32) -> RgbImage {
    let amount = amount.clamp(0.0, 1.0);
    if amount == 0.0 {
        return img;
    }
    let t = [f32::from(color.r), f32::from(color.g), f32::from(color.b)];
    map_pixels(img, |c| [0, 1, 2].map(|i| c[i] * (1.0 - amount) + t[i] * amount))
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
