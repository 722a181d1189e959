//! Local FaceApp-style effects.
//!
//! Each effect is a short filter chain whose strengths scale with intensity
//! `i` in `0..=100`. Above [`FINISH_THRESHOLD`] a gamma lift and a
//! normalize pass are appended.

use medvision_core::color::Rgb;
use medvision_core::effects::FaceEffect;

use crate::adjust::FilterChain;

/// Intensities above this get the gamma + normalize finishing pass.
pub const FINISH_THRESHOLD: u8 = 30;

const WARM_TINT: Rgb = Rgb::new(255, 200, 170);

pub fn chain_for(effect: &FaceEffect, intensity: u8) -> FilterChain {
    let i = f32::from(intensity.min(100));
    let chain = match effect {
        FaceEffect::Beauty | FaceEffect::Smooth => {
            FilterChain::new().blur((i / 50.0).max(1.0)).sharpen(1.0 + i / 100.0)
        }
        FaceEffect::Glow | FaceEffect::Smile | FaceEffect::Laugh => {
            FilterChain::new().modulate(1.0 + i / 200.0, 1.0 + i / 300.0)
        }
        FaceEffect::Young => FilterChain::new()
            .modulate(1.0 + i / 150.0, 1.0 + i / 200.0)
            .blur(i / 100.0),
        FaceEffect::Old => FilterChain::new()
            .modulate(1.0 - i / 300.0, 1.0 - i / 200.0)
            .linear(1.0 + i / 100.0, -(i / 10.0)),
        FaceEffect::Makeup => FilterChain::new()
            .modulate(1.0 + i / 400.0, 1.0 + i / 150.0)
            .linear(1.0 + i / 200.0, 0.0),
        FaceEffect::Male => FilterChain::new()
            .contrast(1.0 + i / 250.0)
            .modulate(1.0, 1.0 - i / 400.0)
            .sharpen(1.0 + i / 100.0),
        FaceEffect::Female => FilterChain::new()
            .blur((i / 80.0).max(0.5))
            .modulate(1.0 + i / 300.0, 1.0)
            .tint(WARM_TINT, i / 1000.0),
        _ => FilterChain::new().modulate(1.0 + i / 300.0, 1.0 + i / 400.0),
    };
    if intensity > FINISH_THRESHOLD {
        chain.gamma(1.0 + i / 500.0).normalize()
    } else {
        chain
    }
}
