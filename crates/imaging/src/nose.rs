//! Nose beautification, used when a rhinoplasty preview cannot reach the
//! hosted model.

use medvision_core::effects::NoseStyle;

use crate::adjust::FilterChain;

pub fn chain_for(style: NoseStyle, intensity: u8, preserve_natural: bool) -> FilterChain {
    let i = f32::from(intensity.min(100));
    let f = i / 100.0;
    let styled = match style {
        NoseStyle::Refinement => FilterChain::new()
            .blur(f * 0.8)
            .sharpen((1.0 - f * 0.8).max(0.5))
            .modulate(1.0 + i / 500.0, 1.0 - i / 1000.0),
        NoseStyle::Narrowing => {
            let s = f * 0.3;
            FilterChain::new()
                .modulate(1.0 - s * 0.1, 1.0 + s * 0.2)
                .contrast(1.0 + i / 200.0)
                .sharpen(1.2)
        }
        NoseStyle::Straightening => {
            let cb = 1.0 + i / 300.0;
            FilterChain::new()
                .sharpen(f * 2.0)
                .modulate(1.0 + i / 1000.0, 1.05)
                .linear(cb, -(cb - 1.0) * 64.0)
        }
        NoseStyle::TipReshaping => FilterChain::new()
            .sharpen(f * 1.8)
            .modulate_hue(1.0 + f * 0.15, 1.1, 2),
        NoseStyle::BridgeAdjustment => FilterChain::new()
            .modulate_hue(1.0 + f * 0.2, 1.0 - f * 0.15, -1)
            .sharpen(1.5)
            .linear(1.1, -13.0),
    };
    if preserve_natural {
        styled
            .modulate(1.02, 1.05)
            .sharpen(0.8)
            .blur(0.3)
            .sharpen(1.0)
    } else {
        styled
    }
}
