//! Local surgical outcome preview.

use medvision_core::effects::Procedure;

use crate::adjust::FilterChain;

/// Base sharpen + modulate, then the procedure-specific steps. `f` is
/// intensity as a fraction.
pub fn chain_for(procedure: &Procedure, intensity: u8) -> FilterChain {
    let f = f32::from(intensity.min(100)) / 100.0;
    let base = FilterChain::new().sharpen(0.5).modulate(1.05, 1.1);
    let specific = match procedure {
        Procedure::Rhinoplasty | Procedure::NoseSurgery => FilterChain::new()
            .gamma(1.05 + f * 0.05)
            .modulate(1.02, 1.05)
            .sharpen(1.2),
        Procedure::Dental => FilterChain::new()
            .modulate_hue(1.05 + f * 0.1, 0.95, 5)
            .gamma(1.1)
            .sharpen(1.0),
        Procedure::Facelift => FilterChain::new()
            .gamma(1.08 + f * 0.07)
            .modulate(1.03, 1.08)
            .blur(0.5)
            .sharpen(1.8),
        Procedure::ScarRemoval => FilterChain::new()
            .blur(0.8 + f * 0.5)
            .sharpen(0.8)
            .modulate(1.02, 1.03),
        Procedure::General(_) => FilterChain::new()
            .gamma(1.1 + f * 0.1)
            .modulate(1.0 + f * 0.1, 1.0 + f * 0.15)
            .blur(0.3)
            .sharpen(1.5),
    };
    base.extend(specific)
}

#[cfg(test)]
mod tests {
    use crate::adjust::Adjustment;

    use super::*;

    #[test]
    fn every_chain_starts_with_the_base_pass() {
        for p in [
            Procedure::Rhinoplasty,
            Procedure::Dental,
            Procedure::Facelift,
            Procedure::ScarRemoval,
            Procedure::General("brow_lift".into()),
        ] {
            let chain = chain_for(&p, 50);
            assert_eq!(chain.steps()[0], Adjustment::Sharpen(0.5), "{p:?}");
        }
    }

    #[test]
    fn dental_rotates_hue() {
        let chain = chain_for(&Procedure::Dental, 100);
        assert!(chain
            .steps()
            .iter()
            .any(|s| matches!(s, Adjustment::Modulate { hue: 5, .. })));
    }

    #[test]
    fn scar_removal_blur_scales_with_intensity() {
        let low = chain_for(&Procedure::ScarRemoval, 0);
        let high = chain_for(&Procedure::ScarRemoval, 100);
        assert_eq!(low.steps()[2], Adjustment::Blur(0.8));
        assert!(matches!(high.steps()[2], Adjustment::Blur(s) if (s - 1.3).abs() < 1e-5));
    }
}
