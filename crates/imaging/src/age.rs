//! Local age progression.

use medvision_core::effects::AgeBranch;

use crate::adjust::FilterChain;

/// Filter chain for an age branch. [`AgeBranch::Unchanged`] is empty.
pub fn chain_for(branch: AgeBranch) -> FilterChain {
    match branch {
        AgeBranch::Aging {
            blur,
            brightness,
            saturation,
            sharpen,
        } => FilterChain::new()
            .blur(blur)
            .modulate(brightness, saturation)
            .sharpen(sharpen),
        AgeBranch::Youth {
            brightness,
            saturation,
            sharpen,
        } => FilterChain::new().modulate(brightness, saturation).sharpen(sharpen),
        AgeBranch::Unchanged => FilterChain::new(),
    }
}
