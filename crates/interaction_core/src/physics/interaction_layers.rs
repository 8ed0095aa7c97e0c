//! Interaction layer bits for filtering candidates
//!
//! Interactables carry layer bits; interactors carry a mask of the layers
//! they may target.

/// Interaction layer definitions
pub struct InteractionLayers;

impl InteractionLayers {
    /// No layer
    pub const NONE: u32 = 0;

    /// All layers
    pub const ALL: u32 = 0xFFFF_FFFF;

    /// Default layer for world objects
    pub const DEFAULT: u32 = 1 << 0;

    /// User interface panels and buttons
    pub const UI: u32 = 1 << 1;

    /// Tools and held props
    pub const TOOL: u32 = 1 << 2;

    /// Objects only reachable by distant interaction
    pub const DISTANT: u32 = 1 << 3;

    /// Whether an interactable on `layer` can be targeted through `mask`
    pub fn matches(layer: u32, mask: u32) -> bool {
        (layer & mask) != 0
    }

    /// Helper to create a mask from multiple layers
    pub fn mask(layers: &[u32]) -> u32 {
        layers.iter().fold(0, |acc, &layer| acc | layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_matching() {
        let mask = InteractionLayers::mask(&[InteractionLayers::UI, InteractionLayers::TOOL]);
        assert!(InteractionLayers::matches(InteractionLayers::UI, mask));
        assert!(!InteractionLayers::matches(InteractionLayers::DEFAULT, mask));
        assert!(!InteractionLayers::matches(InteractionLayers::UI, InteractionLayers::NONE));
    }
}
