//! Candidate filters
//!
//! Filters are consulted by modalities during their candidate search; a
//! candidate must pass every filter in the chain.

use std::fmt;

use super::interactable::Interactable;
use crate::physics::InteractionLayers;

/// Predicate an interactable must satisfy to be considered
pub trait InteractableFilter<D> {
    /// Whether `interactable` passes
    fn filter(&self, interactable: &Interactable<D>) -> bool;
}

impl<D, F: Fn(&Interactable<D>) -> bool> InteractableFilter<D> for F {
    fn filter(&self, interactable: &Interactable<D>) -> bool {
        self(interactable)
    }
}

/// Passes interactables sharing at least one layer bit with the mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerMaskFilter {
    /// Accepted layers
    pub mask: u32,
}

impl LayerMaskFilter {
    /// Filter on the given mask
    pub fn new(mask: u32) -> Self {
        Self { mask }
    }
}

impl<D> InteractableFilter<D> for LayerMaskFilter {
    fn filter(&self, interactable: &Interactable<D>) -> bool {
        InteractionLayers::matches(interactable.layers(), self.mask)
    }
}

/// Logical AND over a list of filters; an empty chain passes everything
pub struct FilterChain<D> {
    filters: Vec<Box<dyn InteractableFilter<D>>>,
}

impl<D> FilterChain<D> {
    /// Create an empty chain
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Append a filter
    pub fn push(&mut self, filter: impl InteractableFilter<D> + 'static) {
        self.filters.push(Box::new(filter));
    }

    /// Remove every filter
    pub fn clear(&mut self) {
        self.filters.clear();
    }

    /// Number of filters
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether the chain has no filters
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Whether `interactable` passes every filter
    pub fn is_passed_by(&self, interactable: &Interactable<D>) -> bool {
        self.filters.iter().all(|filter| filter.filter(interactable))
    }
}

impl<D> Default for FilterChain<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> fmt::Debug for FilterChain<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.filters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::IdPool;
    use crate::foundation::math::Pose;

    fn tagged(layers: u32, tag: u8) -> Interactable<u8> {
        let mut pool = IdPool::new();
        let mut interactable = Interactable::new(pool.allocate(), Pose::identity(), tag);
        interactable.set_layers(layers);
        interactable
    }

    #[test]
    fn test_chain_is_logical_and() {
        let mut chain = FilterChain::new();
        assert!(chain.is_passed_by(&tagged(InteractionLayers::UI, 1)));

        chain.push(LayerMaskFilter::new(InteractionLayers::UI | InteractionLayers::TOOL));
        chain.push(|interactable: &Interactable<u8>| *interactable.data() > 0);

        assert!(chain.is_passed_by(&tagged(InteractionLayers::UI, 1)));
        assert!(!chain.is_passed_by(&tagged(InteractionLayers::UI, 0)));
        assert!(!chain.is_passed_by(&tagged(InteractionLayers::DISTANT, 1)));
    }
}
