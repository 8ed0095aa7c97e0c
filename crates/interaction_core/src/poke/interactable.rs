//! Poke targets

use super::PokeSurface;
use crate::config::PokeConfig;
use crate::error::{ensure_positive, InteractionError};
use crate::foundation::math::Pose;
use crate::interaction::{InteractableData, InteractableRegistry, InteractionWorld};
use crate::physics::BoundingSphere;

/// Payload of a pokeable interactable
///
/// Distances and drag thresholds start from [`PokeConfig`] and can be
/// tuned per surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PokeInteractable {
    /// Touchable rectangle
    pub surface: PokeSurface,
    /// Hover range from the surface
    pub max_distance: f32,
    /// While dragging, release once farther than this from the surface
    pub release_distance: f32,
    /// Planar drift along local X that starts a drag
    pub drag_threshold_horizontal: f32,
    /// Planar drift along local Y that starts a drag
    pub drag_threshold_vertical: f32,
    /// Seconds the pinned touch point takes to catch up after a drag starts
    pub drag_ease_time: f32,
}

impl PokeInteractable {
    /// Poke target using the configured thresholds
    pub fn new(surface: PokeSurface, config: &PokeConfig) -> Result<Self, InteractionError> {
        config.validate()?;
        Ok(Self {
            surface,
            max_distance: config.max_distance,
            release_distance: config.release_distance,
            drag_threshold_horizontal: config.drag_threshold_horizontal,
            drag_threshold_vertical: config.drag_threshold_vertical,
            drag_ease_time: config.drag_ease_time,
        })
    }

    /// Override the hover range
    pub fn with_max_distance(mut self, max_distance: f32) -> Result<Self, InteractionError> {
        ensure_positive("poke.max_distance", max_distance)?;
        self.max_distance = max_distance;
        Ok(self)
    }
}

impl InteractableData for PokeInteractable {
    fn registry(world: &InteractionWorld) -> &InteractableRegistry<Self> {
        &world.poke
    }

    fn registry_mut(world: &mut InteractionWorld) -> &mut InteractableRegistry<Self> {
        &mut world.poke
    }

    fn bounds(&self, pose: &Pose) -> Option<BoundingSphere> {
        Some(BoundingSphere::new(
            pose.position,
            self.surface.bounding_radius() + self.max_distance,
        ))
    }
}
