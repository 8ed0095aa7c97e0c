//! Grab targets: a set of model-space colliders

use crate::error::InteractionError;
use crate::foundation::math::Pose;
use crate::interaction::{InteractableData, InteractableRegistry, InteractionWorld};
use crate::physics::{BoundingSphere, ColliderShape, WorldCollider};

/// Payload of a grabbable interactable
#[derive(Debug, Clone, PartialEq)]
pub struct GrabInteractable {
    colliders: Vec<ColliderShape>,
}

impl GrabInteractable {
    /// Grab target made of `colliders`; at least one is required
    pub fn new(colliders: Vec<ColliderShape>) -> Result<Self, InteractionError> {
        if colliders.is_empty() {
            log::warn!("rejected grab interactable without colliders");
            return Err(InteractionError::NoColliders);
        }
        Ok(Self { colliders })
    }

    /// Single-sphere grab target
    pub fn sphere(radius: f32) -> Result<Self, InteractionError> {
        Self::new(vec![ColliderShape::sphere(radius)?])
    }

    /// Model-space colliders
    pub fn colliders(&self) -> &[ColliderShape] {
        &self.colliders
    }

    /// Colliders placed at `pose`
    pub fn world_colliders<'a>(&'a self, pose: &'a Pose) -> impl Iterator<Item = WorldCollider> + 'a {
        self.colliders.iter().map(move |shape| shape.to_world_space(pose))
    }
}

impl InteractableData for GrabInteractable {
    fn registry(world: &InteractionWorld) -> &InteractableRegistry<Self> {
        &world.grab
    }

    fn registry_mut(world: &mut InteractionWorld) -> &mut InteractableRegistry<Self> {
        &mut world.grab
    }

    fn bounds(&self, pose: &Pose) -> Option<BoundingSphere> {
        let radius = self
            .colliders
            .iter()
            .map(ColliderShape::local_bounding_radius)
            .fold(0.0_f32, f32::max);
        Some(BoundingSphere::new(pose.position, radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_requires_colliders() {
        assert_eq!(GrabInteractable::new(Vec::new()), Err(InteractionError::NoColliders));
        assert!(GrabInteractable::sphere(-1.0).is_err());
    }

    #[test]
    fn test_bounds_cover_offset_colliders() {
        let shape = ColliderShape::sphere(0.1).unwrap().with_center(Vec3::new(0.5, 0.0, 0.0));
        let grab = GrabInteractable::new(vec![shape]).unwrap();
        let bounds = grab.bounds(&Pose::identity()).unwrap();
        assert!((bounds.radius - 0.6).abs() < 1e-6);

        let placed: Vec<_> = grab
            .world_colliders(&Pose::from_position(Vec3::new(1.0, 0.0, 0.0)))
            .collect();
        assert!((placed[0].bounds_center() - Vec3::new(1.5, 0.0, 0.0)).magnitude() < 1e-6);
    }
}
