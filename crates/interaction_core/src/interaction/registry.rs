//! Per-modality interactable storage
//!
//! Listing order is insertion order, so candidate searches that keep the
//! first of equal scores are reproducible.

use super::interactable::{Interactable, InteractableData, InteractableKey};
use crate::foundation::collections::SlotMap;
use crate::foundation::math::Vec3;

/// Interactables of one data type
#[derive(Debug)]
pub struct InteractableRegistry<D> {
    entries: SlotMap<InteractableKey, Interactable<D>>,
    order: Vec<InteractableKey>,
}

impl<D> Default for InteractableRegistry<D> {
    fn default() -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: Vec::new(),
        }
    }
}

impl<D> InteractableRegistry<D> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an interactable, returning its key
    pub fn insert(&mut self, interactable: Interactable<D>) -> InteractableKey {
        let key = self.entries.insert(interactable);
        self.order.push(key);
        key
    }

    /// Remove an interactable; stale keys return `None`
    pub fn remove(&mut self, key: InteractableKey) -> Option<Interactable<D>> {
        let removed = self.entries.remove(key)?;
        self.order.retain(|&listed| listed != key);
        Some(removed)
    }

    /// Look up an interactable
    pub fn get(&self, key: InteractableKey) -> Option<&Interactable<D>> {
        self.entries.get(key)
    }

    /// Look up an interactable mutably
    pub fn get_mut(&mut self, key: InteractableKey) -> Option<&mut Interactable<D>> {
        self.entries.get_mut(key)
    }

    /// Whether `key` names a live interactable
    pub fn contains(&self, key: InteractableKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of interactables
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Every interactable, in insertion order
    pub fn list(&self) -> impl Iterator<Item = (InteractableKey, &Interactable<D>)> + '_ {
        self.order
            .iter()
            .filter_map(|&key| self.entries.get(key).map(|entry| (key, entry)))
    }
}

impl<D: InteractableData> InteractableRegistry<D> {
    /// Interactables whose bounds come within `radius` of `point`
    ///
    /// Interactables without bounds are always listed.
    pub fn list_within(
        &self,
        point: Vec3,
        radius: f32,
    ) -> impl Iterator<Item = (InteractableKey, &Interactable<D>)> + '_ {
        self.list().filter(move |(_, entry)| {
            entry
                .data()
                .bounds(entry.pose())
                .map_or(true, |bounds| (bounds.center - point).magnitude() <= bounds.radius + radius)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::IdPool;
    use crate::foundation::math::Pose;
    use crate::interaction::world::InteractionWorld;
    use crate::physics::BoundingSphere;

    struct Ball(f32);

    impl InteractableData for Ball {
        fn registry(_world: &InteractionWorld) -> &InteractableRegistry<Self> {
            unreachable!("registry tests store balls directly")
        }

        fn registry_mut(_world: &mut InteractionWorld) -> &mut InteractableRegistry<Self> {
            unreachable!("registry tests store balls directly")
        }

        fn bounds(&self, pose: &Pose) -> Option<BoundingSphere> {
            Some(BoundingSphere::new(pose.position, self.0))
        }
    }

    fn ball_at(pool: &mut IdPool, x: f32) -> Interactable<Ball> {
        Interactable::new(
            pool.allocate(),
            Pose::from_position(Vec3::new(x, 0.0, 0.0)),
            Ball(0.1),
        )
    }

    #[test]
    fn test_list_keeps_insertion_order_after_reuse() {
        let mut pool = IdPool::new();
        let mut registry = InteractableRegistry::new();
        let a = registry.insert(ball_at(&mut pool, 0.0));
        let b = registry.insert(ball_at(&mut pool, 1.0));
        registry.remove(a);
        let c = registry.insert(ball_at(&mut pool, 2.0));

        let keys: Vec<_> = registry.list().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![b, c]);
        assert!(registry.get(a).is_none());
        assert!(registry.remove(a).is_none());
    }

    #[test]
    fn test_list_within_uses_bounds() {
        let mut pool = IdPool::new();
        let mut registry = InteractableRegistry::new();
        let near = registry.insert(ball_at(&mut pool, 0.2));
        registry.insert(ball_at(&mut pool, 2.0));

        let keys: Vec<_> = registry
            .list_within(Vec3::zeros(), 0.15)
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec![near]);
    }
}
