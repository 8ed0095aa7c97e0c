//! The interaction world: id pool plus one registry per modality
//!
//! Several worlds can coexist; nothing in the crate is global.

use super::interactable::{Interactable, InteractableData, InteractableKey, InteractableLimits};
use super::registry::InteractableRegistry;
use crate::error::InteractionError;
use crate::foundation::collections::{IdPool, UniqueId};
use crate::foundation::math::Pose;
use crate::grab::GrabInteractable;
use crate::hand_grab::HandGrabInteractable;
use crate::poke::PokeInteractable;

/// Arena owning every interactable of an interaction space
#[derive(Debug, Default)]
pub struct InteractionWorld {
    ids: IdPool,
    pub(crate) grab: InteractableRegistry<GrabInteractable>,
    pub(crate) hand_grab: InteractableRegistry<HandGrabInteractable>,
    pub(crate) poke: InteractableRegistry<PokeInteractable>,
}

impl InteractionWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw an id from the shared pool
    pub fn allocate_id(&mut self) -> UniqueId {
        self.ids.allocate()
    }

    /// Return an id to the shared pool
    pub fn release_id(&mut self, id: UniqueId) {
        self.ids.release(id);
    }

    /// Number of live interactors and interactables
    pub fn live_ids(&self) -> usize {
        self.ids.live_count()
    }

    /// Add an interactable without capacity limits
    pub fn spawn<D: InteractableData>(&mut self, pose: Pose, data: D) -> InteractableKey {
        let interactable = Interactable::new(self.ids.allocate(), pose, data);
        log::trace!("spawned interactable {}", interactable.id());
        D::registry_mut(self).insert(interactable)
    }

    /// Add an interactable with capacity limits
    pub fn spawn_with_limits<D: InteractableData>(
        &mut self,
        pose: Pose,
        data: D,
        limits: InteractableLimits,
    ) -> Result<InteractableKey, InteractionError> {
        limits.validate()?;
        let mut interactable = Interactable::new(self.ids.allocate(), pose, data);
        interactable.set_limits(limits)?;
        Ok(D::registry_mut(self).insert(interactable))
    }

    /// Destroy an interactable and release its id
    ///
    /// Interactors still holding it unset themselves on their next tick.
    pub fn despawn<D: InteractableData>(&mut self, key: InteractableKey) -> Option<Interactable<D>> {
        let removed = D::registry_mut(self).remove(key)?;
        log::debug!(
            "despawned interactable {} with {} hovering, {} selecting",
            removed.id(),
            removed.interactors_count(),
            removed.selecting_interactors_count()
        );
        self.ids.release(removed.id());
        Some(removed)
    }

    /// Look up an interactable
    pub fn interactable<D: InteractableData>(&self, key: InteractableKey) -> Option<&Interactable<D>> {
        D::registry(self).get(key)
    }

    /// Look up an interactable mutably
    pub fn interactable_mut<D: InteractableData>(
        &mut self,
        key: InteractableKey,
    ) -> Option<&mut Interactable<D>> {
        D::registry_mut(self).get_mut(key)
    }

    /// Registry of one data type
    pub fn registry<D: InteractableData>(&self) -> &InteractableRegistry<D> {
        D::registry(self)
    }

    /// Mutable registry of one data type
    pub fn registry_mut<D: InteractableData>(&mut self) -> &mut InteractableRegistry<D> {
        D::registry_mut(self)
    }
}
