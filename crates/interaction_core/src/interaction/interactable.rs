//! Interactables: targets with capacity limits and membership bookkeeping
//!
//! An interactable owns two ordered id sets, the interactors hovering it
//! and the interactors selecting it. Only its own methods mutate them,
//! and every method is idempotent: repeating an add or remove changes
//! nothing and notifies nobody. The [`InteractableState`] is derived from
//! the sets and reported only when it actually changes.

use serde::{Deserialize, Serialize};

use super::registry::InteractableRegistry;
use super::state::{InteractableState, StateChange};
use super::world::InteractionWorld;
use crate::error::InteractionError;
use crate::events::Signal;
use crate::foundation::collections::{new_key_type, UniqueId};
use crate::foundation::math::Pose;
use crate::physics::{BoundingSphere, InteractionLayers};

new_key_type! {
    /// Generational handle to an interactable inside its registry
    pub struct InteractableKey;
}

/// Capacity limits; `None` means unlimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractableLimits {
    /// Maximum hovering interactors
    pub max_interactors: Option<usize>,
    /// Maximum selecting interactors
    pub max_selecting_interactors: Option<usize>,
    /// When full, a new selector evicts the oldest one instead of being refused
    pub transfer_on_second_selection: bool,
}

impl InteractableLimits {
    /// Limit selection to a single interactor
    pub fn single_selection() -> Self {
        Self {
            max_selecting_interactors: Some(1),
            ..Self::default()
        }
    }

    /// Validate the limits
    pub fn validate(&self) -> Result<(), InteractionError> {
        if self.max_interactors == Some(0) {
            return Err(InteractionError::ZeroCapacity("max_interactors"));
        }
        if self.max_selecting_interactors == Some(0) {
            return Err(InteractionError::ZeroCapacity("max_selecting_interactors"));
        }
        Ok(())
    }
}

/// Modality-specific payload of an interactable
///
/// Each data type has exactly one registry in the world, found through
/// [`registry`](Self::registry).
pub trait InteractableData: Sized + 'static {
    /// The registry holding interactables of this type
    fn registry(world: &InteractionWorld) -> &InteractableRegistry<Self>;

    /// Mutable access to the registry holding interactables of this type
    fn registry_mut(world: &mut InteractionWorld) -> &mut InteractableRegistry<Self>;

    /// World-space bounds at `pose`, used for proximity listing
    fn bounds(&self, _pose: &Pose) -> Option<BoundingSphere> {
        None
    }
}

/// A targetable object of one modality
#[derive(Debug)]
pub struct Interactable<D> {
    id: UniqueId,
    pose: Pose,
    layers: u32,
    limits: InteractableLimits,
    enabled: bool,
    state: InteractableState,
    interactors: Vec<UniqueId>,
    selecting_interactors: Vec<UniqueId>,
    data: D,
    when_state_changed: Signal<StateChange<InteractableState>>,
    when_interactors_count_updated: Signal<usize>,
    when_selecting_interactors_count_updated: Signal<usize>,
}

impl<D> Interactable<D> {
    pub(crate) fn new(id: UniqueId, pose: Pose, data: D) -> Self {
        Self {
            id,
            pose,
            layers: InteractionLayers::DEFAULT,
            limits: InteractableLimits::default(),
            enabled: true,
            state: InteractableState::Normal,
            interactors: Vec::new(),
            selecting_interactors: Vec::new(),
            data,
            when_state_changed: Signal::new(),
            when_interactors_count_updated: Signal::new(),
            when_selecting_interactors_count_updated: Signal::new(),
        }
    }

    /// Identifier from the world's id pool
    pub fn id(&self) -> UniqueId {
        self.id
    }

    /// World pose
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Move the interactable
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Modality payload
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Mutable modality payload
    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    /// Interaction layer bits
    pub fn layers(&self) -> u32 {
        self.layers
    }

    /// Replace the interaction layer bits
    pub fn set_layers(&mut self, layers: u32) {
        self.layers = layers;
    }

    /// Capacity limits
    pub fn limits(&self) -> &InteractableLimits {
        &self.limits
    }

    /// Replace the capacity limits
    ///
    /// Current members are kept even if they now exceed the limits; the
    /// limits apply to later additions.
    pub fn set_limits(&mut self, limits: InteractableLimits) -> Result<(), InteractionError> {
        limits.validate()?;
        self.limits = limits;
        Ok(())
    }

    /// Current derived state
    pub fn state(&self) -> InteractableState {
        self.state
    }

    /// Whether the interactable takes part in interaction
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Hovering interactors, oldest first
    pub fn interactors(&self) -> &[UniqueId] {
        &self.interactors
    }

    /// Selecting interactors, oldest first
    pub fn selecting_interactors(&self) -> &[UniqueId] {
        &self.selecting_interactors
    }

    /// Number of hovering interactors
    pub fn interactors_count(&self) -> usize {
        self.interactors.len()
    }

    /// Number of selecting interactors
    pub fn selecting_interactors_count(&self) -> usize {
        self.selecting_interactors.len()
    }

    /// Whether `id` is in the hover set
    pub fn has_interactor(&self, id: UniqueId) -> bool {
        self.interactors.contains(&id)
    }

    /// Whether `id` is in the selecting set
    pub fn has_selecting_interactor(&self, id: UniqueId) -> bool {
        self.selecting_interactors.contains(&id)
    }

    /// Whether `id` is hovering already or would fit
    pub fn has_capacity_for(&self, id: UniqueId) -> bool {
        self.has_interactor(id)
            || self
                .limits
                .max_interactors
                .map_or(true, |max| self.interactors.len() < max)
    }

    /// Whether `id` may consider this interactable at all
    pub fn is_potential_candidate_for(&self, id: UniqueId) -> bool {
        self.enabled && self.has_capacity_for(id)
    }

    /// Whether `id` may start selecting this interactable
    pub fn can_be_selected_by(&self, id: UniqueId) -> bool {
        if !self.enabled {
            return false;
        }
        if self.has_selecting_interactor(id) || self.limits.transfer_on_second_selection {
            return true;
        }
        self.limits
            .max_selecting_interactors
            .map_or(true, |max| self.selecting_interactors.len() < max)
    }

    /// Register a hovering interactor
    ///
    /// Returns `true` if `id` is in the hover set afterwards, `false` if
    /// the interactable is disabled or full.
    pub fn add_interactor(&mut self, id: UniqueId) -> bool {
        if !self.enabled {
            return false;
        }
        if self.has_interactor(id) {
            return true;
        }
        if !self.has_capacity_for(id) {
            log::trace!("interactable {} full, refusing hover by {}", self.id, id);
            return false;
        }
        self.interactors.push(id);
        self.interactors_changed();
        true
    }

    /// Unregister a hovering interactor; returns whether it was present
    pub fn remove_interactor(&mut self, id: UniqueId) -> bool {
        let Some(index) = self.interactors.iter().position(|&held| held == id) else {
            return false;
        };
        self.interactors.remove(index);
        self.interactors_changed();
        true
    }

    /// Register a selecting interactor
    ///
    /// With `transfer_on_second_selection`, a full interactable evicts its
    /// oldest selector from both sets to make room.
    pub fn add_selecting_interactor(&mut self, id: UniqueId) -> bool {
        if !self.enabled {
            return false;
        }
        if self.has_selecting_interactor(id) {
            return true;
        }
        let full = self
            .limits
            .max_selecting_interactors
            .is_some_and(|max| self.selecting_interactors.len() >= max);
        if full {
            if !self.limits.transfer_on_second_selection {
                return false;
            }
            if let Some(&oldest) = self.selecting_interactors.first() {
                log::debug!("interactable {} transfers selection {} -> {}", self.id, oldest, id);
                self.remove_interactor_by_id(oldest);
            }
        }
        self.selecting_interactors.push(id);
        self.selecting_changed();
        true
    }

    /// Unregister a selecting interactor; returns whether it was present
    pub fn remove_selecting_interactor(&mut self, id: UniqueId) -> bool {
        let Some(index) = self.selecting_interactors.iter().position(|&held| held == id) else {
            return false;
        };
        self.selecting_interactors.remove(index);
        self.selecting_changed();
        true
    }

    /// Forcibly evict `id` from both sets
    ///
    /// The evicted interactor notices on its next tick and unsets itself.
    pub fn remove_interactor_by_id(&mut self, id: UniqueId) -> bool {
        let selecting = self.remove_selecting_interactor(id);
        let hovering = self.remove_interactor(id);
        selecting || hovering
    }

    /// Re-enable after [`disable`](Self::disable)
    pub fn enable(&mut self) {
        if self.enabled {
            return;
        }
        self.enabled = true;
        self.refresh_state();
    }

    /// Switch off, evicting every hovering and selecting interactor
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        if !self.selecting_interactors.is_empty() {
            self.selecting_interactors.clear();
            self.when_selecting_interactors_count_updated.emit(&0);
        }
        if !self.interactors.is_empty() {
            self.interactors.clear();
            self.when_interactors_count_updated.emit(&0);
        }
        self.refresh_state();
    }

    /// Fired on every derived-state transition
    pub fn when_state_changed(&mut self) -> &mut Signal<StateChange<InteractableState>> {
        &mut self.when_state_changed
    }

    /// Fired with the new hover count whenever it changes
    pub fn when_interactors_count_updated(&mut self) -> &mut Signal<usize> {
        &mut self.when_interactors_count_updated
    }

    /// Fired with the new selecting count whenever it changes
    pub fn when_selecting_interactors_count_updated(&mut self) -> &mut Signal<usize> {
        &mut self.when_selecting_interactors_count_updated
    }

    fn interactors_changed(&mut self) {
        let count = self.interactors.len();
        self.when_interactors_count_updated.emit(&count);
        self.refresh_state();
    }

    fn selecting_changed(&mut self) {
        let count = self.selecting_interactors.len();
        self.when_selecting_interactors_count_updated.emit(&count);
        self.refresh_state();
    }

    fn refresh_state(&mut self) {
        let new = if !self.enabled {
            InteractableState::Disabled
        } else if !self.selecting_interactors.is_empty() {
            InteractableState::Select
        } else if !self.interactors.is_empty() {
            InteractableState::Hover
        } else {
            InteractableState::Normal
        };
        if let Some(change) = StateChange::between(self.state, new) {
            self.state = new;
            log::trace!("interactable {}: {} -> {}", self.id, change.previous, change.new);
            self.when_state_changed.emit(&change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::IdPool;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn make(limits: InteractableLimits) -> (Interactable<()>, IdPool) {
        let mut pool = IdPool::new();
        let mut interactable = Interactable::new(pool.allocate(), Pose::identity(), ());
        interactable.set_limits(limits).unwrap();
        (interactable, pool)
    }

    #[test]
    fn test_add_interactor_is_idempotent() {
        let (mut interactable, mut pool) = make(InteractableLimits::default());
        let counts = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&counts);
        interactable
            .when_interactors_count_updated()
            .connect(move |count| sink.borrow_mut().push(*count));

        let id = pool.allocate();
        assert!(interactable.add_interactor(id));
        assert!(interactable.add_interactor(id));
        assert_eq!(interactable.interactors_count(), 1);
        assert_eq!(*counts.borrow(), vec![1]);

        assert!(interactable.remove_interactor(id));
        assert!(!interactable.remove_interactor(id));
        assert_eq!(*counts.borrow(), vec![1, 0]);
    }

    #[test]
    fn test_state_follows_membership_and_fires_once() {
        let (mut interactable, mut pool) = make(InteractableLimits::default());
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        interactable
            .when_state_changed()
            .connect(move |change| sink.borrow_mut().push(change.new));

        let id = pool.allocate();
        interactable.add_interactor(id);
        interactable.add_selecting_interactor(id);
        interactable.add_selecting_interactor(id);
        interactable.remove_selecting_interactor(id);
        interactable.remove_interactor(id);

        use InteractableState::{Hover, Normal, Select};
        assert_eq!(*changes.borrow(), vec![Hover, Select, Hover, Normal]);
    }

    #[test]
    fn test_selecting_capacity() {
        let (mut interactable, mut pool) = make(InteractableLimits::single_selection());
        let first = pool.allocate();
        let second = pool.allocate();

        assert!(interactable.can_be_selected_by(first));
        assert!(interactable.add_selecting_interactor(first));
        assert!(!interactable.can_be_selected_by(second));
        assert!(!interactable.add_selecting_interactor(second));
        assert!(interactable.can_be_selected_by(first));

        interactable.remove_selecting_interactor(first);
        assert!(interactable.can_be_selected_by(second));
    }

    #[test]
    fn test_hover_capacity() {
        let limits = InteractableLimits {
            max_interactors: Some(1),
            ..InteractableLimits::default()
        };
        let (mut interactable, mut pool) = make(limits);
        let first = pool.allocate();
        let second = pool.allocate();

        assert!(interactable.add_interactor(first));
        assert!(!interactable.is_potential_candidate_for(second));
        assert!(!interactable.add_interactor(second));
        assert!(interactable.is_potential_candidate_for(first));
    }

    #[test]
    fn test_transfer_evicts_oldest_selector() {
        let limits = InteractableLimits {
            transfer_on_second_selection: true,
            ..InteractableLimits::single_selection()
        };
        let (mut interactable, mut pool) = make(limits);
        let first = pool.allocate();
        let second = pool.allocate();

        interactable.add_interactor(first);
        interactable.add_selecting_interactor(first);
        interactable.add_interactor(second);

        assert!(interactable.can_be_selected_by(second));
        assert!(interactable.add_selecting_interactor(second));
        assert_eq!(interactable.selecting_interactors(), &[second]);
        assert!(!interactable.has_interactor(first));
    }

    #[test]
    fn test_remove_by_id_clears_both_sets() {
        let (mut interactable, mut pool) = make(InteractableLimits::default());
        let id = pool.allocate();
        interactable.add_interactor(id);
        interactable.add_selecting_interactor(id);

        assert!(interactable.remove_interactor_by_id(id));
        assert!(!interactable.remove_interactor_by_id(id));
        assert_eq!(interactable.state(), InteractableState::Normal);
    }

    #[test]
    fn test_disable_evicts_and_refuses() {
        let (mut interactable, mut pool) = make(InteractableLimits::default());
        let id = pool.allocate();
        interactable.add_interactor(id);
        interactable.add_selecting_interactor(id);

        interactable.disable();
        assert_eq!(interactable.state(), InteractableState::Disabled);
        assert_eq!(interactable.interactors_count(), 0);
        assert!(!interactable.add_interactor(id));
        assert!(!interactable.can_be_selected_by(id));

        interactable.enable();
        assert_eq!(interactable.state(), InteractableState::Normal);
        assert!(interactable.add_interactor(id));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let limits = InteractableLimits {
            max_selecting_interactors: Some(0),
            ..InteractableLimits::default()
        };
        assert_eq!(
            limits.validate(),
            Err(InteractionError::ZeroCapacity("max_selecting_interactors"))
        );
    }
}
