//! Drivers: the per-frame orchestration contract
//!
//! [`InteractorDriver`] is what driver groups and the scheduler talk to.
//! [`Driver`] implements it for a single interactor, optionally gated by
//! an [`ActiveState`].

use super::interactor::{Interactor, Modality};
use super::state::InteractorState;
use super::world::InteractionWorld;
use crate::input::ActiveState;

/// Phase-split tick plus lifecycle, object safe
pub trait InteractorDriver {
    /// Current state
    fn state(&self) -> InteractorState;

    /// Whether the state is `Hover`
    fn is_hovering(&self) -> bool {
        self.state() == InteractorState::Hover
    }

    /// Whether the state is `Select`
    fn is_selecting(&self) -> bool {
        self.state() == InteractorState::Select
    }

    /// Whether the latest candidate search found something
    fn has_candidate(&self) -> bool;

    /// Whether an interactable is hovered or selected
    fn has_interactable(&self) -> bool;

    /// Latest select intent
    fn should_select(&self) -> bool;

    /// Candidate discovery phase
    fn update_interaction(&mut self, world: &mut InteractionWorld, dt: f32);

    /// Hover phase
    fn update_hover(&mut self, world: &mut InteractionWorld);

    /// Selection phase
    fn update_selection(&mut self, world: &mut InteractionWorld, can_be_empty: bool);

    /// Switch on
    fn enable(&mut self);

    /// Switch off, releasing anything held
    fn disable(&mut self, world: &mut InteractionWorld);

    /// All three phases, allowing an empty select
    fn tick(&mut self, world: &mut InteractionWorld, dt: f32) {
        self.update_interaction(world, dt);
        self.update_hover(world);
        self.update_selection(world, true);
    }
}

/// Drives one interactor
pub struct Driver<M: Modality> {
    interactor: Interactor<M>,
    active_state: Option<Box<dyn ActiveState>>,
    gated_off: bool,
}

impl<M: Modality> Driver<M> {
    /// Drive `interactor` with no gate
    pub fn new(interactor: Interactor<M>) -> Self {
        Self {
            interactor,
            active_state: None,
            gated_off: false,
        }
    }

    /// Drive `interactor`, disabling it whenever `gate` is inactive
    pub fn with_active_state(interactor: Interactor<M>, gate: impl ActiveState + 'static) -> Self {
        Self {
            interactor,
            active_state: Some(Box::new(gate)),
            gated_off: false,
        }
    }

    /// The driven interactor
    pub fn interactor(&self) -> &Interactor<M> {
        &self.interactor
    }

    /// The driven interactor, mutably
    pub fn interactor_mut(&mut self) -> &mut Interactor<M> {
        &mut self.interactor
    }

    /// Stop driving, handing the interactor back
    pub fn into_interactor(self) -> Interactor<M> {
        self.interactor
    }

    fn gate_is_active(&self) -> bool {
        self.active_state.as_ref().map_or(true, |gate| gate.is_active())
    }
}

impl<M: Modality> InteractorDriver for Driver<M> {
    fn state(&self) -> InteractorState {
        self.interactor.state()
    }

    fn has_candidate(&self) -> bool {
        self.interactor.has_candidate()
    }

    fn has_interactable(&self) -> bool {
        self.interactor.has_interactable()
    }

    fn should_select(&self) -> bool {
        self.interactor.should_select()
    }

    fn update_interaction(&mut self, world: &mut InteractionWorld, dt: f32) {
        if !self.gate_is_active() {
            if self.interactor.state() != InteractorState::Disabled {
                log::trace!("interactor {}: gate closed", self.interactor.id());
                self.interactor.disable(world);
                self.gated_off = true;
            }
            return;
        }
        if self.gated_off {
            self.gated_off = false;
            self.interactor.enable();
        }
        self.interactor.update_interaction(world, dt);
    }

    fn update_hover(&mut self, world: &mut InteractionWorld) {
        self.interactor.update_hover(world);
    }

    fn update_selection(&mut self, world: &mut InteractionWorld, can_be_empty: bool) {
        self.interactor.update_selection(world, can_be_empty);
    }

    fn enable(&mut self) {
        if self.gate_is_active() {
            self.interactor.enable();
        }
    }

    fn disable(&mut self, world: &mut InteractionWorld) {
        self.interactor.disable(world);
    }
}
