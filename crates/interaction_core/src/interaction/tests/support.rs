//! Fixtures shared by the interaction tests

use std::cell::Cell;
use std::rc::Rc;

use crate::foundation::math::{Pose, Vec3};
use crate::grab::GrabInteractable;
use crate::interaction::{
    InteractableKey, InteractionWorld, InteractorContext, InteractorState, Modality,
};

/// Spawn a 0.1 radius grab sphere at `(x, 0, 0)`
pub(crate) fn ball(world: &mut InteractionWorld, x: f32) -> InteractableKey {
    let sphere = GrabInteractable::sphere(0.1).expect("positive radius");
    world.spawn(Pose::from_position(Vec3::new(x, 0.0, 0.0)), sphere)
}

/// Modality whose candidate and select intent are set by the test
pub(crate) struct Scripted {
    target: Rc<Cell<Option<InteractableKey>>>,
    intent: Rc<Cell<bool>>,
}

impl Scripted {
    /// Modality plus the handle that picks its candidate
    pub(crate) fn new() -> (Self, Rc<Cell<Option<InteractableKey>>>) {
        let target = Rc::new(Cell::new(None));
        let scripted = Self {
            target: Rc::clone(&target),
            intent: Rc::new(Cell::new(false)),
        };
        (scripted, target)
    }

    /// Handle that makes the modality want to select its hovered interactable
    pub(crate) fn intent(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.intent)
    }
}

impl Modality for Scripted {
    type Data = GrabInteractable;

    fn compute_candidate(
        &mut self,
        ctx: &InteractorContext<'_, GrabInteractable>,
    ) -> Option<InteractableKey> {
        self.target
            .get()
            .filter(|&key| ctx.get(key).is_some_and(|entry| ctx.accepts(entry)))
    }

    fn compute_should_select(
        &self,
        ctx: &InteractorContext<'_, GrabInteractable>,
        requested: bool,
    ) -> bool {
        if ctx.state == InteractorState::Select {
            return requested;
        }
        requested || (self.intent.get() && ctx.candidate.is_some())
    }
}
