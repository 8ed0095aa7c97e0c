//! Grab modality: two-tier proximity scoring

use std::cmp::Ordering;

use super::GrabInteractable;
use crate::foundation::math::{Pose, Vec3};
use crate::input::PoseSource;
use crate::interaction::{
    InteractableKey, InteractionWorld, Interactor, InteractorContext, Modality, SharedSelector,
};
use crate::physics::WorldCollider;

/// How well a collider matches the grab point
///
/// Any collider containing the point beats every collider that does not.
/// Inside, the closest bounds center wins; outside, the closest surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrabScore {
    /// Point inside; distance to the bounds center
    Inside(f32),
    /// Point outside; distance to the surface
    Outside(f32),
}

impl GrabScore {
    /// Score `collider` against `point`
    pub fn of(collider: &WorldCollider, point: Vec3) -> Self {
        if collider.contains_point(point) {
            Self::Inside((point - collider.bounds_center()).magnitude())
        } else {
            Self::Outside(collider.distance_to_surface(point))
        }
    }

    /// `Greater` means `self` is the better match
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Inside(_), Self::Outside(_)) => Ordering::Greater,
            (Self::Outside(_), Self::Inside(_)) => Ordering::Less,
            (Self::Inside(a), Self::Inside(b)) | (Self::Outside(a), Self::Outside(b)) => {
                b.partial_cmp(a).unwrap_or(Ordering::Equal)
            }
        }
    }
}

/// Grab behavior for [`Interactor`]
pub struct GrabModality {
    source: Box<dyn PoseSource>,
    pointer: Option<Pose>,
    grab_offset: Option<Pose>,
}

impl GrabModality {
    /// Modality reading its grab point from `source`
    pub fn new(source: impl PoseSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            pointer: None,
            grab_offset: None,
        }
    }

    /// Grab interactor; the selector is mandatory for this modality
    pub fn interactor(
        world: &mut InteractionWorld,
        source: impl PoseSource + 'static,
        selector: SharedSelector,
    ) -> Interactor<Self> {
        Interactor::with_selector(world, Self::new(source), selector)
    }

    /// Grab point from the latest tick
    pub fn pointer(&self) -> Option<Pose> {
        self.pointer
    }

    /// Pose of the grabbed object relative to the grab point, recorded at select
    pub fn grab_offset(&self) -> Option<Pose> {
        self.grab_offset
    }

    /// Where the grabbed object should be to follow the grab point
    pub fn held_pose(&self) -> Option<Pose> {
        Some(self.pointer?.combine(&self.grab_offset?))
    }
}

impl Modality for GrabModality {
    type Data = GrabInteractable;

    fn do_every_update(&mut self, _ctx: &InteractorContext<'_, GrabInteractable>) {
        self.pointer = self.source.pose();
    }

    fn compute_candidate(
        &mut self,
        ctx: &InteractorContext<'_, GrabInteractable>,
    ) -> Option<InteractableKey> {
        let point = self.pointer?.position;
        let mut best: Option<(GrabScore, InteractableKey)> = None;
        for (key, entry) in ctx.registry.list() {
            if !ctx.accepts(entry) {
                continue;
            }
            for collider in entry.data().world_colliders(entry.pose()) {
                let score = GrabScore::of(&collider, point);
                // Strictly better only: equal scores keep the earlier interactable
                let better = best.map_or(true, |(best_score, _)| {
                    score.compare(&best_score) == Ordering::Greater
                });
                if better {
                    best = Some((score, key));
                }
            }
        }
        best.map(|(_, key)| key)
    }

    fn on_select(&mut self, ctx: &InteractorContext<'_, GrabInteractable>) {
        let (Some(pointer), Some(entry)) = (self.pointer, ctx.selected.and_then(|key| ctx.get(key)))
        else {
            return;
        };
        self.grab_offset = Some(pointer.relative(entry.pose()));
    }

    fn on_unselect(&mut self, _ctx: &InteractorContext<'_, GrabInteractable>) {
        self.grab_offset = None;
    }

    fn on_disable(&mut self) {
        self.pointer = None;
        self.grab_offset = None;
    }
}
