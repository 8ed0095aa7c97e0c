//! Hand grab modality

use super::{HandGrabInteractable, PoseMatch};
use crate::config::{HandGrabConfig, InteractionConfig, PalmGrabConfig, PinchConfig};
use crate::error::InteractionError;
use crate::hand::{GrabTypeFlags, HandGrabApi};
use crate::input::{HandSource, PoseSource};
use crate::interaction::{
    Interactable, InteractableKey, InteractionWorld, Interactor, InteractorContext, InteractorState,
    Modality,
};

/// Best grab found for one interactable this tick
#[derive(Debug, Clone, Copy)]
struct Scored {
    key: InteractableKey,
    finger_score: f32,
    pose: PoseMatch,
    starting: GrabTypeFlags,
}

/// Hand grab behavior for [`Interactor`]
pub struct HandGrabModality {
    hand_source: Box<dyn HandSource>,
    head_source: Option<Box<dyn PoseSource>>,
    api: HandGrabApi,
    config: HandGrabConfig,
    candidate: Option<Scored>,
    selecting_types: GrabTypeFlags,
    snap: Option<PoseMatch>,
}

impl HandGrabModality {
    /// Modality reading skeletons from `hand_source`
    pub fn new(
        hand_source: impl HandSource + 'static,
        pinch: PinchConfig,
        palm: PalmGrabConfig,
        config: HandGrabConfig,
    ) -> Result<Self, InteractionError> {
        config.validate()?;
        Ok(Self {
            hand_source: Box::new(hand_source),
            head_source: None,
            api: HandGrabApi::new(pinch, palm)?,
            config,
            candidate: None,
            selecting_types: GrabTypeFlags::empty(),
            snap: None,
        })
    }

    /// Modality built from the aggregate settings
    pub fn from_config(
        hand_source: impl HandSource + 'static,
        config: &InteractionConfig,
    ) -> Result<Self, InteractionError> {
        Self::new(
            hand_source,
            config.pinch.clone(),
            config.palm.clone(),
            config.hand_grab.clone(),
        )
    }

    /// Use the headset pose to detect well-visible hands
    #[must_use]
    pub fn with_head(mut self, head_source: impl PoseSource + 'static) -> Self {
        self.head_source = Some(Box::new(head_source));
        self
    }

    /// Wrap into an interactor; hand grab needs no selector
    pub fn interactor(self, world: &mut InteractionWorld) -> Interactor<Self> {
        Interactor::new(world, self)
    }

    /// Finger state from the latest tick
    pub fn api(&self) -> &HandGrabApi {
        &self.api
    }

    /// Grab types holding the current selection
    pub fn selecting_grab_types(&self) -> GrabTypeFlags {
        self.selecting_types
    }

    /// Snap pose for the hovered or selected interactable
    pub fn snap_pose(&self) -> Option<PoseMatch> {
        self.snap
    }

    /// Score one interactable, `None` if no grab type has a reachable pose
    fn score(&self, key: InteractableKey, entry: &Interactable<HandGrabInteractable>) -> Option<Scored> {
        let hand = self.api.hand()?;
        let data = entry.data();
        let mut best: Option<Scored> = None;
        let mut starting = GrabTypeFlags::empty();

        for grab_type in data.supported_grab_types().iter() {
            let Some(fingers) = self.api.api(grab_type) else {
                continue;
            };
            let Some(pose) = data.calculate_best_pose(
                entry.pose(),
                hand.wrist(),
                hand.handedness,
                grab_type,
                &self.config,
            ) else {
                continue;
            };
            let rule = data.rule(grab_type);
            let finger_score = if rule.just_started(fingers) {
                starting |= grab_type;
                1.0
            } else {
                rule.strength(fingers)
            };
            let scored = Scored {
                key,
                finger_score,
                pose,
                starting: GrabTypeFlags::empty(),
            };
            if best.map_or(true, |current| beats(&scored, &current)) {
                best = Some(scored);
            }
        }
        best.map(|scored| Scored { starting, ..scored })
    }
}

/// Higher finger score wins; equal finger scores fall back to lower pose error
fn beats(a: &Scored, b: &Scored) -> bool {
    a.finger_score > b.finger_score
        || (a.finger_score == b.finger_score && a.pose.error < b.pose.error)
}

impl Modality for HandGrabModality {
    type Data = HandGrabInteractable;

    fn do_every_update(&mut self, _ctx: &InteractorContext<'_, HandGrabInteractable>) {
        let hand = self.hand_source.hand();
        let head = self.head_source.as_ref().and_then(|source| source.pose());
        self.api.update(hand.as_ref(), head.as_ref());
    }

    fn do_select_update(&mut self, ctx: &InteractorContext<'_, HandGrabInteractable>) {
        // Follow the object while held; the offset between wrist and
        // object stays what it was at selection
        if let (Some(snap), Some(entry)) = (self.snap.as_mut(), ctx.current()) {
            if let Some(point) = snap.point.and_then(|index| entry.data().grab_points().get(index)) {
                snap.pose = entry.pose().combine(&point.pose);
            }
        }
    }

    fn compute_candidate(
        &mut self,
        ctx: &InteractorContext<'_, HandGrabInteractable>,
    ) -> Option<InteractableKey> {
        self.candidate = None;
        let palm = self.api.palm_center()?;

        let mut best: Option<Scored> = None;
        for (key, entry) in ctx.registry.list_within(palm, self.config.hover_range) {
            if !ctx.accepts(entry) {
                continue;
            }
            let Some(scored) = self.score(key, entry) else {
                continue;
            };
            if best.map_or(true, |current| beats(&scored, &current)) {
                best = Some(scored);
            }
        }

        self.candidate = best;
        if ctx.state == InteractorState::Hover || ctx.state == InteractorState::Normal {
            self.snap = best.map(|scored| scored.pose);
        }
        best.map(|scored| scored.key)
    }

    fn compute_should_select(
        &self,
        ctx: &InteractorContext<'_, HandGrabInteractable>,
        requested: bool,
    ) -> bool {
        let starting = self.candidate.is_some_and(|scored| {
            Some(scored.key) == ctx.interactable && !scored.starting.is_empty()
        });
        ctx.state != InteractorState::Select && (requested || starting)
    }

    fn compute_should_unselect(
        &self,
        ctx: &InteractorContext<'_, HandGrabInteractable>,
        requested: bool,
    ) -> bool {
        if ctx.state != InteractorState::Select {
            return false;
        }
        if requested {
            return true;
        }
        let Some(entry) = ctx.selected.and_then(|key| ctx.get(key)) else {
            return false;
        };
        self.selecting_types.iter().all(|grab_type| {
            self.api
                .api(grab_type)
                .map_or(true, |fingers| entry.data().rule(grab_type).releases(fingers))
        })
    }

    fn on_select(&mut self, ctx: &InteractorContext<'_, HandGrabInteractable>) {
        let starting = self
            .candidate
            .filter(|scored| Some(scored.key) == ctx.selected)
            .map_or(GrabTypeFlags::empty(), |scored| scored.starting);
        // A requested select has no starting gesture; hold with whatever
        // the fingers already satisfy
        self.selecting_types = match ctx.selected.and_then(|key| ctx.get(key)) {
            Some(entry) if starting.is_empty() => {
                let data = entry.data();
                self.api
                    .selecting_types(data.supported_grab_types(), |grab_type| data.rule(grab_type))
            }
            _ => starting,
        };
        log::trace!("interactor {}: hand grab with {:?}", ctx.id, self.selecting_types);
    }

    fn on_unselect(&mut self, _ctx: &InteractorContext<'_, HandGrabInteractable>) {
        self.selecting_types = GrabTypeFlags::empty();
    }

    // Finger records keep running while disabled so a group handing this
    // interactor back does not see a held pinch as a new one
    fn on_disable(&mut self) {
        self.candidate = None;
        self.selecting_types = GrabTypeFlags::empty();
        self.snap = None;
    }
}
