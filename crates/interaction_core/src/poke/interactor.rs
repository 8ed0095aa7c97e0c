//! Poke modality: plane crossing selects, backing out releases

use super::PokeInteractable;
use crate::config::PokeConfig;
use crate::error::InteractionError;
use crate::foundation::math::{utils, Pose, Vec2, Vec3};
use crate::input::PoseSource;
use crate::interaction::{
    Interactable, InteractableKey, InteractionWorld, Interactor, InteractorContext,
    InteractorState, Modality,
};
use crate::physics::Ray;

/// Where a press landed, kept in surface-local planar units so it
/// follows the surface if it moves
#[derive(Debug, Clone, Copy, PartialEq)]
struct Touch {
    anchor: Vec2,
    pinned: Vec2,
    ease_from: Vec2,
    ease_elapsed: f32,
    dragging: bool,
}

impl Touch {
    fn at(anchor: Vec2) -> Self {
        Self {
            anchor,
            pinned: anchor,
            ease_from: anchor,
            ease_elapsed: 0.0,
            dragging: false,
        }
    }
}

/// Poke behavior for [`Interactor`]
pub struct PokeModality {
    source: Box<dyn PoseSource>,
    config: PokeConfig,
    point: Option<Vec3>,
    previous: Option<Vec3>,
    hit: Option<InteractableKey>,
    touch: Option<Touch>,
    touch_point: Option<Vec3>,
}

impl PokeModality {
    /// Modality reading the fingertip from `source`
    pub fn new(source: impl PoseSource + 'static, config: PokeConfig) -> Result<Self, InteractionError> {
        config.validate()?;
        Ok(Self {
            source: Box::new(source),
            config,
            point: None,
            previous: None,
            hit: None,
            touch: None,
            touch_point: None,
        })
    }

    /// Wrap into an interactor; poking needs no selector
    pub fn interactor(self, world: &mut InteractionWorld) -> Interactor<Self> {
        Interactor::new(world, self)
    }

    /// Fingertip center from the latest tick
    pub fn point(&self) -> Option<Vec3> {
        self.point
    }

    /// Where the press is pinned on the surface while selecting
    pub fn touch_point(&self) -> Option<Vec3> {
        self.touch_point
    }

    /// Whether the press has drifted past a drag threshold
    pub fn is_dragging(&self) -> bool {
        self.touch.is_some_and(|touch| touch.dragging)
    }

    /// Point of the fingertip sphere furthest along the press direction
    fn leading(&self, center: Vec3, pose: &Pose) -> Vec3 {
        center + pose.forward() * self.config.radius
    }

    /// Squared planar distance of a plane crossing between the previous
    /// and current points, if the fingertip pushed through `entry` this tick
    fn crossing(&self, entry: &Interactable<PokeInteractable>) -> Option<f32> {
        let (previous, point) = (self.previous?, self.point?);
        let pose = entry.pose();
        let surface = &entry.data().surface;
        let from = self.leading(previous, pose);
        let to = self.leading(point, pose);
        if (to - from).dot(&pose.forward()) <= 0.0 {
            return None;
        }
        let (ray, travel) = Ray::between(from, to)?;
        let t = surface.plane(pose).intersect_ray(&ray)?;
        if t > travel {
            return None;
        }
        let hit = ray.point_at(t);
        let lateral = (hit - surface.closest_surface_point(pose, hit)).magnitude_squared();
        let max_distance = entry.data().max_distance;
        (lateral <= max_distance * max_distance).then_some(lateral)
    }

    /// Squared distance from the live point to `entry`, if within hover range
    fn proximity(&self, entry: &Interactable<PokeInteractable>) -> Option<f32> {
        let point = self.point?;
        let pose = entry.pose();
        let surface = &entry.data().surface;
        let distance = (point - surface.closest_surface_point(pose, point)).magnitude_squared();
        let max_distance = entry.data().max_distance;
        (distance <= max_distance * max_distance).then_some(distance)
    }

    fn nearest(
        ctx: &InteractorContext<'_, PokeInteractable>,
        mut score: impl FnMut(&Interactable<PokeInteractable>) -> Option<f32>,
    ) -> Option<InteractableKey> {
        let mut best: Option<(f32, InteractableKey)> = None;
        for (key, entry) in ctx.registry.list() {
            if !ctx.accepts(entry) {
                continue;
            }
            let Some(distance) = score(entry) else {
                continue;
            };
            if best.map_or(true, |(best_distance, _)| distance < best_distance) {
                best = Some((distance, key));
            }
        }
        best.map(|(_, key)| key)
    }
}

impl Modality for PokeModality {
    type Data = PokeInteractable;

    fn do_every_update(&mut self, _ctx: &InteractorContext<'_, PokeInteractable>) {
        self.previous = self.point;
        self.point = self.source.pose().map(|pose| pose.position);
    }

    fn do_select_update(&mut self, ctx: &InteractorContext<'_, PokeInteractable>) {
        let (Some(point), Some(entry), Some(mut touch)) = (self.point, ctx.current(), self.touch) else {
            return;
        };
        let pose = entry.pose();
        let data = entry.data();
        let planar = data.surface.clamp_planar(data.surface.planar(pose, point));

        if !touch.dragging {
            let drift = planar - touch.anchor;
            if drift.x.abs() > data.drag_threshold_horizontal
                || drift.y.abs() > data.drag_threshold_vertical
            {
                log::trace!("Poke {} started dragging", ctx.id);
                touch.dragging = true;
                touch.ease_from = touch.pinned;
                touch.ease_elapsed = 0.0;
            }
        }
        if touch.dragging {
            touch.ease_elapsed += ctx.dt;
            let progress = if data.drag_ease_time > 0.0 {
                utils::smoothstep(touch.ease_elapsed / data.drag_ease_time)
            } else {
                1.0
            };
            touch.pinned = touch.ease_from.lerp(&planar, progress);
        }

        self.touch = Some(touch);
        self.touch_point = Some(data.surface.planar_to_world(pose, touch.pinned));
    }

    fn compute_candidate(
        &mut self,
        ctx: &InteractorContext<'_, PokeInteractable>,
    ) -> Option<InteractableKey> {
        self.hit = Self::nearest(ctx, |entry| self.crossing(entry));
        if self.hit.is_some() {
            return self.hit;
        }
        Self::nearest(ctx, |entry| self.proximity(entry))
    }

    fn compute_should_select(
        &self,
        ctx: &InteractorContext<'_, PokeInteractable>,
        requested: bool,
    ) -> bool {
        if ctx.state == InteractorState::Select {
            return false;
        }
        requested || (self.hit.is_some() && self.hit == ctx.interactable)
    }

    fn compute_should_unselect(
        &self,
        ctx: &InteractorContext<'_, PokeInteractable>,
        requested: bool,
    ) -> bool {
        if ctx.state != InteractorState::Select {
            return false;
        }
        if requested {
            return true;
        }
        let (Some(point), Some(entry)) = (self.point, ctx.current()) else {
            return true;
        };
        let pose = entry.pose();
        let data = entry.data();
        if data.surface.depth(pose, self.leading(point, pose)) < -self.config.release_threshold {
            return true;
        }
        self.is_dragging() && data.surface.distance(pose, point) > data.release_distance
    }

    fn on_select(&mut self, ctx: &InteractorContext<'_, PokeInteractable>) {
        let (Some(point), Some(entry)) = (self.point, ctx.selected.and_then(|key| ctx.get(key))) else {
            return;
        };
        let pose = entry.pose();
        let surface = &entry.data().surface;
        let anchor = surface.clamp_planar(surface.planar(pose, point));
        self.touch = Some(Touch::at(anchor));
        self.touch_point = Some(surface.planar_to_world(pose, anchor));
    }

    fn on_unselect(&mut self, _ctx: &InteractorContext<'_, PokeInteractable>) {
        self.hit = None;
        self.touch = None;
        self.touch_point = None;
    }

    // Point tracking survives so the first tick after re-enabling can
    // still see a crossing
    fn on_disable(&mut self) {
        self.hit = None;
        self.touch = None;
        self.touch_point = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SharedPose;
    use crate::poke::PokeSurface;
    use approx::assert_relative_eq;

    const DT: f32 = 0.02;

    /// Button at z = 1, pressed toward +Z
    fn button(world: &mut InteractionWorld) -> InteractableKey {
        let surface = PokeSurface::new(Vec2::new(0.05, 0.05)).unwrap();
        let data = PokeInteractable::new(surface, &PokeConfig::default()).unwrap();
        world.spawn(Pose::from_position(Vec3::new(0.0, 0.0, 1.0)), data)
    }

    fn finger(world: &mut InteractionWorld, z: f32) -> (Interactor<PokeModality>, SharedPose) {
        let tip = SharedPose::tracked(Pose::from_position(Vec3::new(0.0, 0.0, z)));
        let poke = PokeModality::new(tip.clone(), PokeConfig::default()).unwrap();
        (poke.interactor(world), tip)
    }

    fn move_to(tip: &SharedPose, x: f32, y: f32, z: f32) {
        tip.set(Pose::from_position(Vec3::new(x, y, z)));
    }

    #[test]
    fn test_crossing_plane_selects_in_same_tick() {
        let mut world = InteractionWorld::new();
        let key = button(&mut world);
        // Leading edge starts 0.01 in front of the plane
        let (mut poke, tip) = finger(&mut world, 0.985);

        poke.update_interactor(&mut world, DT);
        assert_eq!(poke.state(), InteractorState::Hover);

        // ...and ends 0.01 past it
        move_to(&tip, 0.0, 0.0, 1.005);
        poke.update_interactor(&mut world, DT);
        assert_eq!(poke.candidate(), Some(key));
        assert!(poke.should_select());
        assert_eq!(poke.state(), InteractorState::Select);
        assert_relative_eq!(
            poke.modality().touch_point().unwrap(),
            Vec3::new(0.0, 0.0, 1.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_backing_out_releases() {
        let mut world = InteractionWorld::new();
        button(&mut world);
        let (mut poke, tip) = finger(&mut world, 0.98);
        poke.update_interactor(&mut world, DT);
        move_to(&tip, 0.0, 0.0, 1.0);
        poke.update_interactor(&mut world, DT);
        assert!(poke.is_selecting());

        // Still inside the release threshold
        move_to(&tip, 0.0, 0.0, 0.992);
        poke.update_interactor(&mut world, DT);
        assert!(poke.is_selecting());

        move_to(&tip, 0.0, 0.0, 0.98);
        poke.update_interactor(&mut world, DT);
        assert_eq!(poke.state(), InteractorState::Hover);
        assert!(poke.modality().touch_point().is_none());
    }

    #[test]
    fn test_hovering_does_not_select() {
        let mut world = InteractionWorld::new();
        button(&mut world);
        let (mut poke, tip) = finger(&mut world, 0.95);
        for z in [0.96, 0.97, 0.975] {
            move_to(&tip, 0.0, 0.0, z);
            poke.update_interactor(&mut world, DT);
            assert_eq!(poke.state(), InteractorState::Hover);
        }
    }

    #[test]
    fn test_backward_or_parallel_motion_does_not_select() {
        let mut world = InteractionWorld::new();
        button(&mut world);
        // Start behind the surface and pull back out through it
        let (mut poke, tip) = finger(&mut world, 1.02);
        poke.update_interactor(&mut world, DT);
        move_to(&tip, 0.0, 0.0, 0.98);
        poke.update_interactor(&mut world, DT);
        assert!(!poke.is_selecting());

        // Approach short of the plane, then slide sideways
        move_to(&tip, 0.0, 0.0, 0.99);
        poke.update_interactor(&mut world, DT);
        move_to(&tip, 0.02, 0.0, 0.99);
        poke.update_interactor(&mut world, DT);
        assert!(!poke.is_selecting());
    }

    #[test]
    fn test_crossing_outside_range_is_ignored() {
        let mut world = InteractionWorld::new();
        button(&mut world);
        let (mut poke, tip) = finger(&mut world, 0.98);
        move_to(&tip, 0.5, 0.0, 0.98);
        poke.update_interactor(&mut world, DT);
        move_to(&tip, 0.5, 0.0, 1.0);
        poke.update_interactor(&mut world, DT);
        assert_eq!(poke.candidate(), None);
        assert_eq!(poke.state(), InteractorState::Normal);
    }

    #[test]
    fn test_drag_eases_touch_point_then_releases_far_from_surface() {
        let mut world = InteractionWorld::new();
        button(&mut world);
        let (mut poke, tip) = finger(&mut world, 0.98);
        poke.update_interactor(&mut world, DT);
        move_to(&tip, 0.0, 0.0, 1.0);
        poke.update_interactor(&mut world, DT);
        assert!(poke.is_selecting());

        // Small drift stays pinned at the press point
        move_to(&tip, 0.02, 0.0, 1.0);
        poke.update_interactor(&mut world, DT);
        assert!(!poke.modality().is_dragging());
        assert_relative_eq!(poke.modality().touch_point().unwrap().x, 0.0);

        // Past the horizontal threshold the touch point starts catching up
        move_to(&tip, 0.04, 0.0, 1.0);
        poke.update_interactor(&mut world, DT);
        assert!(poke.modality().is_dragging());
        let partway = poke.modality().touch_point().unwrap().x;
        assert!(partway > 0.0 && partway < 0.04);

        for _ in 0..5 {
            poke.update_interactor(&mut world, DT);
        }
        assert_relative_eq!(poke.modality().touch_point().unwrap().x, 0.04, epsilon = 1e-6);
        assert!(poke.is_selecting());

        // Dragged off the edge and beyond the release distance
        move_to(&tip, 0.12, 0.0, 1.0);
        poke.update_interactor(&mut world, DT);
        assert!(!poke.is_selecting());
    }

    #[test]
    fn test_lost_tracking_releases() {
        let mut world = InteractionWorld::new();
        button(&mut world);
        let (mut poke, tip) = finger(&mut world, 0.98);
        poke.update_interactor(&mut world, DT);
        move_to(&tip, 0.0, 0.0, 1.0);
        poke.update_interactor(&mut world, DT);
        assert!(poke.is_selecting());

        tip.clear();
        poke.update_interactor(&mut world, DT);
        assert!(!poke.is_selecting());
        poke.update_interactor(&mut world, DT);
        assert_eq!(poke.state(), InteractorState::Normal);
    }

    #[test]
    fn test_crossing_right_after_group_handoff_selects() {
        use crate::grab::{GrabInteractable, GrabModality};
        use crate::interaction::{
            ButtonSelector, Driver, GroupStrategy, InteractorDriver, InteractorDriverGroup,
        };

        let mut world = InteractionWorld::new();
        button(&mut world);
        let ball = GrabInteractable::sphere(0.1).unwrap();
        world.spawn(Pose::from_position(Vec3::new(1.0, 0.0, 0.0)), ball);
        let controller = SharedPose::tracked(Pose::from_position(Vec3::new(1.0, 0.0, 0.0)));
        let grab = GrabModality::interactor(&mut world, controller.clone(), ButtonSelector::shared());
        let (poke, tip) = finger(&mut world, 0.985);

        let mut group = InteractorDriverGroup::new(GroupStrategy::Priority)
            .with_driver(Driver::new(grab))
            .with_driver(Driver::new(poke));
        group.tick(&mut world, DT);
        assert_eq!(group.current_driver(), Some(0));
        assert_eq!(group.driver(1).map(|driver| driver.state()), Some(InteractorState::Disabled));

        // The controller leaves while the finger pushes through the button
        controller.clear();
        move_to(&tip, 0.0, 0.0, 1.005);
        group.tick(&mut world, DT);
        assert_eq!(group.selecting_driver(), Some(1));
        assert_eq!(group.driver(1).map(|driver| driver.state()), Some(InteractorState::Select));
    }
}
