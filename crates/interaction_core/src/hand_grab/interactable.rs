//! Hand grab targets: supported grab types, rules and snap points

use serde::{Deserialize, Serialize};

use crate::config::HandGrabConfig;
use crate::error::{ensure_positive, InteractionError};
use crate::foundation::math::Pose;
use crate::hand::{GrabTypeFlags, GrabbingRule, Handedness};
use crate::interaction::{InteractableData, InteractableRegistry, InteractionWorld};
use crate::physics::BoundingSphere;

/// A pose the wrist can snap to, in the interactable's local space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandGrabPoint {
    /// Hand the pose was authored for
    pub handedness: Handedness,
    /// Wrist pose relative to the interactable
    pub pose: Pose,
    /// Grab types this pose applies to
    pub grab_types: GrabTypeFlags,
}

/// Result of snap pose matching
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseMatch {
    /// Index into the interactable's grab points; `None` for a free grab
    pub point: Option<usize>,
    /// World-space wrist pose to snap to
    pub pose: Pose,
    /// Weighted position/rotation error, lower is better
    pub error: f32,
}

/// Payload of a hand-grabbable interactable
#[derive(Debug, Clone, PartialEq)]
pub struct HandGrabInteractable {
    supported_grab_types: GrabTypeFlags,
    pinch_rule: GrabbingRule,
    palm_rule: GrabbingRule,
    grab_points: Vec<HandGrabPoint>,
    radius: f32,
}

impl HandGrabInteractable {
    /// Pinch- and palm-grabbable target of the given bounding radius
    pub fn new(radius: f32) -> Result<Self, InteractionError> {
        ensure_positive("hand_grab.radius", radius)?;
        Ok(Self {
            supported_grab_types: GrabTypeFlags::all(),
            pinch_rule: GrabbingRule::default_pinch(),
            palm_rule: GrabbingRule::default_palm(),
            grab_points: Vec::new(),
            radius,
        })
    }

    /// Restrict the supported grab types
    #[must_use]
    pub fn with_grab_types(mut self, grab_types: GrabTypeFlags) -> Self {
        self.supported_grab_types = grab_types;
        self
    }

    /// Replace the pinch rule
    #[must_use]
    pub fn with_pinch_rule(mut self, rule: GrabbingRule) -> Self {
        self.pinch_rule = rule;
        self
    }

    /// Replace the palm rule
    #[must_use]
    pub fn with_palm_rule(mut self, rule: GrabbingRule) -> Self {
        self.palm_rule = rule;
        self
    }

    /// Add a snap point
    #[must_use]
    pub fn with_grab_point(mut self, point: HandGrabPoint) -> Self {
        self.grab_points.push(point);
        self
    }

    /// Supported grab types
    pub fn supported_grab_types(&self) -> GrabTypeFlags {
        self.supported_grab_types
    }

    /// Snap points
    pub fn grab_points(&self) -> &[HandGrabPoint] {
        &self.grab_points
    }

    /// Rule for a single grab type
    pub fn rule(&self, grab_type: GrabTypeFlags) -> GrabbingRule {
        if grab_type == GrabTypeFlags::PALM {
            self.palm_rule
        } else {
            self.pinch_rule
        }
    }

    /// Best snap pose for `wrist`
    ///
    /// Without any grab point for this hand the grab is free and the
    /// current wrist pose is used as-is. Otherwise only points of the
    /// right grab type within `max_snap_distance` count; `None` means
    /// none of them is reachable.
    pub fn calculate_best_pose(
        &self,
        interactable_pose: &Pose,
        wrist: &Pose,
        handedness: Handedness,
        grab_type: GrabTypeFlags,
        config: &HandGrabConfig,
    ) -> Option<PoseMatch> {
        let mut for_hand = self
            .grab_points
            .iter()
            .enumerate()
            .filter(|(_, point)| point.handedness == handedness)
            .peekable();
        if for_hand.peek().is_none() {
            return Some(PoseMatch {
                point: None,
                pose: *wrist,
                error: 0.0,
            });
        }

        let mut best: Option<PoseMatch> = None;
        for (index, point) in for_hand {
            if !point.grab_types.contains(grab_type) {
                continue;
            }
            let pose = interactable_pose.combine(&point.pose);
            let distance = (pose.position - wrist.position).magnitude();
            if distance > config.max_snap_distance {
                continue;
            }
            let angle = pose.rotation.angle_to(&wrist.rotation);
            let error = config.position_weight * distance + config.rotation_weight * angle;
            if best.map_or(true, |current| error < current.error) {
                best = Some(PoseMatch {
                    point: Some(index),
                    pose,
                    error,
                });
            }
        }
        best
    }
}

impl InteractableData for HandGrabInteractable {
    fn registry(world: &InteractionWorld) -> &InteractableRegistry<Self> {
        &world.hand_grab
    }

    fn registry_mut(world: &mut InteractionWorld) -> &mut InteractableRegistry<Self> {
        &mut world.hand_grab
    }

    fn bounds(&self, pose: &Pose) -> Option<BoundingSphere> {
        Some(BoundingSphere::new(pose.position, self.radius))
    }
}
