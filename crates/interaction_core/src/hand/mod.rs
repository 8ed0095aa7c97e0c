//! Hand skeleton data and grab-strength estimators
//!
//! Models the 26 joints per hand of the OpenXR hand tracking layout, and
//! turns raw joint poses into per-finger grab state:
//! - [`pinch`]: thumb-to-fingertip distance with hysteresis
//! - [`palm`]: fingertip-to-palm-volume strength with hysteresis
//! - [`rule`]: which fingers must grab for a grab type to count

pub mod grab_api;
pub mod palm;
pub mod pinch;
pub mod rule;

pub use grab_api::HandGrabApi;
pub use palm::FingerPalmGrabApi;
pub use pinch::FingerPinchApi;
pub use rule::{FingerRequirement, GrabbingRule, UnselectMode};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::foundation::math::{Pose, Quat, Vec3};

// ── Handedness ─────────────────────────────────────────────

/// Which hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    /// Left hand
    Left,
    /// Right hand
    Right,
}

impl Handedness {
    /// Sign applied to X when mirroring right-hand data onto this hand
    pub fn mirror_sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Mirror a right-hand local vector onto this hand
    pub fn mirror(self, right_hand_local: Vec3) -> Vec3 {
        Vec3::new(
            right_hand_local.x * self.mirror_sign(),
            right_hand_local.y,
            right_hand_local.z,
        )
    }
}

// ── Fingers ────────────────────────────────────────────────

/// The five fingers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandFinger {
    /// Thumb
    Thumb,
    /// Index finger
    Index,
    /// Middle finger
    Middle,
    /// Ring finger
    Ring,
    /// Little finger
    Pinky,
}

impl HandFinger {
    /// All fingers, thumb first
    pub const ALL: [HandFinger; 5] = [
        Self::Thumb,
        Self::Index,
        Self::Middle,
        Self::Ring,
        Self::Pinky,
    ];

    /// Every finger except the thumb
    pub const OPPOSING: [HandFinger; 4] = [Self::Index, Self::Middle, Self::Ring, Self::Pinky];

    /// Array index (thumb = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Tip joint of this finger
    pub fn tip_joint(self) -> HandJoint {
        match self {
            Self::Thumb => HandJoint::ThumbTip,
            Self::Index => HandJoint::IndexTip,
            Self::Middle => HandJoint::MiddleTip,
            Self::Ring => HandJoint::RingTip,
            Self::Pinky => HandJoint::LittleTip,
        }
    }
}

// ── Joints ─────────────────────────────────────────────────

/// The 26 hand joints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum HandJoint {
    Palm,
    Wrist,
    ThumbMetacarpal,
    ThumbProximal,
    ThumbDistal,
    ThumbTip,
    IndexMetacarpal,
    IndexProximal,
    IndexIntermediate,
    IndexDistal,
    IndexTip,
    MiddleMetacarpal,
    MiddleProximal,
    MiddleIntermediate,
    MiddleDistal,
    MiddleTip,
    RingMetacarpal,
    RingProximal,
    RingIntermediate,
    RingDistal,
    RingTip,
    LittleMetacarpal,
    LittleProximal,
    LittleIntermediate,
    LittleDistal,
    LittleTip,
}

/// Total number of joints per hand
pub const JOINT_COUNT: usize = 26;

impl HandJoint {
    /// Convert joint enum to array index (0-25)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Thumb joints from the base to the tip
    pub const THUMB_CHAIN: [HandJoint; 4] = [
        Self::ThumbMetacarpal,
        Self::ThumbProximal,
        Self::ThumbDistal,
        Self::ThumbTip,
    ];
}

// ── Skeleton ───────────────────────────────────────────────

/// One frame of tracked joint poses for a single hand, in world space
#[derive(Debug, Clone, PartialEq)]
pub struct HandJointPoses {
    /// Which hand this skeleton belongs to
    pub handedness: Handedness,
    joints: [Pose; JOINT_COUNT],
}

/// Open right hand in wrist space: +Z toward the fingers, palm facing -Y,
/// thumb toward -X.
const OPEN_RIGHT_HAND: [[f32; 3]; JOINT_COUNT] = [
    [0.0, -0.01, 0.05],       // Palm
    [0.0, 0.0, 0.0],          // Wrist
    [-0.02, -0.01, 0.02],     // ThumbMetacarpal
    [-0.04, -0.015, 0.04],    // ThumbProximal
    [-0.055, -0.02, 0.06],    // ThumbDistal
    [-0.065, -0.02, 0.08],    // ThumbTip
    [-0.02, 0.0, 0.02],       // IndexMetacarpal
    [-0.02, 0.0, 0.08],       // IndexProximal
    [-0.02, 0.0, 0.12],       // IndexIntermediate
    [-0.02, 0.0, 0.145],      // IndexDistal
    [-0.02, 0.0, 0.165],      // IndexTip
    [0.0, 0.0, 0.02],         // MiddleMetacarpal
    [0.0, 0.0, 0.085],        // MiddleProximal
    [0.0, 0.0, 0.13],         // MiddleIntermediate
    [0.0, 0.0, 0.155],        // MiddleDistal
    [0.0, 0.0, 0.175],        // MiddleTip
    [0.02, 0.0, 0.02],        // RingMetacarpal
    [0.02, 0.0, 0.08],        // RingProximal
    [0.02, 0.0, 0.12],        // RingIntermediate
    [0.02, 0.0, 0.145],       // RingDistal
    [0.02, 0.0, 0.165],       // RingTip
    [0.035, 0.0, 0.02],       // LittleMetacarpal
    [0.035, 0.0, 0.07],       // LittleProximal
    [0.035, 0.0, 0.1],        // LittleIntermediate
    [0.035, 0.0, 0.12],       // LittleDistal
    [0.035, 0.0, 0.135],      // LittleTip
];

impl HandJointPoses {
    /// Build a skeleton from world-space joint poses indexed by [`HandJoint`]
    pub fn new(handedness: Handedness, joints: [Pose; JOINT_COUNT]) -> Self {
        Self { handedness, joints }
    }

    /// A relaxed open hand with its wrist at `wrist`
    pub fn open(handedness: Handedness, wrist: Pose) -> Self {
        let joints = OPEN_RIGHT_HAND.map(|[x, y, z]| {
            let local = handedness.mirror(Vec3::new(x, y, z));
            Pose::new(wrist.transform_point(local), wrist.rotation)
        });
        Self { handedness, joints }
    }

    /// Get a joint pose
    pub fn joint(&self, joint: HandJoint) -> &Pose {
        &self.joints[joint.index()]
    }

    /// Replace a joint pose
    pub fn set_joint(&mut self, joint: HandJoint, pose: Pose) {
        self.joints[joint.index()] = pose;
    }

    /// Move one joint, keeping its rotation (builder style)
    #[must_use]
    pub fn with_joint_position(mut self, joint: HandJoint, position: Vec3) -> Self {
        self.joints[joint.index()].position = position;
        self
    }

    /// Wrist pose, the root of the hand
    pub fn wrist(&self) -> &Pose {
        self.joint(HandJoint::Wrist)
    }

    /// World position of a fingertip
    pub fn finger_tip(&self, finger: HandFinger) -> Vec3 {
        self.joint(finger.tip_joint()).position
    }

    /// World positions of the thumb chain, base to tip
    pub fn thumb_chain(&self) -> [Vec3; 4] {
        HandJoint::THUMB_CHAIN.map(|joint| self.joint(joint).position)
    }

    /// Convert a point from this hand's mirrored wrist space to world space
    pub fn wrist_point(&self, right_hand_local: Vec3) -> Vec3 {
        self.wrist()
            .transform_point(self.handedness.mirror(right_hand_local))
    }

    /// Rigidly move the whole hand so its wrist lands on `wrist`
    #[must_use]
    pub fn moved_to(&self, wrist: Pose) -> Self {
        let delta = wrist.combine(&self.wrist().inverse());
        let joints = self.joints.map(|pose| delta.combine(&pose));
        Self {
            handedness: self.handedness,
            joints,
        }
    }
}

impl Default for HandJointPoses {
    fn default() -> Self {
        Self::open(Handedness::Right, Pose::new(Vec3::zeros(), Quat::identity()))
    }
}

// ── Grab state ─────────────────────────────────────────────

bitflags! {
    /// Grab modalities a hand can use
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct GrabTypeFlags: u8 {
        /// Thumb-to-finger pinch
        const PINCH = 0b01;
        /// Fingers closing onto the palm
        const PALM = 0b10;
    }
}

/// Per-finger grab record kept by an estimator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FingerRecord {
    /// Fingertip position this tick
    pub tip_position: Vec3,
    /// Continuous strength in [0, 1]
    pub strength: f32,
    /// Discrete grabbing state
    pub is_active: bool,
    /// Whether `is_active` flipped this tick
    pub changed: bool,
}

impl FingerRecord {
    /// Store a new discrete state, recording whether it flipped
    pub(crate) fn set_active(&mut self, active: bool) {
        self.changed = self.is_active != active;
        self.is_active = active;
    }
}

/// Per-finger view over a grab-strength estimator
pub trait FingerApi {
    /// Whether the finger is grabbing
    fn is_finger_grabbing(&self, finger: HandFinger) -> bool;

    /// Whether the finger's grabbing state flipped this tick
    fn is_finger_grabbing_changed(&self, finger: HandFinger) -> bool;

    /// Continuous grab strength in [0, 1]
    fn finger_strength(&self, finger: HandFinger) -> f32;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_left_hand_is_mirrored() {
        let right = HandJointPoses::open(Handedness::Right, Pose::identity());
        let left = HandJointPoses::open(Handedness::Left, Pose::identity());
        let r = right.finger_tip(HandFinger::Thumb);
        let l = left.finger_tip(HandFinger::Thumb);
        assert_relative_eq!(l, Vec3::new(-r.x, r.y, r.z));
    }

    #[test]
    fn test_moved_to_keeps_shape() {
        let hand = HandJointPoses::default();
        let target = Pose::new(
            Vec3::new(1.0, 1.0, 1.0),
            Quat::from_axis_angle(&Vec3::y_axis(), 0.5),
        );
        let moved = hand.moved_to(target);
        assert_relative_eq!(moved.wrist().position, target.position, epsilon = 1e-5);

        let before = (hand.finger_tip(HandFinger::Index) - hand.finger_tip(HandFinger::Thumb)).magnitude();
        let after = (moved.finger_tip(HandFinger::Index) - moved.finger_tip(HandFinger::Thumb)).magnitude();
        assert_relative_eq!(before, after, epsilon = 1e-5);
    }
}
