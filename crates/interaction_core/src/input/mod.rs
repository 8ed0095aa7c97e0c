//! Input collaborator contracts
//!
//! The interaction core never reads devices itself. Hosts feed it through
//! these traits once per frame, before ticking:
//! - [`PoseSource`]: a tracked point or pose (controller, fingertip, head)
//! - [`HandSource`]: a full hand skeleton
//! - [`ActiveState`]: a gate that can force an interactor off
//!
//! The `Shared*` types are ready-made single-threaded implementations: the
//! host keeps one clone and writes into it, the interactor keeps another
//! and reads from it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::foundation::math::Pose;
use crate::hand::HandJointPoses;

/// Source of a tracked pose, `None` while tracking is lost
pub trait PoseSource {
    /// Current pose
    fn pose(&self) -> Option<Pose>;
}

/// Source of a tracked hand skeleton, `None` while tracking is lost
pub trait HandSource {
    /// Current joint poses
    fn hand(&self) -> Option<HandJointPoses>;
}

/// Boolean gate consulted by drivers each tick
pub trait ActiveState {
    /// Whether the gated interactor may run
    fn is_active(&self) -> bool;
}

impl<F: Fn() -> bool> ActiveState for F {
    fn is_active(&self) -> bool {
        self()
    }
}

impl<F: Fn() -> Option<Pose>> PoseSource for F {
    fn pose(&self) -> Option<Pose> {
        self()
    }
}

/// Shared, host-writable pose cell
#[derive(Debug, Clone, Default)]
pub struct SharedPose(Rc<Cell<Option<Pose>>>);

impl SharedPose {
    /// Create an untracked pose cell
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell that already holds a pose
    pub fn tracked(pose: Pose) -> Self {
        Self(Rc::new(Cell::new(Some(pose))))
    }

    /// Write the current pose
    pub fn set(&self, pose: Pose) {
        self.0.set(Some(pose));
    }

    /// Mark tracking as lost
    pub fn clear(&self) {
        self.0.set(None);
    }
}

impl PoseSource for SharedPose {
    fn pose(&self) -> Option<Pose> {
        self.0.get()
    }
}

/// Shared, host-writable hand skeleton cell
#[derive(Debug, Clone, Default)]
pub struct SharedHand(Rc<RefCell<Option<HandJointPoses>>>);

impl SharedHand {
    /// Create an untracked hand cell
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the current skeleton
    pub fn set(&self, hand: HandJointPoses) {
        *self.0.borrow_mut() = Some(hand);
    }

    /// Mark tracking as lost
    pub fn clear(&self) {
        *self.0.borrow_mut() = None;
    }
}

impl HandSource for SharedHand {
    fn hand(&self) -> Option<HandJointPoses> {
        self.0.borrow().clone()
    }
}

/// Shared, host-writable boolean gate
#[derive(Debug, Clone)]
pub struct SharedFlag(Rc<Cell<bool>>);

impl SharedFlag {
    /// Create a gate with an initial value
    pub fn new(active: bool) -> Self {
        Self(Rc::new(Cell::new(active)))
    }

    /// Change the gate
    pub fn set(&self, active: bool) {
        self.0.set(active);
    }
}

impl Default for SharedFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ActiveState for SharedFlag {
    fn is_active(&self) -> bool {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_shared_pose_is_shared() {
        let host = SharedPose::new();
        let reader = host.clone();
        assert!(reader.pose().is_none());

        host.set(Pose::from_position(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(reader.pose().map(|p| p.position.x), Some(1.0));

        host.clear();
        assert!(reader.pose().is_none());
    }

    #[test]
    fn test_closure_gate() {
        let flag = SharedFlag::new(false);
        let probe = flag.clone();
        let gate = move || probe.is_active();
        assert!(!gate.is_active());
        flag.set(true);
        assert!(gate.is_active());
    }
}
