//! Combined pinch and palm grab state for one hand

use super::{FingerApi, FingerPalmGrabApi, FingerPinchApi, GrabTypeFlags, GrabbingRule, HandJointPoses};
use crate::config::{PalmGrabConfig, PinchConfig};
use crate::error::InteractionError;
use crate::foundation::math::{Pose, Vec3};

/// Runs both estimators over the same skeleton each tick
#[derive(Debug, Clone)]
pub struct HandGrabApi {
    pinch: FingerPinchApi,
    palm: FingerPalmGrabApi,
    hand: Option<HandJointPoses>,
}

impl HandGrabApi {
    /// Create both estimators
    pub fn new(pinch: PinchConfig, palm: PalmGrabConfig) -> Result<Self, InteractionError> {
        Ok(Self {
            pinch: FingerPinchApi::new(pinch)?,
            palm: FingerPalmGrabApi::new(palm)?,
            hand: None,
        })
    }

    /// Feed the latest skeleton; `None` means tracking was lost and every
    /// finger releases.
    pub fn update(&mut self, hand: Option<&HandJointPoses>, head: Option<&Pose>) {
        match hand {
            Some(hand) => {
                self.pinch.update(hand, head);
                self.palm.update(hand);
                self.hand = Some(hand.clone());
            }
            None => {
                if self.hand.take().is_some() {
                    log::trace!("hand tracking lost, releasing all fingers");
                }
                self.pinch.reset();
                self.palm.reset();
            }
        }
    }

    /// Whether the last update had a tracked hand
    pub fn is_tracked(&self) -> bool {
        self.hand.is_some()
    }

    /// Skeleton from the last update
    pub fn hand(&self) -> Option<&HandJointPoses> {
        self.hand.as_ref()
    }

    /// Wrist pose from the last update
    pub fn wrist_pose(&self) -> Option<Pose> {
        self.hand.as_ref().map(|hand| *hand.wrist())
    }

    /// Palm volume center from the last update
    pub fn palm_center(&self) -> Option<Vec3> {
        self.hand.as_ref().map(|_| self.palm.palm_center())
    }

    /// Pinch estimator
    pub fn pinch(&self) -> &FingerPinchApi {
        &self.pinch
    }

    /// Palm estimator
    pub fn palm(&self) -> &FingerPalmGrabApi {
        &self.palm
    }

    /// Finger view for a single grab type, `None` for empty or mixed flags
    pub fn api(&self, grab_type: GrabTypeFlags) -> Option<&dyn FingerApi> {
        if grab_type == GrabTypeFlags::PINCH {
            Some(&self.pinch)
        } else if grab_type == GrabTypeFlags::PALM {
            Some(&self.palm)
        } else {
            None
        }
    }

    /// Grab types in `types` whose rule is satisfied right now
    pub fn selecting_types(
        &self,
        types: GrabTypeFlags,
        rule_for: impl Fn(GrabTypeFlags) -> GrabbingRule,
    ) -> GrabTypeFlags {
        types
            .iter()
            .filter(|single| {
                self.api(*single)
                    .is_some_and(|api| rule_for(*single).selects(api))
            })
            .collect()
    }
}
