//! Palm grab estimator
//!
//! Strength of each finger is how deep its tip sits inside a spherical
//! shell around the palm center. Fingers start grabbing above
//! `start_strength` and release below `release_strength`.

use super::{FingerApi, FingerRecord, HandFinger, HandJointPoses};
use crate::config::PalmGrabConfig;
use crate::error::InteractionError;
use crate::foundation::math::{utils, Vec3};

/// Fingertip-to-palm model of grab strength
#[derive(Debug, Clone)]
pub struct FingerPalmGrabApi {
    config: PalmGrabConfig,
    records: [FingerRecord; 5],
    palm_center: Vec3,
}

impl FingerPalmGrabApi {
    /// Create an estimator, validating its thresholds
    pub fn new(config: PalmGrabConfig) -> Result<Self, InteractionError> {
        config.validate()?;
        Ok(Self {
            config,
            records: [FingerRecord::default(); 5],
            palm_center: Vec3::zeros(),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &PalmGrabConfig {
        &self.config
    }

    /// World-space palm center from the last update
    pub fn palm_center(&self) -> Vec3 {
        self.palm_center
    }

    /// Update every finger, thumb included, from a new skeleton
    pub fn update(&mut self, hand: &HandJointPoses) {
        self.palm_center = hand.wrist_point(self.config.palm_offset);
        for finger in HandFinger::ALL {
            let tip = hand.finger_tip(finger);
            let strength = self.strength_at((tip - self.palm_center).magnitude());

            let was_active = self.records[finger.index()].is_active;
            let active = if was_active {
                strength > self.config.release_strength
            } else {
                strength >= self.config.start_strength
            };

            let record = &mut self.records[finger.index()];
            record.tip_position = tip;
            record.strength = strength;
            record.set_active(active);
        }
    }

    /// Drop every grab, e.g. when tracking is lost
    pub fn reset(&mut self) {
        for record in &mut self.records {
            record.set_active(false);
            record.strength = 0.0;
        }
    }

    fn strength_at(&self, distance: f32) -> f32 {
        let tip = self.config.fingertip_radius;
        1.0 - utils::inverse_lerp(
            self.config.inner_radius + tip,
            self.config.outer_radius + tip,
            distance,
        )
    }
}

impl FingerApi for FingerPalmGrabApi {
    fn is_finger_grabbing(&self, finger: HandFinger) -> bool {
        self.records[finger.index()].is_active
    }

    fn is_finger_grabbing_changed(&self, finger: HandFinger) -> bool {
        self.records[finger.index()].changed
    }

    fn finger_strength(&self, finger: HandFinger) -> f32 {
        self.records[finger.index()].strength
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Pose;
    use crate::hand::{HandJoint, Handedness};
    use approx::assert_relative_eq;

    fn hand_with_index_at(offset_from_center: Vec3) -> HandJointPoses {
        let hand = HandJointPoses::open(Handedness::Right, Pose::identity());
        let center = hand.wrist_point(PalmGrabConfig::default().palm_offset);
        hand.with_joint_position(HandJoint::IndexTip, center + offset_from_center)
    }

    #[test]
    fn test_open_hand_has_no_strength() {
        let mut api = FingerPalmGrabApi::new(PalmGrabConfig::default()).unwrap();
        api.update(&HandJointPoses::default());
        for finger in HandFinger::ALL {
            assert!(!api.is_finger_grabbing(finger));
        }
        assert_relative_eq!(api.finger_strength(HandFinger::Index), 0.0);
    }

    #[test]
    fn test_curled_finger_grabs_with_hysteresis() {
        let mut api = FingerPalmGrabApi::new(PalmGrabConfig::default()).unwrap();

        api.update(&hand_with_index_at(Vec3::zeros()));
        assert!(api.is_finger_grabbing(HandFinger::Index));
        assert!(api.is_finger_grabbing_changed(HandFinger::Index));
        assert_relative_eq!(api.finger_strength(HandFinger::Index), 1.0);

        // Shell spans 0.04..0.09; 0.065 is strength 0.5, between the bands
        api.update(&hand_with_index_at(Vec3::new(0.0, 0.0, 0.065)));
        assert!(api.is_finger_grabbing(HandFinger::Index));
        assert!(!api.is_finger_grabbing_changed(HandFinger::Index));

        api.update(&hand_with_index_at(Vec3::new(0.0, 0.0, 0.08)));
        assert!(!api.is_finger_grabbing(HandFinger::Index));

        // Strength 0.5 is not enough to start again
        api.update(&hand_with_index_at(Vec3::new(0.0, 0.0, 0.065)));
        assert!(!api.is_finger_grabbing(HandFinger::Index));
    }

    #[test]
    fn test_left_palm_center_is_mirrored() {
        let config = PalmGrabConfig {
            palm_offset: Vec3::new(0.02, -0.03, 0.06),
            ..PalmGrabConfig::default()
        };
        let mut api = FingerPalmGrabApi::new(config).unwrap();
        api.update(&HandJointPoses::open(Handedness::Left, Pose::identity()));
        assert_relative_eq!(api.palm_center(), Vec3::new(-0.02, -0.03, 0.06));
    }
}
