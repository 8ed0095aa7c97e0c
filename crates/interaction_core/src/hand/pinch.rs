//! Pinch estimator
//!
//! Each non-thumb finger pinches when its tip comes close to the thumb's
//! bone chain. Release uses a moving threshold: once pinching, the closest
//! distance seen so far is tracked and the pinch only ends when the finger
//! opens past `min(stop_max, closest + stop_offset)`. A pinch that started
//! at the boundary therefore cannot flicker.

use super::{FingerApi, FingerRecord, HandFinger, HandJointPoses};
use crate::config::PinchConfig;
use crate::error::InteractionError;
use crate::foundation::math::{utils, Pose, Vec3};
use crate::physics::Segment;

/// Hysteresis state for one finger
#[derive(Debug, Clone, Copy, Default)]
struct PinchDetector {
    pinching: bool,
    min_distance: f32,
}

impl PinchDetector {
    /// Feed a new distance, returning the resulting pinch state
    fn update(&mut self, distance: f32, start_threshold: f32, config: &PinchConfig) -> bool {
        if self.pinching {
            self.min_distance = self.min_distance.min(distance);
            let release = config.stop_max.min(self.min_distance + config.stop_offset);
            if distance > release {
                self.pinching = false;
            }
        } else if distance < start_threshold {
            self.pinching = true;
            self.min_distance = distance;
        }
        self.pinching
    }
}

/// Thumb-to-finger distance model of grab strength
#[derive(Debug, Clone)]
pub struct FingerPinchApi {
    config: PinchConfig,
    records: [FingerRecord; 5],
    detectors: [PinchDetector; 4],
    distances: [f32; 4],
    well_visible: bool,
}

impl FingerPinchApi {
    /// Create an estimator, validating its thresholds
    pub fn new(config: PinchConfig) -> Result<Self, InteractionError> {
        config.validate()?;
        Ok(Self {
            config,
            records: [FingerRecord::default(); 5],
            detectors: [PinchDetector::default(); 4],
            distances: [f32::MAX; 4],
            well_visible: false,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &PinchConfig {
        &self.config
    }

    /// Update every finger from a new skeleton
    ///
    /// `head` is the headset pose; without it the hand never counts as
    /// well visible and the looser start threshold applies.
    pub fn update(&mut self, hand: &HandJointPoses, head: Option<&Pose>) {
        self.well_visible = head.is_some_and(|head| self.is_well_visible(hand, head));
        let start_threshold = if self.well_visible {
            self.config.visible_start_threshold
        } else {
            self.config.start_threshold
        };

        let thumb_chain = hand.thumb_chain();
        for finger in HandFinger::OPPOSING {
            let tip = hand.finger_tip(finger);
            let distance = Segment::chain_distance(&thumb_chain, tip).unwrap_or(f32::MAX);
            self.apply_distance(finger, tip, distance, start_threshold);
        }
        self.update_thumb(hand.finger_tip(HandFinger::Thumb));
    }

    /// Drop every pinch, e.g. when tracking is lost
    pub fn reset(&mut self) {
        for record in &mut self.records {
            record.set_active(false);
            record.strength = 0.0;
        }
        self.detectors = [PinchDetector::default(); 4];
        self.distances = [f32::MAX; 4];
        self.well_visible = false;
    }

    /// Distance from a fingertip to the thumb chain measured last update
    ///
    /// The thumb reports the smallest distance of any finger.
    pub fn finger_distance(&self, finger: HandFinger) -> f32 {
        match finger {
            HandFinger::Thumb => self.distances.iter().copied().fold(f32::MAX, f32::min),
            other => self.distances[other.index() - 1],
        }
    }

    /// Whether the last update used the tighter, well-visible start threshold
    pub fn is_hand_well_visible(&self) -> bool {
        self.well_visible
    }

    /// The pinky side of the wrist points away from the headset, so the
    /// thumb and index face the cameras.
    fn is_well_visible(&self, hand: &HandJointPoses, head: &Pose) -> bool {
        let pinky_side = hand.wrist().right() * hand.handedness.mirror_sign();
        let angle = pinky_side.angle(&head.forward());
        angle <= utils::deg_to_rad(self.config.visible_angle_deg)
    }

    fn apply_distance(&mut self, finger: HandFinger, tip: Vec3, distance: f32, start_threshold: f32) {
        let slot = finger.index() - 1;
        self.distances[slot] = distance;
        let pinching = self.detectors[slot].update(distance, start_threshold, &self.config);

        let record = &mut self.records[finger.index()];
        record.tip_position = tip;
        record.strength =
            1.0 - utils::inverse_lerp(start_threshold, self.config.stop_max, distance);
        record.set_active(pinching);
    }

    /// The thumb has no detector of its own: it pinches whenever any other
    /// finger pinches against it.
    fn update_thumb(&mut self, tip: Vec3) {
        let (active, strength) = HandFinger::OPPOSING
            .iter()
            .map(|finger| &self.records[finger.index()])
            .fold((false, 0.0_f32), |(active, strength), record| {
                (active || record.is_active, strength.max(record.strength))
            });
        let thumb = &mut self.records[HandFinger::Thumb.index()];
        thumb.tip_position = tip;
        thumb.strength = strength;
        thumb.set_active(active);
    }
}

impl FingerApi for FingerPinchApi {
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
