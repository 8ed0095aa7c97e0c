//! Grabbing rules: which fingers make a grab

use serde::{Deserialize, Serialize};

use super::{FingerApi, HandFinger};

/// How much a finger matters to a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FingerRequirement {
    /// Must be grabbing
    Required,
    /// At least one optional finger must be grabbing, if any are listed
    Optional,
    /// Not considered
    Ignored,
}

/// When a held grab lets go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnselectMode {
    /// Release once every counted finger has let go
    #[default]
    AllReleased,
    /// Release as soon as the rule stops being satisfied
    AnyReleased,
}

/// Per-finger requirements for one grab type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrabbingRule {
    requirements: [FingerRequirement; 5],
    /// Release behavior
    pub unselect_mode: UnselectMode,
}

impl GrabbingRule {
    /// Build a rule from requirements ordered thumb first
    pub fn new(requirements: [FingerRequirement; 5], unselect_mode: UnselectMode) -> Self {
        Self {
            requirements,
            unselect_mode,
        }
    }

    /// Thumb required, index or middle completes the pinch
    pub fn default_pinch() -> Self {
        use FingerRequirement::{Ignored, Optional, Required};
        Self::new(
            [Required, Optional, Optional, Ignored, Ignored],
            UnselectMode::AllReleased,
        )
    }

    /// Index and middle closed on the palm, ring or pinky optional
    pub fn default_palm() -> Self {
        use FingerRequirement::{Ignored, Optional, Required};
        Self::new(
            [Ignored, Required, Required, Optional, Optional],
            UnselectMode::AllReleased,
        )
    }

    /// Requirement for one finger
    pub fn requirement(&self, finger: HandFinger) -> FingerRequirement {
        self.requirements[finger.index()]
    }

    /// Change one finger's requirement (builder style)
    #[must_use]
    pub fn with_requirement(mut self, finger: HandFinger, requirement: FingerRequirement) -> Self {
        self.requirements[finger.index()] = requirement;
        self
    }

    /// Change the release behavior (builder style)
    #[must_use]
    pub fn with_unselect_mode(mut self, mode: UnselectMode) -> Self {
        self.unselect_mode = mode;
        self
    }

    fn fingers_with(&self, requirement: FingerRequirement) -> impl Iterator<Item = HandFinger> + '_ {
        HandFinger::ALL
            .into_iter()
            .filter(move |finger| self.requirement(*finger) == requirement)
    }

    fn counted_fingers(&self) -> impl Iterator<Item = HandFinger> + '_ {
        HandFinger::ALL
            .into_iter()
            .filter(|finger| self.requirement(*finger) != FingerRequirement::Ignored)
    }

    /// Whether the fingers currently satisfy the rule
    pub fn selects(&self, api: &dyn FingerApi) -> bool {
        let required_ok = self
            .fingers_with(FingerRequirement::Required)
            .all(|finger| api.is_finger_grabbing(finger));
        let mut optional = self.fingers_with(FingerRequirement::Optional).peekable();
        let optional_ok = optional.peek().is_none()
            || optional.any(|finger| api.is_finger_grabbing(finger));
        let anything_counted = self.counted_fingers().next().is_some();
        anything_counted && required_ok && optional_ok
    }

    /// The rule is satisfied and a counted finger changed this tick
    pub fn just_started(&self, api: &dyn FingerApi) -> bool {
        self.selects(api)
            && self
                .counted_fingers()
                .any(|finger| api.is_finger_grabbing_changed(finger))
    }

    /// Whether a grab held under this rule should let go
    pub fn releases(&self, api: &dyn FingerApi) -> bool {
        match self.unselect_mode {
            UnselectMode::AllReleased => !self
                .counted_fingers()
                .any(|finger| api.is_finger_grabbing(finger)),
            UnselectMode::AnyReleased => !self.selects(api),
        }
    }

    /// Combined strength: the weakest required finger, capped by the
    /// strongest optional one
    pub fn strength(&self, api: &dyn FingerApi) -> f32 {
        let required = self
            .fingers_with(FingerRequirement::Required)
            .map(|finger| api.finger_strength(finger))
            .reduce(f32::min);
        let optional = self
            .fingers_with(FingerRequirement::Optional)
            .map(|finger| api.finger_strength(finger))
            .reduce(f32::max);
        match (required, optional) {
            (Some(required), Some(optional)) => required.min(optional),
            (Some(only), None) | (None, Some(only)) => only,
            (None, None) => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Fixed finger states for rule checks
    #[derive(Default)]
    struct FakeFingers {
        grabbing: [bool; 5],
        changed: [bool; 5],
        strength: [f32; 5],
    }

    impl FakeFingers {
        fn grab(mut self, finger: HandFinger, strength: f32) -> Self {
            self.grabbing[finger.index()] = true;
            self.changed[finger.index()] = true;
            self.strength[finger.index()] = strength;
            self
        }

        fn settled(mut self) -> Self {
            self.changed = [false; 5];
            self
        }
    }

    impl FingerApi for FakeFingers {
        fn is_finger_grabbing(&self, finger: HandFinger) -> bool {
            self.grabbing[finger.index()]
        }
        fn is_finger_grabbing_changed(&self, finger: HandFinger) -> bool {
            self.changed[finger.index()]
        }
        fn finger_strength(&self, finger: HandFinger) -> f32 {
            self.strength[finger.index()]
        }
    }

    #[test]
    fn test_pinch_needs_thumb_and_an_optional() {
        let rule = GrabbingRule::default_pinch();
        let thumb_only = FakeFingers::default().grab(HandFinger::Thumb, 1.0);
        assert!(!rule.selects(&thumb_only));

        let pinch = thumb_only.grab(HandFinger::Middle, 0.8);
        assert!(rule.selects(&pinch));
        assert!(rule.just_started(&pinch));
        assert!(!rule.just_started(&pinch.settled()));
    }

    #[test]
    fn test_ignored_fingers_do_not_start() {
        let rule = GrabbingRule::default_pinch();
        let fingers = FakeFingers::default()
            .grab(HandFinger::Thumb, 1.0)
            .grab(HandFinger::Index, 1.0)
            .settled()
            .grab(HandFinger::Pinky, 1.0);
        assert!(rule.selects(&fingers));
        assert!(!rule.just_started(&fingers));
    }

    #[test]
    fn test_strength_is_min_required_capped_by_max_optional() {
        let rule = GrabbingRule::default_palm();
        let fingers = FakeFingers::default()
            .grab(HandFinger::Index, 0.9)
            .grab(HandFinger::Middle, 0.7)
            .grab(HandFinger::Ring, 0.4)
            .grab(HandFinger::Pinky, 0.6);
        assert_relative_eq!(rule.strength(&fingers), 0.6);

        let no_fingers = GrabbingRule::new([FingerRequirement::Ignored; 5], UnselectMode::AllReleased);
        assert_relative_eq!(no_fingers.strength(&fingers), 0.0);
        assert!(!no_fingers.selects(&fingers));
    }

    #[test]
    fn test_release_modes() {
        let partial = FakeFingers::default().grab(HandFinger::Thumb, 1.0);

        let all = GrabbingRule::default_pinch();
        assert!(!all.releases(&partial));
        assert!(all.releases(&FakeFingers::default()));

        let any = all.with_unselect_mode(UnselectMode::AnyReleased);
        assert!(any.releases(&partial));
    }
}
