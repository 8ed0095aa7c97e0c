//! # Interaction Settings
//!
//! Typed, serializable settings for every interaction subsystem. Each
//! struct carries its own defaults and a `validate` step; the top-level
//! [`InteractionConfig`] validates all of them together.

use serde::{Deserialize, Serialize};

use super::Config;
use crate::error::{ensure_non_negative, ensure_positive, InteractionError};
use crate::foundation::math::Vec3;
use crate::interaction::driver_group::GroupStrategy;
use crate::interaction::interactable::InteractableLimits;

/// # Pinch Estimator Configuration
///
/// Distances are in meters between a fingertip and the thumb bone chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchConfig {
    /// Distance under which a pinch starts
    pub start_threshold: f32,
    /// Tighter start distance used while the hand faces the headset
    pub visible_start_threshold: f32,
    /// Release once the distance exceeds the closest distance seen plus this
    pub stop_offset: f32,
    /// Release distance cap
    pub stop_max: f32,
    /// Maximum angle (degrees) between wrist and head forward for the hand
    /// to count as well visible
    pub visible_angle_deg: f32,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            start_threshold: 0.03,
            visible_start_threshold: 0.02,
            stop_offset: 0.04,
            stop_max: 0.1,
            visible_angle_deg: 45.0,
        }
    }
}

impl PinchConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), InteractionError> {
        ensure_positive("pinch.start_threshold", self.start_threshold)?;
        ensure_positive("pinch.visible_start_threshold", self.visible_start_threshold)?;
        ensure_non_negative("pinch.stop_offset", self.stop_offset)?;
        ensure_non_negative("pinch.visible_angle_deg", self.visible_angle_deg)?;
        if self.start_threshold >= self.stop_max {
            return Err(InteractionError::InvertedThresholds {
                name: "pinch",
                start: self.start_threshold,
                stop: self.stop_max,
            });
        }
        if self.visible_start_threshold > self.start_threshold {
            return Err(InteractionError::InvertedThresholds {
                name: "pinch.visible",
                start: self.visible_start_threshold,
                stop: self.start_threshold,
            });
        }
        Ok(())
    }
}

/// # Palm Grab Estimator Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PalmGrabConfig {
    /// Palm volume center in right-hand wrist space (mirrored on X for the left hand)
    pub palm_offset: Vec3,
    /// Fingertips closer than this to the palm center grab at full strength
    pub inner_radius: f32,
    /// Fingertips farther than this have zero strength
    pub outer_radius: f32,
    /// Fingertip radius added to both bounds
    pub fingertip_radius: f32,
    /// Strength at which a finger starts grabbing
    pub start_strength: f32,
    /// Strength under which a grabbing finger releases
    pub release_strength: f32,
}

impl Default for PalmGrabConfig {
    fn default() -> Self {
        Self {
            palm_offset: Vec3::new(0.0, -0.03, 0.06),
            inner_radius: 0.03,
            outer_radius: 0.08,
            fingertip_radius: 0.01,
            start_strength: 0.75,
            release_strength: 0.25,
        }
    }
}

impl PalmGrabConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), InteractionError> {
        ensure_non_negative("palm.inner_radius", self.inner_radius)?;
        ensure_positive("palm.outer_radius", self.outer_radius)?;
        ensure_non_negative("palm.fingertip_radius", self.fingertip_radius)?;
        if self.inner_radius >= self.outer_radius {
            return Err(InteractionError::InvertedThresholds {
                name: "palm.radius",
                start: self.inner_radius,
                stop: self.outer_radius,
            });
        }
        if !(self.release_strength < self.start_strength
            && self.start_strength <= 1.0
            && self.release_strength >= 0.0)
        {
            return Err(InteractionError::InvertedThresholds {
                name: "palm.strength",
                start: self.start_strength,
                stop: self.release_strength,
            });
        }
        Ok(())
    }
}

/// # Poke Configuration
///
/// Interactor radius plus the defaults new poke interactables start from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokeConfig {
    /// Radius of the poking fingertip
    pub radius: f32,
    /// Hover range measured from the surface
    pub max_distance: f32,
    /// While dragging, release once farther than this from the surface
    pub release_distance: f32,
    /// Release once backed out of the surface by more than this
    pub release_threshold: f32,
    /// Planar drift along the surface's right axis that starts a drag
    pub drag_threshold_horizontal: f32,
    /// Planar drift along the surface's up axis that starts a drag
    pub drag_threshold_vertical: f32,
    /// Seconds the pinned touch point takes to catch up after a drag starts
    pub drag_ease_time: f32,
}

impl Default for PokeConfig {
    fn default() -> Self {
        Self {
            radius: 0.005,
            max_distance: 0.1,
            release_distance: 0.05,
            release_threshold: 0.005,
            drag_threshold_horizontal: 0.03,
            drag_threshold_vertical: 0.03,
            drag_ease_time: 0.1,
        }
    }
}

impl PokeConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), InteractionError> {
        ensure_non_negative("poke.radius", self.radius)?;
        ensure_positive("poke.max_distance", self.max_distance)?;
        ensure_positive("poke.release_distance", self.release_distance)?;
        ensure_non_negative("poke.release_threshold", self.release_threshold)?;
        ensure_positive("poke.drag_threshold_horizontal", self.drag_threshold_horizontal)?;
        ensure_positive("poke.drag_threshold_vertical", self.drag_threshold_vertical)?;
        ensure_non_negative("poke.drag_ease_time", self.drag_ease_time)?;
        Ok(())
    }
}

/// # Hand Grab Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandGrabConfig {
    /// Interactables whose bounds are farther than this from the palm are not listed
    pub hover_range: f32,
    /// Grab points farther than this from the wrist cannot be snapped to
    pub max_snap_distance: f32,
    /// Weight of positional error (per meter) when ranking snap poses
    pub position_weight: f32,
    /// Weight of rotational error (per radian) when ranking snap poses
    pub rotation_weight: f32,
}

impl Default for HandGrabConfig {
    fn default() -> Self {
        Self {
            hover_range: 0.15,
            max_snap_distance: 0.2,
            position_weight: 1.0,
            rotation_weight: 0.05,
        }
    }
}

impl HandGrabConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), InteractionError> {
        ensure_positive("hand_grab.hover_range", self.hover_range)?;
        ensure_positive("hand_grab.max_snap_distance", self.max_snap_distance)?;
        ensure_non_negative("hand_grab.position_weight", self.position_weight)?;
        ensure_non_negative("hand_grab.rotation_weight", self.rotation_weight)?;
        Ok(())
    }
}

/// # Grab Configuration
///
/// Capacity defaults applied to new interactables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GrabConfig {
    /// Capacity limits
    pub limits: InteractableLimits,
}

impl GrabConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), InteractionError> {
        self.limits.validate()
    }
}

/// # Driver Group Configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DriverGroupConfig {
    /// Arbitration strategy
    pub strategy: GroupStrategy,
}

/// # Logging Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), InteractionError> {
        crate::foundation::logging::parse_level(&self.level).map(|_| ())
    }
}

/// # Complete Interaction Configuration
///
/// Top-level configuration that encompasses all interaction subsystems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InteractionConfig {
    /// Pinch estimator
    pub pinch: PinchConfig,
    /// Palm grab estimator
    pub palm: PalmGrabConfig,
    /// Poke interactor and interactable defaults
    pub poke: PokeConfig,
    /// Hand grab interactor
    pub hand_grab: HandGrabConfig,
    /// Grab interactable defaults
    pub grab: GrabConfig,
    /// Driver group arbitration
    pub group: DriverGroupConfig,
    /// Logging
    pub logging: LoggingConfig,
}

impl InteractionConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), InteractionError> {
        self.pinch.validate()?;
        self.palm.validate()?;
        self.poke.validate()?;
        self.hand_grab.validate()?;
        self.grab.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Parse TOML text and validate the result
    pub fn from_toml_validated(contents: &str) -> Result<Self, super::ConfigError> {
        let config = Self::from_toml_str(contents)?;
        config.validate()?;
        Ok(config)
    }
}

impl Config for InteractionConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        InteractionConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = InteractionConfig::from_toml_validated(
            r#"
            [pinch]
            start_threshold = 0.025

            [group]
            strategy = "First"

            [grab.limits]
            max_selecting_interactors = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.pinch.start_threshold, 0.025);
        assert_eq!(config.pinch.stop_max, PinchConfig::default().stop_max);
        assert_eq!(config.group.strategy, GroupStrategy::First);
        assert_eq!(config.grab.limits.max_selecting_interactors, Some(1));
        assert_eq!(config.grab.limits.max_interactors, None);
    }

    #[test]
    fn test_inverted_pinch_band_is_rejected() {
        let pinch = PinchConfig {
            start_threshold: 0.2,
            ..PinchConfig::default()
        };
        assert!(matches!(
            pinch.validate(),
            Err(InteractionError::InvertedThresholds { name: "pinch", .. })
        ));
    }

    #[test]
    fn test_invalid_file_surfaces_as_config_error() {
        let result = InteractionConfig::from_toml_validated("[logging]\nlevel = \"shouty\"\n");
        assert!(matches!(result, Err(super::super::ConfigError::Invalid(_))));
    }

    #[test]
    fn test_ron_parse() {
        let config =
            InteractionConfig::from_ron_str("(poke: (radius: 0.01), group: (strategy: Multiple))")
                .unwrap();
        assert_eq!(config.poke.radius, 0.01);
        assert_eq!(config.group.strategy, GroupStrategy::Multiple);
    }
}
