//! Math utilities and types
//!
//! Provides the vector and pose types shared by every interaction modality.
//! Axis convention: +X is right, +Y is up, +Z is forward.

pub use nalgebra::{Quaternion, Unit, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Rigid pose: a position and a rotation, no scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Position in world (or parent) space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

impl Pose {
    /// Create a new identity pose
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a pose with position and rotation
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create a pose with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a pose at `position` whose forward axis looks along `forward`
    pub fn looking_along(position: Vec3, forward: Vec3, up: Vec3) -> Self {
        let rotation = Quat::face_towards(&forward, &up);
        Self { position, rotation }
    }

    /// Local +Z axis in parent space
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::z()
    }

    /// Local +Y axis in parent space
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::y()
    }

    /// Local +X axis in parent space
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::x()
    }

    /// Apply this pose to a local point
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * point
    }

    /// Express a parent-space point in this pose's local space
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.position)
    }

    /// Compose: `other` is expressed relative to `self`
    pub fn combine(&self, other: &Pose) -> Pose {
        Pose {
            position: self.transform_point(other.position),
            rotation: self.rotation * other.rotation,
        }
    }

    /// Get the inverse pose
    pub fn inverse(&self) -> Pose {
        let inv_rotation = self.rotation.inverse();
        Pose {
            position: inv_rotation * (-self.position),
            rotation: inv_rotation,
        }
    }

    /// Pose of `other` relative to `self`, so that `self.combine(&rel) == other`
    pub fn relative(&self, other: &Pose) -> Pose {
        self.inverse().combine(other)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Clamp a value to [0, 1]
    pub fn clamp01(value: f32) -> f32 {
        value.clamp(0.0, 1.0)
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Where `value` sits between `a` and `b`, clamped to [0, 1]
    pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
        if (b - a).abs() <= f32::EPSILON {
            return if value >= b { 1.0 } else { 0.0 };
        }
        clamp01((value - a) / (b - a))
    }

    /// Cubic ease-in-out on [0, 1]
    pub fn smoothstep(t: f32) -> f32 {
        let t = clamp01(t);
        t * t * (3.0 - 2.0 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pose_inverse_round_trip() {
        let pose = Pose::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_axis_angle(&Vec3::y_axis(), 0.7),
        );
        let point = Vec3::new(-0.3, 0.5, 2.0);
        let back = pose.inverse_transform_point(pose.transform_point(point));
        assert_relative_eq!(back, point, epsilon = 1e-5);
    }

    #[test]
    fn test_relative_pose_recombines() {
        let a = Pose::new(Vec3::new(0.0, 1.0, 0.0), Quat::from_axis_angle(&Vec3::x_axis(), 0.3));
        let b = Pose::new(Vec3::new(2.0, 0.0, -1.0), Quat::from_axis_angle(&Vec3::z_axis(), -1.1));
        let combined = a.combine(&a.relative(&b));
        assert_relative_eq!(combined.position, b.position, epsilon = 1e-5);
        assert!(combined.rotation.angle_to(&b.rotation) < 1e-4);
    }

    #[test]
    fn test_inverse_lerp_clamps() {
        assert_relative_eq!(utils::inverse_lerp(0.0, 2.0, 1.0), 0.5);
        assert_relative_eq!(utils::inverse_lerp(0.0, 2.0, -1.0), 0.0);
        assert_relative_eq!(utils::inverse_lerp(0.0, 2.0, 5.0), 1.0);
    }
}
