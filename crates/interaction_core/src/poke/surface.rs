//! Rectangular poke surface

use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, InteractionError};
use crate::foundation::math::{Pose, Vec2, Vec3};
use crate::physics::Plane;

/// Rectangle centered on its pose, spanning local X and Y
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PokeSurface {
    /// Half width and half height
    pub half_extents: Vec2,
}

impl PokeSurface {
    /// Surface of the given half size
    pub fn new(half_extents: Vec2) -> Result<Self, InteractionError> {
        ensure_positive("poke.surface.half_width", half_extents.x)?;
        ensure_positive("poke.surface.half_height", half_extents.y)?;
        Ok(Self { half_extents })
    }

    /// Plane of the surface at `pose`, normal along the press direction
    pub fn plane(&self, pose: &Pose) -> Plane {
        Plane::from_point_normal(pose.position, pose.forward())
    }

    /// How far `point` has pushed into the surface; negative in front of it
    pub fn depth(&self, pose: &Pose, point: Vec3) -> f32 {
        (point - pose.position).dot(&pose.forward())
    }

    /// Position of `point` within the surface's plane, in local units
    pub fn planar(&self, pose: &Pose, point: Vec3) -> Vec2 {
        pose.inverse_transform_point(point).xy()
    }

    /// Clamp a planar position onto the rectangle
    pub fn clamp_planar(&self, planar: Vec2) -> Vec2 {
        Vec2::new(
            planar.x.clamp(-self.half_extents.x, self.half_extents.x),
            planar.y.clamp(-self.half_extents.y, self.half_extents.y),
        )
    }

    /// World position of a planar position on the surface
    pub fn planar_to_world(&self, pose: &Pose, planar: Vec2) -> Vec3 {
        pose.transform_point(Vec3::new(planar.x, planar.y, 0.0))
    }

    /// Closest point of the rectangle to `point`
    pub fn closest_surface_point(&self, pose: &Pose, point: Vec3) -> Vec3 {
        let planar = self.clamp_planar(self.planar(pose, point));
        self.planar_to_world(pose, planar)
    }

    /// Distance from `point` to the rectangle
    pub fn distance(&self, pose: &Pose, point: Vec3) -> f32 {
        (point - self.closest_surface_point(pose, point)).magnitude()
    }

    /// Radius of a sphere around the pose enclosing the rectangle
    pub fn bounding_radius(&self) -> f32 {
        self.half_extents.magnitude()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Quat;
    use approx::assert_relative_eq;

    fn panel() -> PokeSurface {
        PokeSurface::new(Vec2::new(0.1, 0.05)).unwrap()
    }

    #[test]
    fn test_depth_along_press_direction() {
        // Panel at z = 1 facing the user, pressed toward +Z
        let pose = Pose::from_position(Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(panel().depth(&pose, Vec3::new(0.0, 0.0, 0.98)), -0.02, epsilon = 1e-6);
        assert_relative_eq!(panel().depth(&pose, Vec3::new(0.3, 0.0, 1.01)), 0.01, epsilon = 1e-6);
    }

    #[test]
    fn test_closest_point_clamps_to_rectangle() {
        let pose = Pose::new(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2),
        );
        // Local X maps to world -Z after the quarter turn
        let point = pose.transform_point(Vec3::new(0.3, 0.01, -0.2));
        let closest = panel().closest_surface_point(&pose, point);
        assert_relative_eq!(
            pose.inverse_transform_point(closest),
            Vec3::new(0.1, 0.01, 0.0),
            epsilon = 1e-5
        );
        assert_relative_eq!(panel().distance(&pose, point), (0.2_f32 * 0.2 + 0.2 * 0.2).sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn test_rejects_degenerate_size() {
        assert!(PokeSurface::new(Vec2::new(0.0, 0.1)).is_err());
    }
}
