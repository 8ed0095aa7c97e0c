//! Collider shapes
//!
//! Colliders are stored in the owning interactable's model space and
//! transformed to world space on demand when a modality queries them.

use serde::{Deserialize, Serialize};

use super::primitives::{BoundingSphere, OrientedBox};
use crate::error::{ensure_positive, InteractionError};
use crate::foundation::math::{Pose, Vec3};

/// Collider shape types (stored in MODEL SPACE)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Sphere with a local center
    Sphere {
        /// Local center
        center: Vec3,
        /// Radius
        radius: f32,
    },
    /// Box aligned with the owner's axes
    Box {
        /// Local center
        center: Vec3,
        /// Half size along each local axis
        half_extents: Vec3,
    },
}

impl ColliderShape {
    /// Sphere centered on the owner
    pub fn sphere(radius: f32) -> Result<Self, InteractionError> {
        ensure_positive("collider.radius", radius)?;
        Ok(Self::Sphere {
            center: Vec3::zeros(),
            radius,
        })
    }

    /// Box centered on the owner
    pub fn cuboid(half_extents: Vec3) -> Result<Self, InteractionError> {
        ensure_positive("collider.half_extents.x", half_extents.x)?;
        ensure_positive("collider.half_extents.y", half_extents.y)?;
        ensure_positive("collider.half_extents.z", half_extents.z)?;
        Ok(Self::Box {
            center: Vec3::zeros(),
            half_extents,
        })
    }

    /// Move the shape's local center
    #[must_use]
    pub fn with_center(self, local_center: Vec3) -> Self {
        match self {
            Self::Sphere { radius, .. } => Self::Sphere {
                center: local_center,
                radius,
            },
            Self::Box { half_extents, .. } => Self::Box {
                center: local_center,
                half_extents,
            },
        }
    }

    /// Distance from the owner origin to the farthest point of the shape
    pub fn local_bounding_radius(&self) -> f32 {
        match self {
            Self::Sphere { center, radius } => center.magnitude() + radius,
            Self::Box {
                center,
                half_extents,
            } => center.magnitude() + half_extents.magnitude(),
        }
    }

    /// Transform this shape to world space using the owner's pose
    pub fn to_world_space(&self, owner: &Pose) -> WorldCollider {
        match self {
            Self::Sphere { center, radius } => {
                WorldCollider::Sphere(BoundingSphere::new(owner.transform_point(*center), *radius))
            }
            Self::Box {
                center,
                half_extents,
            } => WorldCollider::Box(OrientedBox::new(
                Pose::new(owner.transform_point(*center), owner.rotation),
                *half_extents,
            )),
        }
    }
}

/// World-space collider (temporary, for queries only)
#[derive(Debug, Clone, Copy)]
pub enum WorldCollider {
    /// World-space sphere
    Sphere(BoundingSphere),
    /// World-space box
    Box(OrientedBox),
}

impl WorldCollider {
    /// Center of the collider's bounds
    pub fn bounds_center(&self) -> Vec3 {
        match self {
            Self::Sphere(sphere) => sphere.center,
            Self::Box(cuboid) => cuboid.pose.position,
        }
    }

    /// Whether a point lies strictly inside
    pub fn contains_point(&self, point: Vec3) -> bool {
        match self {
            Self::Sphere(sphere) => sphere.contains_point(point),
            Self::Box(cuboid) => cuboid.contains_point(point),
        }
    }

    /// Distance from an outside point to the collider surface
    ///
    /// Zero for points inside.
    pub fn distance_to_surface(&self, point: Vec3) -> f32 {
        match self {
            Self::Sphere(sphere) => ((point - sphere.center).magnitude() - sphere.radius).max(0.0),
            Self::Box(cuboid) => (point - cuboid.closest_point(point)).magnitude(),
        }
    }

    /// Bounding sphere of the collider
    pub fn bounding_sphere(&self) -> BoundingSphere {
        match self {
            Self::Sphere(sphere) => *sphere,
            Self::Box(cuboid) => BoundingSphere::new(cuboid.pose.position, cuboid.bounding_radius()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_shape_follows_owner_pose() {
        let shape = ColliderShape::sphere(0.5)
            .unwrap()
            .with_center(Vec3::new(1.0, 0.0, 0.0));
        let owner = Pose::from_position(Vec3::new(0.0, 2.0, 0.0));
        let world = shape.to_world_space(&owner);

        assert_relative_eq!(world.bounds_center(), Vec3::new(1.0, 2.0, 0.0));
        assert!(world.contains_point(Vec3::new(1.2, 2.0, 0.0)));
        assert_relative_eq!(world.distance_to_surface(Vec3::new(3.0, 2.0, 0.0)), 1.5);
    }

    #[test]
    fn test_box_surface_distance() {
        let shape = ColliderShape::cuboid(Vec3::new(0.5, 0.5, 0.5)).unwrap();
        let world = shape.to_world_space(&Pose::identity());
        assert_relative_eq!(world.distance_to_surface(Vec3::new(2.0, 0.0, 0.0)), 1.5);
        assert_relative_eq!(world.distance_to_surface(Vec3::new(0.1, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_invalid_sizes_are_rejected() {
        assert!(ColliderShape::sphere(0.0).is_err());
        assert!(ColliderShape::cuboid(Vec3::new(1.0, -1.0, 1.0)).is_err());
    }
}
