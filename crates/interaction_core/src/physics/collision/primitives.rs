//! Primitive shapes and closest-point algorithms
//!
//! Provides basic geometric primitives (rays, planes, segments, spheres,
//! oriented boxes) with the containment and closest-point queries the
//! interaction modalities score candidates with.

use crate::foundation::math::{Pose, Vec3};

/// A ray for ray casting
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Build the ray travelled between two samples, with its length
    ///
    /// Returns `None` when the points coincide.
    pub fn between(from: Vec3, to: Vec3) -> Option<(Self, f32)> {
        let delta = to - from;
        let length = delta.magnitude();
        if length <= f32::EPSILON {
            return None;
        }
        Some((
            Self {
                origin: from,
                direction: delta / length,
            },
            length,
        ))
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A plane defined by a unit normal and signed distance from origin
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    /// Offset such that `normal . p + distance == 0` on the plane
    pub distance: f32,
}

impl Plane {
    /// Create a plane through `point` facing `normal`
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize();
        let distance = -normal.dot(&point);
        Self { normal, distance }
    }

    /// Get signed distance from point to plane (positive = along the normal)
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.distance
    }

    /// Orthogonal projection of a point onto the plane
    pub fn project_point(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.distance_to_point(point)
    }

    /// Distance along `ray` at which it meets the plane
    ///
    /// `None` when the ray is parallel to the plane or the plane is behind it.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        const EPSILON: f32 = 1e-6;

        let denom = self.normal.dot(&ray.direction);
        if denom.abs() < EPSILON {
            return None;
        }
        let t = -self.distance_to_point(ray.origin) / denom;
        (t >= 0.0).then_some(t)
    }
}

/// A line segment
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    /// Start point
    pub start: Vec3,
    /// End point
    pub end: Vec3,
}

impl Segment {
    /// Creates a new segment
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// Get the closest point on the segment to a given point
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let edge = self.end - self.start;
        let length_sq = edge.magnitude_squared();
        if length_sq <= f32::EPSILON {
            return self.start;
        }
        let t = ((point - self.start).dot(&edge) / length_sq).clamp(0.0, 1.0);
        self.start + edge * t
    }

    /// Distance from a point to the segment
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        (point - self.closest_point(point)).magnitude()
    }

    /// Minimum distance from a point to a chain of connected segments
    ///
    /// Returns `None` for chains with fewer than two points.
    pub fn chain_distance(chain: &[Vec3], point: Vec3) -> Option<f32> {
        chain
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]).distance_to_point(point))
            .reduce(f32::min)
    }
}

/// A bounding sphere
#[derive(Debug, Clone, Copy)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether a point lies strictly inside the sphere
    pub fn contains_point(&self, point: Vec3) -> bool {
        (point - self.center).magnitude_squared() < self.radius * self.radius
    }

    /// Get the closest point on the sphere surface to a given point
    ///
    /// A point at the exact center maps to the top of the sphere.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let offset = point - self.center;
        let length = offset.magnitude();
        if length <= f32::EPSILON {
            return self.center + Vec3::y() * self.radius;
        }
        self.center + offset * (self.radius / length)
    }

    /// Whether another sphere overlaps this one
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }
}

/// A box with arbitrary orientation
#[derive(Debug, Clone, Copy)]
pub struct OrientedBox {
    /// Box center and orientation in world space
    pub pose: Pose,
    /// Half size along each local axis
    pub half_extents: Vec3,
}

impl OrientedBox {
    /// Creates a new oriented box
    pub fn new(pose: Pose, half_extents: Vec3) -> Self {
        Self { pose, half_extents }
    }

    /// Whether a point lies strictly inside the box
    pub fn contains_point(&self, point: Vec3) -> bool {
        let local = self.pose.inverse_transform_point(point);
        local.x.abs() < self.half_extents.x
            && local.y.abs() < self.half_extents.y
            && local.z.abs() < self.half_extents.z
    }

    /// Get the closest point on or in the box to a given point
    ///
    /// Points inside the box are returned unchanged.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let local = self.pose.inverse_transform_point(point);
        let clamped = Vec3::new(
            local.x.clamp(-self.half_extents.x, self.half_extents.x),
            local.y.clamp(-self.half_extents.y, self.half_extents.y),
            local.z.clamp(-self.half_extents.z, self.half_extents.z),
        );
        self.pose.transform_point(clamped)
    }

    /// Radius of the sphere enclosing the box
    pub fn bounding_radius(&self) -> f32 {
        self.half_extents.magnitude()
    }
}
