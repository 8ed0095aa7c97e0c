//! Collision geometry for interaction queries
//!
//! # Architecture
//!
//! - **Model Space Storage**: Collider shapes are stored in the owner's local coordinates
//! - **On-Demand Transformation**: Shapes are moved to world space only when queried
//!
//! # Module Organization
//!
//! - [`primitives`] - Basic geometric primitives (rays, planes, segments, spheres, boxes)
//! - [`shape`] - Collider shapes attached to interactables

pub mod primitives;
pub mod shape;

// Re-export commonly used types
pub use primitives::{BoundingSphere, OrientedBox, Plane, Ray, Segment};
pub use shape::{ColliderShape, WorldCollider};
