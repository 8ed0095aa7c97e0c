//! Geometry used by the interaction modalities
//!
//! Provides the primitives candidate scoring runs on (planes, segments,
//! spheres, boxes), collider shapes stored in model space, and layer bits
//! for filtering.

pub mod collision;
pub mod interaction_layers;

pub use collision::{BoundingSphere, ColliderShape, OrientedBox, Plane, Ray, Segment, WorldCollider};
pub use interaction_layers::InteractionLayers;
