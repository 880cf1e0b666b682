//! Ray query results.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::registry::SurfaceId;

/// A single ray intersection against one scene surface.
///
/// Normals are reported in world space, pointing away from the surface.
/// The scene returns one hit per intersected surface, nearest first; any
/// filtering (walkable membership, facing, height bands) is left to the
/// caller so the query itself stays policy-free.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RayHit {
    /// Intersection point in world space.
    pub point: Vec3,

    /// World-space surface normal at the intersection.
    pub normal: Vec3,

    /// Surface that was hit.
    pub surface: SurfaceId,

    /// Distance from the ray origin to the intersection.
    pub distance: f32,
}
