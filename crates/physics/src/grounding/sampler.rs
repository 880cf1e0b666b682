//! Multi-ray ground sampling.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::{TerrainScene, WalkableSet};

use super::config::GroundingConfig;

/// Height and surface normal of the ground under a point.
///
/// Produced fresh on every query; immutable once returned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GroundSample {
    /// Averaged ground height across the accepted rays.
    pub height: f32,

    /// Renormalized sum of the accepted surface normals (unit length).
    pub normal: Vec3,
}

/// Sample the walkable ground under `(x, z)`.
///
/// Casts four downward rays: one at the query point and three on an
/// equilateral triangle of radius [`GroundingConfig::sample_radius`] around
/// it. A single ray is noise-sensitive at mesh seams and produces visible
/// foot jitter; averaging a handful of nearby samples smooths that out at
/// negligible cost.
///
/// Per ray, the nearest intersection passing all of these filters is kept:
///
/// - the surface is registered in `walkable`
/// - the surface normal points up beyond the minimum up-dot (rejects
///   near-vertical faces and ceilings)
/// - the hit height lies inside the world-height band (rejects stray hits
///   on sky or decorative geometry)
///
/// Returns `None` when no ray accepted a hit, or for non-finite input.
pub fn sample_ground(
    scene: &TerrainScene,
    walkable: &WalkableSet,
    config: &GroundingConfig,
    x: f32,
    z: f32,
) -> Option<GroundSample> {
    if !x.is_finite() || !z.is_finite() {
        return None;
    }

    let r = config.sample_radius;
    let offsets = [
        (0.0, 0.0),
        (r, 0.0),
        (-r * 0.5, r * 0.866),
        (-r * 0.5, -r * 0.866),
    ];

    let mut hit_count = 0u32;
    let mut height_sum = 0.0f32;
    let mut normal_sum = Vec3::ZERO;

    for (ox, oz) in offsets {
        let origin = Vec3::new(x + ox, config.ray_height, z + oz);
        let hits = scene.cast_ray(origin, Vec3::NEG_Y, config.ray_length());

        let accepted = hits.iter().find(|hit| {
            walkable.contains(hit.surface)
                && hit.normal.y > config.min_surface_up_dot
                && hit.point.y > config.min_ground_y
                && hit.point.y < config.max_ground_y
        });

        if let Some(hit) = accepted {
            hit_count += 1;
            height_sum += hit.point.y;
            normal_sum += hit.normal;
        }
    }

    if hit_count == 0 {
        return None;
    }

    let height = height_sum / hit_count as f32;
    if !height.is_finite() {
        return None;
    }

    let normal = if normal_sum.length_squared() > 1e-6 {
        normal_sum.normalize()
    } else {
        Vec3::Y
    };

    Some(GroundSample { height, normal })
}

// ============================================================================
// Tests
// ============================================================================
