//! Circular obstacle volumes and horizontal movement resolution.
//!
//! Obstacles are horizontal circles (mountain footprints, wells, market
//! stalls). A character walking into one slides along the boundary and hugs
//! it at a fixed clearance instead of stopping dead or clipping through.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::config::GroundingConfig;

/// A static circular blocker on the ground plane.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObstacleCollider {
    /// Center on the ground plane (world x, z).
    pub center: Vec2,

    /// Circle radius. Always positive.
    pub radius: f32,
}

/// All obstacle circles of a map.
///
/// Registered once from level data and read-only during gameplay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    colliders: Vec<ObstacleCollider>,
}

impl ObstacleField {
    /// Create an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an obstacle circle.
    ///
    /// Rejects non-positive radii and non-finite centers, returning `false`
    /// for them instead of poisoning later queries.
    pub fn add(&mut self, center: Vec2, radius: f32) -> bool {
        if !center.is_finite() || !radius.is_finite() || radius <= 0.0 {
            log::warn!("ignoring invalid obstacle: center {:?} radius {}", center, radius);
            return false;
        }
        self.colliders.push(ObstacleCollider { center, radius });
        true
    }

    /// The registered colliders.
    pub fn colliders(&self) -> &[ObstacleCollider] {
        &self.colliders
    }

    /// Number of registered colliders.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether the field has no colliders.
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Whether a point lies within `pad` of any obstacle circle.
    pub fn blocks(&self, point: Vec2, pad: f32) -> bool {
        self.colliders
            .iter()
            .any(|c| point.distance(c.center) < c.radius + pad)
    }
}

/// Resolve a desired horizontal displacement against the obstacle field.
///
/// Returns the corrected `(dx, dz)` delta:
///
/// - Unchanged when the destination neither enters nor comes within the
///   configured margin of any collider.
/// - Otherwise the nearest offending collider (ties broken by smaller
///   current distance) is resolved. Movement pointing into the circle is
///   projected onto whichever boundary tangent lies closest to the original
///   direction, turning a dead stop into a slide along the wall.
/// - The destination is then re-anchored to sit exactly at
///   `radius + hug_distance` from the center, so repeated frames of
///   tangential movement hug the boundary instead of drifting.
/// - A safety net catches destinations still inside the circle (large
///   single-frame displacements) with a radial push of the penetration
///   depth plus a small epsilon.
///
/// Never returns non-finite components; degenerate input yields a zero
/// delta. A zero-length desired delta is a no-op.
///
/// Only the nearest collider is resolved per frame. Content places
/// obstacles non-overlapping, so cascading resolution is not needed.
pub fn resolve_horizontal_move(
    field: &ObstacleField,
    current: Vec3,
    desired: Vec2,
    config: &GroundingConfig,
) -> Vec2 {
    if !current.is_finite() || !desired.is_finite() {
        return Vec2::ZERO;
    }
    if desired.length_squared() < 1e-12 {
        return desired;
    }

    let here = Vec2::new(current.x, current.z);
    let target = here + desired;

    let mut nearest: Option<(&ObstacleCollider, f32)> = None;
    for collider in field.colliders() {
        let dist = target.distance(collider.center);
        if dist >= collider.radius + config.obstacle_margin {
            continue;
        }
        let closer = match nearest {
            None => true,
            Some((best, best_dist)) => {
                dist < best_dist
                    || (dist == best_dist
                        && here.distance(collider.center) < here.distance(best.center))
            }
        };
        if closer {
            nearest = Some((collider, dist));
        }
    }

    let Some((collider, _)) = nearest else {
        return desired;
    };

    let away = here - collider.center;
    let outward = if away.length_squared() > 1e-12 {
        away.normalize()
    } else {
        Vec2::X
    };

    let mut corrected = desired;

    if desired.dot(outward) < 0.0 {
        // Moving into the circle: keep only the tangential part, choosing
        // the tangent direction closest to the original movement
        let tangent_a = Vec2::new(-outward.y, outward.x);
        let tangent_b = Vec2::new(outward.y, -outward.x);
        let tangent = if desired.dot(tangent_a) >= desired.dot(tangent_b) {
            tangent_a
        } else {
            tangent_b
        };
        corrected = tangent * desired.dot(tangent);
    }

    // Anchor the destination onto the hug ring
    let destination = here + corrected;
    let offset = destination - collider.center;
    let ring_dir = if offset.length_squared() > 1e-12 {
        offset.normalize()
    } else {
        outward
    };
    let anchored = collider.center + ring_dir * (collider.radius + config.hug_distance);
    corrected = anchored - here;

    // Safety net for anything still inside the circle
    let final_dest = here + corrected;
    let final_offset = final_dest - collider.center;
    let final_dist = final_offset.length();
    if final_dist < collider.radius {
        let push_dir = if final_dist > 1e-6 {
            final_offset / final_dist
        } else {
            outward
        };
        corrected += push_dir * (collider.radius - final_dist + 0.001);
    }

    if !corrected.is_finite() {
        return Vec2::ZERO;
    }
    corrected
}

// ============================================================================
// Tests
// ============================================================================
