//! Last-resort relocation onto nearby ground.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::scene::{TerrainScene, WalkableSet};

use super::config::GroundingConfig;
use super::obstacle::ObstacleField;
use super::sampler::sample_ground;
use super::slope::is_too_steep;
use super::state::CharacterState;

/// Relocate a stranded character onto the nearest standable ground.
///
/// Searches expanding rings around the character's `(x, z)`, from radius
/// zero outward in `step` increments up to `max_radius`. Each ring is
/// probed at evenly spaced points (at least eight, more on larger rings so
/// spacing stays near `step`); a point is accepted if it samples standable
/// ground and does not sit inside an obstacle. The first accepted point
/// wins: the character is moved there, stood at the sampled height, and its
/// fall bookkeeping reset.
///
/// Returns `true` on relocation. On failure the state is left untouched so
/// the caller can escalate (respawn, teleport to a safe point).
pub fn snap_to_nearest_ground(
    state: &mut CharacterState,
    scene: &TerrainScene,
    walkable: &WalkableSet,
    obstacles: &ObstacleField,
    config: &GroundingConfig,
    max_radius: f32,
    step: f32,
) -> bool {
    if !max_radius.is_finite() || !step.is_finite() || step <= 0.0 || max_radius < 0.0 {
        log::warn!(
            "ground recovery called with bad search params: max_radius {} step {}",
            max_radius,
            step
        );
        return false;
    }

    let origin = state.horizontal();

    let mut radius = 0.0f32;
    while radius <= max_radius + 1e-6 {
        let points = if radius < step * 0.5 {
            1
        } else {
            ((TAU * radius / step) as usize).max(8)
        };

        for k in 0..points {
            let angle = k as f32 / points as f32 * TAU;
            let candidate = origin + Vec2::new(angle.cos(), angle.sin()) * radius;

            if obstacles.blocks(candidate, config.hug_distance) {
                continue;
            }

            let sample = match sample_ground(scene, walkable, config, candidate.x, candidate.y) {
                Some(sample) => sample,
                None => continue,
            };
            if is_too_steep(sample.normal, config.max_slope_deg) {
                continue;
            }

            let stand = sample.height + config.foot_offset;
            state.position.x = candidate.x;
            state.position.z = candidate.y;
            state.position.y = stand;
            state.settle(stand);
            log::info!(
                "recovered character to ({:.2}, {:.2}, {:.2}) after ring search at r={:.2}",
                candidate.x,
                stand,
                candidate.y,
                radius
            );
            return true;
        }

        radius += step;
    }

    log::warn!(
        "ground recovery found nothing within {} of ({:.2}, {:.2})",
        max_radius,
        origin.x,
        origin.y
    );
    false
}

// ============================================================================
// Tests
// ============================================================================
