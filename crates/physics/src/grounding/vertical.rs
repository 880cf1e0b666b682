//! Vertical clamping onto sampled ground.

use crate::math::smooth_damp;
use crate::scene::{TerrainScene, WalkableSet};

use super::config::{GroundingConfig, VerticalMode};
use super::sampler::sample_ground;
use super::slope::is_too_steep;
use super::state::CharacterState;

/// Move a character's height toward the ground under it.
///
/// Runs one of three regimes based on what the sampler reports at the
/// character's `(x, z)`:
///
/// - **Acceptable ground**: pull `position.y` toward
///   `height + foot_offset` using the configured [`VerticalMode`], zero the
///   fall velocity and remember the height as last-known-good.
/// - **Ground too steep**: never correct upward; gravity may still drag the
///   character down until it rests at the surface, so it slides off instead
///   of climbing.
/// - **No ground**: integrate gravity, with the fall bounded relative to
///   the last-known-good height so one bad frame cannot fling the character
///   into the void, and a float-up cap for the mirror-image failure.
///
/// A height outside the world band skips straight to the first available
/// sample. All inputs are sanitized before use; `dt` is clamped to
/// `0..=max_dt`.
pub fn clamp_to_ground(
    state: &mut CharacterState,
    scene: &TerrainScene,
    walkable: &WalkableSet,
    config: &GroundingConfig,
    dt: f32,
) {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, config.max_dt)
    } else {
        0.0
    };

    if !state.vertical_velocity.is_finite() {
        state.vertical_velocity = 0.0;
    }
    if !state.damp_velocity.is_finite() {
        state.damp_velocity = 0.0;
    }
    if !state.position.y.is_finite() {
        state.position.y = state.last_ground_height;
        state.vertical_velocity = 0.0;
    }

    let (x, z) = (state.position.x, state.position.z);

    // A ridiculous height means something upstream went wrong; take the
    // first sample available rather than easing toward it for seconds
    if state.position.y <= config.min_ground_y || state.position.y >= config.max_ground_y {
        if let Some(sample) = sample_ground(scene, walkable, config, x, z) {
            let target = sample.height + config.foot_offset;
            state.position.y = target;
            state.settle(target);
            return;
        }
    }

    let sample = sample_ground(scene, walkable, config, x, z);

    match sample {
        Some(sample) if !is_too_steep(sample.normal, config.max_slope_deg) => {
            let target = sample.height + config.foot_offset;

            match config.vertical_mode {
                VerticalMode::Snap => {
                    let gap = target - state.position.y;
                    if gap.abs() > config.max_snap_jump {
                        // Single-frame jumps this large are sampling noise;
                        // walk toward them one step at a time
                        state.position.y += config.snap_step.copysign(gap);
                    } else if gap.abs() > config.snap_threshold {
                        state.position.y = target;
                    }
                }
                VerticalMode::SmoothDamp => {
                    let (new_y, new_velocity) = smooth_damp(
                        state.position.y,
                        target,
                        state.damp_velocity,
                        config.smooth_time,
                        config.max_smooth_speed,
                        dt,
                    );
                    if new_y.is_finite() {
                        state.position.y = new_y;
                        state.damp_velocity = new_velocity;
                    } else {
                        state.position.y = target;
                        state.damp_velocity = 0.0;
                    }
                }
            }

            state.vertical_velocity = 0.0;
            state.grounded = true;
            state.airborne_frames = 0;
            state.last_ground_height = target;
        }
        Some(sample) => {
            // Too steep to stand on: downward motion only
            state.grounded = false;
            state.airborne_frames = state.airborne_frames.saturating_add(1);
            state.vertical_velocity -= config.gravity * dt;

            let floor = sample.height + config.foot_offset;
            let mut new_y = state.position.y + state.vertical_velocity * dt;
            if new_y < floor {
                new_y = floor;
                state.vertical_velocity = 0.0;
            }
            if new_y < state.position.y {
                state.position.y = new_y;
            }
        }
        None => {
            state.grounded = false;
            state.airborne_frames = state.airborne_frames.saturating_add(1);
            state.vertical_velocity -= config.gravity * dt;

            let mut new_y = state.position.y + state.vertical_velocity * dt;

            let lowest = state.last_ground_height - config.max_fall_depth;
            if new_y < lowest {
                new_y = lowest;
                state.vertical_velocity = 0.0;
            }

            let highest = state.last_ground_height + config.float_up_cap;
            if new_y > highest {
                new_y = highest;
            }

            state.position.y = new_y;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    fn flat_ground(height: f32) -> (TerrainScene, WalkableSet) {
        let mut scene = TerrainScene::new();
        let mut walkable = WalkableSet::new();
        let plane = scene.add_box(
            Vec3::new(0.0, height - 0.5, 0.0),
            Vec3::new(50.0, 0.5, 50.0),
        );
        walkable.register(plane);
        (scene, walkable)
    }

    fn steep_ramp() -> (TerrainScene, WalkableSet) {
        // A 60 degree wedge: two triangles sloping up along +x
        let run = 5.0;
        let rise = run * 60.0f32.to_radians().tan();
        let vertices = [
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(run, rise, -5.0),
            Vec3::new(run, rise, 5.0),
        ];
        let indices = [[0u32, 1, 2], [1, 3, 2]];

        let mut scene = TerrainScene::new();
        let mut walkable = WalkableSet::new();
        let ramp = scene.add_trimesh(&vertices, &indices);
        walkable.register(ramp);
        (scene, walkable)
    }

    #[test]
    fn test_snap_settles_exactly() {
        let (scene, walkable) = flat_ground(2.0);
        let config = GroundingConfig::hard_snap();
        let mut state = CharacterState::new(Vec3::new(0.0, 3.0, 0.0));

        clamp_to_ground(&mut state, &scene, &walkable, &config, DT);

        assert_eq!(state.position.y, 2.0 + config.foot_offset);
        assert!(state.grounded);
        assert_eq!(state.vertical_velocity, 0.0);
    }

    #[test]
    fn test_snap_ignores_tiny_gaps() {
        let (scene, walkable) = flat_ground(0.0);
        let config = GroundingConfig::hard_snap();
        let start_y = config.foot_offset + config.snap_threshold * 0.5;
        let mut state = CharacterState::new(Vec3::new(0.0, start_y, 0.0));

        clamp_to_ground(&mut state, &scene, &walkable, &config, DT);

        assert_eq!(state.position.y, start_y, "sub-threshold gap should be left alone");
        assert!(state.grounded);
    }

    #[test]
    fn test_snap_steps_through_noise_jumps() {
        let (scene, walkable) = flat_ground(0.0);
        let config = GroundingConfig::hard_snap();

        // Gap of 4 exceeds the noise bound, so only one step is applied
        let mut state = CharacterState::new(Vec3::new(0.0, 4.0 + config.foot_offset, 0.0));
        clamp_to_ground(&mut state, &scene, &walkable, &config, DT);

        assert_eq!(state.position.y, 4.0 + config.foot_offset - config.snap_step);
    }

    #[test]
    fn test_smooth_damp_approaches_without_overshoot() {
        let (scene, walkable) = flat_ground(0.0);
        let config = GroundingConfig::smoothed();
        let target = config.foot_offset;
        let mut state = CharacterState::new(Vec3::new(0.0, 1.0, 0.0));

        let mut previous = state.position.y;
        for _ in 0..120 {
            clamp_to_ground(&mut state, &scene, &walkable, &config, DT);
            assert!(
                state.position.y <= previous + 1e-5,
                "height should descend monotonically"
            );
            assert!(
                state.position.y > target - 1e-3,
                "must never overshoot below the ground, y={}",
                state.position.y
            );
            previous = state.position.y;
        }

        assert!(
            (state.position.y - target).abs() < 1e-2,
            "should settle at the target, y={}",
            state.position.y
        );
    }

    #[test]
    fn test_gravity_fallback_matches_free_fall() {
        let scene = TerrainScene::new();
        let walkable = WalkableSet::new();
        let config = GroundingConfig::default();
        let mut state = CharacterState::new(Vec3::new(0.0, 10.0, 0.0));

        let mut previous_y = state.position.y;
        for frame in 1u32..=10 {
            clamp_to_ground(&mut state, &scene, &walkable, &config, DT);

            assert!(state.position.y < previous_y, "height must decrease every frame");
            previous_y = state.position.y;

            let expected_speed = config.gravity * DT * frame as f32;
            assert!(
                (state.vertical_velocity.abs() - expected_speed).abs() < 1e-3,
                "frame {}: speed {} should match g*t {}",
                frame,
                state.vertical_velocity.abs(),
                expected_speed
            );
            assert!(!state.grounded);
            assert_eq!(state.airborne_frames, frame);
        }
    }

    #[test]
    fn test_landing_resets_velocity() {
        let config = GroundingConfig::hard_snap();
        let mut state = CharacterState::new(Vec3::new(0.0, 1.0, 0.0));

        // Fall through empty space first
        let empty = TerrainScene::new();
        let nothing = WalkableSet::new();
        for _ in 0..10 {
            clamp_to_ground(&mut state, &empty, &nothing, &config, DT);
        }
        assert!(state.vertical_velocity < 0.0);

        // Then ground appears
        let (scene, walkable) = flat_ground(0.0);
        clamp_to_ground(&mut state, &scene, &walkable, &config, DT);

        assert_eq!(state.vertical_velocity, 0.0);
        assert!(state.grounded);
        assert_eq!(state.airborne_frames, 0);
    }

    #[test]
    fn test_fall_bounded_by_last_good_height() {
        let scene = TerrainScene::new();
        let walkable = WalkableSet::new();
        let config = GroundingConfig::default();
        let mut state = CharacterState::new(Vec3::new(0.0, 0.0, 0.0));

        // Fall for a long time with no ground anywhere
        for _ in 0..10_000 {
            clamp_to_ground(&mut state, &scene, &walkable, &config, DT);
        }

        let lowest = state.last_ground_height - config.max_fall_depth;
        assert!(
            state.position.y >= lowest - 1e-3,
            "fall must stop at {}, got {}",
            lowest,
            state.position.y
        );
    }

    #[test]
    fn test_steep_ground_never_lifts() {
        let (scene, walkable) = steep_ramp();
        let config = GroundingConfig::default();

        // Hover above a 60 degree facet, below its surface-plus-offset at
        // this (x, z) lies further down the ramp
        let mut state = CharacterState::new(Vec3::new(2.0, 6.0, 0.0));
        let start_y = state.position.y;

        clamp_to_ground(&mut state, &scene, &walkable, &config, DT);

        assert!(
            state.position.y <= start_y,
            "steep ground must not pull the character up, y={}",
            state.position.y
        );
        assert!(!state.grounded);
    }

    #[test]
    fn test_steep_ground_allows_settling_down() {
        let (scene, walkable) = steep_ramp();
        let config = GroundingConfig::default();

        // Start well above the facet and keep clamping: gravity brings the
        // character down to rest on the surface, never through it
        let mut state = CharacterState::new(Vec3::new(2.0, 8.0, 0.0));
        for _ in 0..600 {
            clamp_to_ground(&mut state, &scene, &walkable, &config, DT);
        }

        let surface = 2.0 * 60.0f32.to_radians().tan() + config.foot_offset;
        assert!(
            state.position.y >= surface - 0.3,
            "must rest near the facet, y={} surface={}",
            state.position.y,
            surface
        );
        assert!(!state.grounded, "steep rest is not grounded");
    }

    #[test]
    fn test_nan_height_restored_from_last_good() {
        let (scene, walkable) = flat_ground(0.0);
        let config = GroundingConfig::hard_snap();
        let mut state = CharacterState::new(Vec3::new(0.0, config.foot_offset, 0.0));

        clamp_to_ground(&mut state, &scene, &walkable, &config, DT);
        let good = state.last_ground_height;

        state.position.y = f32::NAN;
        state.vertical_velocity = f32::INFINITY;
        clamp_to_ground(&mut state, &scene, &walkable, &config, DT);

        assert!(state.position.y.is_finite());
        assert!((state.position.y - good).abs() < config.snap_step + 1e-3);
        assert!(state.vertical_velocity.is_finite());
    }

    #[test]
    fn test_out_of_band_height_snaps_immediately() {
        let (scene, walkable) = flat_ground(0.0);
        let config = GroundingConfig::smoothed();
        let mut state = CharacterState::new(Vec3::new(0.0, 500.0, 0.0));

        clamp_to_ground(&mut state, &scene, &walkable, &config, DT);

        assert_eq!(state.position.y, config.foot_offset);
        assert!(state.grounded);
    }

    #[test]
    fn test_huge_dt_clamped() {
        let scene = TerrainScene::new();
        let walkable = WalkableSet::new();
        let config = GroundingConfig::default();
        let mut state = CharacterState::new(Vec3::new(0.0, 10.0, 0.0));

        // A ten second stall must not inject ten seconds of gravity
        clamp_to_ground(&mut state, &scene, &walkable, &config, 10.0);

        let max_step_speed = config.gravity * config.max_dt;
        assert!(state.vertical_velocity.abs() <= max_step_speed + 1e-4);
    }
}
