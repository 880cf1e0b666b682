//! Grounding policy constants.
//!
//! Every tuning knob of the pipeline is grouped here. Earlier revisions of
//! this system scattered near-duplicate constants across call sites; this
//! struct is the single source for all of them.

use serde::{Deserialize, Serialize};

/// Strategy used by the vertical clamp to move a character onto the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalMode {
    /// Snap straight to the target height, stepping through implausibly
    /// large single-frame jumps instead of teleporting.
    Snap,
    /// Critically damped spring toward the target height. Trades a few
    /// frames of lag for bounce-free motion over uneven terrain.
    SmoothDamp,
}

/// Configuration for character grounding and collision resolution.
///
/// All values use metric units (meters, seconds, degrees) unless noted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingConfig {
    // ========================================================================
    // Ground Sampling
    // ========================================================================
    /// Height ground rays are cast from (meters). Must clear the tallest
    /// geometry in the scene.
    pub ray_height: f32,

    /// Lowest world height accepted as ground (meters).
    pub min_ground_y: f32,

    /// Highest world height accepted as ground (meters).
    pub max_ground_y: f32,

    /// Minimum upward component of a surface normal for a hit to count as
    /// ground. Rejects near-vertical faces and ceilings.
    pub min_surface_up_dot: f32,

    /// Radius of the triangular sample pattern around the query point (meters).
    pub sample_radius: f32,

    // ========================================================================
    // Character Shape
    // ========================================================================
    /// Collision radius of the character capsule (meters).
    pub capsule_radius: f32,

    /// Gap kept between the feet and the sampled ground (meters).
    pub foot_offset: f32,

    // ========================================================================
    // Slope Policy
    // ========================================================================
    /// Maximum climbable slope angle (degrees). Exactly at the limit passes.
    pub max_slope_deg: f32,

    /// Ledge height crossable without triggering the slope rule (meters).
    pub step_height: f32,

    // ========================================================================
    // Obstacles
    // ========================================================================
    /// Clearance kept from an obstacle boundary while sliding along it (meters).
    pub hug_distance: f32,

    /// Distance from an obstacle at which the resolver starts correcting (meters).
    pub obstacle_margin: f32,

    // ========================================================================
    // Vertical Clamp
    // ========================================================================
    /// Which vertical strategy to use.
    pub vertical_mode: VerticalMode,

    /// Gravity acceleration used when no ground is found (meters/second²).
    pub gravity: f32,

    /// Upper bound on a single frame's delta time (seconds). A stalled frame
    /// must not inject a huge gravity impulse.
    pub max_dt: f32,

    /// Height gaps below this are left alone by the snap strategy (meters).
    pub snap_threshold: f32,

    /// Snap-target jumps beyond this are treated as sampling noise and
    /// stepped through instead of applied at once (meters).
    pub max_snap_jump: f32,

    /// Step size used to walk through a rejected large jump (meters).
    pub snap_step: f32,

    /// Time constant of the smooth-damp spring (seconds).
    pub smooth_time: f32,

    /// Speed cap of the smooth-damp spring (meters/second).
    pub max_smooth_speed: f32,

    /// How far above the last grounded height a falling character may float
    /// before being pulled back down (meters).
    pub float_up_cap: f32,

    /// How far below the last grounded height a gravity fall may reach
    /// before the fall is stopped (meters).
    pub max_fall_depth: f32,
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            // Ground sampling
            ray_height: 500.0,
            min_ground_y: -50.0,
            max_ground_y: 80.0,
            min_surface_up_dot: 0.2,
            sample_radius: 0.21,    // 0.6 * capsule radius

            // Character shape
            capsule_radius: 0.35,
            foot_offset: 0.06,      // Small gap avoids foot clipping flicker

            // Slope policy
            max_slope_deg: 42.0,
            step_height: 0.35,

            // Obstacles
            hug_distance: 0.02,     // 2cm clearance
            obstacle_margin: 0.01,

            // Vertical clamp
            vertical_mode: VerticalMode::SmoothDamp,
            gravity: 18.0,          // Heavier than real (9.8) so falls read as falls
            max_dt: 0.05,           // 50ms, ~20 FPS floor
            snap_threshold: 0.02,
            max_snap_jump: 2.5,     // Larger jumps are sampling noise
            snap_step: 0.5,
            smooth_time: 0.07,
            max_smooth_speed: 100.0,
            float_up_cap: 1.5,
            max_fall_depth: 25.0,
        }
    }
}

impl GroundingConfig {
    /// Config using the smooth-damp vertical strategy (the default).
    pub fn smoothed() -> Self {
        Self {
            vertical_mode: VerticalMode::SmoothDamp,
            ..Default::default()
        }
    }

    /// Config using the hard-snap vertical strategy.
    ///
    /// Keeps the feet pinned to the ground with zero lag; best on terrain
    /// without frequent small height discontinuities.
    pub fn hard_snap() -> Self {
        Self {
            vertical_mode: VerticalMode::Snap,
            ..Default::default()
        }
    }

    /// Total length of a ground sampling ray.
    #[inline]
    pub fn ray_length(&self) -> f32 {
        self.ray_height * 2.0
    }
}
