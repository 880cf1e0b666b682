//! Per-frame driver for the grounding pipeline.
//!
//! Call sites own a [`CharacterState`] per character and a single
//! [`CharacterController`] shared by all of them. Each frame the controller
//! resolves the desired horizontal move against obstacles, applies it, and
//! clamps the character onto the ground. Spawning and unstuck handling are
//! thin wrappers over the ring search in [`recovery`](super::recovery).

use glam::{Vec2, Vec3};

use crate::scene::{TerrainScene, WalkableSet};

use super::config::GroundingConfig;
use super::obstacle::{resolve_horizontal_move, ObstacleField};
use super::recovery::snap_to_nearest_ground;
use super::state::CharacterState;
use super::vertical::clamp_to_ground;

/// Drives ground-aware movement for any number of characters.
#[derive(Debug, Clone, Default)]
pub struct CharacterController {
    pub config: GroundingConfig,
}

impl CharacterController {
    /// Search radius used to settle a fresh spawn onto ground (meters).
    pub const SPAWN_SEARCH_RADIUS: f32 = 3.0;

    /// Ring spacing of the spawn search (meters).
    pub const SPAWN_SEARCH_STEP: f32 = 0.25;

    pub fn new(config: GroundingConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self::new(GroundingConfig::default())
    }

    /// Create a character state at `position`, settled onto nearby ground.
    ///
    /// Runs the recovery search around the requested point so spawns placed
    /// slightly inside scenery or above a roof still end up standing. If no
    /// ground exists within [`Self::SPAWN_SEARCH_RADIUS`], the state keeps
    /// the raw position and the first updates will run the gravity fallback.
    pub fn spawn_at(
        &self,
        scene: &TerrainScene,
        walkable: &WalkableSet,
        obstacles: &ObstacleField,
        position: Vec3,
    ) -> CharacterState {
        let mut state = CharacterState::new(position);
        snap_to_nearest_ground(
            &mut state,
            scene,
            walkable,
            obstacles,
            &self.config,
            Self::SPAWN_SEARCH_RADIUS,
            Self::SPAWN_SEARCH_STEP,
        );
        state
    }

    /// Advance one character by one frame.
    ///
    /// `desired_move` is the frame's horizontal displacement on the ground
    /// plane (world x, z), already scaled by speed and delta time. The move
    /// is corrected against obstacles, applied, and the character is then
    /// clamped vertically onto the ground.
    pub fn update(
        &self,
        state: &mut CharacterState,
        scene: &TerrainScene,
        walkable: &WalkableSet,
        obstacles: &ObstacleField,
        desired_move: Vec2,
        dt: f32,
    ) {
        let resolved = resolve_horizontal_move(obstacles, state.position, desired_move, &self.config);
        state.position.x += resolved.x;
        state.position.z += resolved.y;

        clamp_to_ground(state, scene, walkable, &self.config, dt);
    }

    /// Relocate a stuck character onto the nearest standable ground.
    ///
    /// Returns `false` and leaves the state untouched when the search finds
    /// nothing; the caller decides how to escalate.
    pub fn recover(
        &self,
        state: &mut CharacterState,
        scene: &TerrainScene,
        walkable: &WalkableSet,
        obstacles: &ObstacleField,
        max_radius: f32,
        step: f32,
    ) -> bool {
        snap_to_nearest_ground(
            state,
            scene,
            walkable,
            obstacles,
            &self.config,
            max_radius,
            step,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn flat_world() -> (TerrainScene, WalkableSet, ObstacleField) {
        let mut scene = TerrainScene::new();
        let mut walkable = WalkableSet::new();
        let ground = scene.add_box(Vec3::new(0.0, -0.5, 0.0), Vec3::new(50.0, 0.5, 50.0));
        walkable.register(ground);
        (scene, walkable, ObstacleField::new())
    }

    #[test]
    fn test_spawn_settles_onto_ground() {
        let (scene, walkable, obstacles) = flat_world();
        let controller = CharacterController::with_default_config();

        let state = controller.spawn_at(&scene, &walkable, &obstacles, Vec3::new(2.0, 10.0, -4.0));

        assert_eq!(state.position.y, controller.config.foot_offset);
        assert_eq!(state.horizontal(), Vec2::new(2.0, -4.0));
        assert!(state.grounded);
    }

    #[test]
    fn test_spawn_in_the_void_keeps_position() {
        let scene = TerrainScene::new();
        let walkable = WalkableSet::new();
        let obstacles = ObstacleField::new();
        let controller = CharacterController::with_default_config();

        let state = controller.spawn_at(&scene, &walkable, &obstacles, Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(state.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_update_walks_across_flat_ground() {
        let (scene, walkable, obstacles) = flat_world();
        let controller = CharacterController::with_default_config();
        let mut state = controller.spawn_at(&scene, &walkable, &obstacles, Vec3::ZERO);

        // 3 m/s east for one second
        for _ in 0..60 {
            let step = Vec2::new(3.0 * DT, 0.0);
            controller.update(&mut state, &scene, &walkable, &obstacles, step, DT);
        }

        assert!((state.position.x - 3.0).abs() < 1e-3);
        assert_eq!(state.position.z, 0.0);
        assert!(state.grounded);
        assert!(
            (state.position.y - controller.config.foot_offset).abs() < 1e-2,
            "walking must not disturb the stand height, y={}",
            state.position.y
        );
    }

    #[test]
    fn test_update_stops_at_obstacle_boundary() {
        let (scene, walkable, mut obstacles) = flat_world();
        obstacles.add(Vec2::new(3.0, 0.0), 1.0);
        let controller = CharacterController::with_default_config();
        let mut state = controller.spawn_at(&scene, &walkable, &obstacles, Vec3::ZERO);

        // Walk straight at the obstacle for two seconds
        for _ in 0..120 {
            let step = Vec2::new(3.0 * DT, 0.0);
            controller.update(&mut state, &scene, &walkable, &obstacles, step, DT);
        }

        let hug_ring = 1.0 + controller.config.hug_distance;
        let dist = state.horizontal().distance(Vec2::new(3.0, 0.0));
        assert!(
            (dist - hug_ring).abs() < 1e-3,
            "head-on approach must park on the hug ring, dist={}",
            dist
        );
        assert_eq!(state.position.z, 0.0);
    }

    #[test]
    fn test_one_frame_drop_snaps_to_stand_height() {
        let (scene, walkable, obstacles) = flat_world();
        let mut config = GroundingConfig::hard_snap();
        config.foot_offset = 0.1;
        config.max_snap_jump = 6.0;
        let controller = CharacterController::new(config);

        let mut state = CharacterState::new(Vec3::new(0.0, 5.0, 0.0));
        controller.update(&mut state, &scene, &walkable, &obstacles, Vec2::ZERO, DT);

        assert!(
            (state.position.y - 0.1).abs() < (state.position.y - 5.0).abs(),
            "one frame must move most of the way down, y={}",
            state.position.y
        );
        assert!(state.position.y >= 0.1 - 1e-4, "must not tunnel below the ground");
        assert!((state.position.y - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_update_ignores_garbage_move() {
        let (scene, walkable, obstacles) = flat_world();
        let controller = CharacterController::with_default_config();
        let mut state = controller.spawn_at(&scene, &walkable, &obstacles, Vec3::ZERO);

        controller.update(
            &mut state,
            &scene,
            &walkable,
            &obstacles,
            Vec2::new(f32::NAN, f32::INFINITY),
            DT,
        );

        assert_eq!(state.horizontal(), Vec2::ZERO);
        assert!(state.position.is_finite());
    }

    #[test]
    fn test_recover_forwards_to_ring_search() {
        let mut scene = TerrainScene::new();
        let mut walkable = WalkableSet::new();
        let island = scene.add_box(Vec3::new(2.0, -0.5, 0.0), Vec3::new(1.0, 0.5, 1.0));
        walkable.register(island);
        let obstacles = ObstacleField::new();
        let controller = CharacterController::with_default_config();

        let mut state = CharacterState::new(Vec3::new(0.0, 3.0, 0.0));
        let ok = controller.recover(&mut state, &scene, &walkable, &obstacles, 2.5, 0.25);

        assert!(ok);
        assert!(state.grounded);
        assert!(state.position.x > 0.0, "must have moved toward the island");
    }
}
