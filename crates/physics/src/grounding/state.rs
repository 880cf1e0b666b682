//! Per-character kinematic state.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Kinematic state of one grounded character.
///
/// Owned by the character's controller call site and mutated once per frame
/// by the grounding pipeline, nowhere else. Position components stay finite:
/// every pipeline stage replaces a non-finite intermediate with a safe value
/// before it can land here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterState {
    /// World position of the character's feet.
    pub position: Vec3,

    /// Accumulated vertical velocity while falling (meters/second).
    pub vertical_velocity: f32,

    /// Velocity accumulator of the smooth-damp vertical strategy.
    pub damp_velocity: f32,

    /// Whether the last clamp found acceptable ground.
    pub grounded: bool,

    /// Height the character was last clamped onto. Bounds gravity falls and
    /// the float-up guard when ground samples go missing.
    pub last_ground_height: f32,

    /// Consecutive frames without acceptable ground. Drives watchdog
    /// escalation to the recovery search.
    pub airborne_frames: u32,
}

impl CharacterState {
    /// Create a state at the given position, treating it as grounded.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            vertical_velocity: 0.0,
            damp_velocity: 0.0,
            grounded: true,
            last_ground_height: position.y,
            airborne_frames: 0,
        }
    }

    /// The character's position on the ground plane.
    #[inline]
    pub fn horizontal(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    /// Reset fall bookkeeping after a placement (spawn, recovery, teleport).
    pub fn settle(&mut self, ground_height: f32) {
        self.vertical_velocity = 0.0;
        self.damp_velocity = 0.0;
        self.grounded = true;
        self.last_ground_height = ground_height;
        self.airborne_frames = 0;
    }
}

impl Default for CharacterState {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_grounded_at_position() {
        let state = CharacterState::new(Vec3::new(1.0, 2.0, 3.0));
        assert!(state.grounded);
        assert_eq!(state.last_ground_height, 2.0);
        assert_eq!(state.horizontal(), Vec2::new(1.0, 3.0));
    }

    #[test]
    fn test_settle_clears_fall_bookkeeping() {
        let mut state = CharacterState::new(Vec3::ZERO);
        state.vertical_velocity = -5.0;
        state.damp_velocity = 2.0;
        state.grounded = false;
        state.airborne_frames = 42;

        state.settle(1.5);

        assert_eq!(state.vertical_velocity, 0.0);
        assert_eq!(state.damp_velocity, 0.0);
        assert!(state.grounded);
        assert_eq!(state.last_ground_height, 1.5);
        assert_eq!(state.airborne_frames, 0);
    }
}
