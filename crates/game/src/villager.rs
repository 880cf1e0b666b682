//! Villager entity and wander behavior parameters.

use eldermere_physics::CharacterState;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Unique identifier for entities.
pub type EntityId = u32;

/// Tuning for autonomous wandering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WanderConfig {
    /// Walk speed (meters/second).
    pub move_speed: f32,

    /// Distance at which a target counts as reached (meters).
    pub arrive_distance: f32,

    /// Shortest wander leg (meters).
    pub min_target_distance: f32,

    /// Longest wander leg (meters).
    pub max_target_distance: f32,

    /// Per-tick chance of abandoning the current target for a new one.
    pub retarget_chance: f32,

    /// Fraction of the remaining turn applied per tick.
    pub turn_rate: f32,

    /// Consecutive airborne ticks before the watchdog intervenes.
    pub watchdog_airborne_ticks: u32,

    /// Ring search radius used by the watchdog (meters).
    pub recovery_radius: f32,

    /// Ring search spacing used by the watchdog (meters).
    pub recovery_step: f32,
}

impl Default for WanderConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            arrive_distance: 0.3,
            min_target_distance: 3.0,
            max_target_distance: 8.0,
            retarget_chance: 0.02,
            turn_rate: 0.3,
            watchdog_airborne_ticks: 30, // half a second at 60Hz
            recovery_radius: 2.5,
            recovery_step: 0.25,
        }
    }
}

/// A villager wandering the town.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Villager {
    /// Unique villager ID.
    pub id: EntityId,

    /// Villager name.
    pub name: String,

    /// Grounding physics state.
    pub state: CharacterState,

    /// Current wander destination on the ground plane, if any.
    pub target: Option<Vec2>,

    /// Facing direction (yaw in radians, zero looks along +z).
    pub yaw: f32,

    /// Last position confirmed standing on ground. The watchdog falls back
    /// here when recovery finds nothing.
    pub last_safe: Vec3,
}

impl Villager {
    /// Create a villager from an already grounded state.
    pub fn new(id: EntityId, name: String, state: CharacterState) -> Self {
        let last_safe = state.position;
        Self {
            id,
            name,
            state,
            target: None,
            yaw: 0.0,
            last_safe,
        }
    }

    /// The villager's world position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    /// Whether the villager is standing on ground.
    #[inline]
    pub fn on_ground(&self) -> bool {
        self.state.grounded
    }

    /// Ease the facing toward a ground-plane direction.
    ///
    /// Applies `turn_rate` of the remaining angle each call, always turning
    /// the short way around. A zero direction leaves the facing alone.
    pub fn face_toward(&mut self, direction: Vec2, turn_rate: f32) {
        use std::f32::consts::{PI, TAU};

        if direction.length_squared() < 1e-8 {
            return;
        }

        let desired = direction.x.atan2(direction.y);
        let mut diff = desired - self.yaw;
        while diff > PI {
            diff -= TAU;
        }
        while diff < -PI {
            diff += TAU;
        }

        self.yaw += diff * turn_rate;
        while self.yaw > PI {
            self.yaw -= TAU;
        }
        while self.yaw < -PI {
            self.yaw += TAU;
        }
    }
}
