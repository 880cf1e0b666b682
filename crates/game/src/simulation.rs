//! Town simulation - the main game loop.
//!
//! Advances a whole town of wandering villagers on a fixed timestep. Given
//! the same seed and the same sequence of calls, two simulations produce
//! identical state, which keeps replays and regression captures stable.

use eldermere_physics::{CharacterController, GroundingConfig};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::random::SeededRandom;
use crate::town::TownMap;
use crate::villager::{EntityId, Villager, WanderConfig};

/// Town simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Grounding physics configuration.
    pub grounding: GroundingConfig,

    /// Villager wander behavior.
    pub wander: WanderConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            grounding: GroundingConfig::default(),
            wander: WanderConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

/// The main town simulation.
///
/// Holds the map, all villagers, and the shared physics controller, and
/// advances them deterministically. Rendering and audio hang off this state
/// but never feed back into it.
pub struct Simulation {
    /// Current tick number.
    pub frame: u64,

    /// Simulation configuration.
    pub config: SimulationConfig,

    /// The town being simulated.
    pub town: TownMap,

    /// All villagers.
    pub villagers: Vec<Villager>,

    /// Grounding physics controller shared by all villagers.
    controller: CharacterController,

    /// Seeded RNG driving wander decisions.
    rng: SeededRandom,

    /// Next entity ID to assign.
    next_entity_id: EntityId,

    /// Unconsumed wall-clock time carried between `advance` calls.
    accumulator: f32,
}

impl Simulation {
    /// Longest wall-clock step fed into the accumulator (seconds). Keeps a
    /// stalled process from simulating a huge burst of catch-up ticks.
    pub const MAX_FRAME_TIME: f32 = 0.25;

    /// Create a simulation for the given town.
    pub fn new(config: SimulationConfig, town: TownMap, seed: u32) -> Self {
        let controller = CharacterController::new(config.grounding.clone());

        Self {
            frame: 0,
            config,
            town,
            villagers: Vec::new(),
            controller,
            rng: SeededRandom::new(seed),
            next_entity_id: 1,
            accumulator: 0.0,
        }
    }

    /// Create a simulation of the village green with default configuration.
    pub fn village(seed: u32) -> Self {
        Self::new(SimulationConfig::default(), TownMap::village_green(), seed)
    }

    /// Add a villager, spawned at the next free spawn point.
    ///
    /// Returns the villager's ID.
    pub fn add_villager(&mut self, name: &str) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id += 1;

        let spawn_index = self.villagers.len() % self.town.spawn_count().max(1);
        let spawn = self.town.get_spawn(spawn_index);

        let position = spawn.map(|s| s.position).unwrap_or(Vec3::ZERO);
        let facing = spawn.map(|s| s.facing).unwrap_or(0.0);

        let state = self.controller.spawn_at(
            &self.town.scene,
            &self.town.walkable,
            &self.town.obstacles,
            position,
        );

        let mut villager = Villager::new(id, name.to_string(), state);
        villager.yaw = facing;

        self.villagers.push(villager);
        id
    }

    /// Remove a villager from the simulation.
    pub fn remove_villager(&mut self, id: EntityId) {
        self.villagers.retain(|v| v.id != id);
    }

    /// Get a villager by ID.
    pub fn get_villager(&self, id: EntityId) -> Option<&Villager> {
        self.villagers.iter().find(|v| v.id == id)
    }

    /// Get a mutable reference to a villager by ID.
    pub fn get_villager_mut(&mut self, id: EntityId) -> Option<&mut Villager> {
        self.villagers.iter_mut().find(|v| v.id == id)
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) {
        let dt = self.config.delta_time();

        for villager in &mut self.villagers {
            // Watchdog: a villager without ground under it for too long is
            // either over a hole or off the map. Try to relocate it; if
            // that fails, put it back where it last stood.
            if villager.state.airborne_frames >= self.config.wander.watchdog_airborne_ticks {
                let rescued = self.controller.recover(
                    &mut villager.state,
                    &self.town.scene,
                    &self.town.walkable,
                    &self.town.obstacles,
                    self.config.wander.recovery_radius,
                    self.config.wander.recovery_step,
                );
                if !rescued {
                    log::debug!("villager {} restored to last safe position", villager.id);
                    villager.state.position = villager.last_safe;
                    villager.state.settle(villager.last_safe.y);
                }
                villager.target = None;
            }

            // Pick a new wander target when idle, or occasionally on a whim
            if villager.target.is_none()
                || self.rng.next_bool(self.config.wander.retarget_chance)
            {
                let angle = self.rng.next_range(0.0, std::f32::consts::TAU);
                let dist = self.rng.next_range(
                    self.config.wander.min_target_distance,
                    self.config.wander.max_target_distance,
                );
                let offset = Vec2::new(angle.cos(), angle.sin()) * dist;
                villager.target = Some(villager.state.horizontal() + offset);
            }

            let mut desired = Vec2::ZERO;
            if let Some(target) = villager.target {
                let to_target = target - villager.state.horizontal();
                let dist = to_target.length();
                if dist <= self.config.wander.arrive_distance {
                    villager.target = None;
                } else {
                    let dir = to_target / dist;
                    villager.face_toward(dir, self.config.wander.turn_rate);
                    desired = dir * (self.config.wander.move_speed * dt).min(dist);
                }
            }

            self.controller.update(
                &mut villager.state,
                &self.town.scene,
                &self.town.walkable,
                &self.town.obstacles,
                desired,
                dt,
            );

            if villager.state.grounded {
                villager.last_safe = villager.state.position;
            }
        }

        self.frame += 1;
    }

    /// Feed wall-clock time into the fixed-timestep loop.
    ///
    /// Runs as many whole ticks as the accumulated time covers and carries
    /// the remainder to the next call. Returns the number of ticks run.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if !elapsed.is_finite() || elapsed <= 0.0 {
            return 0;
        }

        self.accumulator += elapsed.min(Self::MAX_FRAME_TIME);
        let dt = self.config.delta_time();

        let mut ticks = 0;
        while self.accumulator >= dt {
            self.tick();
            self.accumulator -= dt;
            ticks += 1;
        }
        ticks
    }

    /// Get the delta time for this simulation.
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }
}

// ============================================================================
// Tests
// ============================================================================
