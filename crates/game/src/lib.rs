//! Eldermere Town Simulation
//!
//! This crate contains the headless town simulation including:
//!
//! - Town maps: terrain geometry, obstacles and spawn placement
//! - Villager entities and autonomous wander behavior
//! - The fixed-timestep simulation loop with a grounding watchdog
//! - Deterministic seeded randomness
//!
//! # Architecture
//!
//! The simulation is deterministic: a seed plus a sequence of calls always
//! produces the same town state, which keeps replays and regression
//! captures stable.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Town Simulation                         │
//! │  ┌─────────┐    ┌──────────┐    ┌────────────────────────┐  │
//! │  │ Wander  │───►│ Physics  │───►│ Town State             │  │
//! │  │ Targets │    │ (ground, │    │ (villagers, terrain,   │  │
//! │  └─────────┘    │ obstacles)    │  obstacles, spawns)    │  │
//! │                 └──────────┘    └────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod random;
pub mod simulation;
pub mod town;
pub mod villager;

// Re-export main types
pub use random::SeededRandom;
pub use simulation::{Simulation, SimulationConfig};
pub use town::{SpawnOptions, SpawnPoint, TownMap};
pub use villager::{Villager, WanderConfig};

// Re-export physics types for convenience
pub use eldermere_physics::{
    CharacterController, CharacterState, GroundingConfig, ObstacleField, TerrainScene,
    VerticalMode, WalkableSet,
};
