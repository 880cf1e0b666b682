//! Eldermere Grounding Physics
//!
//! Keeps characters standing on walkable ground in a ray-testable 3D scene.
//! Built for town-scale simulations where dozens of characters walk uneven
//! terrain at 60Hz and none of them may ever fall through the world.
//!
//! # Architecture
//!
//! The crate is split into two main systems:
//!
//! - **Scene**: ray-testable terrain geometry plus the registry of which
//!   surfaces count as walkable ground
//! - **Grounding**: the per-frame pipeline that resolves horizontal moves
//!   against obstacles and clamps characters vertically onto the ground
//!
//! # Design Principles
//!
//! 1. **Never fall through**: every stage has a bounded fallback, so a bad
//!    sample degrades into lag, not a character in the void
//! 2. **Finite in, finite out**: NaN and infinity are caught at the
//!    boundaries instead of propagating into positions
//! 3. **Simplicity**: rays and circles over full rigid-body simulation
//! 4. **Performance**: cheap enough for dozens of characters at 60Hz

pub mod grounding;
pub mod math;
pub mod scene;

// Re-export commonly used types
pub use grounding::{
    CharacterController, CharacterState, GroundingConfig, ObstacleCollider, ObstacleField,
    VerticalMode,
};
pub use scene::{RayHit, SurfaceId, TerrainScene, WalkableSet};
