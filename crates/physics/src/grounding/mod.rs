//! Character grounding and collision resolution.
//!
//! The pipeline runs once per character per frame, in a fixed order:
//!
//! 1. **Obstacle resolution** ([`obstacle`]): the desired horizontal move is
//!    corrected against circular blockers, sliding along boundaries instead
//!    of stopping dead.
//! 2. **Ground sampling** ([`sampler`]): short of a full capsule sweep, four
//!    downward rays around the foot position are averaged into one height
//!    and normal.
//! 3. **Slope classification** ([`slope`]): the averaged normal decides
//!    whether the surface is standable.
//! 4. **Vertical clamp** ([`vertical`]): the height is pulled onto standable
//!    ground, slides off steep ground, or falls under gravity.
//! 5. **Recovery** ([`recovery`]): characters stuck without ground for too
//!    long are relocated by an expanding ring search.
//!
//! [`CharacterController`] drives the whole sequence; the pieces stay
//! independently callable for tools and tests.

pub mod config;
pub mod controller;
pub mod obstacle;
pub mod recovery;
pub mod sampler;
pub mod slope;
pub mod state;
pub mod vertical;

pub use config::{GroundingConfig, VerticalMode};
pub use controller::CharacterController;
pub use obstacle::{resolve_horizontal_move, ObstacleCollider, ObstacleField};
pub use recovery::snap_to_nearest_ground;
pub use sampler::{sample_ground, GroundSample};
pub use slope::{is_too_steep, slope_degrees};
pub use state::CharacterState;
pub use vertical::clamp_to_ground;
