//! Scene geometry and ray queries.
//!
//! This module is the narrow boundary between the grounding pipeline and
//! whatever owns the world geometry. Everything above it only ever needs
//! two things: cast a ray and ask whether a surface is walkable.
//!
//! # Key Types
//!
//! - [`TerrainScene`]: the ray-testable world geometry
//! - [`RayHit`]: one intersection, world-space point + normal + surface id
//! - [`WalkableSet`]: which surfaces count as ground

mod ray;
mod registry;
mod world;

pub use ray::RayHit;
pub use registry::{SurfaceId, WalkableSet};
pub use world::{TerrainScene, TerrainSurface};
