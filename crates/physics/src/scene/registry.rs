//! Registry of surfaces that may be hit by ground rays.

use std::collections::HashSet;

/// Stable handle assigned to each surface added to a [`TerrainScene`].
///
/// [`TerrainScene`]: super::TerrainScene
pub type SurfaceId = u32;

/// The set of surfaces characters are allowed to stand on.
///
/// Terrain and walkable props register here when a map loads; decorative
/// geometry stays out. The ground sampler never accepts a hit against a
/// surface missing from this set, so membership is the single switch that
/// makes a surface standable.
///
/// Registration is idempotent: registering a surface twice has no
/// additional effect, and the same holds for removal.
#[derive(Debug, Clone, Default)]
pub struct WalkableSet {
    ids: HashSet<SurfaceId>,
}

impl WalkableSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a surface to the ground-hit candidate set.
    ///
    /// Returns `true` if the surface was newly added.
    pub fn register(&mut self, id: SurfaceId) -> bool {
        self.ids.insert(id)
    }

    /// Remove a surface from the candidate set.
    ///
    /// Returns `true` if the surface was present.
    pub fn unregister(&mut self, id: SurfaceId) -> bool {
        self.ids.remove(&id)
    }

    /// Check whether a surface may be stood on.
    #[inline]
    pub fn contains(&self, id: SurfaceId) -> bool {
        self.ids.contains(&id)
    }

    /// Iterate over the registered surface ids.
    pub fn iter(&self) -> impl Iterator<Item = SurfaceId> + '_ {
        self.ids.iter().copied()
    }

    /// Number of registered surfaces.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no surfaces are registered.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
