//! Terrain scene containing all ray-testable geometry.
//!
//! The scene is the in-process stand-in for a renderer's scene graph: a flat
//! list of shapes with world transforms and stable ids. Ground sampling and
//! recovery searches run entirely against this container.

use glam::Vec3;
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::query::{Ray, RayCast};
use parry3d::shape::SharedShape;

use super::ray::RayHit;
use super::registry::SurfaceId;

/// A piece of geometry in the scene.
#[derive(Clone)]
pub struct TerrainSurface {
    /// Unique identifier for this surface.
    pub id: SurfaceId,
    /// The surface shape.
    pub shape: SharedShape,
    /// Position in world space.
    pub transform: Isometry<Real>,
}

/// The terrain scene containing all geometry that rays can test against.
///
/// Supports:
/// - Box surfaces (terraces, platforms, plazas)
/// - Cone surfaces (hills and mountain peaks)
/// - Triangle mesh terrain
///
/// # Thread Safety
///
/// The scene is immutable after map loading and can be safely shared for
/// parallel queries.
#[derive(Default)]
pub struct TerrainScene {
    /// All surfaces, in insertion order.
    surfaces: Vec<TerrainSurface>,
    /// Next surface ID to assign.
    next_id: SurfaceId,
}

impl TerrainScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            surfaces: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box to the scene.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position of the box in world space
    /// * `half_extents` - Half-size in each axis (x, y, z)
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3) -> SurfaceId {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z);
        self.push_surface(shape, center)
    }

    /// Add an upright cone to the scene (apex up).
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the cone in world space
    /// * `half_height` - Half the apex-to-base height
    /// * `radius` - Base radius
    pub fn add_cone(&mut self, center: Vec3, half_height: f32, radius: f32) -> SurfaceId {
        let shape = SharedShape::cone(half_height, radius);
        self.push_surface(shape, center)
    }

    /// Add a triangle mesh to the scene.
    ///
    /// # Arguments
    ///
    /// * `vertices` - Mesh vertex positions in world space
    /// * `indices` - Triangle indices (3 per triangle)
    pub fn add_trimesh(&mut self, vertices: &[Vec3], indices: &[[u32; 3]]) -> SurfaceId {
        let parry_vertices: Vec<Point<Real>> = vertices
            .iter()
            .map(|v| Point::new(v.x, v.y, v.z))
            .collect();

        let shape = SharedShape::trimesh(parry_vertices, indices.to_vec())
            .expect("Failed to create trimesh");

        self.push_surface(shape, Vec3::ZERO)
    }

    /// Remove all geometry.
    pub fn clear(&mut self) {
        self.surfaces.clear();
    }

    /// Get the number of surfaces.
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Cast a ray and return every intersected surface, nearest first.
    ///
    /// Each surface contributes at most one intersection (its nearest).
    /// Returns an empty list for a degenerate direction. No filtering is
    /// applied here; callers walk the sorted list and skip hits they reject.
    ///
    /// # Arguments
    ///
    /// * `origin` - Ray starting position
    /// * `direction` - Ray direction (will be normalized)
    /// * `max_distance` - Maximum query distance
    pub fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Vec<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir.length_squared() < 0.5 {
            return Vec::new();
        }

        let ray = Ray::new(
            Point::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );

        let mut hits = Vec::new();

        for surface in &self.surfaces {
            if let Some(intersection) =
                surface
                    .shape
                    .cast_ray_and_get_normal(&surface.transform, &ray, max_distance, true)
            {
                let point = ray.point_at(intersection.time_of_impact);
                hits.push(RayHit {
                    point: Vec3::new(point.x, point.y, point.z),
                    normal: Vec3::new(
                        intersection.normal.x,
                        intersection.normal.y,
                        intersection.normal.z,
                    ),
                    surface: surface.id,
                    distance: intersection.time_of_impact,
                });
            }
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn push_surface(&mut self, shape: SharedShape, center: Vec3) -> SurfaceId {
        let id = self.next_id;
        self.next_id += 1;

        self.surfaces.push(TerrainSurface {
            id,
            shape,
            transform: Isometry::translation(center.x, center.y, center.z),
        });

        id
    }
}

// ============================================================================
// Tests
// ============================================================================
