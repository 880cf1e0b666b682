//! Town maps: terrain geometry, obstacles and spawn placement.

use eldermere_physics::grounding::{sample_ground, slope_degrees};
use eldermere_physics::{GroundingConfig, ObstacleField, TerrainScene, WalkableSet};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A spawn point for villagers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Position in world space, slightly above the ground.
    pub position: Vec3,

    /// Initial facing direction (yaw in radians).
    pub facing: f32,
}

/// A town map containing terrain, obstacles and spawn points.
pub struct TownMap {
    /// Map identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Ray-testable terrain geometry.
    pub scene: TerrainScene,

    /// Which surfaces count as walkable ground.
    pub walkable: WalkableSet,

    /// Circular blockers (wells, stalls, crags).
    pub obstacles: ObstacleField,

    /// Villager spawn points.
    pub spawn_points: Vec<SpawnPoint>,
}

/// Parameters for spiral spawn placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnOptions {
    /// How many spawn points to place.
    pub count: usize,

    /// Center of the spiral on the ground plane.
    pub center: Vec2,

    /// Radius of the first candidate (meters).
    pub start_radius: f32,

    /// Base radius growth, scaled down per accepted/rejected candidate (meters).
    pub radius_step: f32,

    /// Minimum distance between two spawn points (meters).
    pub min_spacing: f32,

    /// Spawns avoid ground steeper than this (degrees). Stricter than the
    /// walkable slope limit so characters never spawn on marginal ground.
    pub max_slope_deg: f32,

    /// Clearance kept from obstacle boundaries (meters).
    pub clearance: f32,

    /// Height above the sampled ground to place the spawn (meters).
    pub lift: f32,
}

impl Default for SpawnOptions {
    fn default() -> Self {
        Self {
            count: 12,
            center: Vec2::ZERO,
            start_radius: 8.0,
            radius_step: 3.5,
            min_spacing: 3.2,
            max_slope_deg: 38.0,
            clearance: 0.6,
            lift: 0.12,
        }
    }
}

/// Place spawn points on a golden-angle spiral around `options.center`.
///
/// Candidates march outward along the spiral; each must sample standable
/// ground within the slope limit, keep clear of obstacles, and keep
/// `min_spacing` from already placed points. The radius grows faster after
/// an accepted candidate than after a rejected one, so placement clusters
/// as tightly as the map allows. Placement is deterministic.
///
/// Gives up after `count * 80` attempts and returns what it found; maps
/// with too little open ground get fewer spawns, never an infinite loop.
pub fn generate_spawn_points(
    scene: &TerrainScene,
    walkable: &WalkableSet,
    obstacles: &ObstacleField,
    config: &GroundingConfig,
    options: &SpawnOptions,
) -> Vec<SpawnPoint> {
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());

    let mut points: Vec<SpawnPoint> = Vec::new();
    let mut radius = options.start_radius;
    let max_attempts = options.count * 80;

    for attempt in 0..max_attempts {
        if points.len() >= options.count {
            break;
        }

        let angle = attempt as f32 * golden_angle;
        let candidate = options.center + Vec2::new(angle.cos(), angle.sin()) * radius;

        let mut accepted = false;
        if !obstacles.blocks(candidate, options.clearance) {
            if let Some(sample) = sample_ground(scene, walkable, config, candidate.x, candidate.y) {
                let flat_enough = slope_degrees(sample.normal) <= options.max_slope_deg;
                let spaced = points.iter().all(|p| {
                    Vec2::new(p.position.x, p.position.z).distance(candidate)
                        >= options.min_spacing
                });

                if flat_enough && spaced {
                    let toward_center = options.center - candidate;
                    points.push(SpawnPoint {
                        position: Vec3::new(
                            candidate.x,
                            sample.height + options.lift,
                            candidate.y,
                        ),
                        facing: toward_center.x.atan2(toward_center.y),
                    });
                    accepted = true;
                }
            }
        }

        if accepted {
            radius += options.radius_step * 0.35;
        } else {
            radius += options.radius_step * 0.15;
        }
    }

    if points.len() < options.count {
        log::warn!(
            "placed only {} of {} spawn points",
            points.len(),
            options.count
        );
    }

    points
}

impl TownMap {
    /// Create an empty map.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            scene: TerrainScene::new(),
            walkable: WalkableSet::new(),
            obstacles: ObstacleField::new(),
            spawn_points: Vec::new(),
        }
    }

    /// Fill `spawn_points` from the map's terrain and obstacles.
    pub fn generate_spawns(&mut self, config: &GroundingConfig, options: &SpawnOptions) {
        self.spawn_points = generate_spawn_points(
            &self.scene,
            &self.walkable,
            &self.obstacles,
            config,
            options,
        );
    }

    /// Get a spawn point by index.
    pub fn get_spawn(&self, index: usize) -> Option<&SpawnPoint> {
        self.spawn_points.get(index)
    }

    /// Number of spawn points.
    pub fn spawn_count(&self) -> usize {
        self.spawn_points.len()
    }

    /// A small village map for development and tests.
    pub fn village_green() -> Self {
        let mut town = Self::new("village_green", "Village Green");

        // Ground
        let green = town
            .scene
            .add_box(Vec3::new(0.0, -0.5, 0.0), Vec3::new(35.0, 0.5, 35.0));
        town.walkable.register(green);

        // Raised terrace by the market
        let terrace = town
            .scene
            .add_box(Vec3::new(-10.0, 0.15, -8.0), Vec3::new(4.0, 0.3, 3.0));
        town.walkable.register(terrace);

        // Gentle hill, standable all the way up
        let hill = town.scene.add_cone(Vec3::new(14.0, 3.0, 6.0), 3.0, 8.0);
        town.walkable.register(hill);

        // Two steep crags, walkable in the registry but too steep to
        // stand on; their footprints get matching obstacle circles
        let crag = town.scene.add_cone(Vec3::new(-16.0, 4.0, 14.0), 4.0, 3.0);
        town.walkable.register(crag);
        let far_crag = town.scene.add_cone(Vec3::new(20.0, 3.5, -18.0), 3.5, 2.5);
        town.walkable.register(far_crag);

        // Pond: real geometry, never ground. Characters wade on the
        // green underneath it
        town.scene
            .add_box(Vec3::new(8.0, -0.22, -12.0), Vec3::new(3.0, 0.3, 3.0));

        // Blockers
        town.obstacles.add(Vec2::new(0.0, 0.0), 1.5); // fountain
        town.obstacles.add(Vec2::new(3.0, 5.0), 0.8); // well
        town.obstacles.add(Vec2::new(-6.0, 4.0), 1.2); // market stall
        town.obstacles.add(Vec2::new(-16.0, 14.0), 3.2); // crag base
        town.obstacles.add(Vec2::new(20.0, -18.0), 2.7); // far crag base

        town.generate_spawns(&GroundingConfig::default(), &SpawnOptions::default());

        town
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eldermere_physics::grounding::is_too_steep;

    #[test]
    fn test_town_creation() {
        let town = TownMap::new("test", "Test Town");
        assert_eq!(town.id, "test");
        assert_eq!(town.scene.surface_count(), 0);
        assert_eq!(town.spawn_count(), 0);
    }

    #[test]
    fn test_village_green_layout() {
        let town = TownMap::village_green();
        let config = GroundingConfig::default();

        assert!(town.scene.surface_count() > 0);
        assert!(town.spawn_count() >= 8, "got {} spawns", town.spawn_count());

        for spawn in &town.spawn_points {
            let sample = sample_ground(
                &town.scene,
                &town.walkable,
                &config,
                spawn.position.x,
                spawn.position.z,
            )
            .expect("spawn must sit over sampled ground");

            assert!(!is_too_steep(sample.normal, config.max_slope_deg));
            assert!(
                spawn.position.y > sample.height,
                "spawn must start above the ground"
            );
            assert!(!town.obstacles.blocks(
                Vec2::new(spawn.position.x, spawn.position.z),
                0.0
            ));
        }
    }

    #[test]
    fn test_spawns_keep_their_spacing() {
        let town = TownMap::village_green();
        let spacing = SpawnOptions::default().min_spacing;

        for (i, a) in town.spawn_points.iter().enumerate() {
            for b in town.spawn_points.iter().skip(i + 1) {
                let d = Vec2::new(a.position.x, a.position.z)
                    .distance(Vec2::new(b.position.x, b.position.z));
                assert!(d >= spacing - 1e-3, "spawns {} apart", d);
            }
        }
    }

    #[test]
    fn test_hill_standable_crag_not() {
        let town = TownMap::village_green();
        let config = GroundingConfig::default();

        // Halfway up the hill flank
        let hill = sample_ground(&town.scene, &town.walkable, &config, 18.0, 6.0)
            .expect("hill flank must sample");
        assert!(hill.height > 2.0 && hill.height < 4.0, "height {}", hill.height);
        assert!(!is_too_steep(hill.normal, config.max_slope_deg));

        // On the crag flank
        let crag = sample_ground(&town.scene, &town.walkable, &config, -15.0, 14.0)
            .expect("crag flank must sample");
        assert!(is_too_steep(crag.normal, config.max_slope_deg));
    }

    #[test]
    fn test_pond_is_not_ground() {
        let town = TownMap::village_green();
        let config = GroundingConfig::default();

        // The pond surface sits above the green, but only the green is
        // registered, so characters stand at green height
        let sample = sample_ground(&town.scene, &town.walkable, &config, 8.0, -12.0)
            .expect("green under the pond must sample");
        assert!(sample.height.abs() < 1e-3, "height {}", sample.height);
    }

    #[test]
    fn test_generate_gives_up_on_hopeless_maps() {
        let town = TownMap::new("empty", "Empty");
        let spawns = generate_spawn_points(
            &town.scene,
            &town.walkable,
            &town.obstacles,
            &GroundingConfig::default(),
            &SpawnOptions::default(),
        );
        assert!(spawns.is_empty());
    }
}
