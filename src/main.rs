//! Eldermere - Main Entry Point
//!
//! Headless run of the village green: spawns a handful of villagers and
//! advances the simulation for thirty in-game seconds, reporting where
//! everyone ended up. Useful as a smoke test and as a determinism check
//! (same seed, same final positions).

use eldermere_game::Simulation;

const VILLAGER_NAMES: [&str; 6] = ["Odo", "Mira", "Brin", "Selle", "Tam", "Wren"];

/// In-game seconds to simulate.
const RUN_SECONDS: u32 = 30;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(7);

    let mut simulation = Simulation::village(seed);
    log::info!(
        "loaded '{}' with {} spawn points",
        simulation.town.name,
        simulation.town.spawn_count()
    );

    for name in VILLAGER_NAMES {
        simulation.add_villager(name);
    }

    let dt = simulation.delta_time();
    let total_ticks = RUN_SECONDS * simulation.config.tick_rate;

    println!(
        "Simulating {} villagers on '{}' for {}s (seed {})",
        simulation.villagers.len(),
        simulation.town.name,
        RUN_SECONDS,
        seed
    );

    for tick in 0..total_ticks {
        simulation.advance(dt);

        if (tick + 1) % (simulation.config.tick_rate * 5) == 0 {
            let grounded = simulation
                .villagers
                .iter()
                .filter(|v| v.on_ground())
                .count();
            log::info!(
                "t={}s: {}/{} villagers grounded",
                (tick + 1) / simulation.config.tick_rate,
                grounded,
                simulation.villagers.len()
            );
        }
    }

    println!("\nAfter {} ticks:", simulation.frame);
    for villager in &simulation.villagers {
        let position = villager.position();
        println!(
            "  {:<6} at ({:>6.2}, {:>5.2}, {:>6.2})  grounded: {}",
            villager.name,
            position.x,
            position.y,
            position.z,
            villager.on_ground()
        );
    }
}
