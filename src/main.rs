//! Headless critter runner
//!
//! Usage: `critters [settings.json]`. Seeds the configured populations, runs
//! the requested number of ticks and prints counts along the way.

use critters::render::{render_counts, render_grid};
use critters::sim::{World, WorldSlot};
use critters::species::builtin_registry;
use critters::{Settings, SimError};

fn main() {
    env_logger::init();
    log::info!("Critters (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Could not load {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => {
            log::info!("No settings file given, using defaults");
            Settings::default()
        }
    };

    // Single world per process: the slot lives for the whole run
    let slot = WorldSlot::new();
    if let Err(e) = run(&slot, &settings) {
        log::error!("Simulation aborted: {}", e);
        std::process::exit(1);
    }
}

fn run(slot: &WorldSlot, settings: &Settings) -> Result<(), SimError> {
    let mut world = World::new(slot, settings.world_config(), builtin_registry())?;
    world.set_debug(settings.debug_glyphs);
    println!("  Seed = {}", world.seed());

    log::info!(
        "Seeding {} critters across {} species",
        settings.requested_population(),
        settings.population.len()
    );
    for entry in &settings.population {
        world.add_species(entry.count, &entry.species)?;
    }
    if world.agent_count() == 0 {
        log::warn!("Nothing to simulate - no critters");
        return Ok(());
    }

    print!("{}", render_counts(&world));
    while world.tick_number() < settings.steps {
        let report = world.step()?;
        if settings.verify_invariants {
            world.check_invariants()?;
        }
        if settings.report_every > 0 && world.tick_number() % settings.report_every == 0 {
            log::info!(
                "tick {}: {} hops, {} turns, {} infections",
                report.tick,
                report.hops,
                report.turns,
                report.infections
            );
            println!();
            print!("{}", render_counts(&world));
        }
    }

    if let Some((leader, count)) = world.ledger().leader() {
        log::info!("Leader after {} ticks: {} ({})", world.tick_number(), leader, count);
    }
    println!();
    print!("{}", render_grid(&world));
    Ok(())
}
