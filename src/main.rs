//! Bugnav entry point
//!
//! Loads a configuration, then drives the navigator at a fixed cadence until
//! the robot reaches the target or the tick ceiling is hit.
//!
//! ```text
//! bugnav [--config <path>] [--interval-ms <n>] [--max-ticks <n>]
//!        [--seed <n> [--obstacles <k>]] [--telemetry]
//! ```

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use bugnav::{Driver, SimConfig, sim::generate_layout};
#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

/// Bug-algorithm robot navigating a 2D arena
#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Options {
    /// JSON configuration file (defaults to the built-in layout)
    #[arg(long)]
    config: Option<String>,

    /// Milliseconds between steps, 0 runs unthrottled
    #[arg(long, default_value_t = 5)]
    interval_ms: u64,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Replace the obstacles with a seeded random layout
    #[arg(long)]
    seed: Option<u64>,

    /// Obstacle count for a seeded layout
    #[arg(long, default_value_t = 4)]
    obstacles: usize,

    /// Print final telemetry as JSON on stdout
    #[arg(long)]
    telemetry: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Options::parse();

    let mut config = match &opts.config {
        Some(path) => match SimConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => SimConfig::default(),
    };
    if let Some(seed) = opts.seed {
        config = generate_layout(seed, opts.obstacles, &config);
    }

    let mut driver = match Driver::from_config(&config) {
        Ok(driver) => driver,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "Bugnav starting: robot at ({}, {}), target at ({}, {}), {} obstacles",
        config.robot.position.x,
        config.robot.position.y,
        config.target.position.x,
        config.target.position.y,
        config.obstacles.len()
    );

    let outcome = driver.run_periodically(
        Duration::from_millis(opts.interval_ms),
        opts.max_ticks,
        |sim, nav| {
            if sim.ticks() % 1000 == 0 {
                let pose = sim.pose();
                let state = nav.state();
                log::debug!(
                    "tick {}: {}{} at ({:.2}, {:.2}) heading {:.1}",
                    sim.ticks(),
                    state.as_str(),
                    if state.is_circumventing() { " (circumventing)" } else { "" },
                    pose.position.x,
                    pose.position.y,
                    pose.heading
                );
            }
        },
    );

    let stats = driver.stats();
    log::info!(
        "{} after {} ticks ({} circumvents, {} sweeps, {} frame drops)",
        if outcome.reached() { "Reached target" } else { "Stopped" },
        outcome.ticks(),
        stats.circumvents,
        stats.sweeps,
        driver.frame_drops()
    );

    if opts.telemetry {
        match serde_json::to_string_pretty(&driver.telemetry()) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize telemetry: {}", e),
        }
    }

    if !outcome.reached() {
        std::process::exit(3);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is driven by the host page on the web; nothing to run here
}
