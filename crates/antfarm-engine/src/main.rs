//! Headless engine binary for the Antfarm simulation.
//!
//! Loads configuration, builds the world, runs the tick loop until the
//! configured tick limit, and prints the final world snapshot as JSON on
//! stdout. Logs go to stderr.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `antfarm-config.yaml` (or the path given as
//!    the first argument), falling back to defaults if the file is absent
//! 2. Initialize structured logging (tracing)
//! 3. Build the simulation (colony, ants, initial food)
//! 4. Run the simulation loop
//! 5. Write the final snapshot

mod error;
mod log_callback;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use antfarm_core::config::SimulationConfig;
use antfarm_core::runner;
use antfarm_core::simulation::Simulation;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::log_callback::LogCallback;

/// Default config file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "antfarm-config.yaml";

/// Ticks between population summaries in the log.
const SUMMARY_EVERY: u64 = 10;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, setup, a tick, or the final output
/// fails.
fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let (config, config_found) = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    info!("antfarm-engine starting");
    if !config_found {
        info!("Config file not found, using defaults");
    }
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        width = config.world.width,
        height = config.world.height,
        tick_interval_ms = config.world.tick_interval_ms,
        max_ticks = config.simulation.max_ticks,
        "Configuration loaded"
    );

    // 3. Build the simulation.
    let max_ticks = config.simulation.max_ticks;
    let tick_interval = Duration::from_millis(config.world.tick_interval_ms);
    let mut simulation = Simulation::new(config)?;

    // 4. Run.
    let mut callback = LogCallback::new(SUMMARY_EVERY);
    let result = runner::run_simulation(&mut simulation, max_ticks, tick_interval, &mut callback)?;

    // 5. Final snapshot.
    let snapshot = simulation.snapshot();
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &snapshot)?;
    writeln!(stdout)?;

    info!(
        total_ticks = result.total_ticks,
        stored_food = result.stats.stored_food,
        "antfarm-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration.
///
/// Returns the config and whether a file was actually read.
fn load_config() -> Result<(SimulationConfig, bool), EngineError> {
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if config_path.exists() {
        let config = SimulationConfig::from_file(&config_path)?;
        Ok((config, true))
    } else {
        Ok((SimulationConfig::default(), false))
    }
}
