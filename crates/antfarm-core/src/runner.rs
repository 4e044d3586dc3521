//! Simulation loop runner.
//!
//! [`run_simulation`] drives [`Simulation::advance_tick`] until a tick
//! limit is reached, calling a [`TickCallback`] after every tick and
//! optionally sleeping between ticks to pace a run in real time.

use std::time::Duration;

use antfarm_types::{PopulationStats, TickResult};
use tracing::info;

use crate::scheduler::TickError;
use crate::simulation::Simulation;

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Result of the simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    /// Total number of ticks executed by this run.
    pub total_ticks: u64,
    /// The last tick result, if any tick completed.
    pub final_result: Option<TickResult>,
    /// Population at the end of the run.
    pub stats: PopulationStats,
}

/// Callback invoked after each tick completes.
///
/// Implementations can use this to log progress, record trajectories, or
/// feed a viewer. The callback sees the tick result and the simulation
/// state after the tick.
pub trait TickCallback {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, result: &TickResult, simulation: &Simulation);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _result: &TickResult, _simulation: &Simulation) {}
}

/// Run the simulation for up to `max_ticks` ticks.
///
/// A `max_ticks` of 0 runs until a tick fails. A non-zero `tick_interval`
/// sleeps the calling thread between ticks.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick fails. Ticks completed before the
/// failure remain applied to `simulation`.
pub fn run_simulation(
    simulation: &mut Simulation,
    max_ticks: u64,
    tick_interval: Duration,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut final_result: Option<TickResult> = None;
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks,
        tick_interval_ms = tick_interval.as_millis(),
        start_tick = simulation.tick(),
        "Simulation starting"
    );

    while max_ticks == 0 || total_ticks < max_ticks {
        let result = simulation.advance_tick()?;
        total_ticks = total_ticks.saturating_add(1);
        callback.on_tick(&result, simulation);
        final_result = Some(result);

        if !tick_interval.is_zero() {
            std::thread::sleep(tick_interval);
        }
    }

    let stats = simulation.stats();
    info!(
        total_ticks,
        final_tick = simulation.tick(),
        ants = stats.ants,
        food = stats.food,
        stored_food = stats.stored_food,
        "Simulation ended"
    );

    Ok(SimulationResult {
        total_ticks,
        final_result,
        stats,
    })
}
