//! Tick callback that reports progress through tracing.

use antfarm_core::runner::TickCallback;
use antfarm_core::simulation::Simulation;
use antfarm_types::TickResult;
use tracing::{debug, info};

/// Logs a population summary every `every` ticks and per-tick churn at
/// debug level.
pub struct LogCallback {
    every: u64,
}

impl LogCallback {
    /// Create a callback that summarizes every `every` ticks (0 = never).
    pub const fn new(every: u64) -> Self {
        Self { every }
    }
}

impl TickCallback for LogCallback {
    fn on_tick(&mut self, result: &TickResult, simulation: &Simulation) {
        debug!(
            tick = result.tick_number,
            spawned = ?result.spawned,
            despawned = ?result.despawned,
            stalled = ?result.stalled,
            "Tick result"
        );

        if result.tick_number.checked_rem(self.every) == Some(0) {
            let stats = simulation.stats();
            info!(
                tick = result.tick_number,
                ants = stats.ants,
                food = stats.food,
                pheromones = stats.pheromones,
                stored_food = stats.stored_food,
                "Population"
            );
        }
    }
}
