//! The simulation loop: one tick at a time.
//!
//! A [`Simulation`] owns every piece of mutable state for one run: the
//! habitat (grid + registry), the clock, the scheduler, and the single
//! random source. Each call to [`Simulation::advance_tick`] executes one
//! tick in three steps:
//!
//! 1. Advance the clock.
//! 2. Run one scheduler pass over every live agent.
//! 3. If the new tick is a multiple of the spawn interval, place fresh
//!    food at random cells.
//!
//! Nothing else touches the random source, so a seed and an activation
//! policy fully determine a run.

use antfarm_agents::{AgentBody, AgentError, Ant, Food, Habitat, Pheromone};
use antfarm_types::{AgentId, PopulationStats, Position, TickResult, WorldSnapshot};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::clock::WorldClock;
use crate::config::{ConfigError, SimulationConfig};
use crate::scheduler::{Scheduler, TickError};

/// Errors that can occur while building a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The configuration failed validation.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// Placing the initial population failed.
    #[error("setup error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },
}

/// A running ant-foraging simulation.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Configuration consumed at construction.
    config: SimulationConfig,
    /// Tick counter.
    clock: WorldClock,
    /// Grid, registry, and home.
    habitat: Habitat,
    /// Activation order and visibility.
    scheduler: Scheduler,
    /// The only random source of the run.
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Build a simulation from configuration.
    ///
    /// The colony is founded at the grid center first, then the initial
    /// ants and food are placed at uniformly random cells (which may be
    /// shared). The clock starts at tick 0.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Config`] if the configuration is invalid,
    /// or [`SimulationError::Agent`] if the initial population cannot be
    /// placed.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut habitat = Habitat::new(
            config.world.width,
            config.world.height,
            config.pheromone.decay_per_tick,
        )?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.world.seed);

        let colony = habitat.found_colony()?;
        for _ in 0..config.population.initial_ants {
            let pos = habitat.grid.random_cell(&mut rng);
            habitat.spawn_at(AgentBody::Ant(Ant::new()), pos)?;
        }
        for _ in 0..config.population.initial_food {
            let ttl = rng.random_range(config.food.ttl_min..config.food.ttl_max);
            let pos = habitat.grid.random_cell(&mut rng);
            habitat.spawn_at(AgentBody::Food(Food::new(ttl)), pos)?;
        }

        info!(
            name = %config.world.name,
            seed = config.world.seed,
            width = config.world.width,
            height = config.world.height,
            home = %habitat.home,
            %colony,
            ants = config.population.initial_ants,
            food = config.population.initial_food,
            policy = ?config.scheduler.activation,
            "Simulation initialized"
        );

        Ok(Self {
            scheduler: Scheduler::new(config.scheduler.activation),
            config,
            clock: WorldClock::new(),
            habitat,
            rng,
        })
    }

    /// Execute one tick.
    ///
    /// Recoverable per-agent failures are reported in
    /// [`TickResult::stalled`] and never interrupt the tick.
    ///
    /// # Errors
    ///
    /// Returns [`TickError`] on a fatal failure. The tick is abandoned
    /// part-way and the habitat should be treated as inconsistent.
    pub fn advance_tick(&mut self) -> Result<TickResult, TickError> {
        let tick = self.clock.advance()?;
        let pass = self.scheduler.tick(&mut self.habitat, &mut self.rng)?;

        let spawned = if self.clock.every(self.config.food.spawn_interval_ticks) {
            self.spawn_food(self.config.food.spawn_count)
                .map_err(|source| TickError::Spawn { source })?
        } else {
            Vec::new()
        };

        info!(
            tick,
            activated = pass.activated,
            spawned = spawned.len(),
            despawned = pass.despawned.len(),
            stalled = pass.stalled.len(),
            agents = self.habitat.registry.len(),
            stored_food = self.habitat.stored_food(),
            "Tick complete"
        );

        Ok(TickResult {
            tick_number: tick,
            spawned,
            despawned: pass.despawned,
            stalled: pass.stalled,
        })
    }

    /// Spawn `count` food items with a ttl drawn from the configured range.
    ///
    /// Each item goes to a random empty cell, or to any random cell when
    /// the grid is full.
    ///
    /// # Errors
    ///
    /// Returns the [`AgentError`] that prevented a spawn. Items spawned
    /// before the failure stay in place.
    pub fn spawn_food(&mut self, count: u32) -> Result<Vec<AgentId>, AgentError> {
        let mut spawned = Vec::new();
        for _ in 0..count {
            let ttl = self
                .rng
                .random_range(self.config.food.ttl_min..self.config.food.ttl_max);
            let pos = match self.habitat.grid.random_empty(&mut self.rng) {
                Some(pos) => pos,
                None => self.habitat.grid.random_cell(&mut self.rng),
            };
            let id = self.habitat.spawn_at(AgentBody::Food(Food::new(ttl)), pos)?;
            debug!(food = %id, %pos, ttl, "food spawned");
            spawned.push(id);
        }
        if !spawned.is_empty() {
            info!(tick = self.clock.tick(), count = spawned.len(), "Food spawned");
        }
        Ok(spawned)
    }

    /// Drop a pheromone marker at `pos`.
    ///
    /// No built-in behavior lays pheromones; callers that model trail
    /// laying use this hook. The marker fades by the configured decay each
    /// tick and is removed once its intensity reaches zero.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::World`] if `pos` is off the grid.
    pub fn lay_pheromone(&mut self, pos: Position, intensity: u32) -> Result<AgentId, AgentError> {
        self.habitat
            .spawn_at(AgentBody::Pheromone(Pheromone { intensity }), pos)
    }

    /// Read-only view of every live agent at the current tick.
    pub fn snapshot(&self) -> WorldSnapshot {
        self.habitat.snapshot(self.clock.tick())
    }

    /// Population counts and the colony store.
    pub fn stats(&self) -> PopulationStats {
        self.habitat.stats()
    }

    /// The last tick executed (0 before the first).
    pub const fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// The colony founded at construction.
    pub const fn colony(&self) -> Option<AgentId> {
        self.habitat.colony
    }

    /// The configuration this simulation was built from.
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The scheduler in use.
    pub const fn scheduler(&self) -> Scheduler {
        self.scheduler
    }

    /// Shared world state.
    pub const fn habitat(&self) -> &Habitat {
        &self.habitat
    }

    /// Mutable world state, for setting up scenarios between ticks.
    pub const fn habitat_mut(&mut self) -> &mut Habitat {
        &mut self.habitat
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use antfarm_types::{AgentKind, AgentStateView};

    use super::*;

    fn config(ants: u32, food: u32) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.world.width = 9;
        config.world.height = 9;
        config.population.initial_ants = ants;
        config.population.initial_food = food;
        config
    }

    #[test]
    fn new_places_initial_population() {
        let sim = Simulation::new(config(4, 6)).unwrap();
        let stats = sim.stats();
        assert_eq!(stats.ants, 4);
        assert_eq!(stats.food, 6);
        assert_eq!(stats.colonies, 1);
        assert_eq!(stats.stored_food, 0);
        assert_eq!(sim.tick(), 0);

        let snap = sim.snapshot();
        let colony = snap.agent(sim.colony().unwrap()).unwrap();
        assert_eq!(colony.position, Some(Position::new(4, 4)));
        assert!(snap.agents.iter().all(|agent| agent.position.is_some()));
    }

    #[test]
    fn initial_food_ttl_within_range() {
        let sim = Simulation::new(config(0, 30)).unwrap();
        for agent in &sim.snapshot().agents {
            if let AgentStateView::Food { ttl, harvested } = agent.state {
                assert!((20..50).contains(&ttl));
                assert!(!harvested);
            }
        }
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut bad = config(1, 1);
        bad.food.ttl_min = 10;
        bad.food.ttl_max = 3;
        assert!(matches!(
            Simulation::new(bad),
            Err(SimulationError::Config { .. })
        ));
    }

    #[test]
    fn advance_tick_numbers_ticks_from_one() {
        let mut sim = Simulation::new(config(2, 0)).unwrap();
        assert_eq!(sim.advance_tick().unwrap().tick_number, 1);
        assert_eq!(sim.advance_tick().unwrap().tick_number, 2);
        assert_eq!(sim.tick(), 2);
    }

    #[test]
    fn food_spawns_on_interval() {
        let mut cfg = config(0, 0);
        cfg.food.spawn_interval_ticks = 3;
        cfg.food.spawn_count = 2;
        let mut sim = Simulation::new(cfg).unwrap();

        let spawned: Vec<usize> = (0..6)
            .map(|_| sim.advance_tick().unwrap().spawned.len())
            .collect();
        assert_eq!(spawned, vec![0, 0, 2, 0, 0, 2]);
        assert_eq!(sim.stats().food, 4);
    }

    #[test]
    fn spawn_interval_zero_disables_spawning() {
        let mut cfg = config(0, 0);
        cfg.food.spawn_interval_ticks = 0;
        let mut sim = Simulation::new(cfg).unwrap();
        for _ in 0..10 {
            assert!(sim.advance_tick().unwrap().spawned.is_empty());
        }
        assert_eq!(sim.stats().food, 0);
    }

    #[test]
    fn spawned_food_prefers_empty_cells() {
        let mut cfg = config(0, 0);
        cfg.world.width = 2;
        cfg.world.height = 2;
        let mut sim = Simulation::new(cfg).unwrap();
        // Colony holds one cell; three spawns fill the other three.
        let ids = sim.spawn_food(3).unwrap();
        let cells: std::collections::BTreeSet<_> = ids
            .iter()
            .map(|&id| sim.habitat().grid.position_of(id).unwrap())
            .collect();
        assert_eq!(cells.len(), 3);
        assert!(sim.habitat().grid.empty_cells().is_empty());

        // With no empty cell left, food still lands somewhere.
        let extra = sim.spawn_food(1).unwrap();
        let extra = extra.first().copied().unwrap();
        assert!(sim.habitat().grid.position_of(extra).is_some());
    }

    #[test]
    fn pheromone_fades_and_evaporates() {
        let mut cfg = config(0, 0);
        cfg.food.spawn_interval_ticks = 0;
        cfg.pheromone.decay_per_tick = 2;
        let mut sim = Simulation::new(cfg).unwrap();
        let marker = sim.lay_pheromone(Position::new(0, 0), 3).unwrap();

        sim.advance_tick().unwrap(); // 3 -> 1
        sim.advance_tick().unwrap(); // 1 -> 0
        assert_eq!(
            sim.snapshot().agent(marker).unwrap().state,
            AgentStateView::Pheromone { intensity: 0 }
        );
        let result = sim.advance_tick().unwrap();
        assert_eq!(result.despawned, vec![marker]);
        assert_eq!(sim.snapshot().count(AgentKind::Pheromone), 0);
    }

    #[test]
    fn lay_pheromone_rejects_off_grid() {
        let mut sim = Simulation::new(config(0, 0)).unwrap();
        let result = sim.lay_pheromone(Position::new(9, 0), 5);
        assert!(matches!(result, Err(AgentError::World { .. })));
        assert_eq!(sim.stats().pheromones, 0);
    }
}
