//! The shared mutable world: grid, registry, and the colony's home.
//!
//! A [`Habitat`] bundles the only two shared mutable resources of a run.
//! Behaviors read it while deciding and write to it while applying.

use antfarm_types::{AgentId, AgentKind, AgentSnapshot, PopulationStats, Position, WorldSnapshot};
use antfarm_world::Grid;
use tracing::debug;

use crate::agent::{Agent, AgentBody, Colony};
use crate::error::AgentError;
use crate::registry::AgentRegistry;

/// Grid, registry, and colony bookkeeping for one simulation.
#[derive(Debug, Clone)]
pub struct Habitat {
    /// Spatial index of every placed agent.
    pub grid: Grid,
    /// Owner of every live agent.
    pub registry: AgentRegistry,
    /// Where the colony sits and returning ants head.
    pub home: Position,
    /// The colony receiving deliveries, once founded.
    pub colony: Option<AgentId>,
    /// Intensity lost by each pheromone per tick.
    pub pheromone_decay: u32,
}

impl Habitat {
    /// Create an empty habitat on a `width` x `height` grid with home at
    /// the grid center.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::World`] if the dimensions are invalid.
    pub fn new(width: u32, height: u32, pheromone_decay: u32) -> Result<Self, AgentError> {
        let grid = Grid::new(width, height)?;
        let home = grid.center();
        Ok(Self {
            grid,
            registry: AgentRegistry::new(),
            home,
            colony: None,
            pheromone_decay,
        })
    }

    /// Register an agent and place it at `pos` in one step.
    ///
    /// If placement fails the agent is unregistered again, so the registry
    /// never holds an agent the caller could not place.
    ///
    /// # Errors
    ///
    /// Returns the registry or grid error that prevented the spawn.
    pub fn spawn_at(&mut self, body: AgentBody, pos: Position) -> Result<AgentId, AgentError> {
        let id = self.registry.spawn(body)?;
        if let Err(source) = self.grid.place(id, pos) {
            self.registry.despawn(id, &mut self.grid);
            return Err(source.into());
        }
        debug!(agent = %id, kind = %body.kind(), %pos, "spawned");
        Ok(id)
    }

    /// Create the colony at the home position and remember it as the
    /// delivery target.
    ///
    /// # Errors
    ///
    /// Returns the registry or grid error that prevented the spawn.
    pub fn found_colony(&mut self) -> Result<AgentId, AgentError> {
        let id = self.spawn_at(AgentBody::Colony(Colony::default()), self.home)?;
        self.colony = Some(id);
        Ok(id)
    }

    /// Remove an agent from the registry and the grid. Idempotent.
    pub fn despawn(&mut self, id: AgentId) -> Option<Agent> {
        let removed = self.registry.despawn(id, &mut self.grid);
        if let Some(agent) = &removed {
            debug!(agent = %id, kind = %agent.kind(), "despawned");
        }
        removed
    }

    /// The first unharvested food item at `pos`, by ascending id.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::World`] if `pos` is off-grid.
    pub fn fresh_food_at(&self, pos: Position) -> Result<Option<AgentId>, AgentError> {
        Ok(self
            .grid
            .occupants(pos)?
            .iter()
            .copied()
            .find(|&id| self.registry.get(id).is_ok_and(Agent::is_fresh_food)))
    }

    /// Whether any unharvested food item sits at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::World`] if `pos` is off-grid.
    pub fn holds_fresh_food(&self, pos: Position) -> Result<bool, AgentError> {
        Ok(self.fresh_food_at(pos)?.is_some())
    }

    /// Food delivered to the colony so far (zero before it is founded).
    pub fn stored_food(&self) -> u64 {
        self.colony
            .and_then(|id| self.registry.get(id).ok())
            .map_or(0, |agent| match agent.body {
                AgentBody::Colony(colony) => colony.stored_food,
                _ => 0,
            })
    }

    /// Read-only copy of every live agent, for observers.
    pub fn snapshot(&self, tick: u64) -> WorldSnapshot {
        let agents = self
            .registry
            .iter()
            .map(|agent| AgentSnapshot {
                id: agent.id,
                position: self.grid.position_of(agent.id),
                state: agent.body.view(),
            })
            .collect();
        WorldSnapshot {
            tick,
            width: self.grid.width(),
            height: self.grid.height(),
            home: self.home,
            agents,
        }
    }

    /// Population counts by kind plus the colony store.
    pub fn stats(&self) -> PopulationStats {
        let count = |kind| u32::try_from(self.registry.count(kind)).unwrap_or(u32::MAX);
        PopulationStats {
            ants: count(AgentKind::Ant),
            food: count(AgentKind::Food),
            colonies: count(AgentKind::Colony),
            pheromones: count(AgentKind::Pheromone),
            stored_food: self.stored_food(),
        }
    }
}
