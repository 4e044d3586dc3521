//! Agent registry: identity and lifetime of every agent.
//!
//! The [`AgentRegistry`] exclusively owns agents. Identifiers are allocated
//! monotonically from a high-water mark, so an id is never reused within a
//! run even when the most recent agent has already been removed.

use std::collections::BTreeMap;

use antfarm_types::{AgentId, AgentKind};
use antfarm_world::Grid;

use crate::agent::{Agent, AgentBody, Ant, Colony, Food, Pheromone};
use crate::error::AgentError;

/// Owns the set of live agents.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    /// Live agents in ascending id order.
    agents: BTreeMap<AgentId, Agent>,
    /// Next identifier to hand out.
    next_id: AgentId,
}

/// Generates a typed mutable accessor for one agent kind.
macro_rules! kind_accessor {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $name(&mut self, id: AgentId) -> Result<&mut $ty, AgentError> {
            let agent = self.agents.get_mut(&id).ok_or(AgentError::AgentNotFound(id))?;
            match &mut agent.body {
                AgentBody::$variant(state) => Ok(state),
                other => Err(AgentError::WrongKind {
                    agent: id,
                    expected: AgentKind::$variant,
                    actual: other.kind(),
                }),
            }
        }
    };
}

impl AgentRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            agents: BTreeMap::new(),
            next_id: AgentId::FIRST,
        }
    }

    /// Register a new agent and return its identifier.
    ///
    /// The agent is not placed on the grid; placement is a separate call.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::IdSpaceExhausted`] once every `u64` has been used.
    pub fn spawn(&mut self, body: AgentBody) -> Result<AgentId, AgentError> {
        let id = self.next_id;
        self.next_id = id.checked_next().ok_or(AgentError::IdSpaceExhausted)?;
        self.agents.insert(id, Agent { id, body });
        Ok(id)
    }

    /// Remove an agent from the registry and from the grid.
    ///
    /// Idempotent: removing an unknown or already removed agent returns
    /// `None` and leaves both structures untouched.
    pub fn despawn(&mut self, id: AgentId, grid: &mut Grid) -> Option<Agent> {
        grid.remove(id);
        self.agents.remove(&id)
    }

    /// All live identifiers in ascending order.
    pub fn all(&self) -> Vec<AgentId> {
        self.agents.keys().copied().collect()
    }

    /// Look up an agent.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::AgentNotFound`] if the id is not live.
    pub fn get(&self, id: AgentId) -> Result<&Agent, AgentError> {
        self.agents.get(&id).ok_or(AgentError::AgentNotFound(id))
    }

    /// Whether the id refers to a live agent.
    pub fn contains(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    /// Number of live agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no agents are alive.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Iterate over live agents in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.values()
    }

    /// Count live agents of one kind.
    pub fn count(&self, kind: AgentKind) -> usize {
        self.agents.values().filter(|agent| agent.kind() == kind).count()
    }

    kind_accessor!(
        /// Mutable access to an ant's state.
        ant_mut, Ant, Ant
    );
    kind_accessor!(
        /// Mutable access to a food item's state.
        food_mut, Food, Food
    );
    kind_accessor!(
        /// Mutable access to a colony's state.
        colony_mut, Colony, Colony
    );
    kind_accessor!(
        /// Mutable access to a pheromone's state.
        pheromone_mut, Pheromone, Pheromone
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use antfarm_types::Position;

    use super::*;

    #[test]
    fn ids_start_at_zero_and_increase() {
        let mut registry = AgentRegistry::new();
        let a = registry.spawn(AgentBody::Ant(Ant::new())).unwrap();
        let b = registry.spawn(AgentBody::Food(Food::new(3))).unwrap();
        assert_eq!(a, AgentId(0));
        assert_eq!(b, AgentId(1));
        assert_eq!(registry.all(), vec![a, b]);
    }

    #[test]
    fn ids_are_not_reused_after_despawn() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut registry = AgentRegistry::new();
        let _ = registry.spawn(AgentBody::Ant(Ant::new())).unwrap();
        let last = registry.spawn(AgentBody::Food(Food::new(3))).unwrap();
        registry.despawn(last, &mut grid);
        let next = registry.spawn(AgentBody::Food(Food::new(3))).unwrap();
        assert_eq!(next, AgentId(2));
    }

    #[test]
    fn despawn_removes_from_grid_and_is_idempotent() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut registry = AgentRegistry::new();
        let food = registry.spawn(AgentBody::Food(Food::new(3))).unwrap();
        grid.place(food, Position::new(1, 1)).unwrap();

        assert!(registry.despawn(food, &mut grid).is_some());
        assert!(grid.position_of(food).is_none());
        assert!(registry.despawn(food, &mut grid).is_none());
        assert_eq!(registry.get(food).err(), Some(AgentError::AgentNotFound(food)));
    }

    #[test]
    fn typed_accessors_check_kind() {
        let mut registry = AgentRegistry::new();
        let colony = registry.spawn(AgentBody::Colony(Colony::default())).unwrap();
        registry.colony_mut(colony).unwrap().stored_food = 4;
        assert_eq!(
            registry.ant_mut(colony).err(),
            Some(AgentError::WrongKind {
                agent: colony,
                expected: AgentKind::Ant,
                actual: AgentKind::Colony,
            })
        );
        assert_eq!(registry.count(AgentKind::Colony), 1);
    }
}
