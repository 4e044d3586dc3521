//! Per-kind behaviors, split into a decide phase and an apply phase.
//!
//! [`decide`] reads a [`Habitat`] and returns a [`PendingAction`] without
//! mutating anything. [`apply`] carries the action out, possibly after
//! other agents have already changed the habitat. The sequential policy
//! calls them back to back; the batch policy decides every agent before
//! applying any of them. Apply re-validates anything another agent could
//! have changed in between.

pub mod ant;
pub mod colony;
pub mod food;
pub mod pheromone;

use antfarm_types::AgentId;
use rand::Rng;

use crate::agent::AgentBody;
use crate::error::AgentError;
use crate::habitat::Habitat;

pub use ant::AntAction;
pub use food::FoodAction;
pub use pheromone::PheromoneAction;

/// What an agent decided to do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// An ant's move or delivery.
    Ant(AntAction),
    /// A food item's decay or removal.
    Food(FoodAction),
    /// The colony does nothing on its own.
    ColonyIdle,
    /// A pheromone's fading or removal.
    Pheromone(PheromoneAction),
}

/// What applying an action did to the agent itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The agent is still alive.
    Updated,
    /// The agent removed itself from the habitat.
    Despawned,
}

/// Decide what agent `id` does this tick, reading `habitat` only.
///
/// # Errors
///
/// Returns [`AgentError::NoAvailableMove`] when a searching ant is boxed in
/// (recoverable), or a fatal error if the agent is unknown or unplaced.
pub fn decide<R: Rng>(
    habitat: &Habitat,
    id: AgentId,
    rng: &mut R,
) -> Result<PendingAction, AgentError> {
    let agent = habitat.registry.get(id)?;
    let action = match agent.body {
        AgentBody::Ant(state) => PendingAction::Ant(ant::decide(habitat, id, state, rng)?),
        AgentBody::Food(state) => PendingAction::Food(food::decide(state)),
        AgentBody::Colony(_) => colony::decide(),
        AgentBody::Pheromone(state) => PendingAction::Pheromone(pheromone::decide(state)),
    };
    Ok(action)
}

/// Carry out a previously decided action for agent `id`.
///
/// # Errors
///
/// Returns a fatal error if the agent, or the colony it delivers to, is
/// missing, of the wrong kind, or not placed.
pub fn apply(
    habitat: &mut Habitat,
    id: AgentId,
    action: PendingAction,
) -> Result<Applied, AgentError> {
    match action {
        PendingAction::Ant(action) => ant::apply(habitat, id, action),
        PendingAction::Food(action) => food::apply(habitat, id, action),
        PendingAction::ColonyIdle => Ok(Applied::Updated),
        PendingAction::Pheromone(action) => pheromone::apply(habitat, id, action),
    }
}

/// Decide and immediately apply, as the sequential policy does.
///
/// # Errors
///
/// Propagates errors from [`decide`] and [`apply`].
pub fn step<R: Rng>(
    habitat: &mut Habitat,
    id: AgentId,
    rng: &mut R,
) -> Result<Applied, AgentError> {
    let action = decide(habitat, id, rng)?;
    apply(habitat, id, action)
}
