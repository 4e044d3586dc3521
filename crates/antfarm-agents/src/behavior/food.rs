//! Food lifecycle: decay each tick, leave the grid once harvested or expired.

use antfarm_types::AgentId;
use tracing::debug;

use super::Applied;
use crate::agent::Food;
use crate::error::AgentError;
use crate::habitat::Habitat;

/// Why a food item leaves the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// An ant picked it up on an earlier step.
    Harvested,
    /// Its time to live ran out before anyone found it.
    Expired,
}

/// A food item's decision for the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodAction {
    /// Lose one tick of validity.
    Decay,
    /// Leave the grid and the registry.
    Remove(Removal),
}

/// Harvested items go first; otherwise an item at zero expires and any
/// other item decays.
pub const fn decide(food: Food) -> FoodAction {
    if food.harvested {
        FoodAction::Remove(Removal::Harvested)
    } else if food.ttl == 0 {
        FoodAction::Remove(Removal::Expired)
    } else {
        FoodAction::Decay
    }
}

/// Apply a food decision.
///
/// # Errors
///
/// Returns [`AgentError::AgentNotFound`] or [`AgentError::WrongKind`] if
/// `id` is not a live food item when decaying. Removal is idempotent.
pub fn apply(habitat: &mut Habitat, id: AgentId, action: FoodAction) -> Result<Applied, AgentError> {
    match action {
        FoodAction::Decay => {
            let food = habitat.registry.food_mut(id)?;
            food.ttl = food.ttl.saturating_sub(1);
            Ok(Applied::Updated)
        }
        FoodAction::Remove(reason) => {
            habitat.despawn(id);
            debug!(food = %id, ?reason, "food removed");
            Ok(Applied::Despawned)
        }
    }
}
