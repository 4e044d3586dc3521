//! Enumeration types for the Antfarm simulation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Agent kinds
// ---------------------------------------------------------------------------

/// The closed set of agent kinds living on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AgentKind {
    /// A searcher that forages for food and carries it home.
    Ant,
    /// A food item that decays unless harvested.
    Food,
    /// The stationary colony at the home position.
    Colony,
    /// A decaying environmental marker.
    Pheromone,
}

impl core::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Ant => "ant",
            Self::Food => "food",
            Self::Colony => "colony",
            Self::Pheromone => "pheromone",
        };
        f.write_str(name)
    }
}

/// Foraging phase of an ant.
///
/// There is no terminal phase: an ant cycles between the two for the whole
/// run.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AntPhase {
    /// Wandering the grid looking for food.
    #[default]
    Searching,
    /// Carrying harvested food back towards the colony.
    Returning,
}

// ---------------------------------------------------------------------------
// Scheduling
// ---------------------------------------------------------------------------

/// How agents are ordered and what they can see of each other within a tick.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ActivationPolicy {
    /// Shuffle once per tick, then decide and apply each agent in turn.
    /// Later agents observe earlier agents' effects from the same tick.
    #[default]
    SequentialRandom,
    /// Every agent decides against the state at the start of the tick;
    /// all decisions are applied afterwards in shuffled order.
    BatchApply,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_parses_from_snake_case() {
        let policy: Result<ActivationPolicy, _> = serde_json::from_str("\"batch_apply\"");
        assert_eq!(policy.ok(), Some(ActivationPolicy::BatchApply));
    }

    #[test]
    fn ants_start_searching() {
        assert_eq!(AntPhase::default(), AntPhase::Searching);
    }

    #[test]
    fn kind_display_is_lowercase() {
        assert_eq!(AgentKind::Pheromone.to_string(), "pheromone");
    }
}
