//! Plain data structs shared between the kernel and its observers.
//!
//! Snapshots are read-only copies produced once per tick. Nothing that
//! consumes them can reach back into the grid or the registry.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{AgentKind, AntPhase};
use crate::ids::AgentId;

/// A cell coordinate on the toroidal grid.
///
/// Valid positions satisfy `x < width` and `y < height`; the grid wraps all
/// arithmetic so behaviors never construct an out-of-range position.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Column index.
    pub x: u32,
    /// Row index.
    pub y: u32,
}

impl Position {
    /// Construct a position from its column and row.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Kind-specific observable fields of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AgentStateView {
    /// An ant's foraging state.
    Ant {
        /// Current phase.
        phase: AntPhase,
        /// Food item picked up on the way out, cleared on delivery.
        carrying: Option<AgentId>,
    },
    /// A food item's lifecycle state.
    Food {
        /// Remaining ticks before expiry.
        ttl: u32,
        /// Whether an ant has picked this item up.
        harvested: bool,
    },
    /// The colony's accumulated store.
    Colony {
        /// Food items delivered so far.
        stored_food: u64,
    },
    /// A pheromone marker's strength.
    Pheromone {
        /// Remaining intensity; the marker disappears at zero.
        intensity: u32,
    },
}

impl AgentStateView {
    /// The kind of agent this view describes.
    pub const fn kind(&self) -> AgentKind {
        match self {
            Self::Ant { .. } => AgentKind::Ant,
            Self::Food { .. } => AgentKind::Food,
            Self::Colony { .. } => AgentKind::Colony,
            Self::Pheromone { .. } => AgentKind::Pheromone,
        }
    }
}

/// Read-only view of one live agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AgentSnapshot {
    /// The agent's identifier.
    pub id: AgentId,
    /// Where the agent sits, if it has been placed.
    pub position: Option<Position>,
    /// Kind and kind-specific observable fields.
    pub state: AgentStateView,
}

/// Read-only view of the whole simulation after a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldSnapshot {
    /// The tick this snapshot was taken after (0 before the first tick).
    pub tick: u64,
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// The colony's home position.
    pub home: Position,
    /// Every live agent, in ascending id order.
    pub agents: Vec<AgentSnapshot>,
}

impl WorldSnapshot {
    /// Return the snapshot of a single agent, if it is alive.
    pub fn agent(&self, id: AgentId) -> Option<&AgentSnapshot> {
        self.agents
            .binary_search_by_key(&id, |agent| agent.id)
            .ok()
            .and_then(|idx| self.agents.get(idx))
    }

    /// Count live agents of the given kind.
    pub fn count(&self, kind: AgentKind) -> usize {
        self.agents
            .iter()
            .filter(|agent| agent.state.kind() == kind)
            .count()
    }
}

/// Outcome of one call to `advance_tick`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TickResult {
    /// The tick that was just executed (1 for the first tick).
    pub tick_number: u64,
    /// Agents created during this tick.
    pub spawned: Vec<AgentId>,
    /// Agents removed during this tick.
    pub despawned: Vec<AgentId>,
    /// Ants that could not move this tick because every neighbor was occupied.
    pub stalled: Vec<AgentId>,
}

/// Population counts at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PopulationStats {
    /// Live ants.
    pub ants: u32,
    /// Live food items, harvested or not.
    pub food: u32,
    /// Live colonies.
    pub colonies: u32,
    /// Live pheromone markers.
    pub pheromones: u32,
    /// Food delivered to the colony so far.
    pub stored_food: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> WorldSnapshot {
        WorldSnapshot {
            tick: 3,
            width: 5,
            height: 5,
            home: Position::new(2, 2),
            agents: vec![
                AgentSnapshot {
                    id: AgentId(0),
                    position: Some(Position::new(2, 2)),
                    state: AgentStateView::Colony { stored_food: 1 },
                },
                AgentSnapshot {
                    id: AgentId(1),
                    position: Some(Position::new(0, 4)),
                    state: AgentStateView::Ant {
                        phase: AntPhase::Returning,
                        carrying: Some(AgentId(7)),
                    },
                },
                AgentSnapshot {
                    id: AgentId(7),
                    position: Some(Position::new(0, 4)),
                    state: AgentStateView::Food {
                        ttl: 4,
                        harvested: true,
                    },
                },
            ],
        }
    }

    #[test]
    fn agent_lookup_by_id() {
        let snap = snapshot();
        assert_eq!(
            snap.agent(AgentId(7)).map(|a| a.state.kind()),
            Some(AgentKind::Food)
        );
        assert!(snap.agent(AgentId(2)).is_none());
    }

    #[test]
    fn counts_by_kind() {
        let snap = snapshot();
        assert_eq!(snap.count(AgentKind::Ant), 1);
        assert_eq!(snap.count(AgentKind::Pheromone), 0);
    }

    #[test]
    fn state_view_is_internally_tagged() {
        let json = serde_json::to_value(AgentStateView::Pheromone { intensity: 9 }).ok();
        let kind = json
            .as_ref()
            .and_then(|v| v.get("kind"))
            .and_then(serde_json::Value::as_str);
        assert_eq!(kind, Some("pheromone"));
    }
}
