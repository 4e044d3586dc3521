//! The agent variant and its kind-specific payloads.
//!
//! Agents are a closed set, so behavior is dispatched with `match` on
//! [`AgentBody`]. Positions are not stored here: the grid is the single
//! source of truth for where an agent sits.

use antfarm_types::{AgentId, AgentKind, AgentStateView, AntPhase};

/// A searcher ant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ant {
    /// Current foraging phase.
    pub phase: AntPhase,
    /// The food item picked up on the way out, cleared on delivery.
    pub carrying: Option<AgentId>,
}

impl Ant {
    /// A fresh ant that has not found anything yet.
    pub const fn new() -> Self {
        Self {
            phase: AntPhase::Searching,
            carrying: None,
        }
    }

    /// An ant already heading home, as if it had just picked up `food`.
    pub const fn returning(carrying: Option<AgentId>) -> Self {
        Self {
            phase: AntPhase::Returning,
            carrying,
        }
    }
}

/// A food item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    /// Remaining ticks before the item expires.
    pub ttl: u32,
    /// Set once an ant picks the item up. The item leaves the grid on its
    /// next step.
    pub harvested: bool,
}

impl Food {
    /// A fresh, unharvested item with `ttl` ticks to live.
    pub const fn new(ttl: u32) -> Self {
        Self {
            ttl,
            harvested: false,
        }
    }

    /// Whether an ant can still pick this item up.
    pub const fn is_fresh(&self) -> bool {
        !self.harvested
    }
}

/// The colony sitting at the home position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Colony {
    /// Food items delivered so far.
    pub stored_food: u64,
}

/// A decaying environmental marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pheromone {
    /// Remaining strength; the marker is removed once this reaches zero.
    pub intensity: u32,
}

/// Kind-specific agent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentBody {
    /// See [`Ant`].
    Ant(Ant),
    /// See [`Food`].
    Food(Food),
    /// See [`Colony`].
    Colony(Colony),
    /// See [`Pheromone`].
    Pheromone(Pheromone),
}

impl AgentBody {
    /// The kind tag of this body.
    pub const fn kind(&self) -> AgentKind {
        match self {
            Self::Ant(_) => AgentKind::Ant,
            Self::Food(_) => AgentKind::Food,
            Self::Colony(_) => AgentKind::Colony,
            Self::Pheromone(_) => AgentKind::Pheromone,
        }
    }

    /// The observable fields exposed to snapshots.
    pub const fn view(&self) -> AgentStateView {
        match *self {
            Self::Ant(ant) => AgentStateView::Ant {
                phase: ant.phase,
                carrying: ant.carrying,
            },
            Self::Food(food) => AgentStateView::Food {
                ttl: food.ttl,
                harvested: food.harvested,
            },
            Self::Colony(colony) => AgentStateView::Colony {
                stored_food: colony.stored_food,
            },
            Self::Pheromone(pheromone) => AgentStateView::Pheromone {
                intensity: pheromone.intensity,
            },
        }
    }
}

/// A live agent: an identity plus its kind-specific state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Agent {
    /// Registry-assigned identifier.
    pub id: AgentId,
    /// Kind-specific state.
    pub body: AgentBody,
}

impl Agent {
    /// The kind tag of this agent.
    pub const fn kind(&self) -> AgentKind {
        self.body.kind()
    }

    /// Whether this agent is food that an ant can still pick up.
    pub const fn is_fresh_food(&self) -> bool {
        matches!(self.body, AgentBody::Food(food) if food.is_fresh())
    }
}
