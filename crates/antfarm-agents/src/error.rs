//! Error types for the antfarm-agents crate.
//!
//! Only [`AgentError::NoAvailableMove`] is recoverable: the ant skips its
//! move for the tick. Everything else means the registry and grid disagree
//! and the tick must stop.

use antfarm_types::{AgentId, AgentKind, Position};
use antfarm_world::WorldError;

/// Errors that can occur during agent bookkeeping and behavior steps.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    /// Agent with the given ID is not in the registry.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// The agent exists but is not of the kind the caller expected.
    #[error("agent {agent} is a {actual}, expected a {expected}")]
    WrongKind {
        /// The agent.
        agent: AgentId,
        /// The kind the caller asked for.
        expected: AgentKind,
        /// The kind the agent actually is.
        actual: AgentKind,
    },

    /// Every neighboring cell is occupied, so a searching ant cannot wander.
    #[error("agent {agent} has no free neighbor around {position}")]
    NoAvailableMove {
        /// The stuck ant.
        agent: AgentId,
        /// Where it is stuck.
        position: Position,
    },

    /// The registry has handed out every representable identifier.
    #[error("agent identifier space exhausted")]
    IdSpaceExhausted,

    /// An arithmetic overflow occurred while updating agent state.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// A grid operation failed.
    #[error("grid error: {source}")]
    World {
        /// The underlying grid error.
        #[from]
        source: WorldError,
    },
}

impl AgentError {
    /// Whether the scheduler may absorb this error and carry on with the tick.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoAvailableMove { .. })
    }
}
