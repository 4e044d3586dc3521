//! Error types for the `antfarm-world` crate.

use antfarm_types::{AgentId, Position};

/// Errors that can occur during grid operations.
///
/// None of these are expected in a healthy run: wraparound keeps positions
/// in range and the registry keeps placement consistent. Callers treat them
/// as fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// A grid was requested with a zero or unrepresentable dimension.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A position lies outside the grid.
    #[error("position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },

    /// The agent has no current cell.
    #[error("agent {0} is not placed on the grid")]
    AgentNotPlaced(AgentId),

    /// The agent already occupies a cell and cannot be placed again.
    #[error("agent {agent} is already placed at {position}")]
    AgentAlreadyPlaced {
        /// The agent.
        agent: AgentId,
        /// Where it currently sits.
        position: Position,
    },
}
