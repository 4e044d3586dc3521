//! Agents and their behaviors for the Antfarm simulation.
//!
//! This crate holds everything that operates on agent state: the closed
//! [`AgentBody`] variant, the [`AgentRegistry`] that owns agents, the
//! [`Habitat`] pairing the registry with the grid, and the per-kind
//! behaviors split into decide and apply phases so the scheduler can choose
//! between sequential and batch activation.
//!
//! # Modules
//!
//! - [`agent`] -- Agent payloads ([`Ant`], [`Food`], [`Colony`], [`Pheromone`])
//! - [`behavior`] -- Decide/apply logic per kind ([`PendingAction`])
//! - [`error`] -- Error types for agent operations ([`AgentError`])
//! - [`habitat`] -- Grid + registry + home ([`Habitat`])
//! - [`registry`] -- Identity and lifetime ([`AgentRegistry`])

pub mod agent;
pub mod behavior;
pub mod error;
pub mod habitat;
pub mod registry;

pub use agent::{Agent, AgentBody, Ant, Colony, Food, Pheromone};
pub use behavior::{AntAction, Applied, FoodAction, PendingAction, PheromoneAction};
pub use error::AgentError;
pub use habitat::Habitat;
pub use registry::AgentRegistry;
