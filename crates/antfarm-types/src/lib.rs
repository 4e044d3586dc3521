//! Shared type definitions for the Antfarm simulation.
//!
//! This crate is the vocabulary shared by the grid, the agents, the
//! simulation kernel and any external viewer. Snapshot types derive
//! `ts-rs` bindings so a dashboard can consume them as JSON.
//!
//! # Modules
//!
//! - [`ids`] -- The [`AgentId`] newtype
//! - [`enums`] -- Agent kinds, ant phases, activation policies
//! - [`structs`] -- Positions, snapshots, and per-tick results

pub mod enums;
pub mod ids;
pub mod structs;

pub use enums::{ActivationPolicy, AgentKind, AntPhase};
pub use ids::AgentId;
pub use structs::{
    AgentSnapshot, AgentStateView, PopulationStats, Position, TickResult, WorldSnapshot,
};
