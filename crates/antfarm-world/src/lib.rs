//! Spatial layer for the Antfarm simulation.
//!
//! The world is a fixed-size toroidal grid. Every cell holds an unordered
//! set of agent identifiers, any number of agents may share a cell, and an
//! agent is in at most one cell at a time. The grid never owns agents; it
//! only records where their identifiers sit.
//!
//! # Modules
//!
//! - [`error`] -- Error types for grid operations.
//! - [`empty`] -- Index of unoccupied cells with constant-time membership
//!   and sampling.
//! - [`grid`] -- The [`Grid`] itself: wraparound arithmetic, Moore
//!   neighborhoods, occupancy queries, and placement.

pub mod empty;
pub mod error;
pub mod grid;

pub use empty::EmptyCells;
pub use error::WorldError;
pub use grid::Grid;
