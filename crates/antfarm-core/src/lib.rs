//! Configuration, scheduling, and the tick loop for the Antfarm simulation.
//!
//! This crate ties the grid and the agents together into a runnable
//! simulation: it loads configuration, owns the random source, orders
//! agent activation, and spawns food on a fixed cadence.
//!
//! # Modules
//!
//! - [`clock`] -- Monotonic tick counter ([`WorldClock`]).
//! - [`config`] -- Configuration loading from `antfarm-config.yaml` into
//!   strongly-typed structs.
//! - [`runner`] -- Bounded run loop with per-tick callbacks.
//! - [`scheduler`] -- Sequential-random and batch-apply activation.
//! - [`simulation`] -- [`Simulation`] state and `advance_tick`.
//!
//! [`WorldClock`]: clock::WorldClock
//! [`Simulation`]: simulation::Simulation

pub mod clock;
pub mod config;
pub mod runner;
pub mod scheduler;
pub mod simulation;
