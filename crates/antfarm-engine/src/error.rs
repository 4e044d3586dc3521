//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode during startup, the run, and
//! the final snapshot output.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: antfarm_core::config::ConfigError,
    },

    /// Building the initial world failed.
    #[error("setup error: {source}")]
    Setup {
        /// The underlying simulation error.
        #[from]
        source: antfarm_core::simulation::SimulationError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: antfarm_core::runner::RunnerError,
    },

    /// Serializing the final snapshot failed.
    #[error("snapshot encoding error: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// Writing the final snapshot failed.
    #[error("output error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
