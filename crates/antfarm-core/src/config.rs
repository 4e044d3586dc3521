//! Configuration loading and typed config structures for the Antfarm simulation.
//!
//! The canonical configuration lives in `antfarm-config.yaml`. Every field
//! has a default, so an empty file (or no file at all) yields a runnable
//! 25x25 world with ten ants and ten food items. Configuration is read once
//! when a simulation is built and never changes afterwards.

use std::path::Path;

use antfarm_types::ActivationPolicy;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The values parsed but describe an impossible simulation.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Grid size, seed, and pacing.
    #[serde(default)]
    pub world: WorldConfig,

    /// Agents created at start.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Food spawning and lifetime.
    #[serde(default)]
    pub food: FoodConfig,

    /// Pheromone decay.
    #[serde(default)]
    pub pheromone: PheromoneConfig,

    /// Activation policy.
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Run length.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Invalid`] if the values fail validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if the values fail validation.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values describe a runnable simulation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero-sized grid, an empty
    /// food lifetime range, or a pheromone that never decays.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err(invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.world.width, self.world.height
            )));
        }
        if self.food.ttl_min >= self.food.ttl_max {
            return Err(invalid(format!(
                "food ttl range [{}, {}) is empty",
                self.food.ttl_min, self.food.ttl_max
            )));
        }
        if self.pheromone.decay_per_tick == 0 {
            return Err(invalid("pheromone decay_per_tick must be at least 1".to_owned()));
        }
        Ok(())
    }
}

const fn invalid(reason: String) -> ConfigError {
    ConfigError::Invalid { reason }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Grid width in cells.
    #[serde(default = "default_grid_size")]
    pub width: u32,

    /// Grid height in cells.
    #[serde(default = "default_grid_size")]
    pub height: u32,

    /// Real-time milliseconds between ticks when run by the engine
    /// (0 = as fast as possible).
    #[serde(default)]
    pub tick_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            width: default_grid_size(),
            height: default_grid_size(),
            tick_interval_ms: 0,
        }
    }
}

/// Population configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PopulationConfig {
    /// Ants placed at random cells at start.
    #[serde(default = "default_initial_count")]
    pub initial_ants: u32,

    /// Food items placed at random cells at start.
    #[serde(default = "default_initial_count")]
    pub initial_food: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_ants: default_initial_count(),
            initial_food: default_initial_count(),
        }
    }
}

/// Food spawning and lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FoodConfig {
    /// Spawn new food every N ticks (0 = never).
    #[serde(default = "default_spawn_interval_ticks")]
    pub spawn_interval_ticks: u64,

    /// Items spawned at each interval.
    #[serde(default = "default_spawn_count")]
    pub spawn_count: u32,

    /// Smallest time to live given to new food (inclusive).
    #[serde(default = "default_ttl_min")]
    pub ttl_min: u32,

    /// Upper bound of the time to live given to new food (exclusive).
    #[serde(default = "default_ttl_max")]
    pub ttl_max: u32,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ticks: default_spawn_interval_ticks(),
            spawn_count: default_spawn_count(),
            ttl_min: default_ttl_min(),
            ttl_max: default_ttl_max(),
        }
    }
}

/// Pheromone configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PheromoneConfig {
    /// Intensity lost per tick.
    #[serde(default = "default_decay_per_tick")]
    pub decay_per_tick: u32,
}

impl Default for PheromoneConfig {
    fn default() -> Self {
        Self {
            decay_per_tick: default_decay_per_tick(),
        }
    }
}

/// Scheduler configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SchedulerConfig {
    /// `sequential_random` or `batch_apply`.
    #[serde(default)]
    pub activation: ActivationPolicy,
}

/// Simulation boundary configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of ticks before the engine stops (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG`
    /// is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    String::from("Antfarm")
}

const fn default_seed() -> u64 {
    42
}

const fn default_grid_size() -> u32 {
    25
}

const fn default_initial_count() -> u32 {
    10
}

const fn default_spawn_interval_ticks() -> u64 {
    5
}

const fn default_spawn_count() -> u32 {
    1
}

const fn default_ttl_min() -> u32 {
    20
}

const fn default_ttl_max() -> u32 {
    50
}

const fn default_decay_per_tick() -> u32 {
    1
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.world.width, 25);
        assert_eq!(config.population.initial_ants, 10);
        assert_eq!(config.food.spawn_interval_ticks, 5);
        assert_eq!(config.scheduler.activation, ActivationPolicy::SequentialRandom);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
world:
  name: "Test Farm"
  seed: 123
  width: 15
  height: 11
  tick_interval_ms: 250

population:
  initial_ants: 3
  initial_food: 4

food:
  spawn_interval_ticks: 7
  spawn_count: 2
  ttl_min: 5
  ttl_max: 6

pheromone:
  decay_per_tick: 3

scheduler:
  activation: batch_apply

simulation:
  max_ticks: 500

logging:
  level: "debug"
"#;

        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.world.name, "Test Farm");
        assert_eq!(config.world.seed, 123);
        assert_eq!((config.world.width, config.world.height), (15, 11));
        assert_eq!(config.population.initial_food, 4);
        assert_eq!(config.food.spawn_count, 2);
        assert_eq!(config.pheromone.decay_per_tick, 3);
        assert_eq!(config.scheduler.activation, ActivationPolicy::BatchApply);
        assert_eq!(config.simulation.max_ticks, 500);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = SimulationConfig::parse("world:\n  seed: 7\n").unwrap();
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.height, 25);
        assert_eq!(config.food.ttl_max, 50);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(SimulationConfig::parse("").is_ok());
    }

    #[test]
    fn rejects_empty_ttl_range() {
        let result = SimulationConfig::parse("food:\n  ttl_min: 9\n  ttl_max: 9\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_zero_width() {
        let result = SimulationConfig::parse("world:\n  width: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_unknown_policy() {
        let result = SimulationConfig::parse("scheduler:\n  activation: simultaneous\n");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("antfarm-config.yaml");
        if path.exists() {
            let config = SimulationConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
