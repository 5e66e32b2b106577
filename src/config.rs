//! Configuration system for the pursuit simulation.
//!
//! Supports YAML configuration files with sensible defaults.

use crate::error::{require_positive, ConfigError};
use crate::prey::check_spawn_limit;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub prey: PreyConfig,
    pub predator: PredatorConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Round controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Maximum number of rounds
    pub max_rounds: u32,
    /// Random seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
}

/// Prey population configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreyConfig {
    /// Number of prey at start
    pub count: usize,
    /// Distance moved per round
    pub step_size: f64,
    /// Prey spawn in `[-spawn_limit, spawn_limit]` on both axes
    pub spawn_limit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredatorConfig {
    /// Maximum distance moved per round
    pub step_size: f64,
}

/// Result export and checkpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// Round-by-round positions (JSON)
    pub positions_file: String,
    /// Round-by-round alive counts (CSV)
    pub alive_file: String,
    /// Rounds between checkpoints, 0 disables periodic checkpoints
    pub checkpoint_interval: u32,
    /// Number of periodic checkpoints to retain
    pub keep_checkpoints: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_rounds: 50,
            seed: None,
        }
    }
}

impl Default for PreyConfig {
    fn default() -> Self {
        Self {
            count: 15,
            step_size: 0.5,
            spawn_limit: 10.0,
        }
    }
}

impl Default for PredatorConfig {
    fn default() -> Self {
        Self { step_size: 1.0 }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            positions_file: "positions.json".to_string(),
            alive_file: "alive.csv".to_string(),
            checkpoint_interval: 0,
            keep_checkpoints: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.max_rounds == 0 {
            return Err(ConfigError::new(
                "simulation.max_rounds",
                "must be a positive integer",
                self.simulation.max_rounds,
            ));
        }
        if self.prey.count == 0 {
            return Err(ConfigError::new("prey.count", "must be a positive integer", self.prey.count));
        }
        require_positive("prey.step_size", self.prey.step_size)?;
        check_spawn_limit(self.prey.spawn_limit)?;
        require_positive("predator.step_size", self.predator.step_size)?;
        Ok(())
    }

    pub fn positions_path(&self) -> PathBuf {
        self.output.directory.join(&self.output.positions_file)
    }

    pub fn alive_path(&self) -> PathBuf {
        self.output.directory.join(&self.output.alive_file)
    }
}
