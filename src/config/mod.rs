//! Configuration schema for the simulator.
//!
//! Settings live in a folder of YAML files (`simulation.yml`, `tennis.yml`)
//! that are merged before being deserialized into [`AppConfig`]. Every section
//! and field has a default, so a file only needs the values it overrides.

mod loader;

pub use loader::{ConfigManager, MergeStrategy, CONFIG_FILES, DEFAULT_CONFIG_FOLDER};

use crate::scoring::{ScoreboardLabels, DEFAULT_BEST_OF_SETS};
use crate::simulator::SimConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_yaml::Error),
    #[error("no configuration files were loaded from {0}")]
    NothingLoaded(PathBuf),
    #[error("configuration not loaded; call load() first")]
    NotLoaded,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Point labels used when printing scoreboards.
    #[serde(default)]
    pub tennis_score: ScoreboardLabels,

    /// Batch parameters.
    #[serde(default, alias = "simulation_parameters")]
    pub simulation: SimulationParameters,
}

/// Simulation settings as written in `simulation.yml`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationParameters {
    #[serde(default = "default_number_of_simulations")]
    pub number_of_simulations: u32,
    /// Probability that side A wins a point.
    #[serde(default = "default_point_win_rate")]
    pub point_win_rate: f64,
    #[serde(default = "default_best_of_sets")]
    pub best_of_sets: u32,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_number_of_simulations() -> u32 {
    1000
}

fn default_point_win_rate() -> f64 {
    0.65
}

fn default_best_of_sets() -> u32 {
    DEFAULT_BEST_OF_SETS
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            number_of_simulations: default_number_of_simulations(),
            point_win_rate: default_point_win_rate(),
            best_of_sets: default_best_of_sets(),
            seed: None,
        }
    }
}

impl SimulationParameters {
    /// Run configuration for these parameters.
    pub fn to_sim_config(&self) -> SimConfig {
        SimConfig {
            num_runs: self.number_of_simulations,
            point_win_probability: self.point_win_rate,
            seed: self.seed,
            best_of_sets: self.best_of_sets,
            ..Default::default()
        }
    }
}
