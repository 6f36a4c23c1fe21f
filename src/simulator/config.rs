//! Simulation configuration.

use super::SimError;
use crate::scoring::{ScoreError, DEFAULT_BEST_OF_SETS};
use serde::{Deserialize, Serialize};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of matches to simulate
    pub num_runs: u32,

    /// Probability that side A wins any single point (0.0 - 1.0)
    pub point_win_probability: f64,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Match format; must be odd
    pub best_of_sets: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per-match)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            point_win_probability: 0.65,
            seed: None,
            best_of_sets: DEFAULT_BEST_OF_SETS,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for sanity checks
    pub fn quick_check(point_win_probability: f64) -> Self {
        Self {
            num_runs: 100,
            point_win_probability,
            ..Default::default()
        }
    }

    /// Grand-slam style best-of-five matches
    pub fn best_of_five(point_win_probability: f64) -> Self {
        Self {
            point_win_probability,
            best_of_sets: 5,
            ..Default::default()
        }
    }

    /// Reject probabilities outside [0, 1] and zero-match batches.
    pub fn validate(&self) -> Result<(), SimError> {
        validate_probability(self.point_win_probability)?;
        validate_count(self.num_runs)?;
        if self.best_of_sets == 0 || self.best_of_sets % 2 == 0 {
            return Err(ScoreError::InvalidFormat(self.best_of_sets).into());
        }
        Ok(())
    }
}

pub(crate) fn validate_probability(p: f64) -> Result<(), SimError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(SimError::InvalidProbability(p))
    }
}

pub(crate) fn validate_count(n: u32) -> Result<(), SimError> {
    if n == 0 {
        Err(SimError::InvalidSimulationCount(n))
    } else {
        Ok(())
    }
}
