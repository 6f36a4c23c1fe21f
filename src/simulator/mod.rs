//! Monte Carlo tennis match simulator.
//!
//! Plays thousands of matches where side A wins each point with a fixed
//! probability, to analyze:
//! - Match win rates for a given point advantage
//! - Realized point win rate per match
//! - Set and game score distributions, tiebreak frequency
//!
//! Every match is scored by [`crate::scoring::ScoreState`], so simulated
//! results follow exactly the same rules as a scripted match.

mod config;
mod report;
mod runner;
mod statistics;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, Simulator};
pub use statistics::MatchStatistics;

use crate::scoring::ScoreError;
use thiserror::Error;

/// Errors that abort a simulation batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("point win probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("number of simulations must be at least 1, got {0}")]
    InvalidSimulationCount(u32),
    #[error(transparent)]
    Score(#[from] ScoreError),
}
