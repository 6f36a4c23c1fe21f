//! Tennis Simulator - tennis scoring engine and Monte Carlo match simulator
//!
//! This crate exposes the scoring state machine, the batch simulator and the
//! YAML configuration loader used by the `tennis-sim` binary.

pub mod build_info;
pub mod config;
pub mod scoring;
pub mod simulator;

pub use scoring::{MatchStatus, ScoreError, ScoreState, ScoreboardLabels, Side};
pub use simulator::{run_simulation, MatchStatistics, SimConfig, SimError, SimReport, Simulator};
