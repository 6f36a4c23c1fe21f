//! Monte Carlo match runner.
//!
//! Each match gets its own ChaCha8 stream: `seed + match_index` when a seed is
//! configured, OS entropy otherwise. Matches run one after another and are
//! folded into a [`MatchStatistics`] that is rebuilt on every batch.

use super::config::{validate_count, validate_probability, SimConfig};
use super::report::SimReport;
use super::statistics::MatchStatistics;
use super::SimError;
use crate::scoring::{ScoreError, ScoreState, Side};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Repeatedly plays matches with a fixed point-win probability for side A.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimConfig,
    statistics: MatchStatistics,
}

impl Simulator {
    /// Simulator with default settings and the given point-win probability.
    pub fn new(point_win_probability: f64) -> Result<Self, SimError> {
        validate_probability(point_win_probability)?;
        Ok(Self {
            config: SimConfig {
                point_win_probability,
                ..Default::default()
            },
            statistics: MatchStatistics::new(),
        })
    }

    pub fn from_config(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            config,
            statistics: MatchStatistics::new(),
        })
    }

    /// Fix the RNG seed so batches are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn point_win_probability(&self) -> f64 {
        self.config.point_win_probability
    }

    /// Statistics from the most recent batch.
    pub fn statistics(&self) -> &MatchStatistics {
        &self.statistics
    }

    /// Play `number_of_simulations` matches, replacing any earlier statistics.
    ///
    /// A scoring error aborts the whole batch; statistics from a failed batch
    /// are discarded.
    pub fn run_simulation(
        &mut self,
        number_of_simulations: u32,
    ) -> Result<&MatchStatistics, SimError> {
        validate_count(number_of_simulations)?;
        self.statistics = MatchStatistics::new();

        tracing::info!(
            matches = number_of_simulations,
            p = self.config.point_win_probability,
            best_of = self.config.best_of_sets,
            seed = ?self.config.seed,
            "starting simulation batch"
        );

        let mut statistics = MatchStatistics::new();
        for match_idx in 0..number_of_simulations {
            let mut rng = match self.config.seed {
                Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(u64::from(match_idx))),
                None => ChaCha8Rng::from_entropy(),
            };

            let score = self.simulate_match(&mut rng)?;
            tracing::debug!(
                "match {}/{} complete: winner {:?}, sets {}",
                match_idx + 1,
                number_of_simulations,
                score.winner(),
                score.set_score()
            );
            if self.config.verbosity >= 2 {
                println!(
                    "Match {}/{} - {} ({} points)",
                    match_idx + 1,
                    number_of_simulations,
                    score,
                    score.total_points()
                );
            }

            statistics.record_match(&score)?;
        }
        statistics.number_of_matches = number_of_simulations;

        tracing::info!(
            a_wins = statistics.player_a_wins,
            b_wins = statistics.player_b_wins,
            mean_point_win_rate = statistics.mean_point_win_rate(),
            "simulation batch complete"
        );

        self.statistics = statistics;
        Ok(&self.statistics)
    }

    /// Run the configured number of matches and summarise them.
    pub fn run(&mut self) -> Result<SimReport, SimError> {
        let p = self.config.point_win_probability;
        let stats = self.run_simulation(self.config.num_runs)?;
        Ok(SimReport::from_statistics(stats, p))
    }

    /// Play one match to completion.
    fn simulate_match(&self, rng: &mut ChaCha8Rng) -> Result<ScoreState, ScoreError> {
        let mut score = ScoreState::best_of(self.config.best_of_sets)?;
        while score.winner().is_none() {
            let side = draw_point_winner(rng, self.config.point_win_probability);
            score.register_point(side)?;
        }
        Ok(score)
    }
}

/// Side A takes the point when a uniform draw in [0, 1) falls below `p`.
fn draw_point_winner<R: Rng>(rng: &mut R, p: f64) -> Side {
    if rng.gen::<f64>() < p {
        Side::A
    } else {
        Side::B
    }
}

/// Run a full batch described by `config` and return its report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, SimError> {
    Simulator::from_config(config.clone())?.run()
}
