//! Per-batch statistics folded from finished matches.

use crate::scoring::{ScoreError, ScoreState, Side, TIEBREAK_TRIGGER_GAMES};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate record for one `run_simulation` batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchStatistics {
    pub number_of_matches: u32,
    pub player_a_wins: u32,
    pub player_b_wins: u32,
    pub player_a_total_points_won: u64,
    pub player_b_total_points_won: u64,
    /// `match_result()` of every match, in play order
    pub results: Vec<String>,
    /// Share of each match's points won by side A, in play order
    pub simulated_point_win_rate_a: Vec<f64>,

    /// Final set tallies, e.g. "2-1" -> count
    pub set_score_distribution: BTreeMap<String, u32>,
    /// Games per completed set, e.g. "6-4" -> count
    pub game_score_distribution: BTreeMap<String, u32>,
    /// Sets decided by a tiebreak
    pub tiebreak_sets: u32,
}

impl MatchStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished match into the batch totals.
    pub(crate) fn record_match(&mut self, score: &ScoreState) -> Result<(), ScoreError> {
        let result = score.match_result()?;

        match score.winner() {
            Some(Side::A) => self.player_a_wins += 1,
            Some(Side::B) => self.player_b_wins += 1,
            None => {}
        }

        let a_points = score.points_won(Side::A);
        let total = score.total_points();
        self.player_a_total_points_won += u64::from(a_points);
        self.player_b_total_points_won += u64::from(score.points_won(Side::B));
        if total > 0 {
            self.simulated_point_win_rate_a
                .push(f64::from(a_points) / f64::from(total));
        }

        *self
            .set_score_distribution
            .entry(score.set_score())
            .or_insert(0) += 1;

        let a_sets = score.set_history(Side::A);
        let b_sets = score.set_history(Side::B);
        for (&a, &b) in a_sets.iter().zip(b_sets) {
            *self
                .game_score_distribution
                .entry(format!("{a}-{b}"))
                .or_insert(0) += 1;
            if a.max(b) == TIEBREAK_TRIGGER_GAMES + 1 && a.min(b) == TIEBREAK_TRIGGER_GAMES {
                self.tiebreak_sets += 1;
            }
        }

        self.results.push(result);
        Ok(())
    }

    /// Fraction of matches won by `side` (0.0 for an empty batch).
    pub fn win_fraction(&self, side: Side) -> f64 {
        if self.number_of_matches == 0 {
            return 0.0;
        }
        let wins = match side {
            Side::A => self.player_a_wins,
            Side::B => self.player_b_wins,
        };
        f64::from(wins) / f64::from(self.number_of_matches)
    }

    /// Mean of the per-match point win rates for side A.
    pub fn mean_point_win_rate(&self) -> f64 {
        if self.simulated_point_win_rate_a.is_empty() {
            return 0.0;
        }
        self.simulated_point_win_rate_a.iter().sum::<f64>()
            / self.simulated_point_win_rate_a.len() as f64
    }

    pub fn total_points(&self) -> u64 {
        self.player_a_total_points_won + self.player_b_total_points_won
    }
}
