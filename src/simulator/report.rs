//! Simulation report generation.

use super::statistics::MatchStatistics;
use crate::scoring::Side;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary of a finished batch, ready for printing or JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub number_of_matches: u32,
    pub point_win_probability: f64,

    pub player_a_wins: u32,
    pub player_b_wins: u32,
    pub player_a_win_pct: f64,

    // Realized point win rate for side A, one sample per match
    pub mean_point_win_rate: f64,
    pub min_point_win_rate: f64,
    pub max_point_win_rate: f64,
    pub std_dev_point_win_rate: f64,

    pub avg_points_per_match: f64,
    pub tiebreak_sets: u32,

    pub set_score_distribution: BTreeMap<String, u32>,
    pub game_score_distribution: BTreeMap<String, u32>,

    /// Per-match results, in play order
    #[serde(skip)]
    pub results: Vec<String>,
}

impl SimReport {
    pub fn from_statistics(stats: &MatchStatistics, point_win_probability: f64) -> Self {
        let rates = &stats.simulated_point_win_rate_a;
        let mean = stats.mean_point_win_rate();
        let (min, max) = if rates.is_empty() {
            (0.0, 0.0)
        } else {
            rates
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
                    (lo.min(r), hi.max(r))
                })
        };
        let std_dev = if rates.len() > 1 {
            let variance = rates.iter().map(|r| (r - mean).powi(2)).sum::<f64>()
                / (rates.len() - 1) as f64;
            variance.sqrt()
        } else {
            0.0
        };

        let avg_points_per_match = if stats.number_of_matches == 0 {
            0.0
        } else {
            stats.total_points() as f64 / f64::from(stats.number_of_matches)
        };

        Self {
            number_of_matches: stats.number_of_matches,
            point_win_probability,
            player_a_wins: stats.player_a_wins,
            player_b_wins: stats.player_b_wins,
            player_a_win_pct: stats.win_fraction(Side::A) * 100.0,
            mean_point_win_rate: mean,
            min_point_win_rate: min,
            max_point_win_rate: max,
            std_dev_point_win_rate: std_dev,
            avg_points_per_match,
            tiebreak_sets: stats.tiebreak_sets,
            set_score_distribution: stats.set_score_distribution.clone(),
            game_score_distribution: stats.game_score_distribution.clone(),
            results: stats.results.clone(),
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 TENNIS SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Matches: {}   Point win probability (A): {:.3}\n\n",
            self.number_of_matches, self.point_win_probability
        ));

        report.push_str("── MATCHES ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Side A wins:         {} ({:.1}%)\n",
            self.player_a_wins, self.player_a_win_pct
        ));
        report.push_str(&format!(
            "  Side B wins:         {} ({:.1}%)\n",
            self.player_b_wins,
            100.0 - self.player_a_win_pct
        ));
        report.push_str(&format!(
            "  Avg Points/Match:    {:.1}\n",
            self.avg_points_per_match
        ));
        report.push_str(&format!("  Tiebreak Sets:       {}\n\n", self.tiebreak_sets));

        report.push_str("── POINT WIN RATE (A) ───────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Mean:    {:.4}\n  Std Dev: {:.4}\n  Min:     {:.4}\n  Max:     {:.4}\n\n",
            self.mean_point_win_rate,
            self.std_dev_point_win_rate,
            self.min_point_win_rate,
            self.max_point_win_rate
        ));

        report.push_str("── SET SCORES ───────────────────────────────────────────────────\n");
        push_distribution(&mut report, &self.set_score_distribution, self.number_of_matches);
        report.push('\n');

        let total_sets: u32 = self.game_score_distribution.values().sum();
        report.push_str("── GAME SCORES PER SET ──────────────────────────────────────────\n");
        push_distribution(&mut report, &self.game_score_distribution, total_sets);

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn push_distribution(report: &mut String, distribution: &BTreeMap<String, u32>, total: u32) {
    if distribution.is_empty() {
        report.push_str("  (none)\n");
        return;
    }
    for (score, count) in distribution {
        let pct = f64::from(*count) / f64::from(total.max(1)) * 100.0;
        let bar = "█".repeat((pct / 5.0) as usize);
        report.push_str(&format!("  {:>5}: {:>6} {:>5.1}% {}\n", score, count, pct, bar));
    }
}
