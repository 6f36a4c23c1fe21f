//! Integration test: Monte Carlo batches end to end.

use tennis_sim::{run_simulation, SimConfig, SimError, Simulator};

#[test]
fn test_thousand_match_batch() {
    let mut sim = Simulator::new(0.65).unwrap().with_seed(2024);
    let stats = sim.run_simulation(1000).unwrap();

    assert_eq!(stats.number_of_matches, 1000);
    assert_eq!(stats.player_a_wins + stats.player_b_wins, 1000);
    assert_eq!(stats.results.len(), 1000);

    let mean = stats.mean_point_win_rate();
    assert!((mean - 0.65).abs() < 0.02, "mean point win rate {mean}");

    let total_points: u64 = stats.player_a_total_points_won + stats.player_b_total_points_won;
    let observed = stats.player_a_total_points_won as f64 / total_points as f64;
    assert!((observed - 0.65).abs() < 0.01, "pooled point win rate {observed}");

    // Every result lists two or three sets for a best-of-three match.
    for result in &stats.results {
        let sets = result.matches(',').count();
        assert!((2..=3).contains(&sets), "unexpected result {result}");
    }
}

/// Per-match rates sit slightly above `p` for the stronger side; the pooled
/// rate does not.
#[test]
fn test_win_rate_converges_with_more_matches() {
    let mut sim = Simulator::new(0.6).unwrap().with_seed(5);
    let stats = sim.run_simulation(2000).unwrap();

    let mean_err = (stats.mean_point_win_rate() - 0.6).abs();
    assert!(mean_err < 0.02, "mean error after 2000 matches: {mean_err}");

    let pooled = stats.player_a_total_points_won as f64 / stats.total_points() as f64;
    assert!((pooled - 0.6).abs() < 0.005, "pooled point win rate {pooled}");
}

#[test]
fn test_even_players_split_matches() {
    let mut sim = Simulator::new(0.5).unwrap().with_seed(99);
    let stats = sim.run_simulation(2000).unwrap();
    let a_share = f64::from(stats.player_a_wins) / 2000.0;
    assert!((a_share - 0.5).abs() < 0.05, "side A won {a_share}");
    assert!(stats.tiebreak_sets > 0);
}

#[test]
fn test_report_from_config() {
    let config = SimConfig {
        num_runs: 200,
        point_win_probability: 0.52,
        seed: Some(8),
        verbosity: 0,
        ..Default::default()
    };
    let report = run_simulation(&config).unwrap();

    assert_eq!(report.number_of_matches, 200);
    assert_eq!(report.player_a_wins + report.player_b_wins, 200);
    assert_eq!(report.results.len(), 200);
    let distributed: u32 = report.set_score_distribution.values().sum();
    assert_eq!(distributed, 200);
    assert!(report.min_point_win_rate <= report.mean_point_win_rate);
    assert!(report.mean_point_win_rate <= report.max_point_win_rate);
    assert!(report.avg_points_per_match >= 48.0);
    assert!(report.to_text().contains("Matches: 200"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = SimConfig {
        point_win_probability: -0.2,
        ..Default::default()
    };
    assert_eq!(
        run_simulation(&config).unwrap_err(),
        SimError::InvalidProbability(-0.2)
    );
}
