//! Tennis scoring rules: points to games, games to sets, sets to match.

use super::{
    ScoreError, ScoreState, ScoreboardLabels, Side, ADVANTAGE, FORTY, GAME, GAMES_TO_WIN_SET,
    LOVE, THIRTY, TIEBREAK_POINTS_TO_WIN, WINNING_MARGIN,
};
use std::fmt;

impl ScoreState {
    /// Award the next point to `side`.
    ///
    /// Rejects the point once the match has a winner; the state is left
    /// untouched in that case.
    pub fn register_point(&mut self, side: Side) -> Result<(), ScoreError> {
        if let Some(winner) = self.winner {
            return Err(ScoreError::MatchAlreadyDecided { winner });
        }

        self.points_won[side.index()] += 1;

        if self.is_tiebreak() {
            self.tiebreak_points[side.index()] += 1;
        } else {
            self.advance_points(side);
            self.update_game(side);
        }

        self.update_set();
        Ok(())
    }

    /// Parse a raw side identifier and award it the point.
    pub fn register_point_for(&mut self, side: &str) -> Result<(), ScoreError> {
        let side: Side = side.parse()?;
        self.register_point(side)
    }

    /// Apply a sequence of point winners in order, stopping at the first error.
    pub fn replay<I>(&mut self, sides: I) -> Result<(), ScoreError>
    where
        I: IntoIterator<Item = Side>,
    {
        for side in sides {
            self.register_point(side)?;
        }
        Ok(())
    }

    /// Completed sets as `"gA-gB,"` entries in the order they were played,
    /// e.g. `"6-4,7-5,"`. Empty before the first set closes.
    pub fn match_result(&self) -> Result<String, ScoreError> {
        let [a_sets, b_sets] = &self.set_history;
        if a_sets.len() != b_sets.len() {
            return Err(ScoreError::InconsistentState {
                a_sets: a_sets.len(),
                b_sets: b_sets.len(),
            });
        }

        Ok(a_sets
            .iter()
            .zip(b_sets)
            .map(|(a, b)| format!("{a}-{b},"))
            .collect())
    }

    /// Final (or current) set tally, e.g. `"2-1"`.
    pub fn set_score(&self) -> String {
        format!("{}-{}", self.sets_won[0], self.sets_won[1])
    }

    /// Current point score using `labels`, e.g. `"40-Advantage"`.
    pub fn point_score(&self, labels: &ScoreboardLabels) -> String {
        format!(
            "{}-{}",
            labels.label(self.points[0]),
            labels.label(self.points[1])
        )
    }

    /// One-line scoreboard rendered with custom point labels.
    pub fn scoreboard(&self, labels: &ScoreboardLabels) -> String {
        let mut line = format!(
            "Sets {} | Games {}-{}",
            self.set_score(),
            self.games[0],
            self.games[1]
        );
        if self.is_tiebreak() {
            line.push_str(&format!(
                " | Tiebreak {}-{}",
                self.tiebreak_points[0], self.tiebreak_points[1]
            ));
        } else {
            line.push_str(&format!(" | Points {}", self.point_score(labels)));
        }
        if let Some(winner) = self.winner {
            line.push_str(&format!(" | Winner {winner}"));
        }
        line
    }

    /// Deuce/advantage bookkeeping for a regular (non-tiebreak) point.
    fn advance_points(&mut self, side: Side) {
        let opponent = side.other().index();
        if self.points[opponent] == ADVANTAGE {
            // Opponent loses the advantage; back to deuce.
            self.points[opponent] = FORTY;
        } else {
            self.points[side.index()] += 1;
        }
    }

    fn update_game(&mut self, side: Side) {
        let own = self.points[side.index()];
        let opponent = self.points[side.other().index()];

        if own == GAME || (own == ADVANTAGE && opponent <= THIRTY) {
            self.games[side.index()] += 1;
            self.points = [LOVE; 2];
        }
    }

    fn update_set(&mut self) {
        let set_winner = if self.is_tiebreak() {
            self.tiebreak_winner()
        } else {
            self.regular_set_winner()
        };

        if let Some(side) = set_winner {
            self.close_set(side);
        }
    }

    fn tiebreak_winner(&self) -> Option<Side> {
        leader_with_margin(self.tiebreak_points, TIEBREAK_POINTS_TO_WIN)
    }

    fn regular_set_winner(&self) -> Option<Side> {
        leader_with_margin(self.games, GAMES_TO_WIN_SET)
    }

    fn close_set(&mut self, side: Side) {
        let mut final_games = self.games;
        if self.is_tiebreak() {
            // The tiebreak counts as the deciding game.
            final_games[side.index()] += 1;
        }

        for s in Side::ALL {
            self.set_history[s.index()].push(final_games[s.index()]);
        }
        self.sets_won[side.index()] += 1;
        self.games = [0; 2];
        self.tiebreak_points = [0; 2];

        if self.sets_won[side.index()] >= self.sets_needed() {
            self.winner = Some(side);
        }
    }
}

/// Side leading by at least [`WINNING_MARGIN`] with at least `threshold`.
fn leader_with_margin(counts: [u32; 2], threshold: u32) -> Option<Side> {
    let [a, b] = counts;
    if a.abs_diff(b) < WINNING_MARGIN {
        return None;
    }
    let (side, lead) = if a > b { (Side::A, a) } else { (Side::B, b) };
    (lead >= threshold).then_some(side)
}

impl fmt::Display for ScoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scoreboard(&ScoreboardLabels::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{MatchStatus, FIFTEEN};
    use super::*;

    fn win_points(state: &mut ScoreState, side: Side, count: usize) {
        for _ in 0..count {
            state.register_point(side).unwrap();
        }
    }

    fn win_games(state: &mut ScoreState, side: Side, count: usize) {
        win_points(state, side, count * 4);
    }

    /// Reach 6-6 in games by alternating holds.
    fn reach_tiebreak(state: &mut ScoreState) {
        for _ in 0..6 {
            win_games(state, Side::A, 1);
            win_games(state, Side::B, 1);
        }
    }

    fn with_points(a: u8, b: u8) -> ScoreState {
        let mut state = ScoreState::new();
        state.points = [a, b];
        state
    }

    #[test]
    fn test_first_point_is_fifteen() {
        let mut state = ScoreState::new();
        state.register_point(Side::A).unwrap();
        assert_eq!(state.points(Side::A), FIFTEEN);
        assert_eq!(state.points(Side::B), LOVE);

        let mut state = ScoreState::new();
        state.register_point(Side::B).unwrap();
        assert_eq!(state.point_score(&ScoreboardLabels::default()), "0-15");
    }

    #[test]
    fn test_game_from_forty_thirty() {
        let mut state = with_points(FORTY, THIRTY);
        state.register_point(Side::A).unwrap();
        assert_eq!(state.games(Side::A), 1);
        assert_eq!(state.points, [LOVE, LOVE]);

        let mut state = with_points(THIRTY, FORTY);
        state.register_point(Side::B).unwrap();
        assert_eq!(state.games(Side::B), 1);
        assert_eq!(state.points, [LOVE, LOVE]);
    }

    #[test]
    fn test_deuce_gives_advantage() {
        let mut state = with_points(FORTY, FORTY);
        state.register_point(Side::A).unwrap();
        assert_eq!(state.points, [ADVANTAGE, FORTY]);
        assert_eq!(state.games(Side::A), 0);
        assert_eq!(
            state.point_score(&ScoreboardLabels::default()),
            "Advantage-40"
        );
    }

    #[test]
    fn test_advantage_converted() {
        let mut state = with_points(FORTY, FORTY);
        win_points(&mut state, Side::B, 2);
        assert_eq!(state.games(Side::B), 1);
        assert_eq!(state.points, [LOVE, LOVE]);
    }

    #[test]
    fn test_advantage_lost_returns_to_deuce() {
        let mut state = with_points(ADVANTAGE, FORTY);
        state.register_point(Side::B).unwrap();
        assert_eq!(state.points, [FORTY, FORTY]);

        let mut state = with_points(FORTY, ADVANTAGE);
        state.register_point(Side::A).unwrap();
        assert_eq!(state.points, [FORTY, FORTY]);
        assert_eq!(state.games, [0, 0]);
    }

    #[test]
    fn test_four_straight_points_win_game() {
        let mut state = ScoreState::new();
        win_points(&mut state, Side::A, 4);
        assert_eq!(state.games(Side::A), 1);
        assert_eq!(state.points, [LOVE, LOVE]);
    }

    #[test]
    fn test_five_points_is_game_and_fifteen() {
        let mut state = ScoreState::new();
        win_points(&mut state, Side::B, 5);
        assert_eq!(state.games(Side::B), 1);
        assert_eq!(state.points(Side::B), FIFTEEN);

        win_points(&mut state, Side::B, 3);
        assert_eq!(state.games(Side::B), 2);
        assert_eq!(state.points(Side::B), LOVE);
    }

    #[test]
    fn test_regular_set_closes() {
        for (a, b) in [(4, 6), (7, 5), (5, 7), (6, 0)] {
            let mut state = ScoreState::new();
            state.games = [a, b];
            state.update_set();
            assert_eq!(state.set_history(Side::A), &[a], "games {a}-{b}");
            assert_eq!(state.set_history(Side::B), &[b], "games {a}-{b}");
            assert_eq!(state.games, [0, 0]);
        }
    }

    #[test]
    fn test_regular_set_stays_open() {
        for (a, b) in [(5, 4), (6, 5), (4, 4), (5, 3)] {
            let mut state = ScoreState::new();
            state.games = [a, b];
            state.update_set();
            assert!(state.set_history(Side::A).is_empty(), "games {a}-{b}");
            assert_eq!(state.games, [a, b]);
        }
    }

    #[test]
    fn test_tiebreak_set_closes() {
        let cases = [((7, 5), (7, 6)), ((5, 7), (6, 7)), ((12, 10), (7, 6))];
        for ((tb_a, tb_b), (set_a, set_b)) in cases {
            let mut state = ScoreState::new();
            state.games = [6, 6];
            state.tiebreak_points = [tb_a, tb_b];
            state.update_set();
            assert_eq!(state.set_history(Side::A), &[set_a]);
            assert_eq!(state.set_history(Side::B), &[set_b]);
            assert_eq!(state.tiebreak_points, [0, 0]);
            assert_eq!(state.games, [0, 0]);
        }
    }

    #[test]
    fn test_tiebreak_stays_open() {
        for (tb_a, tb_b) in [(10, 9), (5, 1), (0, 6), (6, 6)] {
            let mut state = ScoreState::new();
            state.games = [6, 6];
            state.tiebreak_points = [tb_a, tb_b];
            state.update_set();
            assert!(state.set_history(Side::A).is_empty());
            assert!(state.set_history(Side::B).is_empty());
        }
    }

    #[test]
    fn test_six_all_switches_to_tiebreak_points() {
        let mut state = ScoreState::new();
        reach_tiebreak(&mut state);
        assert!(state.is_tiebreak());
        assert_eq!(state.status(), MatchStatus::Tiebreak);

        state.register_point(Side::A).unwrap();
        assert_eq!(state.tiebreak_points(Side::A), 1);
        assert_eq!(state.points(Side::A), LOVE);
    }

    #[test]
    fn test_tiebreak_played_out_records_seven_six() {
        let mut state = ScoreState::new();
        reach_tiebreak(&mut state);
        win_points(&mut state, Side::B, 7);
        assert_eq!(state.set_history(Side::A), &[6]);
        assert_eq!(state.set_history(Side::B), &[7]);
        assert_eq!(state.sets_won(Side::B), 1);
        assert_eq!(state.match_result().unwrap(), "6-7,");
        assert!(!state.is_tiebreak());
    }

    #[test]
    fn test_straight_sets_match() {
        let mut state = ScoreState::new();
        win_games(&mut state, Side::A, 12);
        assert_eq!(state.winner(), Some(Side::A));
        assert_eq!(state.status(), MatchStatus::MatchOver(Side::A));
        assert_eq!(state.match_result().unwrap(), "6-0,6-0,");
        assert_eq!(state.set_score(), "2-0");
        assert_eq!(state.points_won(Side::A), 48);
        assert_eq!(state.total_points(), 48);
    }

    #[test]
    fn test_three_set_match() {
        let mut state = ScoreState::new();
        // 6-4
        win_games(&mut state, Side::A, 4);
        win_games(&mut state, Side::B, 4);
        win_games(&mut state, Side::A, 2);
        // 5-7
        win_games(&mut state, Side::A, 5);
        win_games(&mut state, Side::B, 7);
        assert!(state.winner().is_none());
        // 6-1
        win_games(&mut state, Side::B, 1);
        win_games(&mut state, Side::A, 6);

        assert_eq!(state.winner(), Some(Side::A));
        assert_eq!(state.match_result().unwrap(), "6-4,5-7,6-1,");
        assert_eq!(state.set_score(), "2-1");
    }

    #[test]
    fn test_points_rejected_after_match_over() {
        let mut state = ScoreState::new();
        win_games(&mut state, Side::B, 12);
        let before = state.clone();

        let err = state.register_point(Side::A).unwrap_err();
        assert_eq!(err, ScoreError::MatchAlreadyDecided { winner: Side::B });
        assert_eq!(state, before);
    }

    #[test]
    fn test_register_point_for_parses_identifiers() {
        let mut state = ScoreState::new();
        state.register_point_for("player_1").unwrap();
        state.register_point_for("b").unwrap();
        assert_eq!(state.points, [FIFTEEN, FIFTEEN]);

        let err = state.register_point_for("player_3").unwrap_err();
        assert_eq!(err, ScoreError::InvalidSide("player_3".to_string()));
        assert_eq!(state.points, [FIFTEEN, FIFTEEN]);
        assert_eq!(state.total_points(), 2);
    }

    #[test]
    fn test_best_of_five_needs_three_sets() {
        let mut state = ScoreState::best_of(5).unwrap();
        assert_eq!(state.sets_needed(), 3);
        win_games(&mut state, Side::A, 12);
        assert!(state.winner().is_none());
        win_games(&mut state, Side::A, 6);
        assert_eq!(state.winner(), Some(Side::A));
    }

    #[test]
    fn test_best_of_rejects_even_and_zero() {
        assert_eq!(ScoreState::best_of(0), Err(ScoreError::InvalidFormat(0)));
        assert_eq!(ScoreState::best_of(4), Err(ScoreError::InvalidFormat(4)));
        assert_eq!(ScoreState::best_of(1).unwrap().sets_needed(), 1);
    }

    #[test]
    fn test_match_result_inconsistent_history() {
        let mut state = ScoreState::new();
        state.set_history[0].push(6);
        assert_eq!(
            state.match_result(),
            Err(ScoreError::InconsistentState {
                a_sets: 1,
                b_sets: 0
            })
        );
    }

    #[test]
    fn test_match_result_is_idempotent_mid_match() {
        let mut state = ScoreState::new();
        win_games(&mut state, Side::A, 6);
        win_points(&mut state, Side::B, 2);
        let first = state.match_result().unwrap();
        let second = state.match_result().unwrap();
        assert_eq!(first, "6-0,");
        assert_eq!(first, second);
    }

    #[test]
    fn test_scoreboard_display() {
        let mut state = ScoreState::new();
        win_games(&mut state, Side::A, 1);
        win_points(&mut state, Side::B, 3);
        assert_eq!(state.to_string(), "Sets 0-0 | Games 1-0 | Points 0-40");

        let labels = ScoreboardLabels {
            love: "Love".to_string(),
            ..ScoreboardLabels::default()
        };
        assert_eq!(
            state.scoreboard(&labels),
            "Sets 0-0 | Games 1-0 | Points Love-40"
        );
    }
}
