//! Tennis scoring data structures.
//!
//! Point progress inside a game is an index into the sequence
//! `0, 15, 30, 40, Advantage, Game`. Application logic only ever compares
//! indices; labels are produced at the display boundary by [`ScoreboardLabels`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Point index for "0" (love).
pub const LOVE: u8 = 0;
/// Point index for "15".
pub const FIFTEEN: u8 = 1;
/// Point index for "30".
pub const THIRTY: u8 = 2;
/// Point index for "40".
pub const FORTY: u8 = 3;
/// Point index for "Advantage".
pub const ADVANTAGE: u8 = 4;
/// Terminal point index; reaching it awards the game.
pub const GAME: u8 = 5;

/// Games each side must hold before the set is decided by a tiebreak.
pub const TIEBREAK_TRIGGER_GAMES: u32 = 6;
/// Minimum games the leader needs to take a set outside a tiebreak.
pub const GAMES_TO_WIN_SET: u32 = 6;
/// Minimum points the leader needs to take a tiebreak.
pub const TIEBREAK_POINTS_TO_WIN: u32 = 7;
/// Lead required to close a set or a tiebreak.
pub const WINNING_MARGIN: u32 = 2;

pub const DEFAULT_BEST_OF_SETS: u32 = 3;

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::A, Side::B];

    /// The opposing side.
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Index into per-side arrays.
    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::A => "A",
            Side::B => "B",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Side {
    type Err = ScoreError;

    /// Accepts `A`/`B`, `1`/`2` and `player_1`/`player_2`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "1" | "player_1" | "player1" => Ok(Side::A),
            "b" | "2" | "player_2" | "player2" => Ok(Side::B),
            _ => Err(ScoreError::InvalidSide(s.to_string())),
        }
    }
}

/// Coarse phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// Regular game scoring
    InProgress,
    /// Both sides on six games; points feed the tiebreak counter
    Tiebreak,
    /// Terminal; no further points are accepted
    MatchOver(Side),
}

/// Errors raised by the scoring state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("invalid side identifier {0:?} (expected A or B)")]
    InvalidSide(String),
    #[error("match already decided in favour of side {winner}")]
    MatchAlreadyDecided { winner: Side },
    #[error("inconsistent set history: side A has {a_sets} sets, side B has {b_sets}")]
    InconsistentState { a_sets: usize, b_sets: usize },
    #[error("best-of count must be odd and at least 1, got {0}")]
    InvalidFormat(u32),
}

/// Display labels for the six point indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreboardLabels {
    pub love: String,
    #[serde(alias = "fiveen")]
    pub fifteen: String,
    pub thirty: String,
    pub forty: String,
    pub advantage: String,
    pub game: String,
}

impl Default for ScoreboardLabels {
    fn default() -> Self {
        Self {
            love: "0".to_string(),
            fifteen: "15".to_string(),
            thirty: "30".to_string(),
            forty: "40".to_string(),
            advantage: "Advantage".to_string(),
            game: "Game".to_string(),
        }
    }
}

impl ScoreboardLabels {
    /// Label for a point index. Indices past [`GAME`] clamp to the game label.
    pub fn label(&self, index: u8) -> &str {
        match index {
            LOVE => &self.love,
            FIFTEEN => &self.fifteen,
            THIRTY => &self.thirty,
            FORTY => &self.forty,
            ADVANTAGE => &self.advantage,
            _ => &self.game,
        }
    }
}

/// Score of a single match in progress.
///
/// Per-side values are stored as `[A, B]` arrays indexed by [`Side::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreState {
    pub(crate) points: [u8; 2],
    pub(crate) games: [u32; 2],
    pub(crate) tiebreak_points: [u32; 2],
    pub(crate) set_history: [Vec<u32>; 2],
    pub(crate) sets_won: [u32; 2],
    pub(crate) points_won: [u32; 2],
    pub(crate) best_of_sets: u32,
    pub(crate) winner: Option<Side>,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreState {
    /// Fresh best-of-three match.
    pub fn new() -> Self {
        Self {
            points: [LOVE; 2],
            games: [0; 2],
            tiebreak_points: [0; 2],
            set_history: [Vec::new(), Vec::new()],
            sets_won: [0; 2],
            points_won: [0; 2],
            best_of_sets: DEFAULT_BEST_OF_SETS,
            winner: None,
        }
    }

    /// Fresh match played over `best_of_sets` sets (odd, at least 1).
    pub fn best_of(best_of_sets: u32) -> Result<Self, ScoreError> {
        if best_of_sets == 0 || best_of_sets % 2 == 0 {
            return Err(ScoreError::InvalidFormat(best_of_sets));
        }
        Ok(Self {
            best_of_sets,
            ..Self::new()
        })
    }

    pub fn best_of_sets(&self) -> u32 {
        self.best_of_sets
    }

    /// Sets a side must win to take the match.
    pub fn sets_needed(&self) -> u32 {
        self.best_of_sets / 2 + 1
    }

    /// Current point index (0..=5) for `side`.
    pub fn points(&self, side: Side) -> u8 {
        self.points[side.index()]
    }

    pub fn games(&self, side: Side) -> u32 {
        self.games[side.index()]
    }

    pub fn tiebreak_points(&self, side: Side) -> u32 {
        self.tiebreak_points[side.index()]
    }

    /// Games recorded for `side` at the close of each completed set.
    pub fn set_history(&self, side: Side) -> &[u32] {
        &self.set_history[side.index()]
    }

    pub fn sets_won(&self, side: Side) -> u32 {
        self.sets_won[side.index()]
    }

    /// Total points `side` has won in this match.
    pub fn points_won(&self, side: Side) -> u32 {
        self.points_won[side.index()]
    }

    pub fn total_points(&self) -> u32 {
        self.points_won[0] + self.points_won[1]
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// True when both sides hold six games in the current set.
    pub fn is_tiebreak(&self) -> bool {
        self.games[0] == TIEBREAK_TRIGGER_GAMES && self.games[1] == TIEBREAK_TRIGGER_GAMES
    }

    pub fn status(&self) -> MatchStatus {
        match self.winner {
            Some(side) => MatchStatus::MatchOver(side),
            None if self.is_tiebreak() => MatchStatus::Tiebreak,
            None => MatchStatus::InProgress,
        }
    }
}
