//! Tennis scoring state machine.
//!
//! A [`ScoreState`] tracks one match from 0-0 to the final point. Points are
//! fed in one at a time with [`ScoreState::register_point`]; the state moves
//! through regular games, the 6-6 tiebreak and finally to a decided match,
//! after which it rejects further points.

pub mod logic;
pub mod types;

pub use types::*;
