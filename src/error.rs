//! Errors reported at the engine boundary.
//!
//! Misuse of the low-level board (placing on an occupied point, merging
//! groups of different colors) is a contract violation and panics instead.

use thiserror::Error;

use crate::types::Point;

/// Reason a move was rejected by [`GameState::try_apply_move`].
///
/// [`GameState::try_apply_move`]: crate::game::GameState::try_apply_move
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move: game is over")]
    GameOver,
    #[error("illegal move: {0} is off the board")]
    OffGrid(Point),
    #[error("illegal move: point not empty")]
    Occupied,
    #[error("illegal move: suicide")]
    SelfCapture,
    #[error("illegal move: repeats a previous position")]
    Ko,
}

/// A vertex, move or color string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoveError {
    #[error("invalid vertex: {0:?}")]
    Vertex(String),
    #[error("invalid color: {0:?}")]
    Color(String),
}
