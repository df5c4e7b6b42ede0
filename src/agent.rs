//! The agent interface shared by every bot, and the random bot.

use crate::game::GameState;
use crate::playout::choose_random_move;
use crate::types::{Move, Point};

/// Anything that can pick a move for the player to move.
///
/// `select_move` takes `&mut self` because agents own their random source.
pub trait Agent {
    fn select_move(&mut self, state: &GameState) -> Move;
}

/// Plays a uniformly random legal move that does not fill one of its own
/// eyes, and passes when none is left. This is also the MCTS rollout policy.
pub struct RandomAgent {
    rng: fastrand::Rng,
    points: Vec<Point>,
    /// `(rows, cols)` of the board `points` was built for
    dims: (usize, usize),
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomAgent {
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(rng: fastrand::Rng) -> Self {
        RandomAgent {
            rng,
            points: Vec::new(),
            dims: (0, 0),
        }
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, state: &GameState) -> Move {
        let board = state.board();
        let dims = (board.num_rows(), board.num_cols());
        if self.dims != dims {
            self.points = board.points().collect();
            self.dims = dims;
        }
        choose_random_move(state, &mut self.points, &mut self.rng)
    }
}
