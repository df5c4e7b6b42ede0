//! Depth-limited negamax search with alpha-beta pruning.
//!
//! Scores are always from the perspective of the player to move, so a
//! child's value is negated on the way up. Finished games score
//! `MAX_SCORE`/`MIN_SCORE`; at the depth limit a caller-supplied heuristic
//! takes over.
//!
//! Pruning keeps one bound per color: the best result each side is already
//! assured of elsewhere in the tree. A node stops searching as soon as its
//! current value would leave the opponent worse off than the opponent's own
//! bound, because the opponent will never allow this line.

use crate::agent::Agent;
use crate::constants::{MAX_SCORE, MIN_SCORE};
use crate::game::GameState;
use crate::types::{Move, Player};

/// Leaf evaluation, from the perspective of the player to move.
pub type Heuristic = fn(&GameState) -> i32;

/// Stone-count differential, positive when the player to move is ahead.
pub fn capture_diff(state: &GameState) -> i32 {
    let [black, white] = state.board().stone_counts();
    let diff = black as i32 - white as i32;
    match state.next_player() {
        Player::Black => diff,
        Player::White => -diff,
    }
}

/// Per-color alpha-beta bounds.
#[derive(Clone, Copy, Debug)]
struct Bounds {
    best_black: i32,
    best_white: i32,
}

impl Bounds {
    fn open() -> Self {
        Bounds {
            best_black: MIN_SCORE,
            best_white: MIN_SCORE,
        }
    }
}

/// Negamax agent choosing uniformly among the best-scoring moves.
pub struct MinimaxAgent<F = Heuristic> {
    max_depth: u32,
    eval_fn: F,
    rng: fastrand::Rng,
    nodes: u64,
}

impl<F: Fn(&GameState) -> i32> MinimaxAgent<F> {
    pub fn new(max_depth: u32, eval_fn: F) -> Self {
        Self::with_rng(max_depth, eval_fn, fastrand::Rng::new())
    }

    /// Same as [`new`](Self::new) with a fixed seed for tie-breaking.
    pub fn with_seed(max_depth: u32, eval_fn: F, seed: u64) -> Self {
        Self::with_rng(max_depth, eval_fn, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(max_depth: u32, eval_fn: F, rng: fastrand::Rng) -> Self {
        MinimaxAgent {
            max_depth,
            eval_fn,
            rng,
            nodes: 0,
        }
    }

    /// Value of `state` for the player to move.
    fn best_result(&mut self, state: &GameState, depth: u32, mut bounds: Bounds) -> i32 {
        self.nodes += 1;
        if state.is_over() {
            return if state.winner() == Some(state.next_player()) {
                MAX_SCORE
            } else {
                MIN_SCORE
            };
        }
        if depth == 0 {
            return (self.eval_fn)(state);
        }

        let mover = state.next_player();
        let mut best_so_far = MIN_SCORE;
        for candidate in state.legal_moves() {
            let next = state.apply_move(candidate);
            let our_result = -self.best_result(&next, depth - 1, bounds);
            if our_result > best_so_far {
                best_so_far = our_result;
            }
            let (ours, theirs) = match mover {
                Player::Black => (&mut bounds.best_black, bounds.best_white),
                Player::White => (&mut bounds.best_white, bounds.best_black),
            };
            if best_so_far > *ours {
                *ours = best_so_far;
            }
            if -best_so_far < theirs {
                break;
            }
        }
        best_so_far
    }

    /// Negamax value of every legal root move, each searched with fresh
    /// bounds so that ties are exact.
    pub fn score_moves(&mut self, state: &GameState) -> Vec<(Move, i32)> {
        state
            .legal_moves()
            .map(|mv| {
                let next = state.apply_move(mv);
                let score = -self.best_result(&next, self.max_depth, Bounds::open());
                (mv, score)
            })
            .collect()
    }
}

impl<F: Fn(&GameState) -> i32> Agent for MinimaxAgent<F> {
    fn select_move(&mut self, state: &GameState) -> Move {
        self.nodes = 0;
        let scored = self.score_moves(state);
        let Some(best_score) = scored.iter().map(|&(_, s)| s).max() else {
            return Move::Pass;
        };
        let best_moves: Vec<Move> = scored
            .into_iter()
            .filter(|&(_, s)| s == best_score)
            .map(|(mv, _)| mv)
            .collect();
        let choice = best_moves[self.rng.usize(..best_moves.len())];
        log::debug!(
            "minimax depth {}: {} nodes, {} best moves at {}, chose {}",
            self.max_depth,
            self.nodes,
            best_moves.len(),
            best_score,
            choice
        );
        choice
    }
}
