//! Random playouts (game simulation) for position evaluation.
//!
//! A playout keeps choosing uniformly random legal moves for both sides,
//! never filling its own eyes, until two consecutive passes end the game.

use crate::board::Board;
use crate::game::GameState;
use crate::types::{Move, Player, Point};

/// Check if an empty point is an eye for `color`.
///
/// Every on-grid orthogonal neighbor must be a `color` stone. On the edge,
/// every on-grid diagonal must be `color` as well; in the middle of the
/// board at least three of the four diagonals must be.
pub fn is_point_an_eye(board: &Board, point: Point, color: Player) -> bool {
    if board.get_group(point).is_some() {
        return false;
    }
    for neighbor in point.neighbors() {
        if board.is_on_grid(neighbor) && board.get(neighbor) != Some(color) {
            return false;
        }
    }

    let mut friendly_corners = 0;
    let mut off_board_corners = 0;
    for corner in point.corners() {
        if board.is_on_grid(corner) {
            if board.get(corner) == Some(color) {
                friendly_corners += 1;
            }
        } else {
            off_board_corners += 1;
        }
    }
    if off_board_corners > 0 {
        off_board_corners + friendly_corners == 4
    } else {
        friendly_corners >= 3
    }
}

/// Choose a random legal move that is not one of the mover's own eyes, or
/// `Pass` if there is none.
///
/// `points` is a scratch permutation of the board points, reused across
/// calls. Each call runs an incremental Fisher-Yates pass over it and stops
/// at the first acceptable point, which is a uniform pick among all
/// acceptable points regardless of the order `points` starts in.
pub fn choose_random_move(state: &GameState, points: &mut [Point], rng: &mut fastrand::Rng) -> Move {
    let board = state.board();
    let player = state.next_player();
    let n = points.len();

    for i in 0..n {
        let j = rng.usize(i..n);
        points.swap(i, j);

        let pt = points[i];
        if board.get(pt).is_some() || is_point_an_eye(board, pt, player) {
            continue;
        }
        let mv = Move::Play(pt);
        if state.is_valid_move(mv) {
            return mv;
        }
    }
    Move::Pass
}

/// Play random moves from `state` until the game ends and return the winner.
pub fn simulate_random_game(state: &GameState, rng: &mut fastrand::Rng) -> Player {
    let mut points: Vec<Point> = state.board().points().collect();
    rng.shuffle(&mut points);

    let mut state = state.clone();
    let mut moves = 0usize;
    while !state.is_over() {
        let mv = choose_random_move(&state, &mut points, rng);
        state = state.apply_move(mv);
        moves += 1;
    }
    let winner = state
        .winner()
        .expect("finished game always has a winner");
    log::trace!("playout finished after {moves} moves, {winner} wins");
    winner
}
