use proptest::prelude::*;

use gobot::board::Board;
use gobot::game::GameState;
use gobot::types::{Move, Player, Point};
use gobot::zobrist::hash_code;

/// Replay `choices` as indices into the legal moves (resignation excluded).
fn replay(size: usize, choices: &[usize]) -> GameState {
    let mut game = GameState::new_game(size);
    for &choice in choices {
        if game.is_over() {
            break;
        }
        let moves: Vec<Move> = game.legal_moves().filter(|m| !m.is_resign()).collect();
        game = game.apply_move(moves[choice % moves.len()]);
    }
    game
}

fn recomputed_hash(board: &Board) -> u64 {
    board
        .points()
        .filter_map(|pt| board.get(pt).map(|c| hash_code(pt, c)))
        .fold(0, |acc, k| acc ^ k)
}

proptest! {
    /// The incremental hash always equals the XOR over the stones on the board.
    #[test]
    fn hash_matches_stones(size in 3usize..8, choices in prop::collection::vec(any::<usize>(), 0..80)) {
        let game = replay(size, &choices);
        prop_assert_eq!(game.board().zobrist_hash(), recomputed_hash(game.board()));
    }

    /// Every yielded move is valid, and pass and resign close the list.
    #[test]
    fn legal_moves_are_valid(size in 3usize..7, choices in prop::collection::vec(any::<usize>(), 0..50)) {
        let game = replay(size, &choices);
        let moves: Vec<Move> = game.legal_moves().collect();
        if game.is_over() {
            prop_assert!(moves.is_empty());
        } else {
            for mv in &moves {
                prop_assert!(game.is_valid_move(*mv), "{} yielded but invalid", mv);
            }
            prop_assert_eq!(moves[moves.len() - 2], Move::Pass);
            prop_assert_eq!(moves[moves.len() - 1], Move::Resign);
        }
    }

    /// No group on the board is ever left without liberties.
    #[test]
    fn groups_keep_liberties(choices in prop::collection::vec(any::<usize>(), 0..80)) {
        let game = replay(5, &choices);
        let board = game.board();
        for pt in board.points() {
            if let Some(group) = board.get_group(pt) {
                prop_assert!(group.num_liberties() > 0, "group at {} is dead", pt);
                prop_assert!(group.stones().contains(&pt));
            }
        }
    }

    /// Placing two separate stones of one color gives the same board in
    /// either order.
    #[test]
    fn placement_order_commutes(
        a in (1i32..=9, 1i32..=9),
        b in (1i32..=9, 1i32..=9),
        black in any::<bool>(),
    ) {
        let (a, b) = (Point::new(a.0, a.1), Point::new(b.0, b.1));
        prop_assume!(a != b);
        let color = if black { Player::Black } else { Player::White };

        let mut first = Board::new(9, 9);
        first.place_stone(color, a);
        first.place_stone(color, b);
        let mut second = Board::new(9, 9);
        second.place_stone(color, b);
        second.place_stone(color, a);

        prop_assert_eq!(first.zobrist_hash(), second.zobrist_hash());
        for pt in first.points() {
            prop_assert_eq!(first.get_group(pt), second.get_group(pt));
        }
    }
}
