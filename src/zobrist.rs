//! Zobrist keys for incremental position hashing.
//!
//! Each `(point, color)` pair gets a random 64-bit key. A position's hash is
//! the XOR of the keys of every stone on it, so adding and removing a stone
//! are the same operation and the hash does not depend on move order.

use std::sync::OnceLock;

use crate::constants::{MAX_BOARD_SIZE, ZOBRIST_SEED};
use crate::types::{Player, Point};

/// Hash of the empty board.
pub const EMPTY_BOARD: u64 = 0;

static TABLE: OnceLock<Vec<u64>> = OnceLock::new();

fn table() -> &'static [u64] {
    TABLE.get_or_init(|| {
        let mut rng = fastrand::Rng::with_seed(ZOBRIST_SEED);
        (0..MAX_BOARD_SIZE * MAX_BOARD_SIZE * 2)
            .map(|_| rng.u64(..))
            .collect()
    })
}

/// Key for a stone of `player` at `point`.
///
/// `point` must lie within a `MAX_BOARD_SIZE` square; keys depend only on the
/// coordinate, so boards of different sizes share them.
#[inline]
pub fn hash_code(point: Point, player: Player) -> u64 {
    debug_assert!(point.row >= 1 && point.col >= 1);
    let idx = (point.row as usize - 1) * MAX_BOARD_SIZE + (point.col as usize - 1);
    table()[idx * 2 + player.index()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_distinct() {
        let keys: HashSet<u64> = table().iter().copied().collect();
        assert_eq!(keys.len(), MAX_BOARD_SIZE * MAX_BOARD_SIZE * 2);
        assert!(!keys.contains(&EMPTY_BOARD));
    }

    #[test]
    fn test_keys_are_stable() {
        let p = Point::new(4, 4);
        assert_eq!(hash_code(p, Player::Black), hash_code(p, Player::Black));
        assert_ne!(hash_code(p, Player::Black), hash_code(p, Player::White));
    }
}
