//! End-of-game area scoring.
//!
//! Every empty region is flood-filled. A region bordered by one color only
//! is that color's territory; a region touching both colors is dame and
//! counts for nobody. Each side's score is stones on the board plus
//! territory, and White receives komi.

use std::fmt;

use crate::board::Board;
use crate::constants::KOMI;
use crate::types::{Player, Point};

/// Ownership of every point after scoring.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Territory {
    pub black_territory: usize,
    pub white_territory: usize,
    pub black_stones: usize,
    pub white_stones: usize,
    pub dame: usize,
    pub dame_points: Vec<Point>,
}

/// Final score of a game.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameResult {
    pub black: f64,
    pub white: f64,
    pub komi: f64,
}

impl GameResult {
    /// Black wins only with strictly more than White plus komi.
    pub fn winner(&self) -> Player {
        if self.black > self.white + self.komi {
            Player::Black
        } else {
            Player::White
        }
    }

    pub fn winning_margin(&self) -> f64 {
        (self.black - (self.white + self.komi)).abs()
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let white = self.white + self.komi;
        if self.black > white {
            write!(f, "B+{:.1}", self.black - white)
        } else {
            write!(f, "W+{:.1}", white - self.black)
        }
    }
}

/// Collect the empty region containing `start` and the colors bordering it.
fn collect_region(board: &Board, start: Point, visited: &mut [bool]) -> (Vec<Point>, [bool; 2]) {
    let idx = |p: Point| (p.row as usize - 1) * board.num_cols() + (p.col as usize - 1);
    let mut region = Vec::new();
    let mut borders = [false; 2];
    let mut stack = vec![start];
    visited[idx(start)] = true;

    while let Some(pt) = stack.pop() {
        region.push(pt);
        for n in pt.neighbors() {
            if !board.is_on_grid(n) {
                continue;
            }
            match board.get(n) {
                Some(color) => borders[color.index()] = true,
                None => {
                    if !visited[idx(n)] {
                        visited[idx(n)] = true;
                        stack.push(n);
                    }
                }
            }
        }
    }
    (region, borders)
}

/// Classify every point of `board` as stone, territory or dame.
pub fn evaluate_territory(board: &Board) -> Territory {
    let mut territory = Territory::default();
    let mut visited = vec![false; board.num_rows() * board.num_cols()];

    for pt in board.points() {
        match board.get(pt) {
            Some(Player::Black) => territory.black_stones += 1,
            Some(Player::White) => territory.white_stones += 1,
            None => {
                let i = (pt.row as usize - 1) * board.num_cols() + (pt.col as usize - 1);
                if visited[i] {
                    continue;
                }
                let (region, borders) = collect_region(board, pt, &mut visited);
                match borders {
                    [true, false] => territory.black_territory += region.len(),
                    [false, true] => territory.white_territory += region.len(),
                    _ => {
                        territory.dame += region.len();
                        territory.dame_points.extend(region);
                    }
                }
            }
        }
    }
    territory
}

/// Score `board` with the standard komi.
pub fn compute_game_result(board: &Board) -> GameResult {
    let territory = evaluate_territory(board);
    GameResult {
        black: (territory.black_territory + territory.black_stones) as f64,
        white: (territory.white_territory + territory.white_stones) as f64,
        komi: KOMI,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_is_dame() {
        let board = Board::new(5, 5);
        let t = evaluate_territory(&board);
        assert_eq!(t.dame, 25);
        assert_eq!(t.black_territory + t.white_territory, 0);
        // Empty board: White wins on komi.
        assert_eq!(compute_game_result(&board).winner(), Player::White);
    }

    #[test]
    fn test_single_color_owns_everything() {
        let mut board = Board::new(5, 5);
        board.place_stone(Player::Black, Point::new(3, 3));
        let t = evaluate_territory(&board);
        assert_eq!(t.black_stones, 1);
        assert_eq!(t.black_territory, 24);
        assert_eq!(t.dame, 0);
    }

    #[test]
    fn test_split_board() {
        let board = Board::from_rows(&[
            "..xo.", //
            "..xo.", //
            "..xo.", //
            "..xo.", //
            "..xo.",
        ]);
        let t = evaluate_territory(&board);
        assert_eq!(t.black_stones, 5);
        assert_eq!(t.white_stones, 5);
        assert_eq!(t.black_territory, 10);
        assert_eq!(t.white_territory, 5);
        let result = compute_game_result(&board);
        assert_eq!(result.black, 15.0);
        assert_eq!(result.white, 10.0);
        assert_eq!(result.winner(), Player::White);
        assert_eq!(result.winning_margin(), 2.5);
        assert_eq!(result.to_string(), "W+2.5");
    }

    #[test]
    fn test_dame_between_colors() {
        let board = Board::from_rows(&[
            "x.o", //
            "x.o", //
            "x.o",
        ]);
        let t = evaluate_territory(&board);
        assert_eq!(t.dame, 3);
        assert_eq!(t.dame_points.len(), 3);
        assert!(t.dame_points.contains(&Point::new(2, 2)));
    }

    #[test]
    fn test_display_black_win() {
        let result = GameResult {
            black: 50.0,
            white: 31.0,
            komi: KOMI,
        };
        assert_eq!(result.winner(), Player::Black);
        assert_eq!(result.to_string(), "B+11.5");
    }
}
