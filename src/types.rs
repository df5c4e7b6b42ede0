//! Basic value types: points, players and moves.

use std::fmt;
use std::str::FromStr;

use crate::constants::COLS;
use crate::error::ParseMoveError;

/// The two sides of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// The opponent.
    #[inline]
    pub fn other(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Index into per-player arrays (Black = 0, White = 1).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "black"),
            Player::White => write!(f, "white"),
        }
    }
}

impl FromStr for Player {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Ok(Player::Black),
            "w" | "white" => Ok(Player::White),
            _ => Err(ParseMoveError::Color(s.to_string())),
        }
    }
}

/// A grid coordinate. Rows and columns are 1-based on the board; neighbors
/// of edge points fall outside the grid, hence the signed components.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Point { row, col }
    }

    /// The 4 orthogonal neighbors (N, S, W, E). May be off the grid.
    #[inline]
    pub fn neighbors(self) -> [Point; 4] {
        [
            Point::new(self.row - 1, self.col),
            Point::new(self.row + 1, self.col),
            Point::new(self.row, self.col - 1),
            Point::new(self.row, self.col + 1),
        ]
    }

    /// The 4 diagonal neighbors. May be off the grid.
    #[inline]
    pub fn corners(self) -> [Point; 4] {
        [
            Point::new(self.row - 1, self.col - 1),
            Point::new(self.row - 1, self.col + 1),
            Point::new(self.row + 1, self.col - 1),
            Point::new(self.row + 1, self.col + 1),
        ]
    }
}

/// Formats as a vertex, e.g. `D4`. The column letter skips `I`.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = usize::try_from(self.col - 1)
            .ok()
            .and_then(|c| COLS.chars().nth(c));
        match letter {
            Some(c) => write!(f, "{c}{}", self.row),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

impl FromStr for Point {
    type Err = ParseMoveError;

    /// Parse a vertex such as `D4` or `q16`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars
            .next()
            .ok_or_else(|| ParseMoveError::Vertex(s.to_string()))?
            .to_ascii_uppercase();
        let col = COLS
            .find(letter)
            .ok_or_else(|| ParseMoveError::Vertex(s.to_string()))?;
        let digits = chars.as_str();
        if !digits.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(ParseMoveError::Vertex(s.to_string()));
        }
        let row: i32 = digits
            .parse()
            .map_err(|_| ParseMoveError::Vertex(s.to_string()))?;
        if row < 1 {
            return Err(ParseMoveError::Vertex(s.to_string()));
        }
        Ok(Point::new(row, col as i32 + 1))
    }
}

/// A player's action: exactly one of placing a stone, passing or resigning.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Play(Point),
    Pass,
    Resign,
}

impl Move {
    #[inline]
    pub fn play(point: Point) -> Self {
        Move::Play(point)
    }

    #[inline]
    pub fn is_play(&self) -> bool {
        matches!(self, Move::Play(_))
    }

    #[inline]
    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    #[inline]
    pub fn is_resign(&self) -> bool {
        matches!(self, Move::Resign)
    }

    /// The target point of a `Play`.
    #[inline]
    pub fn point(&self) -> Option<Point> {
        match self {
            Move::Play(p) => Some(*p),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Play(p) => write!(f, "{p}"),
            Move::Pass => write!(f, "pass"),
            Move::Resign => write!(f, "resign"),
        }
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("pass") {
            Ok(Move::Pass)
        } else if s.eq_ignore_ascii_case("resign") {
            Ok(Move::Resign)
        } else {
            s.parse().map(Move::Play)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_swaps() {
        assert_eq!(Player::Black.other(), Player::White);
        assert_eq!(Player::White.other(), Player::Black);
        assert_eq!(Player::Black.other().other(), Player::Black);
    }

    #[test]
    fn test_neighbors_may_leave_grid() {
        let n = Point::new(1, 1).neighbors();
        assert!(n.contains(&Point::new(0, 1)));
        assert!(n.contains(&Point::new(1, 0)));
        assert!(n.contains(&Point::new(2, 1)));
        assert!(n.contains(&Point::new(1, 2)));
    }

    #[test]
    fn test_parse_vertex_skips_i() {
        let h5: Point = "H5".parse().unwrap();
        let j5: Point = "j5".parse().unwrap();
        assert_eq!(h5, Point::new(5, 8));
        assert_eq!(j5, Point::new(5, 9));
        assert_eq!(j5.to_string(), "J5");
    }

    #[test]
    fn test_parse_move() {
        assert_eq!("pass".parse::<Move>().unwrap(), Move::Pass);
        assert_eq!("RESIGN".parse::<Move>().unwrap(), Move::Resign);
        assert_eq!("C2".parse::<Move>().unwrap(), Move::Play(Point::new(2, 3)));
        assert!("I5".parse::<Move>().is_err());
        assert!("D0".parse::<Move>().is_err());
        assert!("".parse::<Move>().is_err());
    }

    #[test]
    fn test_parse_vertex_rejects_signed_row() {
        assert!("A+5".parse::<Point>().is_err());
        assert!("A-5".parse::<Point>().is_err());
        assert!("A 5".parse::<Point>().is_err());
        assert_eq!("A15".parse::<Point>().unwrap(), Point::new(15, 1));
    }

    #[test]
    fn test_parse_player() {
        assert_eq!("B".parse::<Player>().unwrap(), Player::Black);
        assert_eq!("white".parse::<Player>().unwrap(), Player::White);
        assert!("red".parse::<Player>().is_err());
    }
}
