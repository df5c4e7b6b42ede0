//! Go board with incremental group and liberty tracking.
//!
//! Stones are organised into groups (maximal connected sets of same-colored
//! stones). Groups live in an arena and every grid cell holds the id of the
//! group owning its stone, so all stones of a group share one `Group` value.
//! Groups are never edited in place: a placement or capture stores a new
//! `Group` in the arena slot.
//!
//! The board also keeps a running Zobrist hash, toggled as stones are added
//! and removed.

use std::collections::BTreeSet;
use std::fmt;

use crate::constants::{COLS, MAX_BOARD_SIZE};
use crate::types::{Player, Point};
use crate::zobrist;

/// Index of a group in the board's arena.
pub type GroupId = usize;

/// A maximal connected set of same-colored stones and its liberties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    color: Player,
    stones: BTreeSet<Point>,
    liberties: BTreeSet<Point>,
}

impl Group {
    fn new(
        color: Player,
        stones: impl IntoIterator<Item = Point>,
        liberties: impl IntoIterator<Item = Point>,
    ) -> Self {
        Group {
            color,
            stones: stones.into_iter().collect(),
            liberties: liberties.into_iter().collect(),
        }
    }

    pub fn color(&self) -> Player {
        self.color
    }

    pub fn stones(&self) -> &BTreeSet<Point> {
        &self.stones
    }

    pub fn liberties(&self) -> &BTreeSet<Point> {
        &self.liberties
    }

    #[inline]
    pub fn num_liberties(&self) -> usize {
        self.liberties.len()
    }

    fn without_liberty(&self, point: Point) -> Group {
        let mut liberties = self.liberties.clone();
        liberties.remove(&point);
        Group {
            color: self.color,
            stones: self.stones.clone(),
            liberties,
        }
    }

    fn with_liberty(&self, point: Point) -> Group {
        let mut liberties = self.liberties.clone();
        liberties.insert(point);
        Group {
            color: self.color,
            stones: self.stones.clone(),
            liberties,
        }
    }

    /// Union of two same-colored groups joined by a new stone.
    fn merged_with(&self, other: &Group) -> Group {
        assert_eq!(
            self.color, other.color,
            "cannot merge groups of different colors"
        );
        let stones: BTreeSet<Point> = self.stones.union(&other.stones).copied().collect();
        let liberties = self
            .liberties
            .union(&other.liberties)
            .filter(|p| !stones.contains(p))
            .copied()
            .collect();
        Group {
            color: self.color,
            stones,
            liberties,
        }
    }
}

/// What placing a stone would do, computed without touching the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementOutcome {
    /// Number of enemy stones that would be captured.
    pub captured_stones: usize,
    /// Whether the group containing the new stone keeps at least one liberty.
    pub has_liberties: bool,
    /// Board hash after the placement and any captures.
    pub hash: u64,
}

/// Neighbors of a point, partitioned by content.
struct Surroundings {
    empty: Vec<Point>,
    friendly: Vec<GroupId>,
    enemy: Vec<GroupId>,
}

/// A rectangular Go board.
#[derive(Clone, Debug)]
pub struct Board {
    num_rows: usize,
    num_cols: usize,
    grid: Vec<Option<GroupId>>,
    groups: Vec<Option<Group>>,
    free: Vec<GroupId>,
    hash: u64,
}

impl Board {
    /// Create an empty board.
    ///
    /// # Panics
    /// If either dimension is zero or exceeds `MAX_BOARD_SIZE`.
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        assert!(
            (1..=MAX_BOARD_SIZE).contains(&num_rows) && (1..=MAX_BOARD_SIZE).contains(&num_cols),
            "board dimensions {num_rows}x{num_cols} out of range"
        );
        Board {
            num_rows,
            num_cols,
            grid: vec![None; num_rows * num_cols],
            groups: Vec::new(),
            free: Vec::new(),
            hash: zobrist::EMPTY_BOARD,
        }
    }

    /// Build a board from a text diagram: `x` is Black, `o` is White, `.` is
    /// empty. The first line is row 1; other characters are ignored.
    ///
    /// # Panics
    /// If the diagram is empty, exceeds `MAX_BOARD_SIZE`, or a stone would be
    /// captured while the diagram is being laid out.
    pub fn from_rows(rows: &[&str]) -> Self {
        let num_cols = rows
            .iter()
            .map(|r| r.chars().filter(|c| matches!(c, 'x' | 'o' | '.')).count())
            .max()
            .unwrap_or(0);
        let mut board = Board::new(rows.len(), num_cols);
        for (r, line) in rows.iter().enumerate() {
            let cells = line.chars().filter(|c| matches!(c, 'x' | 'o' | '.'));
            for (c, cell) in cells.enumerate() {
                let point = Point::new(r as i32 + 1, c as i32 + 1);
                match cell {
                    'x' => board.place_stone(Player::Black, point),
                    'o' => board.place_stone(Player::White, point),
                    _ => {}
                }
            }
        }
        board
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[inline]
    pub fn is_on_grid(&self, point: Point) -> bool {
        1 <= point.row
            && point.row as usize <= self.num_rows
            && 1 <= point.col
            && point.col as usize <= self.num_cols
    }

    #[inline]
    fn idx(&self, point: Point) -> usize {
        (point.row as usize - 1) * self.num_cols + (point.col as usize - 1)
    }

    /// All grid points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let cols = self.num_cols as i32;
        (1..=self.num_rows as i32).flat_map(move |r| (1..=cols).map(move |c| Point::new(r, c)))
    }

    #[inline]
    fn group_id(&self, point: Point) -> Option<GroupId> {
        if self.is_on_grid(point) {
            self.grid[self.idx(point)]
        } else {
            None
        }
    }

    #[inline]
    fn group(&self, id: GroupId) -> &Group {
        self.groups[id]
            .as_ref()
            .expect("grid cell refers to a released group")
    }

    /// Color of the stone at `point`, or `None` if empty or off the grid.
    #[inline]
    pub fn get(&self, point: Point) -> Option<Player> {
        self.get_group(point).map(Group::color)
    }

    /// The group owning the stone at `point`.
    #[inline]
    pub fn get_group(&self, point: Point) -> Option<&Group> {
        self.group_id(point).map(|id| self.group(id))
    }

    #[inline]
    pub fn zobrist_hash(&self) -> u64 {
        self.hash
    }

    /// Number of stones of each color, indexed by `Player::index`.
    pub fn stone_counts(&self) -> [usize; 2] {
        let mut counts = [0; 2];
        for id in self.grid.iter().flatten() {
            counts[self.group(*id).color.index()] += 1;
        }
        counts
    }

    fn surroundings(&self, player: Player, point: Point) -> Surroundings {
        let mut s = Surroundings {
            empty: Vec::with_capacity(4),
            friendly: Vec::with_capacity(4),
            enemy: Vec::with_capacity(4),
        };
        for neighbor in point.neighbors() {
            if !self.is_on_grid(neighbor) {
                continue;
            }
            match self.grid[self.idx(neighbor)] {
                None => s.empty.push(neighbor),
                Some(id) => {
                    let side = if self.group(id).color == player {
                        &mut s.friendly
                    } else {
                        &mut s.enemy
                    };
                    if !side.contains(&id) {
                        side.push(id);
                    }
                }
            }
        }
        s
    }

    fn insert_group(&mut self, group: Group) -> GroupId {
        match self.free.pop() {
            Some(id) => {
                self.groups[id] = Some(group);
                id
            }
            None => {
                self.groups.push(Some(group));
                self.groups.len() - 1
            }
        }
    }

    fn release_group(&mut self, id: GroupId) -> Group {
        self.free.push(id);
        self.groups[id]
            .take()
            .expect("released a group that was not live")
    }

    /// Place a stone and resolve captures.
    ///
    /// # Panics
    /// If `point` is off the grid or already occupied.
    pub fn place_stone(&mut self, player: Player, point: Point) {
        assert!(self.is_on_grid(point), "{point} is off the board");
        assert!(self.grid[self.idx(point)].is_none(), "{point} is occupied");

        let Surroundings {
            empty,
            friendly,
            enemy,
        } = self.surroundings(player, point);

        let mut new_group = Group::new(player, [point], empty);
        for id in friendly {
            let old = self.release_group(id);
            new_group = new_group.merged_with(&old);
        }
        let stones: Vec<Point> = new_group.stones.iter().copied().collect();
        let new_id = self.insert_group(new_group);
        for stone in stones {
            let i = self.idx(stone);
            self.grid[i] = Some(new_id);
        }

        self.hash ^= zobrist::hash_code(point, player);

        for id in enemy {
            let replacement = self.group(id).without_liberty(point);
            if replacement.num_liberties() > 0 {
                self.groups[id] = Some(replacement);
            } else {
                self.remove_group(id);
            }
        }
    }

    /// Lift a captured group off the board, handing its points back as
    /// liberties to the neighboring groups.
    fn remove_group(&mut self, id: GroupId) {
        let group = self.release_group(id);
        for &stone in &group.stones {
            for neighbor in stone.neighbors() {
                match self.group_id(neighbor) {
                    Some(nid) if nid != id => {
                        let updated = self.group(nid).with_liberty(stone);
                        self.groups[nid] = Some(updated);
                    }
                    _ => {}
                }
            }
            let i = self.idx(stone);
            self.grid[i] = None;
            self.hash ^= zobrist::hash_code(stone, group.color);
        }
    }

    /// Work out the effect of `player` placing at `point` without mutating
    /// or cloning the board.
    ///
    /// # Panics
    /// If `point` is off the grid or already occupied.
    pub fn simulate_placement(&self, player: Player, point: Point) -> PlacementOutcome {
        assert!(self.is_on_grid(point), "{point} is off the board");
        assert!(self.grid[self.idx(point)].is_none(), "{point} is occupied");

        let s = self.surroundings(player, point);
        let mut hash = self.hash ^ zobrist::hash_code(point, player);
        let mut captured_stones = 0;
        for &id in &s.enemy {
            let group = self.group(id);
            if group.num_liberties() == 1 {
                captured_stones += group.stones.len();
                for &stone in &group.stones {
                    hash ^= zobrist::hash_code(stone, group.color);
                }
            }
        }
        // Any capture frees a point next to the new stone.
        let has_liberties = !s.empty.is_empty()
            || captured_stones > 0
            || s.friendly.iter().any(|&id| self.group(id).num_liberties() > 1);

        PlacementOutcome {
            captured_stones,
            has_liberties,
            hash,
        }
    }
}

/// Boards are equal iff their position hashes are equal.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=self.num_rows as i32).rev() {
            write!(f, "{row:>2} ")?;
            for col in 1..=self.num_cols as i32 {
                let ch = match self.get(Point::new(row, col)) {
                    Some(Player::Black) => 'x',
                    Some(Player::White) => 'o',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for c in COLS.chars().take(self.num_cols) {
            write!(f, "{c} ")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i32, col: i32) -> Point {
        Point::new(row, col)
    }

    #[test]
    fn test_single_stone_liberties() {
        let mut board = Board::new(9, 9);
        board.place_stone(Player::Black, p(5, 5));
        let group = board.get_group(p(5, 5)).unwrap();
        assert_eq!(group.num_liberties(), 4);
        assert_eq!(board.get(p(5, 5)), Some(Player::Black));
        assert_eq!(board.get(p(5, 6)), None);
    }

    #[test]
    fn test_corner_stone_liberties() {
        let mut board = Board::new(9, 9);
        board.place_stone(Player::White, p(1, 1));
        assert_eq!(board.get_group(p(1, 1)).unwrap().num_liberties(), 2);
    }

    #[test]
    fn test_merge_shares_one_group() {
        let mut board = Board::new(9, 9);
        board.place_stone(Player::Black, p(3, 3));
        board.place_stone(Player::Black, p(3, 5));
        board.place_stone(Player::Black, p(3, 4));
        let group = board.get_group(p(3, 3)).unwrap();
        assert_eq!(group.stones().len(), 3);
        assert_eq!(group.num_liberties(), 8);
        assert_eq!(board.group_id(p(3, 3)), board.group_id(p(3, 5)));
        assert!(!group.liberties().contains(&p(3, 4)));
    }

    #[test]
    fn test_enemy_stone_takes_liberty() {
        let mut board = Board::new(9, 9);
        board.place_stone(Player::Black, p(2, 2));
        board.place_stone(Player::White, p(2, 3));
        assert_eq!(board.get_group(p(2, 2)).unwrap().num_liberties(), 3);
        assert_eq!(board.get_group(p(2, 3)).unwrap().num_liberties(), 3);
    }

    #[test]
    fn test_capture_restores_liberties() {
        let mut board = Board::new(9, 9);
        board.place_stone(Player::Black, p(2, 2));
        board.place_stone(Player::White, p(1, 2));
        board.place_stone(Player::White, p(2, 1));
        board.place_stone(Player::White, p(3, 2));
        let before = board.zobrist_hash();
        board.place_stone(Player::White, p(2, 3));
        assert_eq!(board.get(p(2, 2)), None);
        assert_ne!(board.zobrist_hash(), before);
        for q in [p(1, 2), p(2, 1), p(3, 2), p(2, 3)] {
            let group = board.get_group(q).unwrap();
            assert!(group.liberties().contains(&p(2, 2)), "{q} lost (2,2)");
        }
    }

    #[test]
    fn test_remove_then_hash_matches_fresh_board() {
        let mut board = Board::new(5, 5);
        board.place_stone(Player::Black, p(1, 1));
        board.place_stone(Player::White, p(1, 2));
        board.place_stone(Player::White, p(2, 1));
        let mut expected = Board::new(5, 5);
        expected.place_stone(Player::White, p(1, 2));
        expected.place_stone(Player::White, p(2, 1));
        assert_eq!(board, expected);
    }

    #[test]
    fn test_simulate_matches_place() {
        let board = Board::from_rows(&[
            ".xo..", //
            "xo...", //
            "o....", //
            ".....", //
            ".....",
        ]);
        let outcome = board.simulate_placement(Player::White, p(1, 1));
        let mut placed = board.clone();
        placed.place_stone(Player::White, p(1, 1));
        assert_eq!(outcome.hash, placed.zobrist_hash());
        assert_eq!(outcome.captured_stones, 2);
        assert!(outcome.has_liberties);
    }

    #[test]
    fn test_simulate_suicide() {
        let board = Board::from_rows(&[
            ".x...", //
            "x....", //
            ".....", //
            ".....", //
            ".....",
        ]);
        let outcome = board.simulate_placement(Player::White, p(1, 1));
        assert!(!outcome.has_liberties);
        assert_eq!(outcome.captured_stones, 0);
        assert!(board.simulate_placement(Player::Black, p(1, 1)).has_liberties);
    }

    #[test]
    fn test_simulate_filling_own_last_liberty() {
        // The black pair's only liberty is (1,1); filling it is suicide.
        let board = Board::from_rows(&[
            ".xo..", //
            "oxo..", //
            ".o...", //
            ".....", //
            ".....",
        ]);
        let outcome = board.simulate_placement(Player::Black, p(1, 1));
        assert!(!outcome.has_liberties);
    }

    #[test]
    #[should_panic(expected = "occupied")]
    fn test_place_on_occupied_panics() {
        let mut board = Board::new(9, 9);
        board.place_stone(Player::Black, p(4, 4));
        board.place_stone(Player::White, p(4, 4));
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn test_place_off_grid_panics() {
        let mut board = Board::new(9, 9);
        board.place_stone(Player::Black, p(0, 4));
    }

    #[test]
    fn test_arena_slots_are_reused() {
        let mut board = Board::new(9, 9);
        board.place_stone(Player::Black, p(1, 1));
        board.place_stone(Player::Black, p(1, 3));
        board.place_stone(Player::Black, p(1, 2));
        let live = board.groups.iter().filter(|g| g.is_some()).count();
        assert_eq!(live, 1);
        assert!(board.groups.len() <= 3);
    }

    #[test]
    fn test_display() {
        let board = Board::from_rows(&["x.", ".o"]);
        let text = board.to_string();
        assert!(text.contains(" 1 x . "));
        assert!(text.contains(" 2 . o "));
        assert!(text.ends_with("   A B \n"));
    }
}
