//! Game state and rule enforcement.
//!
//! A [`GameState`] is an immutable snapshot: board, player to move, the move
//! that produced it and a link to its predecessor. Applying a move never
//! touches the receiver; it builds a new state that points back at the old
//! one, so search code can branch freely from any state.
//!
//! Repetition is checked against every ancestor's `(player to move, board
//! hash)` pair. Those pairs are kept in a persistent set that shares
//! structure with the predecessor's, which makes the lookup O(1) on average
//! without copying the history on every move.

use std::fmt;
use std::rc::Rc;

use crate::board::Board;
use crate::error::MoveError;
use crate::scoring::{GameResult, compute_game_result};
use crate::types::{Move, Player, Point};

type Situation = (Player, u64);

struct Snapshot {
    board: Rc<Board>,
    next_player: Player,
    previous: Option<GameState>,
    last_move: Option<Move>,
    seen: im::HashSet<Situation>,
}

/// Unlink the history iteratively so dropping a long game cannot overflow
/// the stack.
impl Drop for Snapshot {
    fn drop(&mut self) {
        let mut next = self.previous.take();
        while let Some(state) = next {
            match Rc::try_unwrap(state.inner) {
                Ok(mut snapshot) => next = snapshot.previous.take(),
                Err(_) => break,
            }
        }
    }
}

/// A position in a game together with its history. Cloning is cheap.
#[derive(Clone)]
pub struct GameState {
    inner: Rc<Snapshot>,
}

impl GameState {
    /// Empty square board, Black to move.
    pub fn new_game(board_size: usize) -> Self {
        Self::with_dimensions(board_size, board_size)
    }

    /// Empty rectangular board, Black to move.
    pub fn with_dimensions(num_rows: usize, num_cols: usize) -> Self {
        Self::from_board(Board::new(num_rows, num_cols), Player::Black)
    }

    /// Start a game from an arbitrary position with no history.
    pub fn from_board(board: Board, next_player: Player) -> Self {
        GameState {
            inner: Rc::new(Snapshot {
                board: Rc::new(board),
                next_player,
                previous: None,
                last_move: None,
                seen: im::HashSet::new(),
            }),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.inner.board
    }

    #[inline]
    pub fn next_player(&self) -> Player {
        self.inner.next_player
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.inner.last_move
    }

    #[inline]
    pub fn previous_state(&self) -> Option<&GameState> {
        self.inner.previous.as_ref()
    }

    #[inline]
    fn situation(&self) -> Situation {
        (self.inner.next_player, self.inner.board.zobrist_hash())
    }

    /// The state after the player to move plays `mv`.
    ///
    /// # Panics
    /// If `mv` places a stone off the board or on an occupied point. Use
    /// [`try_apply_move`](Self::try_apply_move) for unchecked input.
    pub fn apply_move(&self, mv: Move) -> GameState {
        let board = match mv {
            Move::Play(point) => {
                let mut next = Board::clone(&self.inner.board);
                next.place_stone(self.inner.next_player, point);
                Rc::new(next)
            }
            Move::Pass | Move::Resign => Rc::clone(&self.inner.board),
        };
        GameState {
            inner: Rc::new(Snapshot {
                board,
                next_player: self.inner.next_player.other(),
                previous: Some(self.clone()),
                last_move: Some(mv),
                seen: self.inner.seen.update(self.situation()),
            }),
        }
    }

    /// Apply `mv` if it is legal, otherwise report why not.
    pub fn try_apply_move(&self, mv: Move) -> Result<GameState, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if let Move::Play(point) = mv {
            let board = self.board();
            if !board.is_on_grid(point) {
                return Err(MoveError::OffGrid(point));
            }
            if board.get(point).is_some() {
                return Err(MoveError::Occupied);
            }
            if self.is_move_self_capture(self.next_player(), mv) {
                return Err(MoveError::SelfCapture);
            }
            if self.does_move_violate_ko(self.next_player(), mv) {
                return Err(MoveError::Ko);
            }
        }
        Ok(self.apply_move(mv))
    }

    /// Whether the stone placed by `mv` would be left without liberties.
    /// A move that captures always gains a liberty, so it never counts.
    pub fn is_move_self_capture(&self, player: Player, mv: Move) -> bool {
        match mv {
            Move::Play(point) => !self.board().simulate_placement(player, point).has_liberties,
            _ => false,
        }
    }

    /// Whether `mv` would recreate a `(player to move, position)` pair seen
    /// earlier in this game.
    pub fn does_move_violate_ko(&self, player: Player, mv: Move) -> bool {
        match mv {
            Move::Play(point) => {
                let hash = self.board().simulate_placement(player, point).hash;
                self.inner.seen.contains(&(player.other(), hash))
            }
            _ => false,
        }
    }

    pub fn is_valid_move(&self, mv: Move) -> bool {
        if self.is_over() {
            return false;
        }
        match mv {
            Move::Pass | Move::Resign => true,
            Move::Play(point) => {
                let board = self.board();
                board.is_on_grid(point)
                    && board.get(point).is_none()
                    && !self.is_move_self_capture(self.next_player(), mv)
                    && !self.does_move_violate_ko(self.next_player(), mv)
            }
        }
    }

    /// Legal moves: plays in row-major order, then pass and resign.
    /// Empty once the game is over.
    pub fn legal_moves(&self) -> LegalMoves<'_> {
        LegalMoves {
            state: self,
            row: 1,
            col: 1,
            tail: if self.is_over() { 2 } else { 0 },
        }
    }

    /// True after a resignation or two consecutive passes.
    pub fn is_over(&self) -> bool {
        match self.inner.last_move {
            None => false,
            Some(Move::Resign) => true,
            Some(Move::Pass) => self
                .previous_state()
                .and_then(GameState::last_move)
                .is_some_and(|m| m.is_pass()),
            Some(Move::Play(_)) => false,
        }
    }

    /// Area-scoring result of a finished game that did not end by
    /// resignation.
    pub fn game_result(&self) -> Option<GameResult> {
        if !self.is_over() || self.inner.last_move == Some(Move::Resign) {
            return None;
        }
        Some(compute_game_result(self.board()))
    }

    pub fn winner(&self) -> Option<Player> {
        if !self.is_over() {
            return None;
        }
        if self.inner.last_move == Some(Move::Resign) {
            return Some(self.inner.next_player);
        }
        self.game_result().map(|r| r.winner())
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("next_player", &self.inner.next_player)
            .field("last_move", &self.inner.last_move)
            .field("hash", &self.inner.board.zobrist_hash())
            .finish_non_exhaustive()
    }
}

/// Lazy iterator over a state's legal moves.
pub struct LegalMoves<'a> {
    state: &'a GameState,
    row: usize,
    col: usize,
    /// 0 = pass next, 1 = resign next, 2 = exhausted.
    tail: u8,
}

impl Iterator for LegalMoves<'_> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        let board = self.state.board();
        if self.tail == 0 {
            while self.row <= board.num_rows() {
                let point = Point::new(self.row as i32, self.col as i32);
                self.col += 1;
                if self.col > board.num_cols() {
                    self.col = 1;
                    self.row += 1;
                }
                let mv = Move::Play(point);
                if self.state.is_valid_move(mv) {
                    return Some(mv);
                }
            }
        }
        match self.tail {
            0 => {
                self.tail = 1;
                Some(Move::Pass)
            }
            1 => {
                self.tail = 2;
                Some(Move::Resign)
            }
            _ => None,
        }
    }
}
