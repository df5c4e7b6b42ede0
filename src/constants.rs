//! Constants for board geometry, scoring, and search parameters.
//!
//! Everything that used to be a compile-time choice (board size) is now a
//! runtime argument; the values here are limits and defaults.

// =============================================================================
// Board Geometry
// =============================================================================

/// Largest supported board edge. Zobrist keys are generated for this many
/// rows and columns.
pub const MAX_BOARD_SIZE: usize = 19;

/// Default board edge used by the CLI and the GTP engine.
pub const DEFAULT_BOARD_SIZE: usize = 9;

/// Column letters for vertex notation. `I` is skipped by convention.
pub const COLS: &str = "ABCDEFGHJKLMNOPQRST";

// =============================================================================
// Scoring
// =============================================================================

/// Compensation awarded to White under area scoring.
pub const KOMI: f64 = 7.5;

// =============================================================================
// Hashing
// =============================================================================

/// Seed for the Zobrist key table. Fixed so hashes are stable across runs.
pub const ZOBRIST_SEED: u64 = 0x5EED_0F60_B0A2_D000;

// =============================================================================
// Minimax Parameters
// =============================================================================

/// Score of a won terminal position, from the mover's perspective.
pub const MAX_SCORE: i32 = 999_999;

/// Score of a lost terminal position, from the mover's perspective.
pub const MIN_SCORE: i32 = -MAX_SCORE;

/// Default negamax depth.
pub const DEFAULT_DEPTH: u32 = 2;

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Default number of MCTS rounds per move.
pub const N_ROUNDS: usize = 500;

/// Default UCT exploration weight.
pub const TEMPERATURE: f64 = 1.5;
