//! Gobot: a Go engine with minimax and Monte Carlo Tree Search agents.
//!
//! The engine tracks stone groups and their liberties incrementally, hashes
//! positions with Zobrist keys for superko detection and exposes an immutable
//! [`GameState`](game::GameState) that search code can branch from freely.
//!
//! ## Modules
//!
//! - [`types`] - Points, players and moves
//! - [`board`] - Group/liberty bookkeeping and capture resolution
//! - [`game`] - Game state, history and rule enforcement
//! - [`scoring`] - Area scoring for finished games
//! - [`agent`] - The agent interface and a random agent
//! - [`playout`] - Random game simulation
//! - [`minimax`] - Negamax with alpha-beta pruning
//! - [`mcts`] - Monte Carlo Tree Search with UCT
//! - [`gtp`] - Go Text Protocol driver
//!
//! ## Example
//!
//! ```
//! use gobot::agent::Agent;
//! use gobot::game::GameState;
//! use gobot::mcts::{MctsAgent, MctsConfig};
//! use gobot::types::{Move, Point};
//!
//! // Create a new game and play a move
//! let game = GameState::new_game(5).apply_move(Move::Play(Point::new(3, 3)));
//!
//! // Run MCTS to find the best response
//! let mut agent = MctsAgent::new(MctsConfig::default().with_rounds(20));
//! let best = agent.select_move(&game);
//! assert!(game.is_valid_move(best));
//! ```

pub mod agent;
pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod gtp;
pub mod mcts;
pub mod minimax;
pub mod playout;
pub mod scoring;
pub mod types;
pub mod zobrist;
