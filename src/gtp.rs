//! Go Text Protocol (GTP) driver.
//!
//! This module implements the subset of GTP version 2 needed to play a game
//! against any [`Agent`] from a graphical interface such as Sabaki or GoGui.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - Start a new game on a `size`x`size` board
//! - `clear_board` - Reset the board to empty
//! - `komi <value>` - Only 7.5 is accepted
//! - `play <color> <vertex>` - Play a move for the side to move
//! - `genmove <color>` - Ask the agent for a move and play it
//! - `undo` - Take back the last move
//! - `showboard` - Print the board
//! - `final_score` - Score a finished game
//!
//! ## Example
//!
//! ```ignore
//! use gobot::gtp::GtpEngine;
//! use gobot::mcts::{MctsAgent, MctsConfig};
//! let mut engine = GtpEngine::new(Box::new(MctsAgent::new(MctsConfig::default())));
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use crate::agent::Agent;
use crate::constants::{DEFAULT_BOARD_SIZE, KOMI, MAX_BOARD_SIZE};
use crate::game::GameState;
use crate::types::{Move, Player};

const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "final_score",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "undo",
    "version",
];

/// A GTP session: the current game and the agent that answers `genmove`.
pub struct GtpEngine {
    /// Current game
    state: GameState,
    /// Edge length used by `clear_board`
    board_size: usize,
    /// Move generator for `genmove`
    agent: Box<dyn Agent>,
}

impl GtpEngine {
    /// Create an engine on the default board.
    pub fn new(agent: Box<dyn Agent>) -> Self {
        Self::with_board_size(agent, DEFAULT_BOARD_SIZE)
    }

    pub fn with_board_size(agent: Box<dyn Agent>, board_size: usize) -> Self {
        Self {
            state: GameState::new_game(board_size),
            board_size,
            agent,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Serve commands from stdin until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let mut out = io::stdout().lock();
        for line in io::stdin().lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let mut words = command_line.split_whitespace();
            let Some(command) = words.next().map(str::to_lowercase) else {
                continue;
            };
            let args: Vec<&str> = words.collect();
            log::debug!("gtp <- {command_line}");

            let (ok, reply) = self.execute(&command, &args);
            let status = if ok { '=' } else { '?' };
            match id {
                Some(id) => write!(out, "{status}{id} {reply}\n\n")?,
                None => write!(out, "{status} {reply}\n\n")?,
            }
            out.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split a leading numeric id off the command line, if there is one.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let line = line.trim();
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match head.parse::<u32>() {
            Ok(id) => (Some(id), rest.trim()),
            Err(_) => (None, line),
        }
    }

    fn parse_color(arg: Option<&&str>) -> Result<Player, String> {
        let arg = arg.ok_or("missing argument")?;
        arg.parse::<Player>().map_err(|e| e.to_string())
    }

    /// Run one command; the flag is false for a `?` reply.
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                None => (false, "missing argument".to_string()),
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
            },

            "quit" => (true, String::new()),

            "boardsize" => match args.first().map(|a| a.parse::<usize>()) {
                None => (false, "missing argument".to_string()),
                Some(Ok(size)) if (1..=MAX_BOARD_SIZE).contains(&size) => {
                    self.board_size = size;
                    self.state = GameState::new_game(size);
                    (true, String::new())
                }
                Some(Ok(_)) => (false, "unacceptable size".to_string()),
                Some(Err(_)) => (false, "invalid size".to_string()),
            },

            "clear_board" => {
                self.state = GameState::new_game(self.board_size);
                (true, String::new())
            }

            "komi" => match args.first().map(|a| a.parse::<f64>()) {
                None => (false, "missing argument".to_string()),
                Some(Ok(komi)) if komi == KOMI => (true, String::new()),
                Some(Ok(_)) => (false, format!("only komi {KOMI} is supported")),
                Some(Err(_)) => (false, "invalid komi".to_string()),
            },

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let color = match Self::parse_color(args.first()) {
                    Ok(c) => c,
                    Err(e) => return (false, e),
                };
                if color != self.state.next_player() {
                    return (false, "illegal move: out of turn".to_string());
                }
                let mv = match args[1].parse::<Move>() {
                    Ok(mv) => mv,
                    Err(e) => return (false, e.to_string()),
                };
                match self.state.try_apply_move(mv) {
                    Ok(next) => {
                        self.state = next;
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let color = match Self::parse_color(args.first()) {
                    Ok(c) => c,
                    Err(e) => return (false, e),
                };
                if color != self.state.next_player() {
                    return (false, "out of turn".to_string());
                }
                if self.state.is_over() {
                    return (false, "game is over".to_string());
                }
                let mv = self.agent.select_move(&self.state);
                match self.state.try_apply_move(mv) {
                    Ok(next) => {
                        log::info!("{color} plays {mv}");
                        self.state = next;
                        (true, mv.to_string())
                    }
                    Err(e) => (false, format!("agent chose {mv}: {e}")),
                }
            }

            "undo" => match self.state.previous_state() {
                Some(previous) => {
                    self.state = previous.clone();
                    (true, String::new())
                }
                None => (false, "cannot undo".to_string()),
            },

            "showboard" => (true, format!("\n{}", self.state.board())),

            "final_score" => match self.state.game_result() {
                Some(result) => (true, result.to_string()),
                None if self.state.is_over() => {
                    let winner = match self.state.winner() {
                        Some(Player::Black) => "B+R",
                        _ => "W+R",
                    };
                    (true, winner.to_string())
                }
                None => (false, "game is not over".to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::RandomAgent;
    use crate::types::Point;

    fn engine() -> GtpEngine {
        GtpEngine::new(Box::new(RandomAgent::with_seed(1)))
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = engine();
        let (success, response) = engine.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "gobot-rs");
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();

        let (success, response) = engine.execute("known_command", &["undo"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["unknown_cmd"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_boardsize() {
        let mut engine = engine();
        let (success, _) = engine.execute("boardsize", &["13"]);
        assert!(success);
        assert_eq!(engine.state().board().num_rows(), 13);

        let (success, _) = engine.execute("boardsize", &["25"]);
        assert!(!success);
    }

    #[test]
    fn test_komi() {
        let mut engine = engine();
        assert!(engine.execute("komi", &["7.5"]).0);
        assert!(!engine.execute("komi", &["6.5"]).0);
    }

    #[test]
    fn test_play_and_clear() {
        let mut engine = engine();

        let (success, _) = engine.execute("play", &["black", "D4"]);
        assert!(success);
        assert_eq!(engine.state().board().get(Point::new(4, 4)), Some(Player::Black));

        // Occupied and out of turn are both rejected.
        assert!(!engine.execute("play", &["white", "D4"]).0);
        assert!(!engine.execute("play", &["black", "E5"]).0);

        let (success, _) = engine.execute("clear_board", &[]);
        assert!(success);
        assert_eq!(engine.state().board().get(Point::new(4, 4)), None);
    }

    #[test]
    fn test_genmove_and_undo() {
        let mut engine = engine();
        let (success, response) = engine.execute("genmove", &["b"]);
        assert!(success);
        assert!(response.parse::<Move>().is_ok());
        assert_eq!(engine.state().next_player(), Player::White);

        assert!(engine.execute("undo", &[]).0);
        assert_eq!(engine.state().next_player(), Player::Black);
        assert!(!engine.execute("undo", &[]).0);
    }

    #[test]
    fn test_final_score() {
        let mut engine = engine();
        assert!(!engine.execute("final_score", &[]).0);
        assert!(engine.execute("play", &["b", "pass"]).0);
        assert!(engine.execute("play", &["w", "pass"]).0);
        let (success, response) = engine.execute("final_score", &[]);
        assert!(success);
        assert_eq!(response, "W+7.5");
    }
}
