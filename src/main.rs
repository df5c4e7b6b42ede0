//! Gobot: play Go with minimax or MCTS agents.
//!
//! ## Usage
//!
//! - `gobot-rs` - Self-play between two MCTS agents
//! - `gobot-rs selfplay --black minimax --white mcts` - Pick the agents
//! - `gobot-rs gtp` - Start GTP server for GUI integration
//!
//! Set `RUST_LOG=debug` to see search statistics.

use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};

use gobot::agent::{Agent, RandomAgent};
use gobot::constants::{DEFAULT_BOARD_SIZE, DEFAULT_DEPTH, MAX_BOARD_SIZE, N_ROUNDS, TEMPERATURE};
use gobot::game::GameState;
use gobot::gtp::GtpEngine;
use gobot::mcts::{MctsAgent, MctsConfig};
use gobot::minimax::{Heuristic, MinimaxAgent, capture_diff};
use gobot::types::{Move, Player};

/// Gobot: a Go engine with minimax and MCTS agents
#[derive(Parser)]
#[command(name = "gobot-rs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp {
        /// Agent answering genmove
        #[arg(long, value_enum, default_value_t = AgentKind::Mcts)]
        agent: AgentKind,
        #[command(flatten)]
        opts: AgentOpts,
    },
    /// Let two agents play a game against each other
    Selfplay {
        #[arg(long, value_enum, default_value_t = AgentKind::Mcts)]
        black: AgentKind,
        #[arg(long, value_enum, default_value_t = AgentKind::Mcts)]
        white: AgentKind,
        #[command(flatten)]
        opts: AgentOpts,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum AgentKind {
    Mcts,
    Minimax,
    Random,
}

#[derive(Args, Clone, Debug)]
struct AgentOpts {
    /// Board edge length
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,
    /// MCTS rounds per move
    #[arg(long, default_value_t = N_ROUNDS)]
    rounds: usize,
    /// MCTS exploration weight
    #[arg(long, default_value_t = TEMPERATURE)]
    temperature: f64,
    /// MCTS time budget per move, in milliseconds
    #[arg(long)]
    time_ms: Option<u64>,
    /// Minimax search depth
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,
    /// Random seed; agents derive their own seeds from it
    #[arg(long)]
    seed: Option<u64>,
}

impl Default for AgentOpts {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            rounds: N_ROUNDS,
            temperature: TEMPERATURE,
            time_ms: None,
            depth: DEFAULT_DEPTH,
            seed: None,
        }
    }
}

impl AgentOpts {
    fn validate(&self) -> Result<()> {
        if !(1..=MAX_BOARD_SIZE).contains(&self.size) {
            bail!("board size must be between 1 and {MAX_BOARD_SIZE}, got {}", self.size);
        }
        Ok(())
    }

    fn build(&self, kind: AgentKind, salt: u64) -> Box<dyn Agent> {
        let seed = self.seed.unwrap_or_else(|| fastrand::u64(..)).wrapping_add(salt);
        match kind {
            AgentKind::Mcts => {
                let mut config = MctsConfig::default()
                    .with_rounds(self.rounds)
                    .with_temperature(self.temperature)
                    .with_seed(seed);
                if let Some(ms) = self.time_ms {
                    config = config.with_time_budget(Duration::from_millis(ms));
                }
                Box::new(MctsAgent::new(config))
            }
            AgentKind::Minimax => Box::new(MinimaxAgent::with_seed(
                self.depth,
                capture_diff as Heuristic,
                seed,
            )),
            AgentKind::Random => Box::new(RandomAgent::with_seed(seed)),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Gtp { agent, opts }) => {
            opts.validate()?;
            let mut engine = GtpEngine::with_board_size(opts.build(agent, 0), opts.size);
            engine.run()?;
        }
        Some(Commands::Selfplay { black, white, opts }) => {
            opts.validate()?;
            run_selfplay(black, white, &opts)?;
        }
        None => run_selfplay(AgentKind::Mcts, AgentKind::Mcts, &AgentOpts::default())?,
    }
    Ok(())
}

fn run_selfplay(black: AgentKind, white: AgentKind, opts: &AgentOpts) -> Result<()> {
    let mut agents = [opts.build(black, 0), opts.build(white, 1)];
    let mut game = GameState::new_game(opts.size);
    let mut move_number = 0;

    log::info!("selfplay on {0}x{0}: {black:?} (black) vs {white:?} (white)", opts.size);
    while !game.is_over() {
        let player = game.next_player();
        let mv = agents[player.index()].select_move(&game);
        move_number += 1;
        match mv {
            Move::Pass => println!("{move_number}. {player} passes"),
            Move::Resign => println!("{move_number}. {player} resigns"),
            Move::Play(_) => println!("{move_number}. {player} {mv}"),
        }
        game = game.try_apply_move(mv)?;
    }

    println!("{}", game.board());
    match (game.game_result(), game.winner()) {
        (Some(result), _) => println!("Result: {result}"),
        (None, Some(Player::Black)) => println!("Result: B+R"),
        (None, _) => println!("Result: W+R"),
    }
    Ok(())
}
