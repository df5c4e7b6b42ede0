//! Monte Carlo Tree Search with UCT selection.
//!
//! Each round walks down the tree picking the child with the best UCT score,
//! expands one untried move, finishes the game with a random playout and
//! credits the winner on every node back up to the root.
//!
//! Nodes live in an arena (`Vec<MctsNode>`) and refer to each other by index.

use std::time::{Duration, Instant};

use crate::agent::Agent;
use crate::constants::{N_ROUNDS, TEMPERATURE};
use crate::game::GameState;
use crate::playout::simulate_random_game;
use crate::types::{Move, Player};

/// Index of a node in a [`SearchTree`].
pub type NodeId = usize;

/// Search parameters.
#[derive(Clone, Debug)]
pub struct MctsConfig {
    /// Rounds (select, expand, simulate, backpropagate) per move.
    pub num_rounds: usize,
    /// Exploration weight in the UCT formula.
    pub temperature: f64,
    /// Seed for expansion order and playouts.
    pub seed: u64,
    /// Optional wall-clock limit, checked once per round.
    pub time_budget: Option<Duration>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_rounds: N_ROUNDS,
            temperature: TEMPERATURE,
            seed: 42,
            time_budget: None,
        }
    }
}

impl MctsConfig {
    pub fn with_rounds(mut self, num_rounds: usize) -> Self {
        self.num_rounds = num_rounds;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }
}

/// A node in the search tree.
pub struct MctsNode {
    /// The game position at this node
    pub state: GameState,
    /// Parent node (None for the root)
    pub parent: Option<NodeId>,
    /// Move that led here from the parent
    pub mv: Option<Move>,
    /// Playouts won, indexed by `Player::index`
    pub win_counts: [u32; 2],
    /// Playouts through this node
    pub num_rollouts: u32,
    /// Expanded children
    pub children: Vec<NodeId>,
    /// Legal moves not yet expanded, in random order
    unvisited_moves: Vec<Move>,
}

impl MctsNode {
    fn new(state: GameState, parent: Option<NodeId>, mv: Option<Move>, rng: &mut fastrand::Rng) -> Self {
        let mut unvisited_moves: Vec<Move> = state.legal_moves().collect();
        rng.shuffle(&mut unvisited_moves);
        Self {
            state,
            parent,
            mv,
            win_counts: [0; 2],
            num_rollouts: 0,
            children: Vec::new(),
            unvisited_moves,
        }
    }

    #[inline]
    pub fn can_add_child(&self) -> bool {
        !self.unvisited_moves.is_empty()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state.is_over()
    }

    /// Fraction of playouts through this node won by `player`.
    #[inline]
    pub fn winning_frac(&self, player: Player) -> f64 {
        if self.num_rollouts == 0 {
            return 0.0;
        }
        self.win_counts[player.index()] as f64 / self.num_rollouts as f64
    }

    fn record_win(&mut self, winner: Player) {
        self.win_counts[winner.index()] += 1;
        self.num_rollouts += 1;
    }
}

/// Arena-backed search tree. Node 0 is the root.
pub struct SearchTree {
    nodes: Vec<MctsNode>,
}

impl SearchTree {
    pub const ROOT: NodeId = 0;

    pub fn new(state: GameState, rng: &mut fastrand::Rng) -> Self {
        Self {
            nodes: vec![MctsNode::new(state, None, None, rng)],
        }
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id]
    }

    #[inline]
    pub fn root(&self) -> &MctsNode {
        &self.nodes[Self::ROOT]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Expand the next untried move of `id` and return the new child.
    ///
    /// # Panics
    /// If `id` has no untried moves.
    pub fn add_random_child(&mut self, id: NodeId, rng: &mut fastrand::Rng) -> NodeId {
        let mv = self.nodes[id]
            .unvisited_moves
            .pop()
            .expect("add_random_child on a fully expanded node");
        let state = self.nodes[id].state.apply_move(mv);
        let child = MctsNode::new(state, Some(id), Some(mv), rng);
        let child_id = self.nodes.len();
        self.nodes.push(child);
        self.nodes[id].children.push(child_id);
        child_id
    }

    /// Credit `winner` on `id` and every ancestor.
    pub fn backpropagate(&mut self, id: NodeId, winner: Player) {
        let mut current = Some(id);
        while let Some(i) = current {
            self.nodes[i].record_win(winner);
            current = self.nodes[i].parent;
        }
    }
}

/// `win_pct + temperature * sqrt(ln(parent_rollouts) / child_rollouts)`.
pub fn uct_score(parent_rollouts: f64, child_rollouts: f64, win_pct: f64, temperature: f64) -> f64 {
    let exploration = (parent_rollouts.ln() / child_rollouts).sqrt();
    win_pct + temperature * exploration
}

/// MCTS agent with random playouts.
pub struct MctsAgent {
    config: MctsConfig,
    rng: fastrand::Rng,
}

impl MctsAgent {
    pub fn new(config: MctsConfig) -> Self {
        let rng = fastrand::Rng::with_seed(config.seed);
        Self { config, rng }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Child of `id` with the highest UCT score for the player moving at `id`.
    fn select_child(&self, tree: &SearchTree, id: NodeId) -> Option<NodeId> {
        let node = tree.node(id);
        let mover = node.state.next_player();
        let parent_rollouts = node.num_rollouts.max(1) as f64;
        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let child = tree.node(child_id);
            let score = uct_score(
                parent_rollouts,
                child.num_rollouts.max(1) as f64,
                child.winning_frac(mover),
                self.config.temperature,
            );
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((child_id, score));
            }
        }
        best.map(|(child_id, _)| child_id)
    }

    /// Run the configured number of rounds from `state` and return the tree.
    pub fn search(&mut self, state: &GameState) -> SearchTree {
        let mut tree = SearchTree::new(state.clone(), &mut self.rng);
        let deadline = self.config.time_budget.map(|b| Instant::now() + b);
        let mut rounds = 0;

        while rounds < self.config.num_rounds {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                log::debug!("time budget exhausted after {rounds} rounds");
                break;
            }
            let mut node = SearchTree::ROOT;
            while !tree.node(node).can_add_child() && !tree.node(node).is_terminal() {
                match self.select_child(&tree, node) {
                    Some(child) => node = child,
                    None => break,
                }
            }
            if tree.node(node).can_add_child() {
                node = tree.add_random_child(node, &mut self.rng);
            }

            let winner = simulate_random_game(&tree.node(node).state, &mut self.rng);
            tree.backpropagate(node, winner);
            rounds += 1;
            log::trace!("round {rounds}: node {node}, {winner} won");
        }
        tree
    }

    /// Root child with the highest win fraction for the root's mover.
    fn best_move(tree: &SearchTree) -> Option<(Move, f64)> {
        let root = tree.root();
        let player = root.state.next_player();
        let mut best: Option<(Move, f64)> = None;
        for &child_id in &root.children {
            let child = tree.node(child_id);
            let pct = child.winning_frac(player);
            if let Some(mv) = child.mv {
                if best.is_none_or(|(_, p)| pct > p) {
                    best = Some((mv, pct));
                }
            }
        }
        best
    }
}

impl Agent for MctsAgent {
    fn select_move(&mut self, state: &GameState) -> Move {
        let tree = self.search(state);
        if log::log_enabled!(log::Level::Debug) {
            dump_children(&tree);
        }
        match Self::best_move(&tree) {
            Some((mv, pct)) => {
                log::debug!("mcts chose {mv} with win fraction {pct:.3}");
                mv
            }
            None => Move::Pass,
        }
    }
}

/// Log statistics for the root's children.
pub fn dump_children(tree: &SearchTree) {
    let root = tree.root();
    let player = root.state.next_player();
    for &child_id in &root.children {
        let child = tree.node(child_id);
        if let Some(mv) = child.mv {
            log::debug!(
                "move {} v={} w={} wr={:.3}",
                mv,
                child.num_rollouts,
                child.win_counts[player.index()],
                child.winning_frac(player)
            );
        }
    }
}
