use crate::board::{Board, Color, Placement};
use crate::config::SearchConfig;
use crate::mcts_node::MctsNode;
use crate::rollout::rollout;
use crate::tree::SearchTree;
use ego_tree::NodeId;
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// The main struct for running the Monte Carlo Tree Search algorithm.
///
/// It holds the position being searched, the search tree, the random number generator and the
/// configuration. A search is built for one decision and dropped afterwards.
pub struct MonteCarloTreeSearch<B: Board, R: Rng> {
    board: B,
    tree: SearchTree,
    random: R,
    config: SearchConfig,
    iterations: u32,
}

/// A builder for creating instances of `MonteCarloTreeSearch`.
pub struct MonteCarloTreeSearchBuilder<B: Board, R: Rng> {
    board: B,
    color: Color,
    random_generator: R,
    config: SearchConfig,
}

impl<B: Board, R: Rng> MonteCarloTreeSearchBuilder<B, R> {
    /// Creates a builder searching a placement for `color` on `board`.
    pub fn new(board: B, color: Color, random_generator: R) -> Self {
        Self {
            board,
            color,
            random_generator,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the exploration constant of the UCT formula.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.config.exploration_constant = c;
        self
    }

    /// Sets the iteration budget used by [`MonteCarloTreeSearch::search`].
    pub fn with_cycles(mut self, cycles: u32) -> Self {
        self.config.cycles = cycles;
        self
    }

    /// Sets the wall-clock budget used by [`MonteCarloTreeSearch::search`].
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.config.time_limit = limit;
        self
    }

    pub fn build(self) -> MonteCarloTreeSearch<B, R> {
        MonteCarloTreeSearch::new(self.board, self.color, self.random_generator, self.config)
    }
}

/// What a finished search did.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStats {
    pub iterations: u32,
    pub elapsed: Duration,
    pub nodes: usize,
}

impl<B: Board, R: Rng> MonteCarloTreeSearch<B, R> {
    /// Returns a new builder for `MonteCarloTreeSearch`.
    pub fn builder(board: B, color: Color, rg: R) -> MonteCarloTreeSearchBuilder<B, R> {
        MonteCarloTreeSearchBuilder::new(board, color, rg)
    }

    /// Creates a search for a placement of `color` on `board`.
    ///
    /// The root is treated as reached by a placement of the opponent, so its untried moves are
    /// the legal placements of `color`.
    pub fn new(board: B, color: Color, rg: R, config: SearchConfig) -> Self {
        let tree = SearchTree::new(&board, color.opponent());
        Self {
            board,
            tree,
            random: rg,
            config,
            iterations: 0,
        }
    }

    /// Returns an immutable reference to the underlying search tree.
    pub fn get_tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Returns the data of the root node.
    pub fn get_root(&self) -> &MctsNode {
        self.tree.get(self.tree.root_id())
    }

    /// Returns the number of iterations run so far.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Performs one iteration: selection, expansion, rollout and backpropagation.
    /// Returns the node the rollout started from.
    pub fn do_iteration(&mut self) -> NodeId {
        let mut board = self.board.clone();
        let mut node_id = self.tree.root_id();

        // Selection
        while !self.tree.has_untried_moves(node_id) && self.tree.has_children(node_id) {
            let Some(child) = self.tree.uct_child(node_id, self.config.exploration_constant)
            else {
                break;
            };
            node_id = child;
            if let Some(placement) = self.tree.get(node_id).placement {
                replay(&mut board, placement);
            }
        }

        // Expansion
        if let Some(placement) = self.tree.pop_untried_move(node_id, &mut self.random) {
            replay(&mut board, placement);
            node_id = self.tree.add_child(node_id, &board, placement);
        }

        // Rollout
        let to_move = self.tree.get(node_id).mover.opponent();
        let winner = rollout(&mut board, to_move, &mut self.random);

        // Backpropagation
        let depth = self.tree.backpropagate(node_id, winner);
        self.iterations += 1;
        trace!(iteration = self.iterations, depth, %winner, "iteration finished");
        node_id
    }

    /// Runs exactly `n` iterations, ignoring both budgets.
    pub fn iterate_n_times(&mut self, n: u32) {
        for _ in 0..n {
            self.do_iteration();
        }
    }

    /// Runs iterations until the time limit is reached or the iteration budget is exceeded.
    /// At least one iteration always runs.
    pub fn search(&mut self) -> SearchStats {
        let start = Instant::now();
        let mut iterations = 0u32;
        loop {
            self.do_iteration();
            iterations += 1;
            if start.elapsed() >= self.config.time_limit || iterations > self.config.cycles {
                break;
            }
        }

        let stats = SearchStats {
            iterations,
            elapsed: start.elapsed(),
            nodes: self.tree.len(),
        };
        debug!(
            iterations = stats.iterations,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            nodes = stats.nodes,
            "search finished"
        );
        stats
    }

    /// Returns the placement of the most visited root child, the lowest cell winning ties.
    /// `None` when the root has no children, i.e. there is no legal placement.
    pub fn get_most_visited_move(&self) -> Option<Placement> {
        let best = self.tree.most_visited_child(self.tree.root_id())?;
        self.tree.get(best).placement
    }
}

fn replay<B: Board>(board: &mut B, placement: Placement) {
    let legality = board.place(placement);
    debug_assert!(legality.is_legal(), "BUG: replaying {placement} was rejected");
}
