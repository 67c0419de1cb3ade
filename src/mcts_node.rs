use crate::board::{Board, Color, Placement};

/// Represents a single node in the Monte Carlo search tree.
///
/// A node does not keep its position: the search replays placements from the root onto a
/// working copy of the board instead. What it keeps is who moved into it, which replies have not
/// been expanded yet, and the simulation statistics.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// The color whose placement produced this node. For the root this is the opponent of the
    /// searching side, so that the root's replies are the searching side's own placements.
    pub mover: Color,
    /// The placement that led to this node from its parent. `None` for the root node.
    pub placement: Option<Placement>,
    /// Cells on which `mover.opponent()` can still be expanded, in ascending order.
    pub untried_moves: Vec<usize>,
    /// The number of simulations that passed through this node.
    pub visits: u32,
    /// The number of those simulations won by `mover`.
    pub wins: u32,
}

impl MctsNode {
    /// Creates a node for the position `board`, recording every legal reply of the opponent of
    /// `mover` as untried.
    pub fn new<B: Board>(board: &B, mover: Color, placement: Option<Placement>) -> Self {
        MctsNode {
            mover,
            placement,
            untried_moves: board.legal_cells(mover.opponent()),
            visits: 0,
            wins: 0,
        }
    }

    /// Records the outcome of one simulation.
    pub fn update(&mut self, did_win: bool) {
        self.visits += 1;
        if did_win {
            self.wins += 1;
        }
    }

    pub fn has_untried_moves(&self) -> bool {
        !self.untried_moves.is_empty()
    }

    /// Calculates the win rate of this node.
    pub fn wins_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.visits)
        }
    }
}

/// Calculates the UCT value of a child: its win rate plus the exploration bonus
/// `c * sqrt(ln(parent_visits) / visits)`.
///
/// `visits` must be at least one; every child is simulated once right after it is created.
pub fn uct_score(parent_visits: u32, wins: u32, visits: u32, exploration_constant: f64) -> f64 {
    let visits = f64::from(visits);
    f64::from(wins) / visits
        + exploration_constant * f64::sqrt(f64::ln(f64::from(parent_visits)) / visits)
}
