//! A Monte Carlo tree search player for NoGo.
//!
//! NoGo is played on a Go board, but capturing is forbidden: a stone may not take the last
//! liberty of any group, its own included. The side left without a legal placement loses.
//! Every turn the MCTS player grows a fresh search tree from the current position with the
//! classic four phases (UCT selection, expansion of one untried move, a uniformly random rollout
//! to the end of the game, backpropagation) until its time or iteration budget runs out, then
//! plays the most visited reply.
//!
//! # Example
//!
//! ```rust
//! use nogo_mcts::agent::{Agent, MctsPlayer};
//! use nogo_mcts::board::Board;
//! use nogo_mcts::boards::nogo::NoGoBoard;
//!
//! // Create an empty 9x9 board
//! let mut board = NoGoBoard::default();
//!
//! // Configure a player for black from `key=value` arguments
//! let mut player = MctsPlayer::new("name=demo role=black seed=7 T=200")?;
//!
//! // Search and play the recommended placement
//! if let Some(placement) = player.take_action(&board) {
//!     assert!(board.place(placement).is_legal());
//!     println!("The best move is: {placement}");
//! }
//! # Ok::<(), nogo_mcts::error::Error>(())
//! ```

/// Players that choose placements, configured from `key=value` arguments.
pub mod agent;
/// Contains the `Board` trait, the rules oracle the search is built on.
pub mod board;
/// Contains implementations of the `Board` trait.
pub mod boards;
/// Search budgets and the UCT exploration constant.
pub mod config;
pub mod error;
/// The core module of the library, containing the `MonteCarloTreeSearch` implementation.
pub mod mcts;
/// Contains the `MctsNode` struct, which represents a node in the search tree.
pub mod mcts_node;
/// Helpers around the seeded random number generator.
pub mod random;
/// The uniformly random playout policy.
pub mod rollout;
/// The arena holding the search tree.
pub mod tree;
