//! Players that choose placements for one side of a game.

use crate::board::{Board, Color, Placement};
use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::mcts::MonteCarloTreeSearch;
use crate::random::{pick_random, seeded_generator};
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::str::FromStr;
use tracing::{debug, info};

/// Characters that may not appear in an agent name.
const RESERVED_NAME_CHARS: &[char] = &['[', ']', '(', ')', ':', ';', ' '];

/// A player as seen by the game driver.
///
/// The driver opens an episode, asks each agent for placements in turn and closes the episode
/// when one side runs out of them.
pub trait Agent<B: Board> {
    /// Returns the arguments the agent was configured with.
    fn args(&self) -> &AgentArgs;

    fn args_mut(&mut self) -> &mut AgentArgs;

    fn open_episode(&mut self, _flag: &str) {}

    fn close_episode(&mut self, _flag: &str) {}

    /// Chooses a placement on `board`, or `None` if the agent has no legal placement.
    fn take_action(&mut self, board: &B) -> Option<Placement>;

    fn check_for_win(&self, _board: &B) -> bool {
        false
    }

    fn name(&self) -> &str {
        self.args().name()
    }

    fn role(&self) -> &str {
        self.args().role()
    }

    /// Updates one argument from a `key=value` message.
    fn notify(&mut self, message: &str) {
        self.args_mut().notify(message);
    }
}

/// The `key=value` arguments of an agent.
///
/// Pairs are separated by whitespace and later pairs override earlier ones. A token without
/// `=` is stored with itself as both key and value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentArgs {
    meta: BTreeMap<String, String>,
}

impl AgentArgs {
    /// Parses `args` on top of `defaults`, which are in turn on top of
    /// `name=unknown role=unknown`.
    pub fn with_defaults(defaults: &str, args: &str) -> Self {
        let mut parsed = Self::default();
        for pair in ["name=unknown role=unknown", defaults, args]
            .iter()
            .flat_map(|part| part.split_whitespace())
        {
            parsed.notify(pair);
        }
        parsed
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    /// Sets the property named before the first `=` of `message` to the rest of it.
    pub fn notify(&mut self, message: &str) {
        let (key, value) = message.split_once('=').unwrap_or((message, message));
        self.meta.insert(key.to_string(), value.to_string());
    }

    pub fn name(&self) -> &str {
        self.property("name").unwrap_or("unknown")
    }

    pub fn role(&self) -> &str {
        self.property("role").unwrap_or("unknown")
    }

    fn validated_name(&self) -> Result<()> {
        let name = self.name();
        if name.contains(RESERVED_NAME_CHARS) {
            return Err(Error::InvalidConfiguration {
                message: format!("invalid name: {name}"),
            });
        }
        Ok(())
    }

    fn validated_role(&self) -> Result<Color> {
        Color::from_label(self.role()).ok_or_else(|| Error::InvalidConfiguration {
            message: format!("invalid role: {}", self.role()),
        })
    }

    fn seed(&self) -> Result<Option<u64>> {
        self.property("seed")
            .map(|seed| {
                seed.parse().map_err(|_| Error::InvalidConfiguration {
                    message: format!("invalid seed: {seed}"),
                })
            })
            .transpose()
    }
}

impl FromStr for AgentArgs {
    type Err = Infallible;

    fn from_str(args: &str) -> std::result::Result<Self, Self::Err> {
        let mut parsed = Self::default();
        for pair in args.split_whitespace() {
            parsed.notify(pair);
        }
        Ok(parsed)
    }
}

/// Places a stone on a uniformly chosen legal cell.
pub struct RandomPlayer {
    args: AgentArgs,
    who: Color,
    random: StdRng,
}

impl RandomPlayer {
    pub fn new(args: &str) -> Result<Self> {
        let args = AgentArgs::with_defaults("name=random role=unknown", args);
        args.validated_name()?;
        let who = args.validated_role()?;
        let random = seeded_generator(args.seed()?);
        info!(name = args.name(), role = %who, "random player ready");

        Ok(Self { args, who, random })
    }

    pub fn color(&self) -> Color {
        self.who
    }
}

impl<B: Board> Agent<B> for RandomPlayer {
    fn args(&self) -> &AgentArgs {
        &self.args
    }

    fn args_mut(&mut self) -> &mut AgentArgs {
        &mut self.args
    }

    fn take_action(&mut self, board: &B) -> Option<Placement> {
        let cells = board.legal_cells(self.who);
        pick_random(&cells, &mut self.random).map(|&cell| Placement::new(cell, self.who))
    }
}

/// Chooses placements with a fresh Monte Carlo tree search on every turn.
///
/// Recognised arguments: `name`, `role` (`black` or `white`), `seed`, `T` (iteration budget)
/// and `exp` (UCT exploration constant).
pub struct MctsPlayer {
    args: AgentArgs,
    who: Color,
    config: SearchConfig,
    random: StdRng,
}

impl MctsPlayer {
    pub fn new(args: &str) -> Result<Self> {
        let args = AgentArgs::with_defaults("name=mcts role=unknown", args);
        args.validated_name()?;
        let who = args.validated_role()?;
        let random = seeded_generator(args.seed()?);
        let config = SearchConfig::from_args(&args);
        info!(
            name = args.name(),
            role = %who,
            cycles = config.cycles,
            exploration_constant = config.exploration_constant,
            "mcts player ready"
        );

        Ok(Self {
            args,
            who,
            config,
            random,
        })
    }

    /// Replaces the search configuration, e.g. to shorten the time limit.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn color(&self) -> Color {
        self.who
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl<B: Board> Agent<B> for MctsPlayer {
    fn args(&self) -> &AgentArgs {
        &self.args
    }

    fn args_mut(&mut self) -> &mut AgentArgs {
        &mut self.args
    }

    fn take_action(&mut self, board: &B) -> Option<Placement> {
        let mut mcts =
            MonteCarloTreeSearch::builder(board.clone(), self.who, &mut self.random)
                .with_config(self.config.clone())
                .build();
        let stats = mcts.search();
        let best = mcts.get_most_visited_move();
        debug!(
            role = %self.who,
            iterations = stats.iterations,
            nodes = stats.nodes,
            root_visits = mcts.get_root().visits,
            root_wins = mcts.get_root().wins,
            placement = ?best,
            "mcts decision"
        );
        best
    }
}
