//! Search configuration.

use crate::agent::AgentArgs;
use std::time::Duration;
use tracing::debug;

/// Iteration budget used when `T` is missing or malformed.
pub const DEFAULT_CYCLES: u32 = 1000;
/// Exploration constant used when `exp` is missing or malformed.
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = 0.25;
/// Wall-clock budget of one search.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(1);

/// Configuration of one Monte Carlo tree search.
///
/// A search keeps iterating while it is under both budgets: it stops once the time limit is
/// reached or the iteration count exceeds `cycles`, whichever happens first.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Iteration budget. The counter is checked after each iteration, so a search runs at most
    /// `cycles + 1` iterations and always at least one.
    pub cycles: u32,

    /// Weight of the exploration term in the UCT formula.
    pub exploration_constant: f64,

    /// Wall-clock budget, checked between iterations.
    pub time_limit: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cycles: DEFAULT_CYCLES,
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
            time_limit: DEFAULT_TIME_LIMIT,
        }
    }
}

impl SearchConfig {
    /// Reads `T` and `exp` from agent arguments, falling back to the defaults for values that
    /// are missing or do not parse. A negative `T` counts as zero.
    pub fn from_args(args: &AgentArgs) -> Self {
        let mut config = Self::default();

        if let Some(cycles) = args.property("T") {
            match cycles.parse::<i64>() {
                Ok(cycles) => config.cycles = u32::try_from(cycles.max(0)).unwrap_or(u32::MAX),
                Err(_) => debug!(value = cycles, "ignoring malformed T"),
            }
        }

        if let Some(exp) = args.property("exp") {
            match exp.parse::<f64>() {
                Ok(exp) if exp.is_finite() => config.exploration_constant = exp,
                _ => debug!(value = exp, "ignoring malformed exp"),
            }
        }

        config
    }

    /// Builder pattern: set the iteration budget.
    pub fn with_cycles(mut self, cycles: u32) -> Self {
        self.cycles = cycles;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }
}
