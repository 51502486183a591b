//! Static behavioural metadata declared by each strategy variant

use serde::Serialize;

/// How many trailing rounds a decision can depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryDepth {
    Bounded(u32),
    Unbounded,
}

impl MemoryDepth {
    /// Whether a window of `rounds` trailing rounds is enough to determine
    /// the decision.
    pub fn covers(self, rounds: usize) -> bool {
        match self {
            MemoryDepth::Bounded(depth) => rounds >= depth as usize,
            MemoryDepth::Unbounded => false,
        }
    }

    pub fn is_bounded(self) -> bool {
        matches!(self, MemoryDepth::Bounded(_))
    }
}

/// Match information beyond the history that a strategy may consult.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Payoff table of the game being played.
    Game,
    /// Total number of rounds in the match.
    Length,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Classifier {
    pub memory_depth: MemoryDepth,
    pub stochastic: bool,
    pub makes_use_of: &'static [Feature],
    pub long_run_time: bool,
    pub inspects_source: bool,
    pub manipulates_source: bool,
    pub manipulates_state: bool,
}

impl Classifier {
    /// Deterministic, history-only classifier with the given memory depth.
    pub const fn deterministic(memory_depth: MemoryDepth) -> Self {
        Self {
            memory_depth,
            stochastic: false,
            makes_use_of: &[],
            long_run_time: false,
            inspects_source: false,
            manipulates_source: false,
            manipulates_state: false,
        }
    }

    pub const fn stochastic(memory_depth: MemoryDepth) -> Self {
        Self {
            stochastic: true,
            ..Self::deterministic(memory_depth)
        }
    }

    /// Never looks at or tampers with the opponent's internals.
    pub fn obeys_rules(&self) -> bool {
        !(self.inspects_source || self.manipulates_source || self.manipulates_state)
    }

    pub fn is_basic(&self) -> bool {
        !self.stochastic
            && self.makes_use_of.is_empty()
            && self.memory_depth.is_bounded()
            && !self.long_run_time
            && self.obeys_rules()
    }
}
