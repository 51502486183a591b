//! Simple reference opponents

use crate::action::{actions_from_str, actions_to_string, Action};
use crate::classifier::{Classifier, MemoryDepth};
use crate::error::EngineError;
use crate::history::History;
use crate::strategy::Strategy;

static MEMORYLESS: Classifier = Classifier::deterministic(MemoryDepth::Bounded(0));
static ALTERNATOR: Classifier = Classifier::deterministic(MemoryDepth::Bounded(1));
static CYCLER: Classifier = Classifier::deterministic(MemoryDepth::Unbounded);

/// Always cooperates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cooperator;

impl Strategy for Cooperator {
    fn name(&self) -> String {
        "Cooperator".to_string()
    }

    fn description(&self) -> &'static str {
        "Never defects. Always cooperates."
    }

    fn classifier(&self) -> &'static Classifier {
        &MEMORYLESS
    }

    fn decide(&mut self, _history: &History) -> Action {
        Action::Cooperate
    }

    fn reset(&mut self) {}
}

/// Always defects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Defector;

impl Strategy for Defector {
    fn name(&self) -> String {
        "Defector".to_string()
    }

    fn description(&self) -> &'static str {
        "Never cooperates. Always defects."
    }

    fn classifier(&self) -> &'static Classifier {
        &MEMORYLESS
    }

    fn decide(&mut self, _history: &History) -> Action {
        Action::Defect
    }

    fn reset(&mut self) {}
}

/// Cooperates, then flips its own previous move every round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Alternator;

impl Strategy for Alternator {
    fn name(&self) -> String {
        "Alternator".to_string()
    }

    fn description(&self) -> &'static str {
        "Starts by cooperating, then alternates between defect and cooperate."
    }

    fn classifier(&self) -> &'static Classifier {
        &ALTERNATOR
    }

    fn decide(&mut self, history: &History) -> Action {
        match history.own_actions().last() {
            None => Action::Cooperate,
            Some(last) => last.flip(),
        }
    }

    fn reset(&mut self) {}
}

/// Plays a fixed script of moves, starting over when it runs out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cycler {
    cycle: Vec<Action>,
}

impl Cycler {
    pub fn new(cycle: Vec<Action>) -> Result<Self, EngineError> {
        if cycle.is_empty() {
            return Err(EngineError::config("cycler needs at least one move"));
        }
        Ok(Self { cycle })
    }

    /// Build from a compact move string such as `"CCD"`.
    pub fn parse(cycle: &str) -> Result<Self, EngineError> {
        Self::new(actions_from_str(cycle)?)
    }

    pub fn cycle(&self) -> &[Action] {
        &self.cycle
    }
}

impl Strategy for Cycler {
    fn name(&self) -> String {
        format!("Cycler {}", actions_to_string(&self.cycle))
    }

    fn description(&self) -> &'static str {
        "Repeats a fixed sequence of moves."
    }

    fn classifier(&self) -> &'static Classifier {
        &CYCLER
    }

    fn decide(&mut self, history: &History) -> Action {
        self.cycle[history.len() % self.cycle.len()]
    }

    fn reset(&mut self) {}
}
