//! Strategy contract and the per-match lifecycle wrapper

use core::fmt;
use log::{trace, warn};
use crate::action::Action;
use crate::classifier::Classifier;
use crate::error::{EngineError, Violation};
use crate::history::History;

/// A decision-maker for the iterated game.
///
/// `decide` sees the history up to (not including) the round about to be
/// played and may update the strategy's own fields. It must not depend on
/// anything but the history, those fields and draws from an owned RNG.
pub trait Strategy: fmt::Debug + Send {
    fn name(&self) -> String;

    fn description(&self) -> &'static str;

    fn classifier(&self) -> &'static Classifier;

    fn decide(&mut self, history: &History) -> Action;

    /// Restore every field to its construction-time value.
    fn reset(&mut self);

    /// Replace the seed of a stochastic strategy. No-op otherwise.
    fn reseed(&mut self, _seed: u64) {}
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn description(&self) -> &'static str {
        (**self).description()
    }

    fn classifier(&self) -> &'static Classifier {
        (**self).classifier()
    }

    fn decide(&mut self, history: &History) -> Action {
        (**self).decide(history)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn reseed(&mut self, seed: u64) {
        (**self).reseed(seed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Just constructed or just reset.
    Pristine,
    /// At least one decision since the last reset.
    Active,
}

/// A strategy plus the bookkeeping that keeps it in step with the match.
#[derive(Debug)]
pub struct Player<S = Box<dyn Strategy>> {
    strategy: S,
    decisions: usize,
}

/// Player whose strategy is chosen at runtime.
pub type DynPlayer = Player<Box<dyn Strategy>>;

impl<S: Strategy> Player<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy, decisions: 0 }
    }

    /// Choose this round's move.
    ///
    /// `history` must hold exactly one round per decision made since the
    /// last reset.
    pub fn decide(&mut self, history: &History) -> Result<Action, EngineError> {
        let rounds = history.len();
        if rounds != self.decisions {
            let violation = if rounds < self.decisions {
                Violation::NotReset { decided: self.decisions, rounds }
            } else {
                Violation::OutOfStep { decided: self.decisions, rounds }
            };
            warn!("{}: {}", self.strategy.name(), violation);
            return Err(violation.into());
        }
        let action = self.strategy.decide(history);
        self.decisions += 1;
        trace!("{} round {} -> {}", self.strategy.name(), rounds + 1, action);
        Ok(action)
    }

    pub fn reset(&mut self) {
        self.strategy.reset();
        self.decisions = 0;
    }

    pub fn reseed(&mut self, seed: u64) {
        self.strategy.reseed(seed);
    }

    pub fn lifecycle(&self) -> Lifecycle {
        if self.decisions == 0 {
            Lifecycle::Pristine
        } else {
            Lifecycle::Active
        }
    }

    pub fn name(&self) -> String {
        self.strategy.name()
    }

    pub fn classifier(&self) -> &'static Classifier {
        self.strategy.classifier()
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn into_inner(self) -> S {
        self.strategy
    }
}

impl<S: Strategy> From<S> for Player<S> {
    fn from(strategy: S) -> Self {
        Player::new(strategy)
    }
}

impl DynPlayer {
    pub fn boxed<S: Strategy + 'static>(strategy: S) -> Self {
        Player::new(Box::new(strategy))
    }
}
