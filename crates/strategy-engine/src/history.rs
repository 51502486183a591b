//! Per-match record of both players' moves

use serde::{Deserialize, Serialize};
use crate::action::Action;
use crate::error::{EngineError, Violation};

/// Append-only record of a match as seen by one player.
///
/// Own and opponent moves are kept side by side; both sequences always have
/// the same length, equal to the number of rounds played.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHistory")]
pub struct History {
    own: Vec<Action>,
    opponent: Vec<Action>,
}

#[derive(Deserialize)]
struct RawHistory {
    own: Vec<Action>,
    opponent: Vec<Action>,
}

impl TryFrom<RawHistory> for History {
    type Error = EngineError;

    fn try_from(raw: RawHistory) -> Result<Self, Self::Error> {
        History::from_parts(raw.own, raw.opponent)
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(rounds: usize) -> Self {
        Self {
            own: Vec::with_capacity(rounds),
            opponent: Vec::with_capacity(rounds),
        }
    }

    /// Build a history from externally supplied move sequences.
    pub fn from_parts(own: Vec<Action>, opponent: Vec<Action>) -> Result<Self, EngineError> {
        if own.len() != opponent.len() {
            return Err(Violation::LengthMismatch {
                own: own.len(),
                opponent: opponent.len(),
            }
            .into());
        }
        Ok(Self { own, opponent })
    }

    /// Record one round.
    pub fn append(&mut self, own: Action, opponent: Action) {
        self.own.push(own);
        self.opponent.push(opponent);
    }

    /// Drop every round; capacity is kept for the next match.
    pub fn clear(&mut self) {
        self.own.clear();
        self.opponent.clear();
    }

    pub fn len(&self) -> usize {
        self.own.len()
    }

    pub fn is_empty(&self) -> bool {
        self.own.is_empty()
    }

    /// Own moves, most recent last.
    pub fn own_actions(&self) -> &[Action] {
        &self.own
    }

    /// Opponent moves, most recent last.
    pub fn opponent_actions(&self) -> &[Action] {
        &self.opponent
    }

    pub fn rounds(&self) -> impl Iterator<Item = (Action, Action)> + '_ {
        self.own.iter().copied().zip(self.opponent.iter().copied())
    }

    pub fn last(&self) -> Option<(Action, Action)> {
        Some((*self.own.last()?, *self.opponent.last()?))
    }

    pub fn defections(&self) -> usize {
        count(&self.own, Action::Defect)
    }

    pub fn cooperations(&self) -> usize {
        count(&self.own, Action::Cooperate)
    }

    pub fn opponent_defections(&self) -> usize {
        count(&self.opponent, Action::Defect)
    }

    pub fn opponent_cooperations(&self) -> usize {
        count(&self.opponent, Action::Cooperate)
    }
}

fn count(moves: &[Action], action: Action) -> usize {
    moves.iter().filter(|m| **m == action).count()
}
