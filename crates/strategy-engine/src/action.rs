//! The two-valued move domain

use core::fmt;
use serde::{Deserialize, Serialize};
use crate::error::EngineError;

/// A move in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "C")]
    Cooperate,
    #[serde(rename = "D")]
    Defect,
}

pub use Action::{Cooperate as C, Defect as D};

impl Action {
    /// The opposite move.
    pub fn flip(self) -> Self {
        match self {
            Action::Cooperate => Action::Defect,
            Action::Defect => Action::Cooperate,
        }
    }

    pub fn from_char(c: char) -> Result<Self, EngineError> {
        match c {
            'C' => Ok(Action::Cooperate),
            'D' => Ok(Action::Defect),
            other => Err(EngineError::config(format!("invalid action character {:?}", other))),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Action::Cooperate => 'C',
            Action::Defect => 'D',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Parse a compact move string such as `"CCD"`.
pub fn actions_from_str(s: &str) -> Result<Vec<Action>, EngineError> {
    s.chars().map(Action::from_char).collect()
}

/// Render moves back into compact form.
pub fn actions_to_string(actions: &[Action]) -> String {
    actions.iter().map(|a| a.as_char()).collect()
}
