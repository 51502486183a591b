//! Match replay driver
//!
//! Drives two players through a fixed number of simultaneous rounds. Each
//! side keeps its own view of the history, appended after both have chosen.

use log::debug;
use serde::{Deserialize, Serialize};
use crate::action::Action;
use crate::error::EngineError;
use crate::history::History;
use crate::random::SeededRng;
use crate::strategy::{Player, Strategy};

/// Result of a single round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: usize,
    pub move_a: Action,
    pub move_b: Action,
}

/// Result of a complete match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub rounds: Vec<RoundResult>,
    pub round_count: usize,
}

impl MatchResult {
    /// `(a, b)` move pairs in round order.
    pub fn pairs(&self) -> Vec<(Action, Action)> {
        self.rounds.iter().map(|r| (r.move_a, r.move_b)).collect()
    }

    /// The match from player A's side.
    pub fn history_a(&self) -> History {
        let mut history = History::with_capacity(self.round_count);
        for r in &self.rounds {
            history.append(r.move_a, r.move_b);
        }
        history
    }
}

/// Run a complete match between two players
///
/// Both players are reset first. With a `seed`, every stochastic player is
/// reseeded from a generator built on it, A before B, so the whole match
/// replays from that one value. Deterministic players draw nothing.
pub fn run_match<A: Strategy, B: Strategy>(
    player_a: &mut Player<A>,
    player_b: &mut Player<B>,
    turns: usize,
    seed: Option<u64>,
) -> Result<MatchResult, EngineError> {
    if let Some(seed) = seed {
        let mut rng = SeededRng::from_seed(seed);
        if player_a.classifier().stochastic {
            player_a.reseed(rng.next_u64());
        }
        if player_b.classifier().stochastic {
            player_b.reseed(rng.next_u64());
        }
    }
    player_a.reset();
    player_b.reset();
    debug!("{} vs {}: {} turns", player_a.name(), player_b.name(), turns);

    let mut history_a = History::with_capacity(turns);
    let mut history_b = History::with_capacity(turns);
    let mut rounds = Vec::with_capacity(turns);

    for round in 0..turns {
        let move_a = player_a.decide(&history_a)?;
        let move_b = player_b.decide(&history_b)?;

        rounds.push(RoundResult { round, move_a, move_b });

        history_a.append(move_a, move_b);
        history_b.append(move_b, move_a);
    }

    Ok(MatchResult {
        rounds,
        round_count: turns,
    })
}
