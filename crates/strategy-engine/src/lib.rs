//! Strategy Engine for the Iterated Prisoner's Dilemma
//!
//! Decision-makers that pick Cooperate or Defect each round from the match
//! history, the classifier metadata they declare, and the seeded randomness
//! that keeps stochastic play reproducible.
//! This crate is compiled to:
//! - Native (for match drivers and tournament tooling)
//! - WASM (for frontend match replay)

mod action;
mod basic;
mod classifier;
mod config;
mod error;
mod game;
mod grudger;
mod history;
mod random;
mod strategy;

#[cfg(feature = "wasm")]
mod wasm;

pub use action::{actions_from_str, actions_to_string, Action, C, D};
pub use basic::{Alternator, Cooperator, Cycler, Defector};
pub use classifier::{Classifier, Feature, MemoryDepth};
pub use config::{StrategyConfig, StrategyKind, StrategyParams};
pub use error::{EngineError, Violation};
pub use game::{run_match, MatchResult, RoundResult};
pub use grudger::{
    FoolMeForever, FoolMeOnce, ForgetfulFoolMeOnce, OnceBitten, DEFAULT_FORGET_PROBABILITY,
    GRUDGE_ROUNDS,
};
pub use history::History;
pub use random::{Seed, SeededRng};
pub use strategy::{DynPlayer, Lifecycle, Player, Strategy};
