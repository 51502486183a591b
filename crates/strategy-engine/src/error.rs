//! Engine error types

/// Broken precondition on the history or the strategy lifecycle.
///
/// These always indicate a driver bug and are fatal to the current match.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// Own and opponent move sequences have different lengths.
    #[error("history lengths diverge: {own} own moves, {opponent} opponent moves")]
    LengthMismatch { own: usize, opponent: usize },
    /// A strategy that already played was handed a fresh (shorter) history
    /// without being reset in between.
    #[error("strategy was not reset: {decided} decisions made but history holds {rounds} rounds")]
    NotReset { decided: usize, rounds: usize },
    /// History grew by more than one round between two decisions.
    #[error("history out of step: {rounds} rounds recorded after {decided} decisions")]
    OutOfStep { decided: usize, rounds: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("invariant violation: {0}")]
    InvariantViolation(#[from] Violation),
    /// Raised at construction, before any decision is made.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl EngineError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        EngineError::Configuration(msg.into())
    }
}
