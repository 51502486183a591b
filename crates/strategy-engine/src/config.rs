//! Strategy selection and parameters

use serde::{Deserialize, Serialize};
use crate::basic::{Alternator, Cooperator, Cycler, Defector};
use crate::error::EngineError;
use crate::grudger::{FoolMeForever, FoolMeOnce, ForgetfulFoolMeOnce, OnceBitten, DEFAULT_FORGET_PROBABILITY};
use crate::random::Seed;
use crate::strategy::DynPlayer;

/// Every strategy variant the engine can build
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Defect for a spell after two consecutive defections.
    OnceBitten,
    /// Forgive one defection, grudge forever on the second.
    FoolMeOnce,
    /// FoolMeOnce that randomly forgets its defection count.
    ForgetfulFoolMeOnce,
    /// Defect until betrayed, then cooperate forever.
    FoolMeForever,
    Cooperator,
    Defector,
    Alternator,
    /// Scripted sequence, repeated.
    Cycler,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 8] = [
        StrategyKind::OnceBitten,
        StrategyKind::FoolMeOnce,
        StrategyKind::ForgetfulFoolMeOnce,
        StrategyKind::FoolMeForever,
        StrategyKind::Cooperator,
        StrategyKind::Defector,
        StrategyKind::Alternator,
        StrategyKind::Cycler,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            StrategyKind::OnceBitten => "Once Bitten",
            StrategyKind::FoolMeOnce => "Fool Me Once",
            StrategyKind::ForgetfulFoolMeOnce => "Forgetful Fool Me Once",
            StrategyKind::FoolMeForever => "Fool Me Forever",
            StrategyKind::Cooperator => "Cooperator",
            StrategyKind::Defector => "Defector",
            StrategyKind::Alternator => "Alternator",
            StrategyKind::Cycler => "Cycler",
        }
    }

    pub fn is_stochastic(self) -> bool {
        matches!(self, StrategyKind::ForgetfulFoolMeOnce)
    }
}

/// Strategy parameters; each kind reads only the fields it needs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    /// Per-round chance of wiping the defection count (ForgetfulFoolMeOnce)
    pub forget_probability: f64,
    /// Seed for stochastic kinds; process-random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<Seed>,
    /// Move script such as `"CCD"` (Cycler)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle: Option<String>,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            forget_probability: DEFAULT_FORGET_PROBABILITY,
            seed: None,
            cycle: None,
        }
    }
}

/// Complete strategy selection with parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub kind: StrategyKind,
    #[serde(default)]
    pub params: StrategyParams,
}

impl StrategyConfig {
    /// Create a config with default parameters
    pub fn new(kind: StrategyKind) -> Self {
        Self {
            kind,
            params: StrategyParams::default(),
        }
    }

    /// Create with custom parameters
    pub fn with_params(kind: StrategyKind, params: StrategyParams) -> Self {
        Self { kind, params }
    }

    /// A config every kind builds from without caller input: a one-move
    /// Cycler script and a fixed seed, so nothing touches the entropy
    /// source. For listings that never play.
    pub fn placeholder(kind: StrategyKind) -> Self {
        let params = StrategyParams {
            seed: Some(Seed(0)),
            cycle: Some("C".to_string()),
            ..Default::default()
        };
        Self::with_params(kind, params)
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::config(format!("invalid strategy config: {}", e)))
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string(self).map_err(|e| EngineError::config(format!("cannot encode strategy config: {}", e)))
    }

    /// Construct a fresh player. All parameter checks happen here, before
    /// any decision is made.
    pub fn build(&self) -> Result<DynPlayer, EngineError> {
        let player = match self.kind {
            StrategyKind::OnceBitten => DynPlayer::boxed(OnceBitten::new()),
            StrategyKind::FoolMeOnce => DynPlayer::boxed(FoolMeOnce),
            StrategyKind::ForgetfulFoolMeOnce => DynPlayer::boxed(ForgetfulFoolMeOnce::new(
                self.params.forget_probability,
                self.params.seed,
            )?),
            StrategyKind::FoolMeForever => DynPlayer::boxed(FoolMeForever),
            StrategyKind::Cooperator => DynPlayer::boxed(Cooperator),
            StrategyKind::Defector => DynPlayer::boxed(Defector),
            StrategyKind::Alternator => DynPlayer::boxed(Alternator),
            StrategyKind::Cycler => {
                let cycle = self
                    .params
                    .cycle
                    .as_deref()
                    .ok_or_else(|| EngineError::config("cycler requires a `cycle` parameter"))?;
                DynPlayer::boxed(Cycler::parse(cycle)?)
            }
        };
        Ok(player)
    }
}
