//! WASM bindings for frontend match replay

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{run_match, Strategy, StrategyConfig, StrategyKind};

fn parse_config(json: &str) -> Result<StrategyConfig, JsError> {
    StrategyConfig::from_json(json).map_err(|e| JsError::new(&e.to_string()))
}

/// Replay a match with full round-by-round details
///
/// # Arguments
/// * `strategy_a_json` - JSON serialized StrategyConfig for player A
/// * `strategy_b_json` - JSON serialized StrategyConfig for player B
/// * `turns` - Number of rounds to play
/// * `seed` - Optional match seed; reseeds both players when present
///
/// # Returns
/// JSON serialized MatchResult
#[wasm_bindgen]
pub fn replay_match(
    strategy_a_json: &str,
    strategy_b_json: &str,
    turns: u32,
    seed: Option<u64>,
) -> Result<JsValue, JsError> {
    let mut player_a = parse_config(strategy_a_json)?
        .build()
        .map_err(|e| JsError::new(&format!("Invalid strategy A: {}", e)))?;
    let mut player_b = parse_config(strategy_b_json)?
        .build()
        .map_err(|e| JsError::new(&format!("Invalid strategy B: {}", e)))?;

    let result = run_match(&mut player_a, &mut player_b, turns as usize, seed)
        .map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

#[derive(serde::Serialize)]
struct StrategyInfo {
    id: StrategyKind,
    name: &'static str,
    description: &'static str,
    stochastic: bool,
}

/// Get all available strategy kinds
#[wasm_bindgen]
pub fn get_strategy_types() -> Result<JsValue, JsError> {
    let mut types = Vec::with_capacity(StrategyKind::ALL.len());
    for kind in StrategyKind::ALL {
        let player = StrategyConfig::placeholder(kind)
            .build()
            .map_err(|e| JsError::new(&e.to_string()))?;
        types.push(StrategyInfo {
            id: kind,
            name: kind.display_name(),
            description: player.strategy().description(),
            stochastic: player.classifier().stochastic,
        });
    }

    serde_wasm_bindgen::to_value(&types)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Get the classifier of a configured strategy
#[wasm_bindgen]
pub fn get_classifier(strategy_json: &str) -> Result<JsValue, JsError> {
    let player = parse_config(strategy_json)?
        .build()
        .map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(player.classifier())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Create a strategy config JSON from a kind name
#[wasm_bindgen]
pub fn create_strategy(kind: &str) -> Result<String, JsError> {
    let kind = StrategyKind::ALL
        .into_iter()
        .find(|k| format!("{:?}", k) == kind)
        .ok_or_else(|| JsError::new(&format!("Unknown strategy: {}", kind)))?;

    StrategyConfig::new(kind)
        .to_json()
        .map_err(|e| JsError::new(&e.to_string()))
}
