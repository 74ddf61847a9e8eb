//! WebAssembly bindings for the Nim Race game engine.
//!
//! This module exposes the game session to JavaScript through wasm-bindgen.
//! The page owns the timer: after an action whose result reports
//! `isProcessing()`, wait `pendingScriptedDelay()` milliseconds and call
//! `resolveScriptedTurn()`.

use wasm_bindgen::prelude::*;

use crate::actions::{GameAction, GameEvent};
use crate::game::{GameError, GameSession, Side};
use crate::rules::{Difficulty, GameMode, Language, MatchRules};
use serde::de::DeserializeOwned;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Parse a unit variant from its name, e.g. `"VsComputer"`
fn parse_choice<T: DeserializeOwned>(name: &str) -> Result<T, JsValue> {
    serde_json::from_value(serde_json::Value::String(name.to_string()))
        .map_err(|e| JsValue::from_str(&format!("Invalid choice {}: {}", name, e)))
}

fn events_json(result: Result<Vec<GameEvent>, GameError>) -> Result<String, JsValue> {
    match result {
        Ok(events) => Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())),
        Err(e) => Err(JsValue::from_str(&format!("Action failed: {}", e))),
    }
}

/// WASM-exposed session wrapper
#[wasm_bindgen]
pub struct WasmGame {
    session: GameSession,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a session with the default rules and a 2 second computer pause
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WasmGame, JsValue> {
        let session = GameSession::new(MatchRules::default())
            .map_err(|e| JsValue::from_str(&format!("Invalid rules: {}", e)))?;
        Ok(WasmGame { session })
    }

    /// Create a session from a JSON rules object
    #[wasm_bindgen(js_name = withRules)]
    pub fn with_rules(rules_json: &str) -> Result<WasmGame, JsValue> {
        let rules: MatchRules = serde_json::from_str(rules_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid rules JSON: {}", e)))?;
        let session = GameSession::new(rules)
            .map_err(|e| JsValue::from_str(&format!("Invalid rules: {}", e)))?;
        Ok(WasmGame { session })
    }

    /// Get the current snapshot as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        self.session.snapshot_json()
    }

    /// Apply an action from JSON, returns events JSON or error
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: GameAction = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action JSON: {}", e)))?;
        events_json(self.session.apply_action(action))
    }

    /// language: "Arabic" or "English"
    #[wasm_bindgen(js_name = submitLanguageChoice)]
    pub fn submit_language_choice(&mut self, language: &str) -> Result<String, JsValue> {
        let language: Language = parse_choice(language)?;
        events_json(self.session.submit_language_choice(language))
    }

    /// mode: "VsComputer" or "TwoPlayer"
    #[wasm_bindgen(js_name = submitModeChoice)]
    pub fn submit_mode_choice(&mut self, mode: &str) -> Result<String, JsValue> {
        let mode: GameMode = parse_choice(mode)?;
        events_json(self.session.submit_mode_choice(mode))
    }

    /// difficulty: "Easy", "Medium", or "Hard"
    #[wasm_bindgen(js_name = submitDifficultyChoice)]
    pub fn submit_difficulty_choice(&mut self, difficulty: &str) -> Result<String, JsValue> {
        let difficulty: Difficulty = parse_choice(difficulty)?;
        events_json(self.session.submit_difficulty_choice(difficulty))
    }

    #[wasm_bindgen(js_name = acknowledgeInstructions)]
    pub fn acknowledge_instructions(&mut self) -> Result<String, JsValue> {
        events_json(self.session.acknowledge_instructions())
    }

    /// side: "Human" or "Scripted"
    #[wasm_bindgen(js_name = submitFirstTurnChoice)]
    pub fn submit_first_turn_choice(&mut self, side: &str) -> Result<String, JsValue> {
        let side: Side = parse_choice(side)?;
        events_json(self.session.submit_first_turn_choice(side))
    }

    #[wasm_bindgen(js_name = submitMove)]
    pub fn submit_move(&mut self, amount: u32) -> Result<String, JsValue> {
        events_json(self.session.submit_move(amount))
    }

    #[wasm_bindgen(js_name = requestReset)]
    pub fn request_reset(&mut self) -> Result<String, JsValue> {
        events_json(self.session.request_reset())
    }

    #[wasm_bindgen(js_name = isProcessing)]
    pub fn is_processing(&self) -> bool {
        self.session.is_processing()
    }

    /// Milliseconds to wait before `resolveScriptedTurn`, if a reply is due
    #[wasm_bindgen(js_name = pendingScriptedDelay)]
    pub fn pending_scripted_delay(&self) -> Option<u32> {
        self.session
            .pending_ticket()
            .map(|_| u32::try_from(self.session.rules().scripted_delay_ms).unwrap_or(u32::MAX))
    }

    /// Play the computer's scheduled move, returns events JSON
    #[wasm_bindgen(js_name = resolveScriptedTurn)]
    pub fn resolve_scripted_turn(&mut self) -> Result<String, JsValue> {
        match self.session.pending_ticket() {
            Some(ticket) => events_json(self.session.resolve_scripted_turn(ticket)),
            None => Ok("[]".to_string()),
        }
    }

    /// Sound cues for an events JSON array, as a JSON array of names
    #[wasm_bindgen(js_name = soundCues)]
    pub fn sound_cues(events_json: &str) -> String {
        let events: Vec<GameEvent> = serde_json::from_str(events_json).unwrap_or_default();
        let cues: Vec<_> = events.iter().filter_map(GameEvent::sound_cue).collect();
        serde_json::to_string(&cues).unwrap_or_else(|_| "[]".to_string())
    }

    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.session.state.is_finished()
    }

    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> Option<String> {
        self.session
            .state
            .winner()
            .and_then(|side| serde_json::to_value(side).ok())
            .and_then(|v| v.as_str().map(str::to_string))
    }
}
