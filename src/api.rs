//! wasm-bindgen surface over one process-global game session.
//!
//! The JS side forwards clicked cells and reset requests, renders the
//! returned snapshot, and schedules `ai_move(generation)` after a short
//! delay whenever a snapshot reports `ai_to_move`. The generation tag makes
//! a timer that outlives a reset harmless.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use wasm_bindgen::prelude::*;

use crate::game::GameSession;
use crate::types::RenderState;

static SESSION: Lazy<Mutex<GameSession>> = Lazy::new(|| Mutex::new(GameSession::with_minimax()));

fn with_session<T>(f: impl FnOnce(&mut GameSession) -> T) -> Result<T, JsValue> {
    let mut session = SESSION
        .lock()
        .map_err(|_| JsValue::from_str("game session lock poisoned"))?;
    Ok(f(&mut session))
}

fn to_js(state: RenderState) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&state).map_err(JsValue::from)
}

/// Forwards a clicked cell into the turn-resolution state machine and
/// returns the updated snapshot. Illegal clicks change nothing.
#[wasm_bindgen]
pub fn cell_activated(row: u8, col: u8) -> Result<JsValue, JsValue> {
    to_js(with_session(|session| {
        session.handle_cell_click(row, col);
        session.render_state()
    })?)
}

/// Starts a new game: standard position, human to move.
#[wasm_bindgen]
pub fn reset_requested() -> Result<JsValue, JsValue> {
    to_js(with_session(|session| {
        session.reset();
        session.render_state()
    })?)
}

/// Deferred AI step. A call carrying a stale generation, or arriving when it
/// is not the AI's turn, is a no-op that just returns the current snapshot.
#[wasm_bindgen]
pub fn ai_move(generation: u32) -> Result<JsValue, JsValue> {
    to_js(with_session(|session| {
        session.advance_ai(generation);
        session.render_state()
    })?)
}

/// Current snapshot without any state change.
#[wasm_bindgen]
pub fn render_state() -> Result<JsValue, JsValue> {
    to_js(with_session(|session| session.render_state())?)
}
