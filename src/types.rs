use serde::Serialize;

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

/// One occupied cell as the presentation layer sees it. `owner` uses the
/// `PLAYER_HUMAN` / `PLAYER_AI` codes from the game module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceView {
    pub owner: u8,
    pub king: bool,
}

/// Renderable snapshot returned after every state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderState {
    /// Row-major 8x8 grid, 64 entries.
    pub grid: Vec<Option<PieceView>>,
    /// Legal destinations of the current selection, for highlighting.
    pub highlighted: Vec<Position>,
    pub selected: Option<Position>,
    pub status_text: String,
    pub is_game_over: bool,
    /// Player code of the winner; 0 while the game is running.
    pub winner: u8,
    /// Contract:
    /// - `true` when the engine waits for the deferred AI step; the
    ///   presentation layer schedules `ai_move(generation)` after its
    ///   redraw delay.
    /// - `false` otherwise.
    pub ai_to_move: bool,
    /// Session generation the snapshot belongs to; stale deferred AI steps
    /// are rejected by the engine.
    pub generation: u32,
}
