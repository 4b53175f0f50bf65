use crate::ai::search::MinimaxSelector;
use crate::board::{Board, Move, Player, Square, BOARD_SIZE};
use crate::types::{PieceView, Position, RenderState};

pub const PLAYER_HUMAN: u8 = 1;
pub const PLAYER_AI: u8 = 2;

/// Search depth of the built-in opponent. A constant by design; difficulty
/// settings are not exposed.
pub const DEFAULT_SEARCH_DEPTH: u8 = 6;

const STATUS_HUMAN_TURN: &str = "Your turn";
const STATUS_AI_THINKING: &str = "AI thinking...";
const STATUS_HUMAN_WINS: &str = "You win!";
const STATUS_AI_WINS: &str = "AI wins!";

/// Strategy seam for the computer's move choice. Given the candidate set the
/// session allows (the full legal move set, or the jump continuations of a
/// capture chain), returns the move to play.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, player: Player, candidates: &[Move]) -> Option<Move>;
}

/// Plays the first candidate. Deterministic stand-in for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstCandidateSelector;

impl MoveSelector for FirstCandidateSelector {
    fn select_move(&self, _board: &Board, _player: Player, candidates: &[Move]) -> Option<Move> {
        candidates.first().copied()
    }
}

/// Turn-resolution states. `ChainCapture` pins the selection to the square a
/// jumping piece landed on and offers only further jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    AwaitingSelection,
    AwaitingDestination,
    ChainCapture,
    AiTurn,
    GameOver { winner: Player },
}

/// One human-vs-AI game. An explicit value with no ambient singleton, so
/// multiple sessions can coexist and tests drive it directly.
///
/// Illegal input (clicking an empty square while expecting a selection, a
/// frozen piece under the mandatory-jump rule, a square that is not a legal
/// destination) is a silent no-op throughout.
pub struct GameSession {
    board: Board,
    current_player: Player,
    state: TurnState,
    selection: Option<Square>,
    valid_moves: Vec<Move>,
    generation: u32,
    selector: Box<dyn MoveSelector>,
}

impl GameSession {
    pub fn new(selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::Human,
            state: TurnState::AwaitingSelection,
            selection: None,
            valid_moves: Vec::new(),
            generation: 0,
            selector,
        }
    }

    /// Session with the production minimax opponent at the fixed depth.
    pub fn with_minimax() -> Self {
        Self::new(Box::new(MinimaxSelector::new(DEFAULT_SEARCH_DEPTH)))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Session generation, bumped by every reset. A deferred AI step tagged
    /// with an older generation is ignored, so a timer that fires after a
    /// mid-delay reset cannot touch the fresh board.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Reinitializes the session in place: standard starting position,
    /// human to move.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_player = Player::Human;
        self.state = TurnState::AwaitingSelection;
        self.selection = None;
        self.valid_moves.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Drives the state machine with a clicked cell.
    pub fn handle_cell_click(&mut self, row: u8, col: u8) {
        if row >= BOARD_SIZE as u8 || col >= BOARD_SIZE as u8 {
            return;
        }
        let (row, col) = (row as i32, col as i32);

        match self.state {
            TurnState::AwaitingSelection | TurnState::AwaitingDestination => {
                if let Some(piece) = self.board.piece_at(row, col)
                    && piece.owner == Player::Human
                {
                    self.try_select(row, col);
                    return;
                }
                if self.state == TurnState::AwaitingDestination {
                    self.try_move_to(row, col);
                }
            }
            // Selection stays pinned to the landed piece; only its jump
            // continuations are accepted.
            TurnState::ChainCapture => self.try_move_to(row, col),
            TurnState::AiTurn | TurnState::GameOver { .. } => {}
        }
    }

    /// Runs the AI's turn, chain captures included. The move the presentation
    /// layer deferred is only applied when `generation` still matches; any
    /// mistimed call returns `false` without touching the session.
    pub fn advance_ai(&mut self, generation: u32) -> bool {
        if generation != self.generation || self.state != TurnState::AiTurn {
            return false;
        }

        let mut candidates = self.board.legal_moves(Player::Ai);
        let mut moved = false;
        while let Some(mv) = self
            .selector
            .select_move(&self.board, Player::Ai, &candidates)
        {
            // A selector answering outside its candidate set forfeits.
            if !candidates.contains(&mv) {
                break;
            }
            self.board.apply_move(&mv);
            moved = true;
            if mv.is_jump() {
                let continuations = self.board.follow_up_jumps(mv.to);
                if !continuations.is_empty() {
                    candidates = continuations;
                    continue;
                }
            }
            break;
        }

        if !moved {
            // A selector refusing a non-empty candidate set is treated the
            // same as a blocked AI: the game ends.
            self.state = TurnState::GameOver {
                winner: Player::Human,
            };
            return false;
        }

        self.current_player = Player::Human;
        self.state = if self.board.has_any_legal_move(Player::Human) {
            TurnState::AwaitingSelection
        } else {
            TurnState::GameOver { winner: Player::Ai }
        };
        true
    }

    /// Renderable snapshot consumed by the presentation layer after every
    /// state transition.
    pub fn render_state(&self) -> RenderState {
        let mut grid = Vec::with_capacity((BOARD_SIZE * BOARD_SIZE) as usize);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                grid.push(self.board.piece_at(row, col).map(|p| PieceView {
                    owner: player_code(p.owner),
                    king: p.king,
                }));
            }
        }

        RenderState {
            grid,
            highlighted: self.valid_moves.iter().map(|m| position(m.to)).collect(),
            selected: self.selection.map(position),
            status_text: self.status_text().to_string(),
            is_game_over: matches!(self.state, TurnState::GameOver { .. }),
            winner: match self.state {
                TurnState::GameOver { winner } => player_code(winner),
                _ => 0,
            },
            ai_to_move: self.state == TurnState::AiTurn,
            generation: self.generation,
        }
    }

    fn status_text(&self) -> &'static str {
        match self.state {
            TurnState::AiTurn => STATUS_AI_THINKING,
            TurnState::GameOver {
                winner: Player::Human,
            } => STATUS_HUMAN_WINS,
            TurnState::GameOver { winner: Player::Ai } => STATUS_AI_WINS,
            _ => STATUS_HUMAN_TURN,
        }
    }

    fn try_select(&mut self, row: i32, col: i32) {
        let candidates = self.board.legal_moves_from(row, col);
        if candidates.is_empty() {
            return;
        }
        self.selection = Some(Square::new(row, col));
        self.valid_moves = candidates;
        self.state = TurnState::AwaitingDestination;
    }

    fn try_move_to(&mut self, row: i32, col: i32) {
        let target = Square::new(row, col);
        let Some(mv) = self.valid_moves.iter().find(|m| m.to == target).copied() else {
            return;
        };

        self.board.apply_move(&mv);

        if mv.is_jump() {
            let continuations = self.board.follow_up_jumps(mv.to);
            if !continuations.is_empty() {
                self.state = TurnState::ChainCapture;
                self.selection = Some(mv.to);
                self.valid_moves = continuations;
                return;
            }
        }

        self.selection = None;
        self.valid_moves.clear();
        self.current_player = Player::Ai;
        self.state = if self.board.has_any_legal_move(Player::Ai) {
            TurnState::AiTurn
        } else {
            TurnState::GameOver {
                winner: Player::Human,
            }
        };
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, state: TurnState) {
        self.board = board;
        self.state = state;
        self.current_player = match state {
            TurnState::AiTurn => Player::Ai,
            _ => Player::Human,
        };
        self.selection = None;
        self.valid_moves.clear();
    }
}

fn player_code(player: Player) -> u8 {
    match player {
        Player::Human => PLAYER_HUMAN,
        Player::Ai => PLAYER_AI,
    }
}

fn position(sq: Square) -> Position {
    Position {
        row: sq.row as u8,
        col: sq.col as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    struct RefusingSelector;

    impl MoveSelector for RefusingSelector {
        fn select_move(
            &self,
            _board: &Board,
            _player: Player,
            _candidates: &[Move],
        ) -> Option<Move> {
            None
        }
    }

    fn session() -> GameSession {
        GameSession::new(Box::new(FirstCandidateSelector))
    }

    #[test]
    fn initial_session_awaits_a_human_selection() {
        let session = session();
        let state = session.render_state();

        assert_eq!(session.state(), TurnState::AwaitingSelection);
        assert_eq!(session.current_player(), Player::Human);
        assert_eq!(state.status_text, "Your turn");
        assert_eq!(state.grid.len(), 64);
        assert!(state.highlighted.is_empty());
        assert!(state.selected.is_none());
        assert!(!state.is_game_over);
    }

    #[test]
    fn selecting_an_edge_man_highlights_its_single_slide() {
        let mut session = session();
        session.handle_cell_click(5, 0);

        let state = session.render_state();
        assert_eq!(session.state(), TurnState::AwaitingDestination);
        assert_eq!(state.selected, Some(Position { row: 5, col: 0 }));
        assert_eq!(state.highlighted, vec![Position { row: 4, col: 1 }]);
    }

    #[test]
    fn irrelevant_clicks_leave_the_session_unchanged() {
        let mut session = session();

        // Empty square, opponent piece, off-board coordinate.
        session.handle_cell_click(4, 4);
        session.handle_cell_click(2, 1);
        session.handle_cell_click(8, 8);

        assert_eq!(session.state(), TurnState::AwaitingSelection);
        assert!(session.render_state().selected.is_none());

        // A non-destination click while a piece is selected.
        session.handle_cell_click(5, 0);
        session.handle_cell_click(3, 3);
        assert_eq!(session.state(), TurnState::AwaitingDestination);
        assert_eq!(
            session.render_state().selected,
            Some(Position { row: 5, col: 0 })
        );
    }

    #[test]
    fn selecting_another_own_piece_reselects() {
        let mut session = session();
        session.handle_cell_click(5, 0);
        session.handle_cell_click(5, 2);

        let state = session.render_state();
        assert_eq!(state.selected, Some(Position { row: 5, col: 2 }));
        assert_eq!(state.highlighted.len(), 2);
    }

    #[test]
    fn completing_a_move_hands_the_turn_to_the_ai() {
        let mut session = session();
        session.handle_cell_click(5, 0);
        session.handle_cell_click(4, 1);

        let state = session.render_state();
        assert_eq!(session.state(), TurnState::AiTurn);
        assert_eq!(session.current_player(), Player::Ai);
        assert_eq!(state.status_text, "AI thinking...");
        assert!(state.ai_to_move);

        assert!(session.advance_ai(state.generation));
        assert_eq!(session.state(), TurnState::AwaitingSelection);
        assert_eq!(session.current_player(), Player::Human);
    }

    #[test]
    fn mandatory_jump_freezes_quiet_pieces() {
        let mut board = Board::empty();
        board.set_piece(4, 3, Some(Piece::man(Player::Human)));
        board.set_piece(3, 2, Some(Piece::man(Player::Ai)));
        board.set_piece(6, 1, Some(Piece::man(Player::Human)));

        let mut session = session();
        session.set_board_for_test(board, TurnState::AwaitingSelection);

        session.handle_cell_click(6, 1);
        assert_eq!(session.state(), TurnState::AwaitingSelection);

        session.handle_cell_click(4, 3);
        let state = session.render_state();
        assert_eq!(session.state(), TurnState::AwaitingDestination);
        assert_eq!(state.highlighted, vec![Position { row: 2, col: 1 }]);
    }

    #[test]
    fn human_chain_capture_pins_the_selection() {
        let mut board = Board::empty();
        board.set_piece(5, 2, Some(Piece::man(Player::Human)));
        board.set_piece(4, 3, Some(Piece::man(Player::Ai)));
        board.set_piece(2, 5, Some(Piece::man(Player::Ai)));
        board.set_piece(0, 1, Some(Piece::man(Player::Ai)));

        let mut session = session();
        session.set_board_for_test(board, TurnState::AwaitingSelection);

        session.handle_cell_click(5, 2);
        session.handle_cell_click(3, 4);

        let state = session.render_state();
        assert_eq!(session.state(), TurnState::ChainCapture);
        assert_eq!(state.selected, Some(Position { row: 3, col: 4 }));
        assert_eq!(state.highlighted, vec![Position { row: 1, col: 6 }]);

        // Clicking anything but the continuation is a no-op.
        session.handle_cell_click(5, 2);
        assert_eq!(session.state(), TurnState::ChainCapture);

        session.handle_cell_click(1, 6);
        assert_eq!(session.state(), TurnState::AiTurn);
        assert!(session.board().piece_at(4, 3).is_none());
        assert!(session.board().piece_at(2, 5).is_none());
        assert!(session.board().piece_at(1, 6).is_some());
    }

    #[test]
    fn ai_plays_out_its_own_capture_chain() {
        let mut board = Board::empty();
        board.set_piece(2, 1, Some(Piece::man(Player::Ai)));
        board.set_piece(3, 2, Some(Piece::man(Player::Human)));
        board.set_piece(5, 4, Some(Piece::man(Player::Human)));
        board.set_piece(7, 0, Some(Piece::man(Player::Human)));

        let mut session = session();
        session.set_board_for_test(board, TurnState::AiTurn);

        assert!(session.advance_ai(session.generation()));

        assert!(session.board().piece_at(3, 2).is_none());
        assert!(session.board().piece_at(5, 4).is_none());
        assert_eq!(
            session.board().piece_at(6, 5),
            Some(Piece::man(Player::Ai))
        );
        assert_eq!(session.state(), TurnState::AwaitingSelection);
    }

    #[test]
    fn reset_restores_the_starting_position_and_bumps_generation() {
        let mut session = session();
        session.handle_cell_click(5, 0);
        session.handle_cell_click(4, 1);
        let stale = session.generation();

        session.reset();

        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.state(), TurnState::AwaitingSelection);
        assert_eq!(session.current_player(), Player::Human);
        assert_eq!(session.generation(), stale.wrapping_add(1));

        // The deferred AI step from before the reset must not apply.
        assert!(!session.advance_ai(stale));
        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.state(), TurnState::AwaitingSelection);
    }

    #[test]
    fn advance_ai_is_a_no_op_outside_the_ai_turn() {
        let mut session = session();

        assert!(!session.advance_ai(session.generation()));
        assert_eq!(session.state(), TurnState::AwaitingSelection);
        assert_eq!(session.board(), &Board::new());
    }

    #[test]
    fn blocking_the_ai_ends_the_game_for_the_human() {
        let mut board = Board::empty();
        board.set_piece(5, 0, Some(Piece::man(Player::Ai)));
        board.set_piece(6, 1, Some(Piece::man(Player::Human)));
        board.set_piece(7, 2, Some(Piece::man(Player::Human)));
        board.set_piece(1, 2, Some(Piece::man(Player::Human)));

        let mut session = session();
        session.set_board_for_test(board, TurnState::AwaitingSelection);

        session.handle_cell_click(1, 2);
        session.handle_cell_click(0, 1);

        let state = session.render_state();
        assert_eq!(
            session.state(),
            TurnState::GameOver {
                winner: Player::Human
            }
        );
        assert_eq!(state.status_text, "You win!");
        assert!(state.is_game_over);
        assert_eq!(state.winner, PLAYER_HUMAN);

        // Terminal state ignores further clicks.
        session.handle_cell_click(0, 1);
        assert!(matches!(session.state(), TurnState::GameOver { .. }));
    }

    #[test]
    fn blocking_the_human_ends_the_game_for_the_ai() {
        let mut board = Board::empty();
        board.set_piece(7, 0, Some(Piece::man(Player::Human)));
        board.set_piece(6, 1, Some(Piece::man(Player::Ai)));
        board.set_piece(5, 2, Some(Piece::man(Player::Ai)));
        board.set_piece(1, 0, Some(Piece::man(Player::Ai)));

        let mut session = session();
        session.set_board_for_test(board, TurnState::AiTurn);

        assert!(session.advance_ai(session.generation()));

        let state = session.render_state();
        assert_eq!(
            session.state(),
            TurnState::GameOver {
                winner: Player::Ai
            }
        );
        assert_eq!(state.status_text, "AI wins!");
        assert_eq!(state.winner, PLAYER_AI);
    }

    #[test]
    fn refusing_selector_surfaces_a_terminal_state() {
        let mut session = GameSession::new(Box::new(RefusingSelector));
        session.handle_cell_click(5, 0);
        session.handle_cell_click(4, 1);

        assert!(!session.advance_ai(session.generation()));
        assert_eq!(
            session.state(),
            TurnState::GameOver {
                winner: Player::Human
            }
        );
    }
}
