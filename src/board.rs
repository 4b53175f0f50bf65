pub const BOARD_SIZE: i32 = 8;

/// The two sides of a game. Negating the evaluation sign flips ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    Human,
    Ai,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Human => Self::Ai,
            Self::Ai => Self::Human,
        }
    }

    /// Row direction a non-king advances in. The human starts on rows 5-7
    /// and plays toward row 0; the AI starts on rows 0-2 and plays toward
    /// row 7.
    pub fn forward(self) -> i32 {
        match self {
            Self::Human => -1,
            Self::Ai => 1,
        }
    }

    /// Far rank where this player's men promote to kings.
    pub fn crowning_row(self) -> i32 {
        match self {
            Self::Human => 0,
            Self::Ai => 7,
        }
    }

    /// Evaluation sign: positive totals favor the human.
    pub fn sign(self) -> f32 {
        match self {
            Self::Human => 1.0,
            Self::Ai => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub owner: Player,
    pub king: bool,
}

impl Piece {
    pub fn man(owner: Player) -> Self {
        Self { owner, king: false }
    }

    pub fn crowned(owner: Player) -> Self {
        Self { owner, king: true }
    }

    /// Row directions this piece may move and jump in: both for kings,
    /// only the owner's forward direction for men.
    fn row_directions(&self) -> &'static [i32] {
        if self.king {
            &[-1, 1]
        } else if self.owner.forward() < 0 {
            &[-1]
        } else {
            &[1]
        }
    }
}

/// A board coordinate. Signed so that neighbor arithmetic can run off the
/// edge and be rejected by `Board::is_on_board`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    pub row: i32,
    pub col: i32,
}

impl Square {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// One ply. A jump carries the square of the captured piece, always the
/// diagonal midpoint between `from` and `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub capture: Option<Square>,
}

impl Move {
    pub fn is_jump(&self) -> bool {
        self.capture.is_some()
    }
}

/// 8x8 checkers board. `Copy`, so speculative search positions are full
/// independent copies and can never alias the live session board.
///
/// Pieces occupy only dark squares (`(row + col)` odd); the invariant is
/// guaranteed by construction and move generation, never checked at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    /// Creates the standard starting position: 12 men per side, AI on rows
    /// 0-2, human on rows 5-7, dark squares only.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if (row + col) % 2 != 1 {
                    continue;
                }
                if row < 3 {
                    board.set_piece(row, col, Some(Piece::man(Player::Ai)));
                } else if row > 4 {
                    board.set_piece(row, col, Some(Piece::man(Player::Human)));
                }
            }
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            squares: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    pub fn is_on_board(row: i32, col: i32) -> bool {
        (0..BOARD_SIZE).contains(&row) && (0..BOARD_SIZE).contains(&col)
    }

    /// Returns the piece at `(row, col)`; `None` when empty or off-board.
    pub fn piece_at(&self, row: i32, col: i32) -> Option<Piece> {
        if !Self::is_on_board(row, col) {
            return None;
        }
        self.squares[row as usize][col as usize]
    }

    pub fn set_piece(&mut self, row: i32, col: i32, piece: Option<Piece>) {
        if Self::is_on_board(row, col) {
            self.squares[row as usize][col as usize] = piece;
        }
    }

    /// Moves available to the piece at `(row, col)`; empty square yields an
    /// empty vec. Jumps strictly dominate slides for the piece: when any
    /// jump exists, only jumps are returned. Kings slide along a diagonal
    /// until blocked; men slide a single step forward.
    pub fn moves_from(&self, row: i32, col: i32) -> Vec<Move> {
        let Some(piece) = self.piece_at(row, col) else {
            return Vec::new();
        };

        let jumps = self.jumps_from(row, col);
        if !jumps.is_empty() {
            return jumps;
        }

        let mut moves = Vec::new();
        for &dr in piece.row_directions() {
            for dc in [-1, 1] {
                let mut r = row + dr;
                let mut c = col + dc;
                while Self::is_on_board(r, c) && self.piece_at(r, c).is_none() {
                    moves.push(Move {
                        from: Square::new(row, col),
                        to: Square::new(r, c),
                        capture: None,
                    });
                    if !piece.king {
                        break;
                    }
                    r += dr;
                    c += dc;
                }
            }
        }
        moves
    }

    /// Jumps available to the piece at `(row, col)`. A jump displaces by two
    /// squares along a diagonal, over an adjacent opposing piece, onto an
    /// empty landing square. Kings gain the backward directions but not
    /// long-range capture.
    pub fn jumps_from(&self, row: i32, col: i32) -> Vec<Move> {
        let Some(piece) = self.piece_at(row, col) else {
            return Vec::new();
        };

        let mut jumps = Vec::new();
        for &dr in piece.row_directions() {
            for dc in [-1, 1] {
                let mid = Square::new(row + dr, col + dc);
                let landing = Square::new(row + 2 * dr, col + 2 * dc);
                if !Self::is_on_board(landing.row, landing.col) {
                    continue;
                }
                if self.piece_at(landing.row, landing.col).is_some() {
                    continue;
                }
                let jumped = self.piece_at(mid.row, mid.col);
                if jumped.is_some_and(|p| p.owner != piece.owner) {
                    jumps.push(Move {
                        from: Square::new(row, col),
                        to: landing,
                        capture: Some(mid),
                    });
                }
            }
        }
        jumps
    }

    /// Chain-capture continuations for the piece that just landed on
    /// `landing`. Shared by the human and AI turn paths so multi-jump
    /// behavior cannot diverge between them.
    pub fn follow_up_jumps(&self, landing: Square) -> Vec<Move> {
        self.jumps_from(landing.row, landing.col)
    }

    /// Every jump available to any of `player`'s pieces. A non-empty result
    /// makes all non-jump moves illegal for that player this turn.
    pub fn mandatory_jumps(&self, player: Player) -> Vec<Move> {
        let mut jumps = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if let Some(piece) = self.piece_at(row, col)
                    && piece.owner == player
                {
                    jumps.extend(self.jumps_from(row, col));
                }
            }
        }
        jumps
    }

    /// Full legal move set for `player` under the mandatory-jump rule:
    /// exactly the jump set when one exists, otherwise all slides.
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        let jumps = self.mandatory_jumps(player);
        if !jumps.is_empty() {
            return jumps;
        }

        let mut moves = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if let Some(piece) = self.piece_at(row, col)
                    && piece.owner == player
                {
                    moves.extend(self.moves_from(row, col));
                }
            }
        }
        moves
    }

    /// Legal moves of the piece at `(row, col)` under the global
    /// mandatory-jump rule. Empty when a jump exists elsewhere but this
    /// piece has none, which makes the piece unselectable.
    pub fn legal_moves_from(&self, row: i32, col: i32) -> Vec<Move> {
        let Some(piece) = self.piece_at(row, col) else {
            return Vec::new();
        };

        let moves = self.moves_from(row, col);
        if self.mandatory_jumps(piece.owner).is_empty() {
            moves
        } else {
            moves.into_iter().filter(|m| m.is_jump()).collect()
        }
    }

    /// Terminal check: whether `player` can move at all.
    pub fn has_any_legal_move(&self, player: Player) -> bool {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if let Some(piece) = self.piece_at(row, col)
                    && piece.owner == player
                    && !self.moves_from(row, col).is_empty()
                {
                    return true;
                }
            }
        }
        false
    }

    /// Applies a generated move: relocates the piece, removes the captured
    /// piece of a jump, and promotes on reaching the mover's crowning row.
    /// Returns the captured piece, if any. Callers only pass moves produced
    /// by this board's own generators.
    pub fn apply_move(&mut self, mv: &Move) -> Option<Piece> {
        debug_assert!(self.piece_at(mv.from.row, mv.from.col).is_some());
        debug_assert!(self.piece_at(mv.to.row, mv.to.col).is_none());

        let Some(mut piece) = self.piece_at(mv.from.row, mv.from.col) else {
            return None;
        };
        self.set_piece(mv.from.row, mv.from.col, None);

        let captured = match mv.capture {
            Some(sq) => {
                let jumped = self.piece_at(sq.row, sq.col);
                self.set_piece(sq.row, sq.col, None);
                jumped
            }
            None => None,
        };

        // Promotion is irreversible; a king landing here stays a king.
        if mv.to.row == piece.owner.crowning_row() {
            piece.king = true;
        }
        self.set_piece(mv.to.row, mv.to.col, Some(piece));

        captured
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
