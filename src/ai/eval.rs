use crate::board::{Board, Player, BOARD_SIZE};

const MAN_VALUE: f32 = 1.0;
const KING_VALUE: f32 = 3.0;
const ADVANCE_BONUS: f32 = 0.1;

/// Static positional score of `board`. Positive favors the human, negative
/// favors the AI; the starting position scores 0.
///
/// Material counts a man as 1 and a king as 3, signed by owner. The
/// positional term rewards advancing toward the opponent's back rank: an AI
/// piece contributes `+0.1 * (7 - row)` (shrinking toward 0 as it advances)
/// and a human piece `-0.1 * row` (rising toward 0 as it advances).
pub fn evaluate(board: &Board) -> f32 {
    let mut score = 0.0;
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let Some(piece) = board.piece_at(row, col) else {
                continue;
            };
            let material = if piece.king { KING_VALUE } else { MAN_VALUE };
            score += piece.owner.sign() * material;
            score += match piece.owner {
                Player::Ai => ADVANCE_BONUS * (BOARD_SIZE - 1 - row) as f32,
                Player::Human => -ADVANCE_BONUS * row as f32,
            };
        }
    }
    score
}
