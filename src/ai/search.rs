use web_time::{Duration, Instant};

use crate::ai::eval::evaluate;
use crate::board::{Board, Move, Player};
use crate::game::MoveSelector;

const MIN_SCORE: f32 = f32::NEG_INFINITY;
const MAX_SCORE: f32 = f32::INFINITY;

/// Bounded-depth minimax with alpha-beta pruning.
///
/// The evaluation is human-positive, so `maximizing == true` means the human
/// side is to move. Either side picks its move by maximizing the value seen
/// from its own perspective (`value * player.sign()`); ties go to the first
/// candidate.
pub struct Searcher {
    depth: u8,
    nodes: u64,
    last_elapsed: Duration,
}

impl Searcher {
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            nodes: 0,
            last_elapsed: Duration::ZERO,
        }
    }

    /// Picks the best move for `player` over its full legal move set.
    /// Returns `None` when the player cannot move.
    pub fn choose_move(&mut self, board: &Board, player: Player) -> Option<Move> {
        let candidates = board.legal_moves(player);
        self.choose_among(board, player, &candidates)
    }

    /// Picks the best move for `player` among `candidates`, used both at the
    /// root and for chain-capture continuations restricted to one piece.
    pub fn choose_among(
        &mut self,
        board: &Board,
        player: Player,
        candidates: &[Move],
    ) -> Option<Move> {
        let started = Instant::now();
        self.nodes = 0;

        let mut best_move = None;
        let mut best_score = MIN_SCORE;
        for &mv in candidates {
            let mut next = *board;
            next.apply_move(&mv);
            let value = self.minimax(
                &next,
                self.depth.saturating_sub(1),
                MIN_SCORE,
                MAX_SCORE,
                player.opponent() == Player::Human,
            );
            let score = value * player.sign();
            if best_move.is_none() || score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
        }

        self.last_elapsed = started.elapsed();
        best_move
    }

    /// Game value of `board` searched `depth` plies deep. At depth 0, or when
    /// the side to move has no legal move, the static evaluation of the
    /// position is returned as-is.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: f32,
        mut beta: f32,
        maximizing: bool,
    ) -> f32 {
        self.nodes += 1;
        if depth == 0 {
            return evaluate(board);
        }

        let player = if maximizing { Player::Human } else { Player::Ai };
        let moves = board.legal_moves(player);
        if moves.is_empty() {
            return evaluate(board);
        }

        if maximizing {
            let mut best = MIN_SCORE;
            for mv in moves {
                let mut next = *board;
                next.apply_move(&mv);
                let value = self.minimax(&next, depth - 1, alpha, beta, false);
                best = best.max(value);
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = MAX_SCORE;
            for mv in moves {
                let mut next = *board;
                next.apply_move(&mv);
                let value = self.minimax(&next, depth - 1, alpha, beta, true);
                best = best.min(value);
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Positions visited by the most recent search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Wall-clock time of the most recent search.
    pub fn last_elapsed(&self) -> Duration {
        self.last_elapsed
    }
}

/// Production `MoveSelector`: a fresh fixed-depth search per decision.
#[derive(Debug, Clone, Copy)]
pub struct MinimaxSelector {
    depth: u8,
}

impl MinimaxSelector {
    pub fn new(depth: u8) -> Self {
        Self { depth }
    }
}

impl MoveSelector for MinimaxSelector {
    fn select_move(&self, board: &Board, player: Player, candidates: &[Move]) -> Option<Move> {
        Searcher::new(self.depth).choose_among(board, player, candidates)
    }
}
