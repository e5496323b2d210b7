//! Exhaustive minimax search for the first player.
//!
//! Scores are depth-adjusted: a win found at depth `d` is worth
//! `WIN_SCORE - d` to the maximizer and a loss `-WIN_SCORE + d`, so quicker
//! wins and slower losses are preferred. Draws score zero.

use crate::{Board, GameStatus, Player, Position};
use tracing::{debug, instrument};

/// Terminal score before depth adjustment (cells + 1).
pub const WIN_SCORE: i32 = 10;

/// Scores `board` with `maximizing` telling whose turn it is at this ply.
///
/// The first player is always the maximizer. Children are explored on copies
/// of the board, so the caller's board is never modified.
pub fn evaluate(board: &Board, depth: i32, maximizing: bool) -> i32 {
    match board.status() {
        GameStatus::Won(Player::First) => return WIN_SCORE - depth,
        GameStatus::Won(Player::Second) => return -WIN_SCORE + depth,
        GameStatus::Draw => return 0,
        GameStatus::InProgress => {}
    }

    let (mover, mut best) = if maximizing {
        (Player::First, i32::MIN)
    } else {
        (Player::Second, i32::MAX)
    };

    for pos in Position::ALL {
        let mut child = *board;
        if child.place(pos, mover).is_err() {
            continue;
        }
        let value = evaluate(&child, depth + 1, !maximizing);
        best = if maximizing {
            best.max(value)
        } else {
            best.min(value)
        };
    }

    best
}

/// Picks the first player's optimal move.
///
/// Positions are tried in row-major order and only a strictly better score
/// replaces the current pick, so ties go to the lowest-numbered cell.
/// Returns `None` when the board has no empty cell.
#[instrument(level = "debug", skip(board))]
pub fn find_best_move(board: &Board) -> Option<Position> {
    let mut best: Option<(Position, i32)> = None;

    for pos in board.empty_positions() {
        let mut child = *board;
        if child.place(pos, Player::First).is_err() {
            continue;
        }
        let score = evaluate(&child, 0, false);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
    }

    if let Some((pos, score)) = best {
        debug!(position = %pos, score, "Selected move");
    }
    best.map(|(pos, _)| pos)
}
