//! Draw detection logic for tic-tac-toe.

use super::win::check_winner;
use crate::{Board, Cell};

/// Checks if the board is full (all cells marked).
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|cell| *cell != Cell::Empty)
}

/// A full board with no winner.
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position};

    fn fill(board: &mut Board, marks: &str) {
        for (pos, mark) in Position::ALL.into_iter().zip(marks.chars()) {
            let player = match mark {
                'X' => Player::First,
                'O' => Player::Second,
                _ => continue,
            };
            board.place(pos, player).unwrap();
        }
    }

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
        assert!(!is_draw(&Board::new()));
    }

    #[test]
    fn test_draw_detection() {
        let mut board = Board::new();
        fill(&mut board, "XOXOXXOXO");
        assert!(is_full(&board));
        assert!(is_draw(&board));
    }

    #[test]
    fn test_full_board_with_winner_is_not_draw() {
        let mut board = Board::new();
        fill(&mut board, "XXXOOXXOO");
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }

    #[derive(Debug, Default)]
    struct Walk {
        nodes: usize,
        draws: usize,
    }

    fn walk_games(board: Board, to_move: Player, walk: &mut Walk) {
        walk.nodes += 1;
        let won = board.check_win().is_some();
        let drawn = board.check_draw();
        assert!(!(won && drawn), "win and draw overlap on\n{board}");
        if drawn {
            walk.draws += 1;
        }
        if won || drawn {
            return;
        }

        let next = match to_move {
            Player::First => Player::Second,
            Player::Second => Player::First,
        };
        for pos in board.empty_positions() {
            let mut child = board;
            child.place(pos, to_move).unwrap();
            walk_games(child, next, walk);
        }
    }

    #[test]
    fn test_win_and_draw_are_exclusive_in_every_game() {
        let mut walk = Walk::default();
        walk_games(Board::new(), Player::First, &mut walk);
        assert_eq!(walk.nodes, 549_946);
        assert_eq!(walk.draws, 46_080);
    }
}
