//! Pure tic-tac-toe game logic.
//!
//! - **Board**: 3x3 grid of write-once cells with win/draw tests
//! - **Position**: typed board location with its ASCII wire digit
//! - **Minimax**: exhaustive, depth-adjusted search for the first player
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{find_best_move, Board, Player, Position};
//!
//! let mut board = Board::new();
//! board.place(Position::TopLeft, Player::First).unwrap();
//! board.place(Position::Center, Player::Second).unwrap();
//! let reply = find_best_move(&board).expect("board has room");
//! assert!(board.is_occupiable(reply));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod minimax;
mod position;
pub mod rules;
mod types;

pub use minimax::{WIN_SCORE, evaluate, find_best_move};
pub use position::Position;
pub use types::{Board, Cell, GameStatus, PlaceError, Player};
