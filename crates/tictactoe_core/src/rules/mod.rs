//! Game rules for tic-tac-toe.
//!
//! Pure functions evaluating a board for terminal states, kept apart from
//! board storage so the search and the session layer share one definition.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::check_winner;
