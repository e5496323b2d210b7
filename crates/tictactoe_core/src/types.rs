//! Core domain types for tic-tac-toe.

use super::position::Position;
use super::rules;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Player {
    /// The server, which always moves first.
    #[display("Player 1 (X)")]
    First,
    /// The remote peer bound to a session.
    #[display("Player 2 (O)")]
    Second,
}

impl Player {
    /// Board mark used when rendering this player's cells.
    pub fn mark(self) -> char {
        match self {
            Player::First => 'X',
            Player::Second => 'O',
        }
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Nobody has played here yet.
    #[default]
    Empty,
    /// Cell claimed by a player.
    Marked(Player),
}

/// Error returned when placing a mark on a cell that is already claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlaceError {
    /// The cell at this position already holds a mark.
    #[display("Square {} is already taken", _0)]
    Occupied(#[error(not(source))] Position),
}

/// 3x3 tic-tac-toe board.
///
/// Cells go from empty to marked exactly once; the only way back is
/// [`Board::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    /// Cells in row-major order.
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// True while nobody has marked the cell at `pos`.
    pub fn is_occupiable(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Marks the cell at `pos` for `player`.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::Occupied`] if the cell was already marked; the
    /// board is left untouched in that case.
    pub fn place(&mut self, pos: Position, player: Player) -> Result<(), PlaceError> {
        if !self.is_occupiable(pos) {
            return Err(PlaceError::Occupied(pos));
        }
        self.cells[pos.to_index()] = Cell::Marked(player);
        Ok(())
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; 9];
    }

    /// Positions that can still be played, in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL
            .into_iter()
            .filter(|pos| self.is_occupiable(*pos))
    }

    /// Owner of a completed line, if any.
    pub fn check_win(&self) -> Option<Player> {
        rules::check_winner(self)
    }

    /// Board is full and nobody completed a line.
    pub fn check_draw(&self) -> bool {
        rules::is_draw(self)
    }

    /// Classifies the board as in progress, won or drawn.
    pub fn status(&self) -> GameStatus {
        match self.check_win() {
            Some(winner) => GameStatus::Won(winner),
            None if rules::is_full(self) => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }
}

/// Current status of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GameStatus {
    /// Game is ongoing.
    #[display("in progress")]
    InProgress,
    /// Game ended in a win.
    #[display("{} wins", _0)]
    Won(Player),
    /// Game ended in a draw.
    #[display("draw")]
    Draw,
}

impl GameStatus {
    /// True for a win or a draw.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, cells) in self.cells.chunks(3).enumerate() {
            let symbols: Vec<char> = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| match cell {
                    Cell::Empty => char::from(b'1' + (row * 3 + col) as u8),
                    Cell::Marked(player) => player.mark(),
                })
                .collect();
            write!(f, " {} | {} | {} ", symbols[0], symbols[1], symbols[2])?;
            if row < 2 {
                f.write_str("\n---+---+---\n")?;
            }
        }
        Ok(())
    }
}
