//! Board positions and their wire encoding.

use tracing::instrument;

/// A position on the tic-tac-toe board.
///
/// On the wire a position travels as the ASCII digit `'1'..='9'`,
/// numbered row-major from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter)]
pub enum Position {
    /// Top-left (digit 1)
    TopLeft,
    /// Top-center (digit 2)
    TopCenter,
    /// Top-right (digit 3)
    TopRight,
    /// Middle-left (digit 4)
    MiddleLeft,
    /// Center (digit 5)
    Center,
    /// Middle-right (digit 6)
    MiddleRight,
    /// Bottom-left (digit 7)
    BottomLeft,
    /// Bottom-center (digit 8)
    BottomCenter,
    /// Bottom-right (digit 9)
    BottomRight,
}

impl Position {
    /// All 9 positions, row-major.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Board number (1-9) as players see it.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Encodes the position as its ASCII wire digit.
    pub fn to_digit(self) -> u8 {
        b'0' + self.number()
    }

    /// Decodes an ASCII wire digit; anything outside `'1'..='9'` is `None`.
    #[instrument(level = "trace")]
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            b'1'..=b'9' => Self::from_index(usize::from(digit - b'1')),
            _ => None,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.number(), self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_digits_cover_the_board() {
        for (index, pos) in Position::iter().enumerate() {
            assert_eq!(pos.to_index(), index);
            assert_eq!(Position::from_digit(pos.to_digit()), Some(pos));
        }
        assert_eq!(Position::TopLeft.to_digit(), b'1');
        assert_eq!(Position::BottomRight.to_digit(), b'9');
    }

    #[test]
    fn test_from_digit_rejects_out_of_range() {
        assert_eq!(Position::from_digit(b'0'), None);
        assert_eq!(Position::from_digit(b':'), None);
        assert_eq!(Position::from_digit(5), None);
        assert_eq!(Position::from_index(9), None);
    }
}
