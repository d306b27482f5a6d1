use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Legend character for an empty cell.
pub const EMPTY_DISPLAY: char = '.';
/// Legend character for a disabled cell.
pub const DISABLED_DISPLAY: char = 'X';

/// A token color, identified by the single character used to print it.
///
/// Any printable, non-whitespace character other than the two reserved legend characters
/// ([`EMPTY_DISPLAY`] and [`DISABLED_DISPLAY`]) is a valid color code.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Color(char);

impl Color {
    /// Wrap `code` as a color, or return [`None`] if it collides with the legend or cannot be printed in one column.
    pub fn new(code: char) -> Option<Self> {
        match code {
            EMPTY_DISPLAY | DISABLED_DISPLAY => None,
            c if c.is_whitespace() || c.is_control() => None,
            c => Some(Self(c)),
        }
    }

    /// The character this color prints as.
    pub fn code(&self) -> char {
        self.0
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contents of one board cell. A cell is exactly one of these at any time.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Cell {
    /// Permanently impassable.
    Disabled,
    /// Holds a token of the given color.
    Occupied { color: Color },
    /// Free to move through.
    #[default]
    Empty,
}

impl Cell {
    /// The color of the token here, if any.
    pub fn color(&self) -> Option<Color> {
        match self {
            Cell::Occupied { color } => Some(*color),
            _ => None,
        }
    }

    pub(crate) fn display(&self) -> char {
        match self {
            Cell::Disabled => DISABLED_DISPLAY,
            Cell::Occupied { color } => color.code(),
            Cell::Empty => EMPTY_DISPLAY,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
