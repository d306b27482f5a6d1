use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = usize;
pub(crate) type Dimension = NonZero<Coord>;

/// Row index of the extraction row. A token standing here can be delivered immediately.
pub const EXTRACTION_ROW: Coord = 0;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(x, y)` on a board, i.e. `(column, row)`. The top left corner is `Location(0, 0)` and row 0 is the extraction row.
///
/// The derived ordering compares `x` first. Use [`Location::reading_order`] wherever results must come out row by row.
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Sort key ordering locations by row, then by column.
    pub fn reading_order(&self) -> (Coord, Coord) {
        self.as_index()
    }

    /// Manhattan distance between `self` and `other`.
    pub fn manhattan(&self, other: Location) -> Coord {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1)
    }

    /// Whether this location lies in the extraction row.
    pub fn in_extraction_row(&self) -> bool {
        self.1 == EXTRACTION_ROW
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::Location;

    #[test]
    fn reading_order_is_row_major() {
        let mut locations = vec![Location(2, 0), Location(0, 1), Location(1, 0)];
        locations.sort_by_key(Location::reading_order);
        assert_eq!(locations, vec![Location(1, 0), Location(2, 0), Location(0, 1)]);
    }

    #[test]
    fn offset_wraps_off_the_board() {
        // stepping up from row 0 leaves the board; bounds checks catch the wrapped value
        assert_eq!(Location(1, 0).offset_by((0, -1)).1, usize::MAX);
    }

    #[test]
    fn manhattan() {
        assert_eq!(Location(1, 2).manhattan(Location(1, 1)), 1);
        assert_eq!(Location(0, 0).manhattan(Location(2, 2)), 4);
    }
}
