use strum::VariantArray;

use crate::location::Location;

/// The four orthogonal steps available on a rectangular board.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Toward the extraction row.
    Up,
    /// Toward higher columns.
    Right,
    /// Away from the extraction row.
    Down,
    /// Toward lower columns.
    Left,
}

impl SquareStep {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// Stepping off the top or left edge wraps around to a huge coordinate, so callers must bounds-check the result.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Right => location.offset_by((1, 0)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
        }
    }

    /// Steps which, from a given location, land on a location indexed higher in row-major order.
    ///
    /// Visiting every cell and adding an edge for each of these produces every grid edge exactly once.
    pub const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Down];

    /// Determine the direction from `a` to `b`, if they are orthogonally adjacent.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }
}

#[cfg(test)]
mod tests {
    use crate::location::Location;
    use crate::shape::SquareStep;

    #[test]
    fn direction_to_adjacent() {
        assert_eq!(SquareStep::direction_to(Location(1, 2), Location(1, 1)), Some(SquareStep::Up));
        assert_eq!(SquareStep::direction_to(Location(1, 2), Location(0, 2)), Some(SquareStep::Left));
        assert_eq!(SquareStep::direction_to(Location(1, 2), Location(0, 1)), None);
    }

    #[test]
    fn forward_steps_cover_each_edge_once() {
        for step in SquareStep::FORWARD_VARIANTS {
            let back = SquareStep::direction_to(step.attempt_from(Location(1, 1)), Location(1, 1));
            assert!(back.is_some_and(|b| !SquareStep::FORWARD_VARIANTS.contains(&b)));
        }
    }
}
