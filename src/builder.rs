use std::num::NonZero;
use std::ops::IndexMut;

use ndarray::{Array2, AssignElem};
use petgraph::graphmap::UnGraphMap;

use crate::board::Board;
use crate::cell::{Cell, Color, DISABLED_DISPLAY, EMPTY_DISPLAY};
use crate::error::SnapshotError;
use crate::location::{Coord, Location};
use crate::shape::SquareStep;

/// Assembles a [`Board`] snapshot from the hosting application's state.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// The first invalid operation puts the builder in an invalid state; every later operation does nothing
/// and [`build`](Self::build) reports the original reason.
#[derive(Clone, Debug)]
pub struct SnapshotBuilder {
    // width, height
    dims: (Coord, Coord),
    cells: Array2<Cell>,
    invalid_reason: Option<SnapshotError>,
}

impl SnapshotBuilder {
    /// Construct an empty builder with the specified dimensions, specified in `(width, height)` order.
    ///
    /// Zero dimensions put the builder in a [`ZeroDimension`](SnapshotError::ZeroDimension) invalid state, and a
    /// cell count past `isize::MAX` in a [`TooLarge`](SnapshotError::TooLarge) one. Neither allocates any cells.
    pub fn with_dims(width: Coord, height: Coord) -> Self {
        let invalid_reason = if width == 0 || height == 0 {
            Some(SnapshotError::ZeroDimension { width, height })
        } else if width.checked_mul(height).map_or(true, |count| count > isize::MAX as usize) {
            Some(SnapshotError::TooLarge { width, height })
        } else {
            None
        };

        // row major
        let shape = if invalid_reason.is_some() { (0, 0) } else { (height, width) };
        Self {
            dims: (width, height),
            cells: Array2::from_shape_simple_fn(shape, Cell::default),
            invalid_reason,
        }
    }

    /// Parse a board from rows of legend text, row 0 first.
    ///
    /// `.` is empty, `X` is disabled and any other character is a token of that color.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let height = rows.len();
        let width = rows.first().map(|row| row.as_ref().chars().count()).unwrap_or(0);
        let mut builder = Self::with_dims(width, height);

        for (y, row) in rows.iter().enumerate() {
            let found = row.as_ref().chars().count();
            if found != width {
                builder.invalidate(SnapshotError::JaggedRow { row: y, expected: width, found });
                return builder;
            }

            for (x, code) in row.as_ref().chars().enumerate() {
                let location = Location(x, y);
                match code {
                    EMPTY_DISPLAY => {}
                    DISABLED_DISPLAY => { builder.disable(location); }
                    other => match Color::new(other) {
                        Some(color) => { builder.add_token(color, location); }
                        None => builder.invalidate(SnapshotError::BadCellCode { location, code: other.to_string() }),
                    }
                }
            }
        }

        builder
    }

    fn invalidate(&mut self, reason: SnapshotError) {
        if self.invalid_reason.is_none() {
            self.invalid_reason = Some(reason);
        }
    }

    fn place(&mut self, location: Location, cell: Cell) -> &mut Self {
        if self.invalid_reason.is_some() {
            return self;
        }

        if location.0 >= self.dims.0 || location.1 >= self.dims.1 {
            self.invalidate(SnapshotError::FeatureOutOfBounds(location));
            return self;
        }

        let slot = self.cells.index_mut(location.as_index());
        if *slot != Cell::Empty {
            self.invalidate(SnapshotError::CellTaken(location));
            return self;
        }

        slot.assign_elem(cell);
        self
    }

    /// Place a token of `color` at `location`.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](SnapshotError::FeatureOutOfBounds) or
    /// [`CellTaken`](SnapshotError::CellTaken) invalid state.
    pub fn add_token(&mut self, color: Color, location: Location) -> &mut Self {
        self.place(location, Cell::Occupied { color })
    }

    /// Mark `location` as permanently impassable.
    ///
    /// Same failure conditions as [`add_token`](Self::add_token).
    pub fn disable(&mut self, location: Location) -> &mut Self {
        self.place(location, Cell::Disabled)
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&SnapshotError)` otherwise.
    pub fn is_valid(&self) -> Option<&SnapshotError> {
        self.invalid_reason.as_ref()
    }

    /// Convert the state of this builder into a [`Board`].
    pub fn build(&self) -> Result<Board, SnapshotError> {
        if let Some(reason) = &self.invalid_reason {
            return Err(reason.clone());
        }

        let (width, height) = match (NonZero::new(self.dims.0), NonZero::new(self.dims.1)) {
            (Some(w), Some(h)) => (w, h),
            _ => return Err(SnapshotError::ZeroDimension { width: self.dims.0, height: self.dims.1 }),
        };

        let mut graph = UnGraphMap::with_capacity(
            // naively allocate for a complete grid of this size, which usually isn't too far off
            self.cells.len(),
            // "horizontal" edges
            (width.get() - 1) * height.get()
                // "vertical" edges
                + (height.get() - 1) * width.get(),
        );

        // disabled cells never join the graph, so no search can route through them
        for (index, cell) in self.cells.indexed_iter() {
            if *cell != Cell::Disabled {
                graph.add_node(Location::from(index));
            }
        }

        for (index, cell) in self.cells.indexed_iter() {
            if *cell == Cell::Disabled {
                continue;
            }
            let location = Location::from(index);
            // add edges down and to the right, if possible
            for step in SquareStep::FORWARD_VARIANTS {
                let other = step.attempt_from(location);
                if self.cells.get(other.as_index()).is_some_and(|c| *c != Cell::Disabled) {
                    graph.add_edge(location, other, *step);
                }
            }
        }

        Ok(Board {
            graph,
            dims: (width, height),
            cells: self.cells.clone(),
        })
    }
}
