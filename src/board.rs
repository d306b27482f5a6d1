use std::fmt::{Display, Formatter};
use std::ops::IndexMut;
use std::str::FromStr;

use itertools::Itertools;
use ndarray::{Array2, AssignElem};
use petgraph::graphmap::UnGraphMap;

use crate::builder::SnapshotBuilder;
use crate::cell::{Cell, Color};
use crate::error::{QueryError, SnapshotError};
use crate::location::{Coord, Dimension, Location};
use crate::shape::SquareStep;

/// An immutable snapshot of the board for one decision.
///
/// Every non-disabled cell is a node of an undirected grid graph, with edges between orthogonal neighbors.
/// Occupancy is not encoded in the graph; searches decide per query which nodes they may enter.
///
/// [`Board`]s should be built using a [`SnapshotBuilder`], [`Board::from_rows`] or a
/// [`SnapshotV1`](crate::SnapshotV1).
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) graph: UnGraphMap<Location, SquareStep>,
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) cells: Array2<Cell>,
}

impl Board {
    /// Parse a board from rows of legend text. See [`SnapshotBuilder::from_rows`].
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, SnapshotError> {
        SnapshotBuilder::from_rows(rows).build()
    }

    /// Board width (number of columns).
    pub fn width(&self) -> Coord {
        self.dims.0.get()
    }

    /// Board height (number of rows).
    pub fn height(&self) -> Coord {
        self.dims.1.get()
    }

    /// Board dimensions in `(width, height)` order.
    pub fn dims(&self) -> (Coord, Coord) {
        (self.width(), self.height())
    }

    /// Whether `location` is on the board.
    pub fn contains(&self, location: Location) -> bool {
        location.0 < self.width() && location.1 < self.height()
    }

    /// The cell at `location`.
    pub fn cell(&self, location: Location) -> Result<Cell, QueryError> {
        self.cells.get(location.as_index())
            .copied()
            .ok_or(QueryError::OutOfBounds(location))
    }

    /// The color of the token at `location`, or [`None`] if the cell is empty.
    ///
    /// Disabled cells can never hold a token, so asking about one is a [`QueryError::Disabled`].
    pub fn token_at(&self, location: Location) -> Result<Option<Color>, QueryError> {
        match self.cell(location)? {
            Cell::Disabled => Err(QueryError::Disabled(location)),
            cell => Ok(cell.color()),
        }
    }

    /// Whether a search on behalf of the token at `query` may enter `location`.
    ///
    /// A cell is passable if it is not disabled and is either empty or holds the query token itself.
    pub fn is_passable(&self, location: Location, query: Location) -> Result<bool, QueryError> {
        Ok(match self.cell(location)? {
            Cell::Disabled => false,
            Cell::Empty => true,
            Cell::Occupied { .. } => location == query,
        })
    }

    /// All tokens on the board in reading order (row by row).
    pub fn tokens(&self) -> impl Iterator<Item=(Location, Color)> + '_ {
        self.cells.indexed_iter()
            .filter_map(|(index, cell)| cell.color().map(|color| (Location::from(index), color)))
    }

    /// All tokens of `color` in reading order.
    pub fn tokens_of(&self, color: Color) -> impl Iterator<Item=Location> + '_ {
        self.tokens()
            .filter(move |(_, c)| *c == color)
            .map(|(location, _)| location)
    }

    /// Every color present on the board, sorted.
    pub fn colors(&self) -> Vec<Color> {
        self.tokens().map(|(_, color)| color).sorted().dedup().collect_vec()
    }

    /// A copy of this board with the tokens at `locations` removed.
    ///
    /// The snapshot itself is left untouched.
    pub fn without(&self, locations: &[Location]) -> Result<Self, QueryError> {
        let mut cells = self.cells.clone();
        for location in locations {
            if self.token_at(*location)?.is_none() {
                return Err(QueryError::NoToken(*location));
            }
            cells.index_mut(location.as_index()).assign_elem(Cell::Empty);
        }

        Ok(Self {
            graph: self.graph.clone(),
            dims: self.dims,
            cells,
        })
    }
}

impl FromStr for Board {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rows(&s.lines().collect_vec())
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.cells.nrows() * (self.cells.ncols() + 1));

        for row in self.cells.rows() {
            for cell in row {
                out.push(cell.display());
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
