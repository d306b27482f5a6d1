use ndarray::{Array2, AssignElem};

use crate::board::Board;
use crate::cell::Cell;
use crate::error::QueryError;
use crate::location::Location;

/// Which cells a single search may enter.
///
/// Masks are derived per query token from a [`Board`] and are never shared between queries.
/// Hypothetical removals are expressed by [`cleared`](Self::cleared) copies; the board itself never changes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PassabilityMask {
    cells: Array2<bool>,
}

impl PassabilityMask {
    /// The mask seen by the token at `token`: empty cells and the token's own cell are passable.
    pub fn for_token(board: &Board, token: Location) -> Result<Self, QueryError> {
        if board.token_at(token)?.is_none() {
            return Err(QueryError::NoToken(token));
        }

        Ok(Self {
            cells: Array2::from_shape_fn(board.cells.raw_dim(), |index| match board.cells[index] {
                Cell::Disabled => false,
                Cell::Empty => true,
                Cell::Occupied { .. } => Location::from(index) == token,
            }),
        })
    }

    /// A copy of this mask with every location in `locations` made passable, as if the tokens there were removed.
    pub fn cleared(&self, locations: &[Location]) -> Result<Self, QueryError> {
        let mut cells = self.cells.clone();
        for location in locations {
            match cells.get_mut(location.as_index()) {
                Some(slot) => slot.assign_elem(true),
                None => return Err(QueryError::OutOfBounds(*location)),
            }
        }

        Ok(Self { cells })
    }

    /// Whether `location` may be entered. Locations off the mask are never passable.
    pub fn is_passable(&self, location: Location) -> bool {
        self.cells.get(location.as_index()).copied().unwrap_or(false)
    }

    /// Mask dimensions in `(width, height)` order.
    pub fn dims(&self) -> (usize, usize) {
        (self.cells.ncols(), self.cells.nrows())
    }

    pub(crate) fn ensure_fits(&self, board: &Board) -> Result<(), QueryError> {
        let (mask_width, mask_height) = self.dims();
        if (mask_width, mask_height) != (board.width(), board.height()) {
            return Err(QueryError::MaskMismatch {
                mask_width,
                mask_height,
                board_width: board.width(),
                board_height: board.height(),
            });
        }

        Ok(())
    }
}
