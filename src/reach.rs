use log::trace;
use petgraph::visit::{Bfs, NodeFiltered};

use crate::board::Board;
use crate::error::QueryError;
use crate::location::Location;
use crate::mask::PassabilityMask;

/// Whether the token at `token` can walk to the extraction row through cells `mask` marks passable.
///
/// Tokens already in the extraction row are trivially reachable. Otherwise this is a breadth-first search over
/// the board's grid graph restricted to passable cells; each cell is visited at most once and `mask` is only read.
///
/// `token` must hold a token, and `mask` must have the board's dimensions.
pub fn reachable(board: &Board, token: Location, mask: &PassabilityMask) -> Result<bool, QueryError> {
    if board.token_at(token)?.is_none() {
        return Err(QueryError::NoToken(token));
    }
    mask.ensure_fits(board)?;

    if token.in_extraction_row() {
        return Ok(true);
    }

    let passable = NodeFiltered::from_fn(&board.graph, |location: Location| mask.is_passable(location));
    let mut bfs = Bfs::new(&passable, token);
    let mut visited = 0usize;
    while let Some(location) = bfs.next(&passable) {
        visited += 1;
        if location.in_extraction_row() {
            trace!("{} reaches the extraction row at {} after {} cells", token, location, visited);
            return Ok(true);
        }
    }

    trace!("{} is walled in after {} cells", token, visited);
    Ok(false)
}

/// [`reachable`] on the token's own mask, i.e. with the board exactly as it is.
pub fn reachable_now(board: &Board, token: Location) -> Result<bool, QueryError> {
    reachable(board, token, &PassabilityMask::for_token(board, token)?)
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::error::QueryError;
    use crate::location::Location;
    use crate::mask::PassabilityMask;
    use crate::reach::{reachable, reachable_now};

    #[test]
    fn extraction_row_is_reachable() {
        let board: Board = "RXR\nXXX".parse().unwrap();
        assert_eq!(reachable_now(&board, Location(0, 0)), Ok(true));
    }

    #[test]
    fn winding_path() {
        let board: Board = "BB.\nB..\nR.B".parse().unwrap();
        assert_eq!(reachable_now(&board, Location(0, 2)), Ok(true));
    }

    #[test]
    fn walled_in() {
        let board: Board = "...\nXBX\n.R.".parse().unwrap();
        assert_eq!(reachable_now(&board, Location(1, 2)), Ok(false));
    }

    #[test]
    fn disabled_cells_stay_closed_even_if_mask_says_otherwise() {
        let board: Board = ".\nX\nR".parse().unwrap();
        let mask = PassabilityMask::for_token(&board, Location(0, 2)).unwrap();
        // clearing a disabled cell in a mask cannot add it to the grid graph
        let mask = mask.cleared(&[Location(0, 1)]).unwrap();
        assert_eq!(reachable(&board, Location(0, 2), &mask), Ok(false));
    }

    #[test]
    fn mask_is_untouched_and_result_stable() {
        let board: Board = "B..\nBB.\nRB.".parse().unwrap();
        let mask = PassabilityMask::for_token(&board, Location(0, 2)).unwrap();
        let before = mask.clone();
        let first = reachable(&board, Location(0, 2), &mask);
        let second = reachable(&board, Location(0, 2), &mask);
        assert_eq!(first, Ok(false));
        assert_eq!(first, second);
        assert_eq!(mask, before);
    }

    #[test]
    fn preconditions() {
        let board: Board = "..\nXR".parse().unwrap();
        let mask = PassabilityMask::for_token(&board, Location(1, 1)).unwrap();
        assert_eq!(reachable(&board, Location(2, 1), &mask), Err(QueryError::OutOfBounds(Location(2, 1))));
        assert_eq!(reachable(&board, Location(0, 1), &mask), Err(QueryError::Disabled(Location(0, 1))));

        assert_eq!(reachable(&board, Location(0, 0), &mask), Err(QueryError::NoToken(Location(0, 0))));

        let open: Board = "...\n.R.\n...".parse().unwrap();
        let open_mask = PassabilityMask::for_token(&open, Location(1, 1)).unwrap();
        assert_eq!(reachable(&open, Location(0, 2), &open_mask), Err(QueryError::NoToken(Location(0, 2))));

        let other: Board = "...\n..R".parse().unwrap();
        assert!(matches!(reachable(&other, Location(2, 1), &mask), Err(QueryError::MaskMismatch { .. })));
    }
}
